//! Scroll-section transforms and the landing page's layer stack

use gracie_particles::{AnimatorConfig, ColorScheme};

/// Full-viewport sections on the landing page
pub const SECTION_COUNT: usize = 5;

/// Index of the section hosting the analysis tool
pub const ANALYSIS_SECTION: usize = 4;

/// Per-section scroll progress in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionProgress {
    pub sections: [f32; SECTION_COUNT],
}

impl SectionProgress {
    /// Section `n` runs from `n * vh` to `(n + 1) * vh` of scroll
    pub fn from_scroll(scroll_y: f32, viewport_height: f32) -> Self {
        let mut sections = [0.0; SECTION_COUNT];
        if viewport_height > 0.0 && scroll_y.is_finite() {
            for (n, slot) in sections.iter_mut().enumerate() {
                let start = n as f32 * viewport_height;
                *slot = ((scroll_y - start) / viewport_height).clamp(0.0, 1.0);
            }
        }
        Self { sections }
    }

    /// Progress of one section; out-of-range indices read as 0
    pub fn get(&self, index: usize) -> f32 {
        self.sections.get(index).copied().unwrap_or(0.0)
    }
}

/// Vertical offset and fade applied to one section's content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTransform {
    pub translate_y: f32,
    pub opacity: f32,
}

/// Transforms for the hero and the three text sections that follow it
pub fn section_transforms(scroll_y: f32, viewport_height: f32) -> [SectionTransform; 4] {
    let progress = SectionProgress::from_scroll(scroll_y, viewport_height);
    let hero = SectionTransform {
        translate_y: scroll_y * 0.5,
        opacity: (1.0 - progress.get(0) * 1.5).max(0.0),
    };
    let follow = |k: usize| SectionTransform {
        translate_y: (scroll_y - k as f32 * viewport_height) * 0.3,
        opacity: (1.0 - progress.get(k) * 1.2).max(0.0),
    };
    [hero, follow(1), follow(2), follow(3)]
}

/// Scroll offset that brings the analysis tool into view
pub fn analysis_anchor(viewport_height: f32) -> f32 {
    viewport_height * ANALYSIS_SECTION as f32
}

/// One animated layer on the landing page
#[derive(Debug, Clone)]
pub struct LayerSpec {
    pub name: &'static str,
    /// Section the layer sits in, which is also the progress it tracks
    pub section: usize,
    pub config: AnimatorConfig,
}

/// The landing page's animated layers, back to front within each section
pub fn landing_layers() -> Vec<LayerSpec> {
    let fireflies = |count| AnimatorConfig {
        count,
        ..AnimatorConfig::firefly()
    };
    let ambient = |scheme, count| AnimatorConfig {
        count,
        ..AnimatorConfig::ambient(scheme)
    };
    vec![
        LayerSpec {
            name: "hero-spotlight",
            section: 0,
            config: AnimatorConfig::spotlight(),
        },
        LayerSpec {
            name: "hero-fireflies-back",
            section: 0,
            config: fireflies(80),
        },
        LayerSpec {
            name: "hero-fireflies-front",
            section: 0,
            config: fireflies(50),
        },
        LayerSpec {
            name: "manipulated",
            section: 1,
            config: ambient(ColorScheme::Blue, 120),
        },
        LayerSpec {
            name: "gaslit",
            section: 2,
            config: ambient(ColorScheme::Purple, 100),
        },
        LayerSpec {
            name: "regain-control",
            section: 3,
            config: ambient(ColorScheme::Orange, 140),
        },
        LayerSpec {
            name: "analysis",
            section: ANALYSIS_SECTION,
            config: ambient(ColorScheme::Green, 80),
        },
    ]
}

/// Layers belonging to one section
pub fn section_layers(section: usize) -> Vec<LayerSpec> {
    landing_layers()
        .into_iter()
        .filter(|l| l.section == section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamped_per_section() {
        let p = SectionProgress::from_scroll(1500.0, 1000.0);
        assert_eq!(p.sections, [1.0, 0.5, 0.0, 0.0, 0.0]);
        assert_eq!(p.get(99), 0.0);
        assert_eq!(SectionProgress::from_scroll(500.0, 0.0).sections, [0.0; 5]);
    }

    #[test]
    fn hero_fades_faster_than_followers() {
        let t = section_transforms(400.0, 1000.0);
        assert_eq!(t[0].translate_y, 200.0);
        assert!((t[0].opacity - 0.4).abs() < 1e-6);
        assert!((t[1].translate_y - (-180.0)).abs() < 1e-4);
        assert_eq!(t[1].opacity, 1.0);

        let late = section_transforms(3000.0, 1000.0);
        assert_eq!(late[0].opacity, 0.0);
        assert_eq!(late[1].opacity, 0.0);
        assert_eq!(late[2].opacity, 0.0);
        assert_eq!(late[3].opacity, 1.0);
    }

    #[test]
    fn landing_layers_cover_every_section() {
        let layers = landing_layers();
        for section in 0..SECTION_COUNT {
            assert!(layers.iter().any(|l| l.section == section));
        }
        assert_eq!(section_layers(0).len(), 3);
        assert_eq!(section_layers(2)[0].config.scheme, ColorScheme::Purple);
        assert_eq!(analysis_anchor(900.0), 3600.0);
    }
}
