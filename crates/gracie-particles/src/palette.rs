//! Fixed color schemes for the ambient particle field

use gracie_core::Color;

/// Named color scheme selectable per ambient section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Blue,
    Purple,
    Orange,
    Green,
}

impl ColorScheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blue" => Some(ColorScheme::Blue),
            "purple" => Some(ColorScheme::Purple),
            "orange" => Some(ColorScheme::Orange),
            "green" => Some(ColorScheme::Green),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Blue => "blue",
            ColorScheme::Purple => "purple",
            ColorScheme::Orange => "orange",
            ColorScheme::Green => "green",
        }
    }

    pub fn palette(&self) -> Palette {
        // Each base hue is listed at 0.8/0.7/0.6 alpha for primary and 1.0/0.9/0.8 for hero
        let (base, secondary): ([(u8, u8, u8); 3], [(u8, u8, u8); 2]) = match self {
            ColorScheme::Blue => (
                [(79, 195, 247), (41, 182, 246), (3, 169, 244)],
                [(129, 212, 250), (100, 181, 246)],
            ),
            ColorScheme::Purple => (
                [(156, 39, 176), (142, 36, 170), (123, 31, 162)],
                [(186, 104, 200), (171, 71, 188)],
            ),
            ColorScheme::Orange => (
                [(255, 152, 0), (255, 143, 0), (255, 111, 0)],
                [(255, 183, 77), (255, 167, 38)],
            ),
            ColorScheme::Green => (
                [(76, 175, 80), (67, 160, 71), (56, 142, 60)],
                [(129, 199, 132), (102, 187, 106)],
            ),
        };

        let tinted = |alphas: [f32; 3]| -> Vec<Color> {
            base.iter()
                .zip(alphas)
                .map(|(&(r, g, b), a)| Color::rgba8(r, g, b, a))
                .collect()
        };

        Palette {
            primary: tinted([0.8, 0.7, 0.6]),
            secondary: secondary
                .iter()
                .zip([0.5, 0.4])
                .map(|(&(r, g, b), a)| Color::rgba8(r, g, b, a))
                .collect(),
            hero: tinted([1.0, 0.9, 0.8]),
        }
    }
}

/// The three color lists of one scheme
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub primary: Vec<Color>,
    pub secondary: Vec<Color>,
    pub hero: Vec<Color>,
}

impl Palette {
    /// Colors a particle may be drawn from: hero entities use the brighter subset
    pub fn pool(&self, hero: bool) -> &[Color] {
        if hero {
            &self.hero
        } else {
            &self.primary
        }
    }
}
