//! Headless animator-to-PNG render command

use anyhow::{bail, Context, Result};
use gracie_core::Vec2;
use gracie_particles::{AnimatorConfig, AnimatorVariant};
use gracie_render::HoverState;
use gracie_runtime::{
    landing_layers, section_layers, AnimationHost, Animator, FrameSignals, HeadlessScheduler,
    LayerSpec, Viewport, SECTION_COUNT,
};
use std::path::Path;

pub struct RenderArgs {
    pub target: String,
    pub config: Option<String>,
    pub frames: usize,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub scroll_speed: f32,
    pub pointer: Option<[f32; 2]>,
    pub hover: bool,
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RenderTarget {
    Variant(AnimatorVariant),
    Landing,
    Section(usize),
}

fn parse_target(s: &str) -> Result<RenderTarget> {
    if let Some(variant) = AnimatorVariant::from_name(s) {
        return Ok(RenderTarget::Variant(variant));
    }
    if s == "landing" {
        return Ok(RenderTarget::Landing);
    }
    if let Some(n) = s.strip_prefix("section-") {
        let n: usize = n
            .parse()
            .with_context(|| format!("Invalid section number in '{}'", s))?;
        if n >= SECTION_COUNT {
            bail!("Section {} out of range (0-{})", n, SECTION_COUNT - 1);
        }
        return Ok(RenderTarget::Section(n));
    }
    bail!(
        "Unknown render target '{}'. Use ambient, firefly, spotlight, landing, or section-N",
        s
    )
}

fn load_config(path: &str) -> Result<AnimatorConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path))?;
    let table: toml::value::Table =
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path))?;
    Ok(AnimatorConfig::from_toml(&table))
}

fn resolve_layers(target: RenderTarget, config: Option<&str>) -> Result<Vec<LayerSpec>> {
    if config.is_some() && !matches!(target, RenderTarget::Variant(_)) {
        bail!("--config only applies to a single animator variant");
    }
    Ok(match target {
        RenderTarget::Variant(variant) => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => AnimatorConfig::preset(variant),
            };
            vec![LayerSpec {
                name: variant.name(),
                section: 0,
                config,
            }]
        }
        RenderTarget::Landing => landing_layers(),
        RenderTarget::Section(n) => section_layers(n),
    })
}

pub fn run(args: RenderArgs) -> Result<()> {
    let target = parse_target(&args.target)?;
    let layers = resolve_layers(target, args.config.as_deref())?;
    let viewport = Viewport::new(args.width, args.height);

    let mut host = AnimationHost::new();
    for (i, layer) in layers.iter().enumerate() {
        let animator = Animator::new(layer.name, layer.config.clone())
            .with_seed(args.seed.wrapping_add(i as u32))
            .with_section(layer.section);
        host.add(Box::new(animator));
    }

    tracing::debug!(render_target = args.target.as_str(), layers = layers.len(), "mounting layers");
    let mut scheduler = HeadlessScheduler::default();
    host.mount_all(viewport, &mut scheduler);

    let hover = HoverState::from_bool(args.hover);
    let pointer = args.pointer.map(Vec2::from_array);
    let viewport_height = args.height as f32;
    let delivered = scheduler.run(&mut host, args.frames, |i| {
        let signals = FrameSignals::at_scroll(i as f32 * args.scroll_speed)
            .with_hover(hover)
            .with_viewport_height(viewport_height);
        match pointer {
            Some(p) => signals.with_pointer(p),
            None => signals,
        }
    });

    let frame = host.composite();
    host.unmount_all(&mut scheduler);

    if frame.is_empty() {
        bail!("Nothing to render for a {}x{} viewport", args.width, args.height);
    }
    frame
        .save_png(Path::new(&args.output))
        .with_context(|| format!("Failed to write {}", args.output))?;

    println!(
        "Rendered {} layer(s), {} frame(s) at {}x{} -> {}",
        layers.len(),
        delivered,
        args.width,
        args.height,
        args.output
    );
    Ok(())
}
