//! Scroll-section inspection command

use anyhow::{bail, Result};
use gracie_runtime::{
    analysis_anchor, section_layers, section_transforms, SectionProgress, SECTION_COUNT,
};

pub fn run(scroll: f32, viewport: f32) -> Result<()> {
    if viewport <= 0.0 {
        bail!("Viewport height must be positive");
    }
    let progress = SectionProgress::from_scroll(scroll, viewport);
    let transforms = section_transforms(scroll, viewport);

    println!("Scroll {:.0}px, viewport {:.0}px", scroll, viewport);
    for n in 0..SECTION_COUNT {
        let layers: Vec<&str> = section_layers(n).iter().map(|l| l.name).collect();
        print!("  section {}: progress {:.2}", n, progress.get(n));
        if let Some(t) = transforms.get(n) {
            print!("  translate_y {:>7.1}  opacity {:.2}", t.translate_y, t.opacity);
        }
        println!("  [{}]", layers.join(", "));
    }
    println!("Analysis anchor: {:.0}px", analysis_anchor(viewport));
    Ok(())
}
