//! Technique guide command

use anyhow::{bail, Result};
use gracie_services::techniques::{guide, guide_names};

pub fn run(name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => match guide(name) {
            Some(g) => println!("{}", g),
            None => bail!(
                "No guide for '{}'. Available: {}",
                name,
                guide_names().join(", ")
            ),
        },
        None => {
            println!("Technique guides:");
            for name in guide_names() {
                println!("  {}", name);
            }
        }
    }
    Ok(())
}
