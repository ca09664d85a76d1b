//! Conversation analysis command

use anyhow::{anyhow, bail, Context, Result};
use gracie_services::panel::PROGRESS_TICK_MS;
use gracie_services::providers::create_provider;
use gracie_services::{AnalysisPanel, GracieConfig, InputTab, ProviderStatus};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

pub struct AnalyzeArgs {
    pub text: Option<String>,
    pub image: Option<String>,
    pub provider: String,
    pub config: Option<String>,
    pub json: bool,
}

pub(crate) fn load_config(path: Option<&str>) -> Result<GracieConfig> {
    match path {
        Some(p) => GracieConfig::load_from_file(Path::new(p))
            .with_context(|| format!("Failed to load config: {}", p)),
        None => GracieConfig::load().context("Failed to load config"),
    }
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let provider = create_provider(&args.provider, &config)
        .with_context(|| format!("Failed to create provider '{}'", args.provider))?;
    if provider.health_check() == ProviderStatus::NoApiKey {
        bail!("Provider '{}' has no API key configured", provider.name());
    }

    let mut panel = AnalysisPanel::new();
    if let Some(text) = &args.text {
        panel.set_text(text.as_str());
    }
    if let Some(image) = &args.image {
        panel.set_tab(InputTab::Image);
        if !panel.select_file(Path::new(image)) {
            let message = panel
                .error()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| format!("Could not use image {}", image));
            bail!(message);
        }
    }

    let input = panel.begin().map_err(|e| anyhow!(e.to_string()))?;
    println!("Analyzing {} with {}...", input.kind(), provider.name());

    let worker = std::thread::spawn(move || provider.analyze(&input));
    while !worker.is_finished() {
        std::thread::sleep(Duration::from_millis(PROGRESS_TICK_MS));
        let progress = panel.tick_progress();
        eprint!("\r  progress {:>3}%", progress);
        let _ = std::io::stderr().flush();
    }
    eprintln!("\r  progress 100%");

    let outcome = worker
        .join()
        .map_err(|_| anyhow!("Analysis worker panicked"))?;
    panel.finish(outcome);

    if let Some(err) = panel.error() {
        bail!(err.message.clone());
    }

    let result = panel
        .result()
        .ok_or_else(|| anyhow!("Analysis produced no result"))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if let Some(report) = panel.report() {
        println!("{}", report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_text_analysis_succeeds() {
        run(AnalyzeArgs {
            text: Some("You're too sensitive, I was just joking".into()),
            image: None,
            provider: "mock".into(),
            config: None,
            json: true,
        })
        .unwrap();
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = run(AnalyzeArgs {
            text: Some("  ".into()),
            image: None,
            provider: "mock".into(),
            config: None,
            json: false,
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter text or upload an image to analyze."
        );
    }

    #[test]
    fn unsupported_image_is_rejected() {
        let err = run(AnalyzeArgs {
            text: None,
            image: Some("notes.txt".into()),
            provider: "mock".into(),
            config: None,
            json: false,
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("Please select a valid image file"));
    }
}
