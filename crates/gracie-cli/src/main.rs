//! GRACIE CLI - headless animator renders, conversation analysis and plans

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analyze, checkout, plans, render, sections, techniques};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gracie")]
#[command(about = "Decorative canvas animators and manipulation analysis for GRACIE", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an animator (or a page section's layers) to a PNG image
    Render {
        /// ambient, firefly, spotlight, landing, or section-N (0-4)
        target: String,

        /// Animator config file (TOML); overrides the variant preset
        #[arg(long)]
        config: Option<String>,

        /// Frames to simulate before capturing
        #[arg(long, default_value = "120")]
        frames: usize,

        /// Image width in pixels
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "720")]
        height: u32,

        /// RNG seed for a reproducible field
        #[arg(long, default_value = "1")]
        seed: u32,

        /// Page scroll per frame, in pixels
        #[arg(long, default_value = "0")]
        scroll_speed: f32,

        /// Pointer position (comma-separated x,y)
        #[arg(long, value_parser = parse_vec2)]
        pointer: Option<[f32; 2]>,

        /// Render fireflies in their hover tint
        #[arg(long)]
        hover: bool,

        /// Output image path
        #[arg(short, long, default_value = "gracie.png")]
        output: String,
    },

    /// Analyse a conversation for manipulation techniques
    Analyze {
        /// Conversation text
        #[arg(long, conflicts_with = "image")]
        text: Option<String>,

        /// Screenshot of a conversation (png, jpg, gif, webp)
        #[arg(long)]
        image: Option<String>,

        /// Analysis provider (gemini, mock)
        #[arg(long, default_value = "gemini")]
        provider: String,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,

        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// List subscription plans
    Plans,

    /// Start a checkout session for a plan
    Checkout {
        /// Price identifier (see `gracie plans`)
        price_id: String,

        /// Session token; defaults to the configured one
        #[arg(long)]
        token: Option<String>,

        /// Config file to use instead of the layered lookup
        #[arg(long)]
        config: Option<String>,
    },

    /// Show the guide for a manipulation technique
    Techniques {
        /// Technique name; lists all when omitted
        name: Option<String>,
    },

    /// Show section progress and transforms for a scroll offset
    Sections {
        /// Page scroll offset in pixels
        #[arg(long, default_value = "0")]
        scroll: f32,

        /// Viewport height in pixels
        #[arg(long, default_value = "900")]
        viewport: f32,
    },
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    Ok([x, y])
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            target,
            config,
            frames,
            width,
            height,
            seed,
            scroll_speed,
            pointer,
            hover,
            output,
        } => render::run(render::RenderArgs {
            target,
            config,
            frames,
            width,
            height,
            seed,
            scroll_speed,
            pointer,
            hover,
            output,
        }),
        Commands::Analyze {
            text,
            image,
            provider,
            config,
            json,
        } => analyze::run(analyze::AnalyzeArgs {
            text,
            image,
            provider,
            config,
            json,
        }),
        Commands::Plans => plans::run(),
        Commands::Checkout {
            price_id,
            token,
            config,
        } => checkout::run(&price_id, token, config.as_deref()),
        Commands::Techniques { name } => techniques::run(name.as_deref()),
        Commands::Sections { scroll, viewport } => sections::run(scroll, viewport),
    }
}
