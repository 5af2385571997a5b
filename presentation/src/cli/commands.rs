//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grid plus session summary
    Full,
    /// Only the grid
    Grid,
    /// Report and gallery as JSON
    Json,
}

/// CLI arguments for jasmine
#[derive(Parser, Debug)]
#[command(name = "jasmine")]
#[command(author, version, about = "Batch image generation studio")]
#[command(long_about = r#"
Jasmine fills a grid of image slots from a single text prompt.

Slots are requested in batches of concurrent calls to a text-to-image
gateway. Duplicate images are rejected by content hash and retried, failed
slots are retried after a cooldown, and previously generated images stay in
place until replaced.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./jasmine.toml      Project-level config
3. ~/.config/jasmine/config.toml   Global config

Example:
  jasmine "a lighthouse at dusk, oil painting"
  jasmine --direct --slots 4 --batch-size 2 "a red fox in snow"
  jasmine --save-dir ./out "a koi pond, ukiyo-e"
  jasmine --studio
  HUGGING_FACE_API_KEY=hf_... jasmine --serve --bind 0.0.0.0:3000
"#)]
pub struct Cli {
    /// The prompt to generate images for (not required in studio or serve mode)
    pub prompt: Option<String>,

    /// Start the interactive studio
    #[arg(short, long, conflicts_with = "serve")]
    pub studio: bool,

    /// Run the gateway route instead of generating
    #[arg(long)]
    pub serve: bool,

    /// Address for the gateway route (with --serve)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Gateway route to call
    #[arg(long, value_name = "URL", conflicts_with = "direct")]
    pub gateway_url: Option<String>,

    /// Call the Hugging Face inference API directly
    #[arg(long)]
    pub direct: bool,

    /// Number of grid slots
    #[arg(long, value_name = "N")]
    pub slots: Option<usize>,

    /// Slots requested concurrently per batch
    #[arg(short, long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Pause between rounds, in seconds
    #[arg(long, value_name = "SECS")]
    pub cooldown_secs: Option<u64>,

    /// Save every generated image into this directory (one-shot mode)
    #[arg(long, value_name = "DIR", conflicts_with_all = ["studio", "serve"])]
    pub save_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
