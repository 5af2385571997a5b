//! CLI entrypoint for jasmine
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use jasmine_application::{GenerateImagesUseCase, GenerationParams, ImageGateway, SharedGallery};
use jasmine_domain::GridLayout;
use jasmine_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, GatewayMode, GatewayServer, HttpImageGateway,
    HuggingFaceGateway,
};
use jasmine_presentation::{
    Cli, ConsoleFormatter, OutputConfig, OutputFormat, ProgressReporter, SimpleProgress, StudioConfig,
    StudioRepl, save_all,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", toml::to_string_pretty(&redacted(&config))?);
        return Ok(());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting jasmine");

    if cli.serve {
        return serve(&cli, &config).await;
    }

    let params = generation_params(&cli, &config);
    let gallery = SharedGallery::new(&GridLayout::with_slot_count(params.slot_count));

    // === Dependency Injection ===
    let direct =
        cli.direct || (config.gateway.mode == GatewayMode::Direct && cli.gateway_url.is_none());
    if direct {
        let hf = config
            .inference
            .to_huggingface()
            .ok_or_else(|| anyhow!("HUGGING_FACE_API_KEY is required to call the model directly"))?;
        info!("Using Hugging Face model {}", hf.model);
        let gateway = Arc::new(HuggingFaceGateway::new(hf)?);
        run(gateway, gallery, params, &cli, &config).await
    } else {
        let url = cli
            .gateway_url
            .clone()
            .unwrap_or_else(|| config.gateway.url.clone());
        info!("Using gateway route {}", url);
        let gateway = Arc::new(HttpImageGateway::new(
            url,
            Duration::from_secs(config.gateway.timeout_secs),
        )?);
        run(gateway, gallery, params, &cli, &config).await
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Configuration with the API key masked, for `--show-config`
fn redacted(config: &FileConfig) -> FileConfig {
    let mut config = config.clone();
    if config.inference.api_key.is_some() {
        config.inference.api_key = Some("********".to_string());
    }
    config
}

/// File settings overridden by CLI flags
fn generation_params(cli: &Cli, config: &FileConfig) -> GenerationParams {
    let mut params = config.generation.to_params();
    if let Some(slots) = cli.slots {
        params = params.with_slot_count(slots);
    }
    if let Some(batch_size) = cli.batch_size {
        params = params.with_batch_size(batch_size);
    }
    if let Some(secs) = cli.cooldown_secs {
        params = params.with_cooldown(Duration::from_secs(secs));
    }
    params
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Grid) => OutputFormat::Grid,
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Full) | None => OutputFormat::Full,
    })
}

async fn serve(cli: &Cli, config: &FileConfig) -> Result<()> {
    let Some(hf) = config.inference.to_huggingface() else {
        bail!("HUGGING_FACE_API_KEY environment variable is not configured");
    };
    let gateway = HuggingFaceGateway::new(hf)?;
    let bind = cli
        .bind
        .clone()
        .unwrap_or_else(|| config.server.bind.clone());

    let server = GatewayServer::new(bind, Arc::new(gateway));
    info!("Binding gateway route to {}", server.bind_addr());
    server.run().await?;
    Ok(())
}

async fn run<G: ImageGateway + 'static>(
    gateway: Arc<G>,
    gallery: SharedGallery,
    params: GenerationParams,
    cli: &Cli,
    config: &FileConfig,
) -> Result<()> {
    let use_case = GenerateImagesUseCase::new(gateway, gallery).with_params(params);
    let output = OutputConfig {
        format: output_format(cli, config),
        color: config.output.color,
    };
    let show_progress = !cli.quiet && config.output.show_progress;

    // Studio mode
    if cli.studio {
        let studio = StudioConfig {
            show_progress,
            history_file: config.output.history_file.as_ref().map(PathBuf::from),
        };
        let mut repl = StudioRepl::new(use_case)
            .with_studio_config(studio)
            .with_output_config(output);
        repl.run().await?;
        return Ok(());
    }

    // Single prompt mode - prompt is required
    let Some(prompt) = cli.prompt.as_deref() else {
        bail!("Prompt is required. Use --studio for interactive mode.");
    };

    let report = if show_progress && std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(prompt, &progress).await?
    } else if show_progress && output.format != OutputFormat::Json {
        use_case.execute_with_progress(prompt, &SimpleProgress).await?
    } else {
        use_case.execute(prompt).await?
    };

    let snapshot = use_case.gallery().snapshot();
    let text = match output.format {
        OutputFormat::Full => ConsoleFormatter::format(&report, &snapshot),
        OutputFormat::Grid => ConsoleFormatter::format_grid(&snapshot),
        OutputFormat::Json => ConsoleFormatter::format_json(&report, &snapshot),
    };
    println!("{}", text);

    if let Some(dir) = cli.save_dir.as_deref() {
        let saved = save_all(&snapshot, dir).context("Failed to save images")?;
        for path in &saved {
            info!("Saved {}", path.display());
        }
        eprintln!("Saved {} image(s) to {}", saved.len(), dir.display());
    }

    Ok(())
}
