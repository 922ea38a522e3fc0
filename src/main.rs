mod cli;

use dashgate::{config, server};
use dashgate_core::{job, EncodeOptions, ProfileRegistry, DEFAULT_LABELS};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_search(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting dashgate server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "dashgate=trace,dashgate_core=trace,tower_http=debug".to_string()
        } else {
            "dashgate=debug,dashgate_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Plan {
            input,
            resolutions,
            format,
            no_audio,
            audio_only,
        } => plan_job(
            cli.config.as_deref(),
            &input,
            resolutions,
            format,
            no_audio,
            audio_only,
        ),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("dashgate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn plan_job(
    config_path: Option<&Path>,
    input: &str,
    resolutions: Option<Vec<String>>,
    format: Option<dashgate_core::OutputFormat>,
    no_audio: bool,
    audio_only: bool,
) -> Result<()> {
    let config = config::load_config_or_search(config_path)?;
    let format = format.unwrap_or(config.pipeline.default_format);

    let request = if audio_only {
        job::build_audio_only(&config.pipeline.id, input, format)
    } else {
        let registry = ProfileRegistry::with_overrides(&config.profiles);
        let options = EncodeOptions {
            include_audio: !no_audio,
            labels: resolutions
                .unwrap_or_else(|| DEFAULT_LABELS.iter().map(|l| l.to_string()).collect()),
            format,
        };
        job::build(&registry, &config.pipeline.id, input, &options)
    }
    .with_context(|| format!("Failed to build job for {input}"))?;

    tracing::debug!(outputs = request.outputs.len(), "Built job request (not submitted)");
    println!("{}", serde_json::to_string_pretty(&request)?);

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => config::load_config_or_search(None)?,
    };

    let registry = ProfileRegistry::with_overrides(&config.profiles);

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Auth enabled: {}", config.auth.enabled);
    println!("  Pipeline: {} ({})", config.pipeline.id, config.pipeline.endpoint);
    println!("  Default format: {}", config.pipeline.default_format);
    for format in dashgate_core::OutputFormat::ALL {
        let labels: Vec<String> = registry
            .profiles(format)
            .into_iter()
            .map(|p| p.label)
            .collect();
        println!("  {} profiles: {}", format, labels.join(", "));
    }

    Ok(())
}
