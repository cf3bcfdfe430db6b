// Main entrypoint for the health aggregator.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::error;

use healthagg::app::App;
use healthagg::config::{Config, ConfigTrait, DEFAULT_LOG_LEVEL};
use healthagg::shutdown::GracefulShutdown;

const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Stamped at build time through HEALTHAGG_VERSION, else the crate version.
const VERSION: &str = match option_env!("HEALTHAGG_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// healthagg - composite health-check aggregator
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Print the version and exit
    #[arg(long)]
    version: bool,

    /// Path to config file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Config file path, used only when --config is left at its default
    #[arg(value_name = "CONFIG")]
    positional: Vec<PathBuf>,
}

impl Args {
    fn config_path(&self) -> PathBuf {
        match self.positional.first() {
            Some(path) if self.config.as_os_str() == DEFAULT_CONFIG_PATH => path.clone(),
            _ => self.config.clone(),
        }
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Bare version string, before any config is touched.
    if args.version {
        println!("{}", VERSION);
        return Ok(());
    }

    tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<()> {
    let config_path = args.config_path();

    let cfg = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;

    // Configure logger (must be done after config is loaded)
    configure_logger(&cfg);

    let shutdown_token = CancellationToken::new();
    let graceful_shutdown = GracefulShutdown::new(shutdown_token.clone(), cfg.shutdown_timeout());

    let app = App::new(shutdown_token.clone(), cfg);
    app.log_loaded_checks(&config_path.display().to_string());

    let serving = app.serve();
    tokio::pin!(serving);

    let served = tokio::select! {
        result = &mut serving => Some(result),
        _ = graceful_shutdown.await_signal() => None,
    };

    match served {
        // Server returned before any shutdown request: bind or serve failure.
        Some(result) => {
            if let Err(e) = &result {
                error!(
                    component = "main",
                    scope = "app",
                    event = "serve_failed",
                    error = %e,
                    "failed to serve"
                );
            }
            result
        }
        None => {
            let result = graceful_shutdown.drain(serving).await;
            app.close();
            result
        }
    }
}
