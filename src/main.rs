//! Campgrounds booking service: CLI entry point
//!
//! ```sh
//! # Run with default config (~/.config/campgrounds/config.toml)
//! campgrounds-service
//!
//! # Custom config path and port
//! campgrounds-service --config /etc/campgrounds/config.toml --api-port 8080
//!
//! # Validate config without starting
//! campgrounds-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use campgrounds::config::{default_config_path, AppConfig};
use campgrounds::server::{init_tracing, ServerHandle, ServerOptions};

/// Campsite reservation service.
#[derive(Parser, Debug)]
#[command(
    name = "campgrounds-service",
    version,
    about = "Campsite reservations without double booking",
    long_about = "REST API for booking campsites. Concurrent bookings of the same \
                  campsite are serialized by the database so no two active \
                  reservations ever overlap.\n\n\
                  Default config: ~/.config/campgrounds/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "CAMPGROUNDS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(e) = config.validate() {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Booking     : max {} night(s), up to {} month(s) ahead",
            config.booking.max_stay_days, config.booking.max_lead_months
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.skip_migrations,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
