#![forbid(unsafe_code)]

use clap::Parser;
use portdrop_lib::{capture, config::load_from_path};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drop IPv4 TCP frames by destination port")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", default_value = "portdrop.toml")]
    config: PathBuf,

    /// Capture interface, overriding the config file
    #[arg(short, long)]
    interface: Option<String>,

    /// TCP destination port to drop, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match load_from_path(&cli.config) {
        Ok(mut cfg) => {
            if let Some(interface) = cli.interface {
                cfg.interface = interface;
            }
            if let Some(port) = cli.port {
                cfg.blocked_port = Some(port);
            }
            init_tracing(&cfg.logging.level, cfg.logging.show_target);
            info!(interface = %cfg.interface, port = ?cfg.blocked_port, "configuration loaded");
            let cfg = Arc::new(cfg);
            if let Err(err) = capture::run(cfg, cli.config).await {
                error!(%err, "capture exited with error");
                std::process::exit(1);
            }
        }
        Err(err) => {
            // The configured log level is unknown when loading failed.
            init_tracing("info", false);
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    }
}

fn init_tracing(level: &str, show_target: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(show_target)
        .init();
}
