use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PortdropError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Network interface to capture on
    /// Example: "eth0" or "wlan0"
    pub interface: String,
    /// TCP destination port to drop
    /// Absent means unconfigured: the filter passes everything until a
    /// port is applied (e.g. via a SIGHUP config reload). Port 0 is a
    /// valid value, distinct from "absent".
    #[serde(default)]
    pub blocked_port: Option<u16>,
    /// Capture worker configuration
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Drop statistics reporting configuration
    #[serde(default)]
    pub stats: StatsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Number of capture worker threads sharing one filter
    pub workers: usize,
    /// Per-worker frame buffer size in bytes. Only headers are inspected,
    /// but the kernel hands over whole frames.
    pub buffer_bytes: usize,
    /// Socket read timeout in milliseconds; bounds how long shutdown
    /// waits for workers parked on an idle link
    pub read_timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { workers: 1, buffer_bytes: 65_535, read_timeout_ms: 500 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StatsConfig {
    /// How often the drop counter is reported, in seconds
    pub interval_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { interval_secs: 2 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level when RUST_LOG is not set
    /// Example: "info" or "portdrop_lib=debug"
    pub level: String,
    /// Include the module path in log lines
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), show_target: false }
    }
}

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| PortdropError::Config(format!("Failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| PortdropError::Config(format!("Failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.interface.is_empty() {
        return Err(PortdropError::Config("interface must not be empty".to_string()));
    }

    if cfg.capture.workers == 0 {
        return Err(PortdropError::Config("capture.workers must be at least 1".to_string()));
    }

    // Smaller buffers would truncate the very headers the filter inspects.
    if cfg.capture.buffer_bytes < 64 {
        return Err(PortdropError::Config(format!(
            "capture.buffer_bytes must be at least 64, got {}",
            cfg.capture.buffer_bytes
        )));
    }

    if cfg.stats.interval_secs == 0 {
        return Err(PortdropError::Config("stats.interval_secs must be at least 1".to_string()));
    }

    Ok(())
}
