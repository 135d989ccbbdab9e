use thiserror::Error;

/// Errors surfaced by the control plane.
///
/// The per-frame path has no error variant at all: anything it cannot
/// parse passes through.
#[derive(Error, Debug)]
pub enum PortdropError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("network interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("capture socket error on {interface}: {source}")]
    Capture {
        interface: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PortdropError>;
