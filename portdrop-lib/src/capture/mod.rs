//! Capture plane: worker threads feeding frames to one shared filter,
//! periodic drop-count reporting, and signal-driven reconfiguration and
//! shutdown.
//!
//! The capture plane observes and counts; enforcing a `Drop` verdict
//! belongs to whatever hook point embeds the filter.

mod socket;

pub use socket::open_capture_socket;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use socket2::Socket;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::{load_from_path, Config};
use crate::error::{PortdropError, Result};
use crate::filter::PortFilter;

/// Run the capture plane until ctrl-c.
///
/// Seeds the blocked-port slot from the configuration, spawns one capture
/// worker thread per configured worker (all sharing one [`PortFilter`]),
/// reports drop statistics on an interval, and re-applies `blocked_port`
/// from `config_path` on SIGHUP. Only `blocked_port` is applied on reload;
/// interface or worker changes need a restart.
pub async fn run(config: Arc<Config>, config_path: PathBuf) -> Result<()> {
    let filter = Arc::new(PortFilter::new());
    apply_blocked_port(&filter, config.blocked_port);

    let shutdown = Arc::new(AtomicBool::new(false));
    let read_timeout = Duration::from_millis(config.capture.read_timeout_ms);

    let mut workers = Vec::with_capacity(config.capture.workers);
    for worker_id in 0..config.capture.workers {
        let socket = open_capture_socket(&config.interface, read_timeout)?;
        let filter = Arc::clone(&filter);
        let shutdown = Arc::clone(&shutdown);
        let buffer_bytes = config.capture.buffer_bytes;
        let handle = thread::Builder::new()
            .name(format!("capture-{worker_id}"))
            .spawn(move || capture_loop(socket, &filter, &shutdown, buffer_bytes, worker_id))
            .map_err(PortdropError::Io)?;
        workers.push(handle);
    }
    info!(
        interface = %config.interface,
        workers = config.capture.workers,
        "capture started"
    );

    let stats = tokio::spawn(report_stats(Arc::clone(&filter), config.stats.interval_secs));

    wait_for_signals(&filter, &config_path).await?;

    shutdown.store(true, Ordering::Relaxed);
    stats.abort();
    for worker in workers {
        if worker.join().is_err() {
            warn!("capture worker panicked during shutdown");
        }
    }
    info!(total_dropped = filter.drop_count(), "shutting down");
    Ok(())
}

/// One worker: read frames until shutdown, feed each to the filter.
fn capture_loop(
    mut socket: Socket,
    filter: &PortFilter,
    shutdown: &AtomicBool,
    buffer_bytes: usize,
    worker_id: usize,
) {
    let mut buf = vec![0u8; buffer_bytes];
    while !shutdown.load(Ordering::Relaxed) {
        match socket.read(&mut buf) {
            Ok(0) => continue,
            Ok(n) => {
                // Classification and counting only — see module docs.
                let _ = filter.process(&buf[..n]);
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock
                        | std::io::ErrorKind::TimedOut
                        | std::io::ErrorKind::Interrupted
                ) =>
            {
                continue;
            }
            Err(e) => {
                error!(worker_id, %e, "capture read failed, worker exiting");
                return;
            }
        }
    }
    debug!(worker_id, "capture worker stopped");
}

/// Report the drop counter whenever it changed since the last tick.
async fn report_stats(filter: Arc<PortFilter>, interval_secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = 0u64;
    loop {
        ticker.tick().await;
        let total = filter.drop_count();
        if total != last {
            info!(
                total,
                delta = total - last,
                port = ?filter.blocked_port().get(),
                "frames dropped"
            );
            last = total;
        }
    }
}

/// Block until ctrl-c; re-apply the blocked port from disk on every SIGHUP.
async fn wait_for_signals(filter: &PortFilter, config_path: &Path) -> Result<()> {
    let mut hangups = signal(SignalKind::hangup()).map_err(PortdropError::Io)?;
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.map_err(PortdropError::Io)?;
                info!("ctrl-c received");
                return Ok(());
            }
            _ = hangups.recv() => reload_blocked_port(filter, config_path),
        }
    }
}

fn reload_blocked_port(filter: &PortFilter, config_path: &Path) {
    match load_from_path(config_path) {
        Ok(new_cfg) => apply_blocked_port(filter, new_cfg.blocked_port),
        Err(err) => warn!(%err, "config reload failed, keeping current blocked port"),
    }
}

fn apply_blocked_port(filter: &PortFilter, port: Option<u16>) {
    match port {
        Some(port) => {
            filter.blocked_port().set(port);
            info!(port, "blocked port configured");
        }
        None => {
            filter.blocked_port().clear();
            info!("no blocked port configured, all frames pass");
        }
    }
}
