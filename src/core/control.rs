//! Loop control: shutdown and refresh-now requests from signal handlers

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;

/// Flags shared between signal handling and the update loop
///
/// Requests only set a flag and wake the loop; all work happens on the loop
/// at cycle boundaries.
#[derive(Debug, Default)]
pub struct LoopControl {
    shutdown: AtomicBool,
    wake: Notify,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Control that stops after the first cycle
    pub fn once() -> Self {
        let control = Self::new();
        control.shutdown.store(true, Ordering::SeqCst);
        control
    }

    /// Finish the current cycle (or abort the sleep), then exit
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.wake.notify_one();
    }

    /// Cut the current sleep short; binding schedules are untouched
    pub fn request_refresh(&self) {
        self.wake.notify_one();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Resolves on the next shutdown or refresh request
    pub async fn woken(&self) {
        self.wake.notified().await;
    }
}

/// Route SIGINT/SIGTERM to shutdown and SIGUSR1 to refresh
///
/// Must be called from within the tokio runtime.
pub fn spawn_signal_handlers(control: Arc<LoopControl>) -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    let mut sigusr1 =
        signal(SignalKind::user_defined1()).context("Failed to register SIGUSR1 handler")?;

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    log::info!("SIGINT received, shutting down");
                    control.request_shutdown();
                }
                _ = sigterm.recv() => {
                    log::info!("SIGTERM received, shutting down");
                    control.request_shutdown();
                }
                _ = sigusr1.recv() => {
                    log::debug!("SIGUSR1 received, refreshing");
                    control.request_refresh();
                }
            }
        }
    });

    Ok(())
}
