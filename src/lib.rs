//! rg-status: A lightweight status line aggregator for Linux
//!
//! This library provides the moving parts of the rg-status binary:
//! - Configuration loading for the status table
//! - The update loop that schedules producers and assembles the line
//! - Sinks that publish the line (stdout or the X root window name)

pub mod config;
pub mod core;
pub mod keyboard;
pub mod sink;

// Re-export commonly used types
pub use core::{LoopControl, UpdateManager};
pub use sink::{RootNameSink, Sink, TextSink};

use anyhow::{Context, Result};
use rg_status_core::{Registry, Schedule};
use rg_status_types::StatusConfig;

/// Registry with every built-in producer
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    rg_status_sources::register_all(&mut registry);
    keyboard::register(&mut registry);
    registry
}

/// Validate `config` against the built-in producers and build the loop
pub fn build_update_manager(config: &StatusConfig) -> Result<UpdateManager> {
    let schedule =
        Schedule::from_config(config, &builtin_registry()).context("Invalid configuration")?;
    Ok(UpdateManager::new(schedule))
}
