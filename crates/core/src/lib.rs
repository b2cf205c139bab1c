//! rg-status-core: Core traits and scheduling types for rg-status.
//!
//! This crate contains the Producer trait, the producer Registry, bindings
//! with their per-cycle state, fragment templates and the bounded status
//! line.

pub mod constants;
mod format;
mod producer;
mod registry;
mod schedule;
mod status_line;

pub use constants::{BITS_PER_MEGABIT, BYTES_PER_GIB, BYTES_PER_KIB, BYTES_PER_MIB};
pub use format::{fmt_human, render_template};
pub use producer::{require_argument, BoxedProducer, Producer, ProducerMetadata, Reading, Unavailable};
pub use registry::{ProducerContext, ProducerFactory, ProducerInfo, Registry};
pub use schedule::{Binding, BindingState, ConfigError, Schedule};
pub use status_line::{truncate_to, Overflow, StatusLine};

// Re-export config types used in Schedule::from_config
pub use rg_status_types::{BindingConfig, StatusConfig};
