//! rg-status-types: Shared configuration types for rg-status.
//!
//! Pure data types with no runtime dependencies beyond serde, shared by the
//! core engine, the producers and the binary.

pub mod binding;
pub mod status;

pub use binding::{BindingConfig, PLACEHOLDER};
pub use status::StatusConfig;
