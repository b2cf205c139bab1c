//! Producer trait and related types

use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Metadata about a producer
#[derive(Debug, Clone)]
pub struct ProducerMetadata {
    /// Unique identifier used in the status table
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// What the producer reports
    pub description: String,
    /// Meaning of the argument, `None` if the argument is ignored
    pub argument: Option<String>,
}

impl ProducerMetadata {
    pub fn new(id: &str, name: &str, description: &str, argument: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            argument: argument.map(str::to_string),
        }
    }
}

/// Why a producer has no value this cycle
///
/// None of these are fatal: the loop renders the configured unknown string
/// in place of the value and carries on.
#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("no baseline sample yet")]
    Cold,
    #[error("counter went backwards, re-baselined")]
    CounterReset,
    #[error("producer requires an argument")]
    MissingArgument,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data: {0}")]
    Malformed(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("sensor library not available")]
    SensorUnavailable,
    #[error("sensor query failed: {0}")]
    Query(String),
    #[error("display query failed: {0}")]
    Display(String),
}

impl Unavailable {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result of one producer invocation
pub type Reading = Result<String, Unavailable>;

/// Trait for all producers
///
/// A producer turns an optional argument into a text fragment. Producers
/// run sequentially on the loop thread and must return in bounded time;
/// there is no timeout around them.
pub trait Producer: Send {
    /// Get metadata about this producer
    fn metadata(&self) -> &ProducerMetadata;

    /// Sample the data source and format the current value
    fn produce(&mut self, argument: Option<&str>) -> Reading;

    /// Sample as of `now`, the start of the current cycle
    ///
    /// Rate producers override this to measure elapsed time against the
    /// cycle clock.
    fn produce_at(&mut self, argument: Option<&str>, now: Instant) -> Reading {
        let _ = now;
        self.produce(argument)
    }
}

/// Type-erased producer for dynamic dispatch
pub type BoxedProducer = Box<dyn Producer>;

/// Return the argument or [`Unavailable::MissingArgument`]
pub fn require_argument(argument: Option<&str>) -> Result<&str, Unavailable> {
    match argument {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => Err(Unavailable::MissingArgument),
    }
}
