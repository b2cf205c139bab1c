//! Status sinks: where the aggregated line is published

mod text;
mod x11;

pub use text::TextSink;
pub use x11::RootNameSink;

use anyhow::Result;

/// Receives the status line once per cycle. Errors end the loop.
pub trait Sink: Send {
    /// Publish the current status line
    fn publish(&mut self, status: &str) -> Result<()>;

    /// Clear the published status on graceful shutdown
    fn clear(&mut self) -> Result<()>;
}
