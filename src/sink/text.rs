//! Line-per-cycle text output

use super::Sink;
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Writes each status line followed by a newline and flushes
///
/// Clearing writes nothing: a consumer reading the stream simply sees it end.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Sink for TextSink<W> {
    fn publish(&mut self, status: &str) -> Result<()> {
        writeln!(self.out, "{}", status).context("Failed to write status")?;
        self.out.flush().context("Failed to flush status")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}
