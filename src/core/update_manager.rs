//! Update loop: runs due bindings, assembles the status line, publishes it

use super::control::LoopControl;
use crate::sink::Sink;
use anyhow::{Context, Result};
use log::{debug, trace};
use rg_status_core::{Binding, BindingState, Schedule, StatusLine};
use std::time::Duration;
use tokio::time::Instant;

/// Drives the schedule, one cycle per base interval
///
/// Producers run one after another on the calling task, in registry order.
/// A slow producer delays everything behind it, including the publish.
pub struct UpdateManager {
    bindings: Vec<Binding>,
    states: Vec<BindingState>,
    line: StatusLine,
    base_interval: Duration,
    unknown_str: String,
}

impl UpdateManager {
    pub fn new(schedule: Schedule) -> Self {
        let base_interval = schedule.base_interval();
        let unknown_str = schedule.unknown_str().to_string();
        let line = StatusLine::new(schedule.max_len());
        let bindings = schedule.into_bindings();
        let states = bindings.iter().map(|_| BindingState::new()).collect();

        Self {
            bindings,
            states,
            line,
            base_interval,
            unknown_str,
        }
    }

    pub fn states(&self) -> &[BindingState] {
        &self.states
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    /// Run one cycle as of `start` and return the rebuilt status line
    ///
    /// Bindings that are not due keep their previous text. If the line
    /// overflows, it is cut and the remaining fragments are left out for
    /// this cycle; due producers still run so their schedules hold.
    pub fn run_cycle(&mut self, start: std::time::Instant) -> &str {
        let max_len = self.line.max_len();
        self.line.clear();
        let mut overflowed = false;

        for (binding, state) in self.bindings.iter_mut().zip(self.states.iter_mut()) {
            if state.is_due(start) {
                let text = binding.evaluate(&self.unknown_str, max_len, start);
                trace!("{}: {:?}", binding.display_name(), text);
                state.record(start, binding.refresh_period(), text);
            }

            if overflowed {
                continue;
            }
            if let Err(e) = self.line.push(state.last_text()) {
                debug!("{} at {}, truncating", e, binding.display_name());
                overflowed = true;
            }
        }

        self.line.as_str()
    }

    /// Run until shutdown is requested
    ///
    /// Each cycle publishes through `sink`, then sleeps until one base
    /// interval after the cycle started. Refresh requests end the sleep
    /// early. On shutdown the sink is cleared. Sink errors end the loop.
    pub async fn run(&mut self, sink: &mut dyn Sink, control: &LoopControl) -> Result<()> {
        loop {
            let start = Instant::now();
            let status = self.run_cycle(start.into_std());
            sink.publish(status).context("Failed to publish status")?;
            trace!("Update cycle took {:?}", start.elapsed());

            if control.is_shutdown() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep_until(start + self.base_interval) => {}
                _ = control.woken() => {
                    debug!("Sleep interrupted after {:?}", start.elapsed());
                }
            }

            if control.is_shutdown() {
                break;
            }
        }

        debug!("Shutting down, clearing status");
        sink.clear().context("Failed to clear status")?;
        Ok(())
    }
}
