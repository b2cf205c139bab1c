//! Top-level status configuration and the built-in default table.

use crate::binding::BindingConfig;
use serde::{Deserialize, Serialize};

fn default_interval_ms() -> u64 {
    1000
}

fn default_unknown_str() -> String {
    "n/a".to_string()
}

fn default_max_len() -> usize {
    2048
}

/// Status aggregator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Base interval between loop wake-ups, in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Text substituted when a producer has no value
    #[serde(default = "default_unknown_str")]
    pub unknown_str: String,
    /// Maximum status line length in bytes
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    /// Ordered producer bindings
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl StatusConfig {
    /// Refresh period for a binding, falling back to the base interval
    pub fn refresh_ms_for(&self, binding: &BindingConfig) -> u64 {
        if binding.refresh_ms == 0 {
            self.interval_ms
        } else {
            binding.refresh_ms
        }
    }
}

impl Default for StatusConfig {
    /// Default table: network, CPU, RAM, GPU, volume, date and lock
    /// indicators, with status2d colour markup for dwm.
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            unknown_str: default_unknown_str(),
            max_len: default_max_len(),
            bindings: vec![
                BindingConfig::new("netspeed_combined", "^c#CCCCCC^%s^d^  ", Some("enp4s0"), 2000),
                BindingConfig::new("cpu_perc", "^c#89B4FA^CPU %s%%^d^ ", None, 2000),
                BindingConfig::new("ram_used", "^c#89B4FA^RAM %s^d^  ", None, 2000),
                BindingConfig::new("gpu_combined", "^c#94E2D5^%s^d^  ", None, 3000),
                BindingConfig::new(
                    "run_command",
                    "^c#F9E2AF^VOL %s%%   ^d^",
                    Some("wpctl get-volume @DEFAULT_AUDIO_SINK@ | awk '{print int($2 * 100)}'"),
                    1500,
                ),
                BindingConfig::new("datetime", "^c#e979fc^%s^d^", Some("%m-%d %H:%M "), 5000),
                BindingConfig::new(
                    "keyboard_indicators",
                    "^c#F38BA8^%s^d^  ",
                    Some("C?N?"),
                    2000,
                ),
            ],
        }
    }
}
