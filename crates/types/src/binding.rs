//! Binding configuration: one producer with its format and schedule.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the producer's output in a binding format.
pub const PLACEHOLDER: &str = "%s";

/// A single entry of the status table
///
/// Bindings are rendered left to right in the order they appear in
/// [`StatusConfig::bindings`](crate::StatusConfig::bindings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Registered producer id (e.g. "netspeed_combined")
    pub producer: String,
    /// printf-like template with at most one `%s`; `%%` renders a literal `%`
    #[serde(default = "default_format")]
    pub format: String,
    /// Producer-specific argument (interface name, command, path, ...)
    #[serde(default)]
    pub argument: Option<String>,
    /// Refresh period in milliseconds, 0 = use the base interval
    #[serde(default)]
    pub refresh_ms: u64,
    /// Optional label used in log messages
    #[serde(default)]
    pub name: Option<String>,
}

fn default_format() -> String {
    PLACEHOLDER.to_string()
}

impl BindingConfig {
    pub fn new(producer: &str, format: &str, argument: Option<&str>, refresh_ms: u64) -> Self {
        Self {
            producer: producer.to_string(),
            format: format.to_string(),
            argument: argument.map(str::to_string),
            refresh_ms,
            name: None,
        }
    }

    /// Name shown in logs: the explicit name or the producer id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.producer)
    }

    /// Number of `%s` placeholders in the format, ignoring `%%` escapes
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        let mut chars = self.format.chars();
        while let Some(c) = chars.next() {
            if c == '%' && chars.next() == Some('s') {
                count += 1;
            }
        }
        count
    }
}
