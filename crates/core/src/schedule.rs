//! Bindings, their per-cycle state and the ordered schedule

use crate::format::render_template;
use crate::producer::BoxedProducer;
use crate::registry::{ProducerContext, Registry};
use crate::status_line::truncate_to;
use rg_status_types::StatusConfig;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Problems found while turning configuration into a schedule
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("binding {index}: unknown producer '{id}'")]
    UnknownProducer { index: usize, id: String },
    #[error("binding {index}: format '{format}' has more than one %s placeholder")]
    TooManyPlaceholders { index: usize, format: String },
    #[error("interval_ms must be greater than zero")]
    ZeroInterval,
    #[error("max_len must be greater than zero")]
    ZeroMaxLen,
}

/// A producer paired with its format and refresh period
pub struct Binding {
    producer: BoxedProducer,
    format: String,
    argument: Option<String>,
    refresh_period: Duration,
    display_name: String,
}

impl Binding {
    pub fn new(
        producer: BoxedProducer,
        format: &str,
        argument: Option<&str>,
        refresh_period: Duration,
    ) -> Self {
        let display_name = producer.metadata().id.clone();
        Self {
            producer,
            format: format.to_string(),
            argument: argument.map(str::to_string),
            refresh_period,
            display_name,
        }
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Run the producer and render its fragment
    ///
    /// Unavailable readings render `unknown_str` in place of the value. The
    /// fragment is cut to `max_len` bytes. `now` is the cycle start.
    pub fn evaluate(&mut self, unknown_str: &str, max_len: usize, now: Instant) -> String {
        let value = match self.producer.produce_at(self.argument.as_deref(), now) {
            Ok(value) => value,
            Err(reason) => {
                log::debug!("{}: unavailable ({})", self.display_name, reason);
                unknown_str.to_string()
            }
        };
        let mut text = render_template(&self.format, &value);
        if text.len() > max_len {
            log::debug!("{}: fragment truncated to {} bytes", self.display_name, max_len);
            let end = truncate_to(&text, max_len).len();
            text.truncate(end);
        }
        text
    }
}

/// Per-binding mutable record owned by the aggregation loop
#[derive(Debug, Clone, Default)]
pub struct BindingState {
    next_due: Option<Instant>,
    initialized: bool,
    last_text: String,
}

impl BindingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uninitialized bindings are always due
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_due {
            Some(next_due) if self.initialized => now >= next_due,
            _ => true,
        }
    }

    /// Store a fresh fragment and schedule the next run at `start + period`
    pub fn record(&mut self, start: Instant, period: Duration, text: String) {
        self.last_text = text;
        self.initialized = true;
        self.next_due = Some(start + period);
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn last_text(&self) -> &str {
        &self.last_text
    }
}

/// Ordered, fixed list of bindings plus the loop-wide settings
pub struct Schedule {
    bindings: Vec<Binding>,
    base_interval: Duration,
    unknown_str: String,
    max_len: usize,
}

impl Schedule {
    pub fn new(base_interval: Duration, unknown_str: &str, max_len: usize) -> Self {
        Self {
            bindings: Vec::new(),
            base_interval,
            unknown_str: unknown_str.to_string(),
            max_len,
        }
    }

    /// Build the schedule from configuration, creating one producer per binding
    pub fn from_config(config: &StatusConfig, registry: &Registry) -> Result<Self, ConfigError> {
        if config.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if config.max_len == 0 {
            return Err(ConfigError::ZeroMaxLen);
        }

        let base_interval = Duration::from_millis(config.interval_ms);
        let mut schedule = Self::new(base_interval, &config.unknown_str, config.max_len);

        for (index, entry) in config.bindings.iter().enumerate() {
            if entry.placeholder_count() > 1 {
                return Err(ConfigError::TooManyPlaceholders {
                    index,
                    format: entry.format.clone(),
                });
            }
            let context = ProducerContext {
                refresh_period: Duration::from_millis(config.refresh_ms_for(entry)),
                base_interval,
            };
            let producer = registry.create(&entry.producer, &context).map_err(|_| {
                ConfigError::UnknownProducer {
                    index,
                    id: entry.producer.clone(),
                }
            })?;
            let binding = Binding::new(
                producer,
                &entry.format,
                entry.argument.as_deref(),
                context.refresh_period,
            )
            .with_display_name(entry.display_name());
            schedule.push(binding);
        }

        log::info!(
            "Loaded {} binding(s), base interval {:?}",
            schedule.len(),
            base_interval
        );
        Ok(schedule)
    }

    /// Append a binding; a zero period is normalized to the base interval
    pub fn push(&mut self, mut binding: Binding) {
        if binding.refresh_period.is_zero() {
            binding.refresh_period = self.base_interval;
        }
        self.bindings.push(binding);
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Hand the bindings over to the loop that drives them
    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn base_interval(&self) -> Duration {
        self.base_interval
    }

    pub fn unknown_str(&self) -> &str {
        &self.unknown_str
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::{Producer, ProducerMetadata, Reading, Unavailable};
    use rg_status_types::BindingConfig;

    struct Echo {
        metadata: ProducerMetadata,
    }

    impl Echo {
        fn boxed() -> BoxedProducer {
            Box::new(Self {
                metadata: ProducerMetadata::new("echo", "Echo", "echoes the argument", Some("text")),
            })
        }
    }

    impl Producer for Echo {
        fn metadata(&self) -> &ProducerMetadata {
            &self.metadata
        }

        fn produce(&mut self, argument: Option<&str>) -> Reading {
            argument
                .map(str::to_string)
                .ok_or(Unavailable::MissingArgument)
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register("echo", "Echo", |_| Echo::boxed());
        registry
    }

    #[test]
    fn test_evaluate_renders_unknown_on_failure() {
        let now = Instant::now();
        let mut binding = Binding::new(Echo::boxed(), "[%s]", None, Duration::from_secs(1));
        assert_eq!(binding.evaluate("n/a", 64, now), "[n/a]");

        let mut binding = Binding::new(Echo::boxed(), "[%s]", Some("ok"), Duration::from_secs(1));
        assert_eq!(binding.evaluate("n/a", 64, now), "[ok]");
        assert_eq!(binding.evaluate("n/a", 3, now), "[ok");
    }

    #[test]
    fn test_state_due_logic() {
        let start = Instant::now();
        let mut state = BindingState::new();
        assert!(state.is_due(start));
        assert!(!state.is_initialized());

        state.record(start, Duration::from_millis(2000), "x".to_string());
        assert!(!state.is_due(start + Duration::from_millis(1999)));
        assert!(state.is_due(start + Duration::from_millis(2000)));
        assert_eq!(state.last_text(), "x");
        assert_eq!(state.next_due(), Some(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_from_config_normalizes_zero_refresh() {
        let config = StatusConfig {
            interval_ms: 250,
            bindings: vec![
                BindingConfig::new("echo", "%s", Some("a"), 0),
                BindingConfig::new("echo", "%s", Some("b"), 1000),
            ],
            ..StatusConfig::default()
        };
        let schedule = Schedule::from_config(&config, &registry()).unwrap();
        assert_eq!(schedule.len(), 2);
        let periods: Vec<Duration> = schedule
            .bindings()
            .iter()
            .map(|b| b.refresh_period())
            .collect();
        assert_eq!(periods, vec![Duration::from_millis(250), Duration::from_millis(1000)]);
    }

    #[test]
    fn test_from_config_rejects_unknown_producer() {
        let config = StatusConfig {
            bindings: vec![
                BindingConfig::new("echo", "%s", None, 0),
                BindingConfig::new("battery", "%s", None, 0),
            ],
            ..StatusConfig::default()
        };
        match Schedule::from_config(&config, &registry()) {
            Err(ConfigError::UnknownProducer { index, id }) => {
                assert_eq!(index, 1);
                assert_eq!(id, "battery");
            }
            other => panic!("expected unknown producer, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_from_config_rejects_bad_settings() {
        let config = StatusConfig {
            bindings: vec![BindingConfig::new("echo", "%s %s", None, 0)],
            ..StatusConfig::default()
        };
        assert!(matches!(
            Schedule::from_config(&config, &registry()),
            Err(ConfigError::TooManyPlaceholders { index: 0, .. })
        ));

        let config = StatusConfig {
            interval_ms: 0,
            ..StatusConfig::default()
        };
        assert!(matches!(
            Schedule::from_config(&config, &registry()),
            Err(ConfigError::ZeroInterval)
        ));
    }
}
