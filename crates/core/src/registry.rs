//! Registry of producer factories

use crate::producer::BoxedProducer;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Scheduling facts handed to a factory when a binding is built
#[derive(Debug, Clone, Copy)]
pub struct ProducerContext {
    /// The binding's normalized refresh period
    pub refresh_period: Duration,
    /// The loop's base interval
    pub base_interval: Duration,
}

/// Function that creates a producer
///
/// Factories may capture injected collaborators (counter readers, sensor
/// resolvers), so each binding gets its own producer state.
pub type ProducerFactory = Box<dyn Fn(&ProducerContext) -> BoxedProducer + Send + Sync>;

/// Display information about a registered producer
#[derive(Debug, Clone)]
pub struct ProducerInfo {
    pub id: String,
    pub name: String,
}

/// Registry of producers known at build time
pub struct Registry {
    producers: HashMap<String, (ProducerInfo, ProducerFactory)>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            producers: HashMap::new(),
        }
    }

    /// Register a producer factory under `id`, replacing any previous one
    pub fn register<F>(&mut self, id: &str, name: &str, factory: F)
    where
        F: Fn(&ProducerContext) -> BoxedProducer + Send + Sync + 'static,
    {
        let info = ProducerInfo {
            id: id.to_string(),
            name: name.to_string(),
        };
        if self
            .producers
            .insert(id.to_string(), (info, Box::new(factory)))
            .is_some()
        {
            log::debug!("Producer '{}' re-registered", id);
        }
    }

    /// Whether a producer id is known
    pub fn contains(&self, id: &str) -> bool {
        self.producers.contains_key(id)
    }

    /// Create a producer by ID
    pub fn create(&self, id: &str, context: &ProducerContext) -> Result<BoxedProducer> {
        let (_, factory) = self
            .producers
            .get(id)
            .ok_or_else(|| anyhow!("Unknown producer: {}", id))?;
        Ok(factory(context))
    }

    /// List registered producers sorted by id
    pub fn list_producers(&self) -> Vec<ProducerInfo> {
        let mut infos: Vec<ProducerInfo> =
            self.producers.values().map(|(info, _)| info.clone()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::{Producer, ProducerMetadata, Reading};

    struct Fixed {
        metadata: ProducerMetadata,
    }

    impl Producer for Fixed {
        fn metadata(&self) -> &ProducerMetadata {
            &self.metadata
        }

        fn produce(&mut self, _argument: Option<&str>) -> Reading {
            Ok("fixed".to_string())
        }
    }

    fn context() -> ProducerContext {
        ProducerContext {
            refresh_period: Duration::from_secs(1),
            base_interval: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_create_known_and_unknown() {
        let mut registry = Registry::new();
        registry.register("fixed", "Fixed", |_| {
            Box::new(Fixed {
                metadata: ProducerMetadata::new("fixed", "Fixed", "constant", None),
            })
        });

        assert!(registry.contains("fixed"));
        let mut producer = registry.create("fixed", &context()).unwrap();
        assert_eq!(producer.produce(None).unwrap(), "fixed");

        let err = registry.create("missing", &context()).err().unwrap();
        assert!(err.to_string().contains("Unknown producer: missing"));
    }

    #[test]
    fn test_list_is_sorted() {
        let mut registry = Registry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.register(id, id, move |_| {
                Box::new(Fixed {
                    metadata: ProducerMetadata::new(id, id, "", None),
                })
            });
        }
        let ids: Vec<String> = registry.list_producers().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}
