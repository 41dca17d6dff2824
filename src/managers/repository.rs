use log::debug;
use std::collections::HashMap;

use crate::configs::address::MetricSource;
use crate::configs::definition::MetricDefinition;

/// Sources and definitions known to the application. Parsers never register
/// anything here; callers do.
#[derive(Debug, Default)]
pub struct MetricRepository {
    sources: Vec<MetricSource>,
    definitions: HashMap<Box<str>, MetricDefinition>,
    order: Vec<Box<str>>
}

impl MetricRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when an equal source is already registered.
    pub fn add_source(&mut self, source: MetricSource) -> bool {
        if self.sources.contains(&source) {
            return false
        }
        debug!("Registering metric source {}", source);
        self.sources.push(source);
        true
    }

    /// Registers the definition and its source. A definition with the same
    /// name is replaced.
    pub fn add_definition(&mut self, definition: MetricDefinition) {
        self.add_source(definition.source().clone());
        let name: Box<str> = definition.name().into();
        debug!("Registering metric definition {}", name);
        if self.definitions.insert(name.clone(), definition).is_none() {
            self.order.push(name);
        }
    }

    pub fn sources(&self) -> &[MetricSource] {
        &self.sources
    }

    pub fn definition(&self, name: &str) -> Option<&MetricDefinition> {
        self.definitions.get(name)
    }

    /// Registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.order.iter().filter_map(|name| self.definitions.get(name))
    }

    /// Finds a definition by literal name, then by id, then by label.
    pub fn find(&self, name: &str) -> Option<&MetricDefinition> {
        self.definition(name)
            .or_else(|| self.definitions().find(|d| d.id() == name))
            .or_else(|| self.definitions().find(|d| d.label() == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{jbosscli, jmx};

    #[test]
    fn add_definition_test() {
        let mut repository = MetricRepository::new();
        let first = jmx::parse("jmx://h:1/d:k=v/a").unwrap().unwrap();
        let second = jmx::parse("jmx://h:1/d:k=v/b").unwrap().unwrap().with_label("B");
        let third = jbosscli::parse("/subsystem=web/c").unwrap().unwrap();
        repository.add_definition(first);
        repository.add_definition(second);
        repository.add_definition(third);
        assert_eq!(repository.sources().len(), 2);
        let names: Vec<&str> = repository.definitions().map(|d| d.name()).collect();
        assert_eq!(names, vec!["jmx://h:1/d:k=v/a", "jmx://h:1/d:k=v/b", "jbosscli://localhost:9999/subsystem=web/c"]);
        assert_eq!(repository.find("jmx://h:1/d:k=v/b").unwrap().label(), "B");
        assert_eq!(repository.find("d:k=v/b").unwrap().label(), "B");
        assert_eq!(repository.find("B").unwrap().attribute(), "b");
        assert!(repository.find("nothing").is_none());
    }

    #[test]
    fn add_source_test() {
        let mut repository = MetricRepository::new();
        let source = jmx::parse("jmx://h:1/d:k=v/a").unwrap().unwrap().source().clone();
        assert!(repository.add_source(source.clone()));
        assert!(!repository.add_source(source));
    }

    #[test]
    fn replace_definition_test() {
        let mut repository = MetricRepository::new();
        repository.add_definition(jmx::parse("jmx://h:1/d:k=v/a").unwrap().unwrap());
        repository.add_definition(jmx::parse("jmx://h:1/d:k=v/a").unwrap().unwrap().with_label("A"));
        assert_eq!(repository.definitions().count(), 1);
        assert_eq!(repository.definition("jmx://h:1/d:k=v/a").unwrap().label(), "A");
    }
}
