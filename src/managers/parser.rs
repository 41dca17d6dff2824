use log::{debug, warn};

use crate::configs::definition::MetricDefinition;
use crate::configs::{jbosscli, jmx};
use crate::error::{Error, Result};
use crate::utils::utils;

/// Returns `Ok(None)` to let the next parser in the chain try the string.
pub type ParseFn = fn(&str) -> Result<Option<MetricDefinition>>;

/// Ordered list of metric definition parsers, probed until one recognizes the
/// definition.
pub struct ParserChain {
    parsers: Vec<(&'static str, ParseFn)>
}

impl ParserChain {
    pub fn new() -> Self {
        Self {
            parsers: Vec::new()
        }
    }

    pub fn with_parser(mut self, name: &'static str, parser: ParseFn) -> Self {
        self.parsers.push((name, parser));
        self
    }

    pub fn parse(&self, definition: &str) -> Result<MetricDefinition> {
        let definition = definition.trim();
        if let (Some(protocol), _) = utils::split_protocol(definition) {
            if !utils::is_protocol(protocol) {
                warn!("Unknown protocol {:?} in {:?}", protocol, definition);
                return Err(Error::UnknownDefinition(definition.into()))
            }
        }
        for (name, parser) in &self.parsers {
            if let Some(result) = parser(definition)? {
                debug!("{:?} parsed by {} parser", definition, name);
                return Ok(result)
            }
            debug!("{} parser declined {:?}", name, definition);
        }
        Err(Error::UnknownDefinition(definition.into()))
    }
}

impl Default for ParserChain {
    fn default() -> Self {
        Self::new()
            .with_parser("JBoss CLI", jbosscli::parse)
            .with_parser("JMX", jmx::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::definition::DefinitionKind;

    #[test]
    fn chain_test() {
        let chain = ParserChain::default();
        let definition = chain.parse("jmx://1.2.3.4:8888/test.domain:service=Test/testAttribute").unwrap();
        assert!(matches!(definition.kind(), DefinitionKind::Jmx { .. }));
        let definition = chain.parse("localhost:1099/java.lang:type=Memory/HeapMemoryUsage").unwrap();
        assert!(matches!(definition.kind(), DefinitionKind::Jmx { .. }));
        let definition = chain.parse(" /subsystem=web/connector=http/requestCount ").unwrap();
        assert!(matches!(definition.kind(), DefinitionKind::JBossCli { .. }));
    }

    #[test]
    fn chain_stops_at_error_test() {
        let chain = ParserChain::default();
        assert!(matches!(chain.parse("jbosscli://localhost:9999").unwrap_err(), Error::MissingPath(_)));
    }

    #[test]
    fn chain_unknown_test() {
        let chain = ParserChain::default();
        assert!(matches!(chain.parse("something else").unwrap_err(), Error::UnknownDefinition(_)));
        assert!(matches!(chain.parse("http://localhost/x=y/z").unwrap_err(), Error::UnknownDefinition(_)));
        assert!(matches!(ParserChain::new().parse("/a=b/c").unwrap_err(), Error::UnknownDefinition(_)));
    }
}
