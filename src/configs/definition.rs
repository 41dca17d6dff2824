use std::fmt;

use crate::configs::address::MetricSource;
use crate::configs::objectname::ObjectName;
use crate::configs::terms::metric;
use crate::configs::units::MeasureUnit;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Int,
    Long,
    Float,
    Double,
    Boolean
}

impl ValueType {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            metric::STRING => Ok(ValueType::String),
            metric::INT | "integer" => Ok(ValueType::Int),
            metric::LONG => Ok(ValueType::Long),
            metric::FLOAT => Ok(ValueType::Float),
            metric::DOUBLE => Ok(ValueType::Double),
            metric::BOOLEAN => Ok(ValueType::Boolean),
            _ => Err(Error::Config(format!("unknown metric value type \"{}\"", s).into()))
        }
    }
}

/// One `key=value` segment of a JBoss CLI path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CliPathSegment {
    pub key: Box<str>,
    pub value: Box<str>
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CliPath {
    pub segments: Vec<CliPathSegment>
}

impl fmt::Display for CliPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}={}", segment.key, segment.value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    JBossCli { path: CliPath, attribute: Box<str> },
    Jmx { object_name: ObjectName, attribute: Box<str> }
}

/// A parsed description of one measurable attribute at one source.
#[derive(Clone, Debug)]
pub struct MetricDefinition {
    kind: DefinitionKind,
    source: MetricSource,
    name: Box<str>,
    label: Option<Box<str>>,
    description: Option<Box<str>>,
    unit: Option<MeasureUnit>,
    value_type: Option<ValueType>
}

impl MetricDefinition {
    pub fn new(kind: DefinitionKind, source: MetricSource) -> Self {
        let id = id_of(&kind);
        let separator = if id.starts_with('/') { "" } else { "/" };
        let name = format!("{}{}{}{}{}", source.protocol.name(), metric::PROTOCOL_SEPARATOR, source, separator, id);
        Self {
            kind,
            source,
            name: name.into(),
            label: None,
            description: None,
            unit: None,
            value_type: None
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_unit(mut self, unit: MeasureUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn kind(&self) -> &DefinitionKind {
        &self.kind
    }

    /// The literal definition, fixed when the definition was built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source-independent part of the definition.
    pub fn id(&self) -> String {
        id_of(&self.kind)
    }

    pub fn attribute(&self) -> &str {
        match &self.kind {
            DefinitionKind::JBossCli { attribute, .. } => attribute,
            DefinitionKind::Jmx { attribute, .. } => attribute
        }
    }

    pub fn source(&self) -> &MetricSource {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut MetricSource {
        &mut self.source
    }

    /// Falls back to the attribute name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.attribute())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit(&self) -> Option<MeasureUnit> {
        self.unit
    }

    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }
}

fn id_of(kind: &DefinitionKind) -> String {
    match kind {
        DefinitionKind::JBossCli { path, attribute } => format!("{}/{}", path, attribute),
        DefinitionKind::Jmx { object_name, attribute } => format!("{}/{}", object_name, attribute)
    }
}

impl fmt::Display for MetricDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::address::Protocol;

    fn cli_definition() -> MetricDefinition {
        MetricDefinition::new(
            DefinitionKind::JBossCli {
                path: CliPath {
                    segments: vec![CliPathSegment { key: "subsystem".into(), value: "web".into() }]
                },
                attribute: "requestCount".into()
            },
            MetricSource::new(Protocol::JBossCli)
        )
    }

    #[test]
    fn name_test() {
        let definition = cli_definition();
        assert_eq!(definition.name(), "jbosscli://localhost:9999/subsystem=web/requestCount");
        assert_eq!(definition.id(), "/subsystem=web/requestCount");
        assert_eq!(definition.label(), "requestCount");
    }

    #[test]
    fn name_frozen_after_source_change_test() {
        let mut definition = cli_definition();
        definition.source_mut().host = "other".into();
        definition.source_mut().port = 1;
        assert_eq!(definition.source().to_string(), "other:1");
        assert_eq!(definition.name(), "jbosscli://localhost:9999/subsystem=web/requestCount");
    }

    #[test]
    fn metadata_test() {
        let definition = cli_definition()
            .with_label("Requests")
            .with_description("request count")
            .with_unit(MeasureUnit::Percentage)
            .with_value_type(ValueType::parse("Long").unwrap());
        assert_eq!(definition.label(), "Requests");
        assert_eq!(definition.description(), Some("request count"));
        assert_eq!(definition.unit(), Some(MeasureUnit::Percentage));
        assert_eq!(definition.value_type(), Some(ValueType::Long));
        assert!(ValueType::parse("date").is_err());
    }
}
