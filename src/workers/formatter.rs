use chrono::NaiveDateTime;
use log::debug;
use std::sync::Arc;

use crate::configs::event::{Event, FaultCause, Property};
use crate::configs::terms::csv;
use crate::managers::repository::MetricRepository;
use crate::utils::utils;

/// Renders events as CSV lines.
///
/// The header is a one-shot: once armed with [`CsvFormatter::set_header_on`]
/// it precedes the next rendered event and is then disarmed.
#[derive(Debug, Default)]
pub struct CsvFormatter {
    header_on: bool,
    ignore_faults: bool,
    output_format: Option<Box<str>>,
    fields: Vec<Box<str>>,
    repository: Option<Arc<MetricRepository>>
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header labels are looked up in `repository` when an output format is set.
    pub fn with_repository(mut self, repository: Arc<MetricRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn set_header_on(&mut self) {
        self.header_on = true;
    }

    pub fn is_header_on(&self) -> bool {
        self.header_on
    }

    pub fn set_ignore_faults(&mut self, ignore_faults: bool) {
        self.ignore_faults = ignore_faults;
    }

    pub fn is_ignore_faults(&self) -> bool {
        self.ignore_faults
    }

    /// Comma separated property names. An empty format renders every property.
    pub fn set_output_format(&mut self, format: &str) {
        self.fields = utils::split_top_level(format)
            .into_iter()
            .map(|(_, name)| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| name.into())
            .collect();
        self.output_format = if self.fields.is_empty() {
            None
        } else {
            Some(format.into())
        };
        debug!("CSV output format set to {:?}", self.fields);
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output_format.as_deref()
    }

    /// Returns `None` for faults when faults are ignored. Faults are rendered
    /// before the header is considered, so a fault never consumes it.
    pub fn format(&mut self, event: &dyn Event) -> Option<String> {
        if let Some(fault) = event.fault() {
            if self.ignore_faults {
                debug!("Ignoring fault {:?}", fault.message);
                return None
            }
            let mut line = match &fault.cause {
                Some(FaultCause::Parsing(error)) => error.to_string(),
                _ => event.to_string()
            };
            line.push('\n');
            return Some(line)
        }
        let mut result = String::new();
        if self.header_on {
            result.push_str(csv::HEADER_PREFIX);
            result.push_str(&self.header(event));
            result.push('\n');
            self.header_on = false;
        }
        let values = if self.fields.is_empty() {
            introspect(event)
                .into_iter()
                .map(|(_, value)| value)
                .collect::<Vec<_>>()
        } else {
            self.fields.iter()
                .map(|name| externalize(event, name))
                .collect()
        };
        result.push_str(&values.join(csv::SEPARATOR));
        result.push('\n');
        Some(result)
    }

    fn header(&self, event: &dyn Event) -> String {
        let labels: Vec<String> = if self.fields.is_empty() {
            introspect(event)
                .into_iter()
                .map(|(name, _)| name)
                .collect()
        } else {
            self.fields.iter()
                .map(|name| self.label(name))
                .collect()
        };
        labels.join(csv::SEPARATOR)
    }

    fn label(&self, name: &str) -> String {
        if name == csv::TIMESTAMP {
            return name.to_string()
        }
        match self.repository.as_ref().and_then(|r| r.find(name)) {
            Some(definition) => definition.label().to_string(),
            None => name.to_string()
        }
    }
}

fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(csv::DEFAULT_TIMESTAMP_FORMAT).to_string()
}

/// Name and value of every property, ordered by priority, timestamp first.
fn introspect(event: &dyn Event) -> Vec<(String, String)> {
    let mut result = Vec::new();
    if let Some(timestamp) = event.timestamp() {
        result.push((csv::TIMESTAMP.to_string(), format_timestamp(&timestamp)));
    }
    let mut properties: Vec<&Property> = event.properties().iter().collect();
    properties.sort_by_key(|p| p.priority);
    for property in properties {
        result.push((property.name.to_string(), property.externalize()));
    }
    result
}

/// Value of a named property, `name.key` for a map entry; empty when missing.
fn externalize(event: &dyn Event, name: &str) -> String {
    if name == csv::TIMESTAMP {
        return event.timestamp().map(|t| format_timestamp(&t)).unwrap_or_default()
    }
    if let Some(property) = event.property(name) {
        return property.externalize()
    }
    if let Some((base, key)) = name.split_once('.') {
        if let Some(value) = event.property(base).and_then(|p| p.entry(key)) {
            return value.to_string()
        }
    }
    String::new()
}
