use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt;

use crate::configs::date::DatePattern;

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Null,
    String(Box<str>),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Time(NaiveDateTime, Option<DatePattern>),
    Map(BTreeMap<Box<str>, Box<str>>)
}

/// A named, typed value carried by an event. Properties sort by priority,
/// lowest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: Box<str>,
    pub value: PropertyValue,
    pub priority: i32
}

impl Property {
    pub fn new(name: &str, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
            priority: 0
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn string(name: &str, value: &str) -> Self {
        Self::new(name, PropertyValue::String(value.into()))
    }

    /// The value as it appears in a CSV line. Null renders as an empty string.
    pub fn externalize(&self) -> String {
        match &self.value {
            PropertyValue::Null => String::new(),
            PropertyValue::String(value) => value.to_string(),
            PropertyValue::Int(value) => value.to_string(),
            PropertyValue::Long(value) => value.to_string(),
            PropertyValue::Float(value) => value.to_string(),
            PropertyValue::Double(value) => value.to_string(),
            PropertyValue::Boolean(value) => value.to_string(),
            PropertyValue::Time(value, Some(pattern)) => pattern.format(value),
            PropertyValue::Time(value, None) => value.to_string(),
            PropertyValue::Map(entries) => {
                let pairs: Vec<String> = entries.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                pairs.join(";")
            }
        }
    }

    /// Looks up one entry of a map-valued property.
    pub fn entry(&self, key: &str) -> Option<&str> {
        match &self.value {
            PropertyValue::Map(entries) => entries.get(key).map(|v| &**v),
            _ => None
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.externalize())
    }
}

/// Parse failure carried through an event stream instead of aborting it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsingError {
    pub line: Option<u64>,
    pub position: Option<usize>,
    pub message: Box<str>
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("parsing error")?;
        if let Some(line) = self.line {
            write!(f, " at line {}", line)?;
            if let Some(position) = self.position {
                write!(f, ", position {}", position)?;
            }
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FaultCause {
    Parsing(ParsingError),
    Other(Box<str>)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    pub message: Box<str>,
    pub cause: Option<FaultCause>
}

/// Read-only view of an event, as consumed by the CSV formatter.
pub trait Event: fmt::Debug + fmt::Display {
    /// Properties in declaration order.
    fn properties(&self) -> &[Property];

    fn property(&self, name: &str) -> Option<&Property> {
        self.properties().iter().find(|p| &*p.name == name)
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        None
    }

    fn fault(&self) -> Option<&Fault> {
        None
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenericEvent {
    properties: Vec<Property>,
    timestamp: Option<NaiveDateTime>
}

impl GenericEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timed(timestamp: NaiveDateTime) -> Self {
        Self {
            properties: Vec::new(),
            timestamp: Some(timestamp)
        }
    }

    /// Replaces a property of the same name, keeping its position.
    pub fn set_property(&mut self, property: Property) {
        if let Some(existing) = self.properties.iter_mut().find(|p| p.name == property.name) {
            *existing = property;
        } else {
            self.properties.push(property);
        }
    }

    pub fn set_timestamp(&mut self, timestamp: Option<NaiveDateTime>) {
        self.timestamp = timestamp;
    }
}

impl Event for GenericEvent {
    fn properties(&self) -> &[Property] {
        &self.properties
    }

    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

impl fmt::Display for GenericEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GenericEvent[")?;
        let mut first = true;
        if let Some(timestamp) = self.timestamp {
            write!(f, "timestamp={}", timestamp)?;
            first = false;
        }
        for property in &self.properties {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", property)?;
            first = false;
        }
        f.write_str("]")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaultEvent {
    fault: Fault
}

impl FaultEvent {
    pub fn new(message: &str, cause: Option<FaultCause>) -> Self {
        Self {
            fault: Fault {
                message: message.into(),
                cause
            }
        }
    }

    pub fn parsing(error: ParsingError) -> Self {
        let message = error.message.clone();
        Self::new(&message, Some(FaultCause::Parsing(error)))
    }
}

impl Event for FaultEvent {
    fn properties(&self) -> &[Property] {
        &[]
    }

    fn fault(&self) -> Option<&Fault> {
        Some(&self.fault)
    }
}

impl fmt::Display for FaultEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaultEvent[{}", self.fault.message)?;
        match &self.fault.cause {
            Some(FaultCause::Parsing(error)) => write!(f, " ({})", error)?,
            Some(FaultCause::Other(cause)) => write!(f, " ({})", cause)?,
            None => {}
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn externalize_test() {
        assert_eq!(Property::new("a", PropertyValue::Null).externalize(), "");
        assert_eq!(Property::new("a", PropertyValue::Float(1.5)).externalize(), "1.5");
        assert_eq!(Property::new("a", PropertyValue::Long(-7)).externalize(), "-7");
        let timestamp = NaiveDate::from_ymd_opt(2016, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let pattern = DatePattern::new("yyyy/MM/dd").unwrap();
        assert_eq!(Property::new("t", PropertyValue::Time(timestamp, Some(pattern))).externalize(), "2016/01/02");
        let mut entries = BTreeMap::new();
        entries.insert("b".into(), "2".into());
        entries.insert("a".into(), "1".into());
        let map = Property::new("m", PropertyValue::Map(entries));
        assert_eq!(map.externalize(), "a=1;b=2");
        assert_eq!(map.entry("b"), Some("2"));
        assert_eq!(map.entry("c"), None);
    }

    #[test]
    fn parsing_error_test() {
        let mut error = ParsingError { line: None, position: None, message: "bad".into() };
        assert_eq!(error.to_string(), "parsing error: bad");
        error.line = Some(3);
        assert_eq!(error.to_string(), "parsing error at line 3: bad");
        error.position = Some(7);
        assert_eq!(error.to_string(), "parsing error at line 3, position 7: bad");
    }

    #[test]
    fn generic_event_test() {
        let mut event = GenericEvent::new();
        event.set_property(Property::string("a", "1"));
        event.set_property(Property::string("b", "2"));
        event.set_property(Property::string("a", "3"));
        assert_eq!(event.properties().len(), 2);
        assert_eq!(event.property("a").unwrap().externalize(), "3");
        assert!(event.fault().is_none());
        assert_eq!(event.to_string(), "GenericEvent[a=3, b=2]");
    }

    #[test]
    fn fault_event_test() {
        let event = FaultEvent::new("boom", Some(FaultCause::Other("disk".into())));
        assert_eq!(&*event.fault().unwrap().message, "boom");
        assert!(event.properties().is_empty());
        assert_eq!(event.to_string(), "FaultEvent[boom (disk)]");
    }
}
