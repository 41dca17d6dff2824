use log::debug;
use std::fmt;

use crate::configs::date::DatePattern;
use crate::configs::event::{ParsingError, Property, PropertyValue};
use crate::configs::terms::csv;
use crate::error::{Error, Result};
use crate::utils::utils;

#[derive(Clone, Debug, PartialEq)]
pub enum CsvFieldType {
    String,
    Int,
    Long,
    Float,
    Double,
    Time(DatePattern)
}

impl CsvFieldType {
    pub fn parse(s: &str) -> Result<Self> {
        let token = s.trim();
        if let Some(pattern) = token.strip_prefix(csv::TIME) {
            if let Some(pattern) = pattern.strip_prefix(':') {
                return Ok(CsvFieldType::Time(DatePattern::new(pattern.trim())?))
            }
            if pattern.is_empty() {
                return Err(Error::InvalidDatePattern {
                    pattern: "".into(),
                    reason: "time fields require a \":pattern\" suffix".into()
                })
            }
        }
        match token {
            csv::STRING => Ok(CsvFieldType::String),
            csv::INT => Ok(CsvFieldType::Int),
            csv::LONG => Ok(CsvFieldType::Long),
            csv::FLOAT => Ok(CsvFieldType::Float),
            csv::DOUBLE => Ok(CsvFieldType::Double),
            _ => Err(Error::InvalidFieldType(token.into()))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CsvFieldType::String => csv::STRING,
            CsvFieldType::Int => csv::INT,
            CsvFieldType::Long => csv::LONG,
            CsvFieldType::Float => csv::FLOAT,
            CsvFieldType::Double => csv::DOUBLE,
            CsvFieldType::Time(_) => csv::TIME
        }
    }
}

impl fmt::Display for CsvFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvFieldType::Time(pattern) => write!(f, "{}:{}", csv::TIME, pattern),
            _ => f.write_str(self.name())
        }
    }
}

/// One column of a CSV line: `name` or `name(type)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvField {
    pub name: Box<str>,
    pub field_type: CsvFieldType
}

impl CsvField {
    pub fn new(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let (name, field_type) = match (spec.find('('), spec.find(')')) {
            (None, None) => (spec, CsvFieldType::String),
            (Some(open), Some(close)) if open < close => {
                if !spec[close + 1..].trim().is_empty() {
                    return Err(Error::InvalidFieldType(spec[open + 1..].into()))
                }
                (spec[..open].trim(), CsvFieldType::parse(&spec[open + 1..close])?)
            },
            _ => return Err(Error::UnbalancedParentheses(spec.into()))
        };
        Ok(Self {
            name: name.into(),
            field_type
        })
    }

    pub fn with_type(name: &str, field_type: CsvFieldType) -> Self {
        Self {
            name: name.into(),
            field_type
        }
    }

    /// Converts a raw CSV value into a property typed after this field.
    pub fn to_property(&self, raw: &str) -> Result<Property> {
        let trimmed = raw.trim();
        let invalid = || Error::InvalidFieldValue {
            field: self.name.clone(),
            field_type: self.field_type.to_string().into(),
            value: trimmed.into()
        };
        let value = match &self.field_type {
            CsvFieldType::String => PropertyValue::String(trimmed.into()),
            CsvFieldType::Int => PropertyValue::Int(trimmed.parse().map_err(|_| invalid())?),
            CsvFieldType::Long => PropertyValue::Long(trimmed.parse().map_err(|_| invalid())?),
            CsvFieldType::Float => PropertyValue::Float(trimmed.parse().map_err(|_| invalid())?),
            CsvFieldType::Double => PropertyValue::Double(trimmed.parse().map_err(|_| invalid())?),
            CsvFieldType::Time(pattern) => PropertyValue::Time(
                pattern.parse(trimmed).map_err(|_| invalid())?,
                Some(pattern.clone())
            )
        };
        Ok(Property::new(&self.name, value))
    }
}

impl fmt::Display for CsvField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field_type {
            CsvFieldType::String => f.write_str(&self.name),
            _ => write!(f, "{}({})", self.name, self.field_type)
        }
    }
}

/// An ordered list of CSV fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvFormat {
    fields: Vec<CsvField>
}

impl CsvFormat {
    pub fn new(spec: &str) -> Result<Self> {
        if !spec.contains(',') {
            return Err(Error::InvalidFormat {
                spec: spec.into(),
                reason: "no comma-separated fields".into()
            })
        }
        let pieces = utils::split_top_level(spec);
        let last = pieces.len() - 1;
        let mut result = Self::default();
        for (i, (_, piece)) in pieces.into_iter().enumerate() {
            if i == last && piece.trim().is_empty() && !result.fields.is_empty() {
                debug!("Dropping trailing empty field in {:?}", spec);
                break;
            }
            result.add_field(CsvField::new(piece)?);
        }
        Ok(result)
    }

    /// Appends a field, naming it after its position when it has no name.
    pub fn add_field(&mut self, mut field: CsvField) {
        if field.name.is_empty() {
            field.name = unnamed_field(self.fields.len() + 1).into();
        }
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[CsvField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CsvField> {
        self.fields.iter().find(|f| &*f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts one CSV line into properties, one per field, prioritized by
    /// column. Missing trailing values become null properties; surplus values
    /// are an error.
    pub fn parse_line(&self, line: &str) -> std::result::Result<Vec<Property>, ParsingError> {
        let values: Vec<(usize, &str)> = line.split(',')
            .scan(0, |offset, value| {
                let start = *offset;
                *offset += value.len() + 1;
                Some((start, value))
            })
            .collect();
        if values.len() > self.fields.len() {
            return Err(ParsingError {
                line: None,
                position: values.get(self.fields.len()).map(|(offset, _)| *offset),
                message: format!("{} values for {} fields", values.len(), self.fields.len()).into()
            })
        }
        let mut properties = Vec::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            let property = match values.get(i) {
                Some((offset, raw)) => field.to_property(raw).map_err(|e| ParsingError {
                    line: None,
                    position: Some(*offset),
                    message: e.to_string().into()
                })?,
                None => Property::new(&field.name, PropertyValue::Null)
            };
            properties.push(property.with_priority(i as i32));
        }
        Ok(properties)
    }
}

fn unnamed_field(position: usize) -> String {
    format!("{}{:02}", csv::UNNAMED_FIELD_PREFIX, position)
}

impl fmt::Display for CsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(csv::SEPARATOR)?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}
