use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::configs::csv::CsvFormat;
use crate::configs::event::{Event, FaultEvent, GenericEvent, PropertyValue};
use crate::configs::terms::csv;

/// Turns CSV lines into events. Lines that fail to parse become fault events
/// so the stream keeps going.
#[derive(Debug)]
pub struct CsvEventReader {
    format: CsvFormat,
    line_number: AtomicU64
}

impl CsvEventReader {
    pub fn new(format: CsvFormat) -> Self {
        Self {
            format,
            line_number: AtomicU64::new(0)
        }
    }

    pub fn format(&self) -> &CsvFormat {
        &self.format
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> u64 {
        self.line_number.load(Ordering::SeqCst)
    }

    /// Returns `None` for blank and comment lines.
    pub fn read_line(&self, line: &str) -> Option<Box<dyn Event + Send>> {
        let line_number = self.line_number.fetch_add(1, Ordering::SeqCst) + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(csv::COMMENT) {
            return None
        }
        match self.format.parse_line(line) {
            Ok(properties) => {
                let mut event = GenericEvent::new();
                for property in properties {
                    let timestamp = match &property.value {
                        PropertyValue::Time(timestamp, _) if &*property.name == csv::TIMESTAMP => Some(*timestamp),
                        _ => None
                    };
                    match timestamp {
                        Some(_) => event.set_timestamp(timestamp),
                        None => event.set_property(property)
                    }
                }
                let event: Box<dyn Event + Send> = Box::new(event);
                Some(event)
            },
            Err(mut error) => {
                error.line = Some(line_number);
                debug!("Line {}: {}", line_number, error);
                let event: Box<dyn Event + Send> = Box::new(FaultEvent::parsing(error));
                Some(event)
            }
        }
    }
}
