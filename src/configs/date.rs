use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use std::fmt::{self, Write};

use crate::error::{Error, Result};

/// A date format written with `yyyy-MM-dd HH:mm:ss` style pattern letters,
/// compiled into a chrono format string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatePattern {
    pattern: Box<str>,
    format: Box<str>
}

impl DatePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidDatePattern {
            pattern: pattern.into(),
            reason: reason.into()
        };
        if pattern.is_empty() {
            return Err(invalid(String::from("empty pattern")))
        }
        let mut format = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // '' is a literal quote, 'text' is quoted text
                if chars.get(i + 1) == Some(&'\'') {
                    format.push('\'');
                    i += 2;
                    continue;
                }
                let end = match chars[i + 1..].iter().position(|&q| q == '\'') {
                    Some(end) => i + 1 + end,
                    None => return Err(invalid(String::from("unterminated quote")))
                };
                for &q in &chars[i + 1..end] {
                    push_literal(&mut format, q);
                }
                i = end + 1;
                continue;
            }
            if !c.is_ascii_alphabetic() {
                push_literal(&mut format, c);
                i += 1;
                continue;
            }
            let mut count = 1;
            while chars.get(i + count) == Some(&c) {
                count += 1;
            }
            let item = match (c, count) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1 | 2) => "%m",
                ('M', 3) => "%b",
                ('M', _) => "%B",
                ('d', _) => "%d",
                ('H', _) => "%H",
                ('h', _) => "%I",
                ('m', _) => "%M",
                ('s', _) => "%S",
                ('S', _) => "%3f",
                ('a', _) => "%p",
                ('E', 1..=3) => "%a",
                ('E', _) => "%A",
                ('D', _) => "%j",
                ('z' | 'Z' | 'X', _) => {
                    return Err(invalid(String::from("time zone letters are not supported for local timestamps")))
                },
                _ => return Err(invalid(format!("illegal pattern character '{}'", c)))
            };
            format.push_str(item);
            i += count;
        }
        Ok(Self {
            pattern: pattern.into(),
            format: format.into()
        })
    }

    /// Falls back to the ISO form if chrono cannot render the pattern.
    pub fn format(&self, timestamp: &NaiveDateTime) -> String {
        let mut result = String::new();
        if write!(result, "{}", timestamp.format(&self.format)).is_err() {
            warn!("Cannot format {} with pattern {:?}", timestamp, self.pattern);
            return timestamp.to_string()
        }
        result
    }

    /// Patterns without time fields parse to midnight, patterns with only
    /// time fields to that time on 1970-01-01.
    pub fn parse(&self, s: &str) -> Result<NaiveDateTime> {
        let invalid = || Error::InvalidFieldValue {
            field: self.pattern.clone(),
            field_type: "time".into(),
            value: s.into()
        };
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(s, &self.format) {
            return Ok(timestamp)
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, &self.format) {
            return date.and_hms_opt(0, 0, 0).ok_or_else(invalid)
        }
        if let Ok(time) = NaiveTime::parse_from_str(s, &self.format) {
            return NaiveDate::from_ymd_opt(1970, 1, 1)
                .map(|date| date.and_time(time))
                .ok_or_else(invalid)
        }
        Err(invalid())
    }
}

fn push_literal(format: &mut String, c: char) {
    if c == '%' {
        format.push_str("%%");
    } else {
        format.push(c);
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
