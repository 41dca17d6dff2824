use std::fmt;

use crate::error::{Error, Result};

const MEMORY: &str = "memory";
const TIME: &str = "time";
const PERCENTAGE: &str = "percentage";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryMeasureUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeMeasureUnit {
    Millisecond,
    Second
}

/// A unit of measurement. Conversion factors are only defined between units of
/// the same family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureUnit {
    Memory(MemoryMeasureUnit),
    Time(TimeMeasureUnit),
    Percentage
}

pub const BYTE: MemoryMeasureUnit = MemoryMeasureUnit::Byte;
pub const KILOBYTE: MemoryMeasureUnit = MemoryMeasureUnit::Kilobyte;
pub const MEGABYTE: MemoryMeasureUnit = MemoryMeasureUnit::Megabyte;
pub const GIGABYTE: MemoryMeasureUnit = MemoryMeasureUnit::Gigabyte;
pub const MILLISECOND: TimeMeasureUnit = TimeMeasureUnit::Millisecond;
pub const SECOND: TimeMeasureUnit = TimeMeasureUnit::Second;

impl MemoryMeasureUnit {
    pub const ALL: [MemoryMeasureUnit; 4] = [BYTE, KILOBYTE, MEGABYTE, GIGABYTE];

    /// Number of bytes in one unit.
    pub fn base_quantity(&self) -> u64 {
        match self {
            MemoryMeasureUnit::Byte => 1,
            MemoryMeasureUnit::Kilobyte => 1024,
            MemoryMeasureUnit::Megabyte => 1024 * 1024,
            MemoryMeasureUnit::Gigabyte => 1024 * 1024 * 1024
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemoryMeasureUnit::Byte => "bytes",
            MemoryMeasureUnit::Kilobyte => "KB",
            MemoryMeasureUnit::Megabyte => "MB",
            MemoryMeasureUnit::Gigabyte => "GB"
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MemoryMeasureUnit::Byte => "BYTE",
            MemoryMeasureUnit::Kilobyte => "KILOBYTE",
            MemoryMeasureUnit::Megabyte => "MEGABYTE",
            MemoryMeasureUnit::Gigabyte => "GIGABYTE"
        }
    }

    /// How many of `self` equal one `other`.
    pub fn conversion_factor(&self, other: MemoryMeasureUnit) -> f64 {
        other.base_quantity() as f64 / self.base_quantity() as f64
    }

    pub fn parse(s: &str) -> Result<Self> {
        let unit = match s.trim().to_lowercase().as_str() {
            "b" | "byte" | "bytes" => Some(BYTE),
            "k" | "kb" | "kib" | "kilobyte" | "kilobytes" => Some(KILOBYTE),
            "m" | "mb" | "mib" | "megabyte" | "megabytes" => Some(MEGABYTE),
            "g" | "gb" | "gib" | "gigabyte" | "gigabytes" => Some(GIGABYTE),
            _ => None
        };
        unit.or_else(|| Self::ALL.into_iter().find(|u| u.name() == s.trim()))
            .ok_or_else(|| Error::UnknownUnit { family: MEMORY, unit: s.into() })
    }
}

impl TimeMeasureUnit {
    pub const ALL: [TimeMeasureUnit; 2] = [MILLISECOND, SECOND];

    /// Number of microseconds in one unit.
    pub fn base_quantity(&self) -> u64 {
        match self {
            TimeMeasureUnit::Millisecond => 1_000,
            TimeMeasureUnit::Second => 1_000_000
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeMeasureUnit::Millisecond => "ms",
            TimeMeasureUnit::Second => "s"
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeMeasureUnit::Millisecond => "MILLISECOND",
            TimeMeasureUnit::Second => "SECOND"
        }
    }

    pub fn conversion_factor(&self, other: TimeMeasureUnit) -> f64 {
        other.base_quantity() as f64 / self.base_quantity() as f64
    }

    pub fn parse(s: &str) -> Result<Self> {
        let unit = match s.trim().to_lowercase().as_str() {
            "ms" | "msec" | "millisecond" | "milliseconds" => Some(MILLISECOND),
            "s" | "sec" | "second" | "seconds" => Some(SECOND),
            _ => None
        };
        unit.or_else(|| Self::ALL.into_iter().find(|u| u.name() == s.trim()))
            .ok_or_else(|| Error::UnknownUnit { family: TIME, unit: s.into() })
    }
}

impl MeasureUnit {
    pub fn family(&self) -> &'static str {
        match self {
            MeasureUnit::Memory(_) => MEMORY,
            MeasureUnit::Time(_) => TIME,
            MeasureUnit::Percentage => PERCENTAGE
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeasureUnit::Memory(unit) => unit.label(),
            MeasureUnit::Time(unit) => unit.label(),
            MeasureUnit::Percentage => "%"
        }
    }

    /// Returns `None` for percentages, which have nothing to convert to.
    pub fn conversion_factor(&self, other: &MeasureUnit) -> Result<Option<f64>> {
        match (self, other) {
            (MeasureUnit::Memory(this), MeasureUnit::Memory(that)) => Ok(Some(this.conversion_factor(*that))),
            (MeasureUnit::Time(this), MeasureUnit::Time(that)) => Ok(Some(this.conversion_factor(*that))),
            (MeasureUnit::Percentage, MeasureUnit::Percentage) => Ok(None),
            _ => Err(Error::IncompatibleUnits {
                from: format!("{} ({})", self, self.family()).into(),
                to: format!("{} ({})", other, other.family()).into()
            })
        }
    }

    /// Tries memory, time and percentage units, in this order.
    pub fn parse(s: &str) -> Result<Self> {
        if let Ok(unit) = MemoryMeasureUnit::parse(s) {
            return Ok(MeasureUnit::Memory(unit))
        }
        if let Ok(unit) = TimeMeasureUnit::parse(s) {
            return Ok(MeasureUnit::Time(unit))
        }
        match s.trim().to_lowercase().as_str() {
            "%" | "percent" | "percentage" => Ok(MeasureUnit::Percentage),
            _ => Err(Error::UnknownUnit { family: "measure", unit: s.into() })
        }
    }
}

impl From<MemoryMeasureUnit> for MeasureUnit {
    fn from(unit: MemoryMeasureUnit) -> Self {
        MeasureUnit::Memory(unit)
    }
}

impl From<TimeMeasureUnit> for MeasureUnit {
    fn from(unit: TimeMeasureUnit) -> Self {
        MeasureUnit::Time(unit)
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
