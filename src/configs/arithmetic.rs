pub mod memory {
    use log::debug;

    use crate::configs::units::{MemoryMeasureUnit, BYTE};
    use crate::error::{Error, Result};

    fn parse_operand(quantity: &str, unit: &str, position: &str) -> Result<(f64, MemoryMeasureUnit)> {
        let invalid = || Error::InvalidNumber {
            what: format!("{} memory quantity", position).into(),
            value: quantity.into()
        };
        let value = quantity.trim().parse::<f64>().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid())
        }
        let unit = MemoryMeasureUnit::parse(unit).map_err(|_| Error::UnknownUnit {
            family: "memory",
            unit: format!("{} ({} operand)", unit, position).into()
        })?;
        Ok((value, unit))
    }

    /// Adds two memory quantities and returns the sum in `result_unit`, truncated.
    pub fn add(
        quantity1: &str,
        unit1: &str,
        quantity2: &str,
        unit2: &str,
        result_unit: MemoryMeasureUnit
    ) -> Result<i64> {
        let (value1, unit1) = parse_operand(quantity1, unit1, "first")?;
        let (value2, unit2) = parse_operand(quantity2, unit2, "second")?;
        let bytes = convert(value1, unit1, BYTE) + convert(value2, unit2, BYTE);
        let result = convert(bytes, BYTE, result_unit) as i64;
        debug!("{} {:?} + {} {:?} = {} {:?}", value1, unit1, value2, unit2, result, result_unit);
        Ok(result)
    }

    pub fn convert(value: f64, from: MemoryMeasureUnit, to: MemoryMeasureUnit) -> f64 {
        if from == to {
            return value
        }
        value * to.conversion_factor(from)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::configs::units::{GIGABYTE, KILOBYTE, MEGABYTE};

        #[test]
        fn add_test() {
            assert_eq!(add("1", "G", "1024", "M", BYTE).unwrap(), 2 * 1024 * 1024 * 1024);
            assert_eq!(add("1", "kb", "512", "b", KILOBYTE).unwrap(), 1);
            assert_eq!(add("1.5", "GB", "0", "b", MEGABYTE).unwrap(), 1536);
        }

        #[test]
        fn add_invalid_operand_test() {
            let err = add("x", "G", "1", "M", BYTE).unwrap_err();
            assert!(err.to_string().contains("first memory quantity"));
            let err = add("1", "G", "1", "furlong", BYTE).unwrap_err();
            assert!(err.to_string().contains("second operand"));
            let err = add("NaN", "b", "1", "b", BYTE).unwrap_err();
            assert!(err.to_string().contains("first memory quantity"));
            let err = add("1", "M", "inf", "G", BYTE).unwrap_err();
            assert!(err.to_string().contains("second memory quantity"));
            assert!(add("-infinity", "b", "1", "b", BYTE).is_err());
        }

        #[test]
        fn convert_test() {
            assert_eq!(convert(3.0, MEGABYTE, MEGABYTE), 3.0);
            assert_eq!(convert(1.0, GIGABYTE, BYTE), 1073741824.0);
            assert_eq!(convert(2048.0, KILOBYTE, MEGABYTE), 2.0);
        }
    }
}

pub mod percentage {
    use crate::error::{Error, Result};

    pub fn parse(s: &str) -> Result<f32> {
        s.trim().parse::<f32>().map_err(|e| Error::InvalidNumber {
            what: format!("percentage ({})", e).into(),
            value: s.into()
        })
    }

}
