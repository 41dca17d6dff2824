use thiserror::Error;

/// Errors raised while parsing metric definitions, units and CSV formats.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid source address \"{address}\": {reason}")]
    InvalidAddress { address: Box<str>, reason: Box<str> },

    #[error("missing path separator '/' in metric definition \"{0}\"")]
    MissingPath(Box<str>),

    #[error("missing attribute name in metric definition \"{0}\"")]
    MissingAttribute(Box<str>),

    #[error("invalid {kind} path \"{path}\" in metric definition \"{definition}\"")]
    InvalidPath { kind: &'static str, path: Box<str>, definition: Box<str> },

    #[error("invalid JMX ObjectName \"{name}\": {source}")]
    InvalidObjectName { name: Box<str>, source: ObjectNameError },

    #[error("no metric definition parser recognized \"{0}\"")]
    UnknownDefinition(Box<str>),

    #[error("unknown {family} measure unit \"{unit}\"")]
    UnknownUnit { family: &'static str, unit: Box<str> },

    #[error("cannot convert between {from} and {to}")]
    IncompatibleUnits { from: Box<str>, to: Box<str> },

    #[error("invalid {what} \"{value}\"")]
    InvalidNumber { what: Box<str>, value: Box<str> },

    #[error("unbalanced parentheses in CSV field specification \"{0}\"")]
    UnbalancedParentheses(Box<str>),

    #[error("invalid field type specification \"{0}\"")]
    InvalidFieldType(Box<str>),

    #[error("invalid date format pattern \"{pattern}\": {reason}")]
    InvalidDatePattern { pattern: Box<str>, reason: Box<str> },

    #[error("invalid {field_type} value \"{value}\" for field \"{field}\"")]
    InvalidFieldValue { field: Box<str>, field_type: Box<str>, value: Box<str> },

    #[error("invalid CSV format specification \"{spec}\": {reason}")]
    InvalidFormat { spec: Box<str>, reason: Box<str> },

    #[error("configuration error: {0}")]
    Config(Box<str>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reason an ObjectName failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObjectNameError {
    #[error("domain part must be followed by ':'")]
    MissingDomain,
    #[error("domain contains an illegal character '{0}'")]
    IllegalDomainCharacter(char),
    #[error("key properties cannot be empty")]
    EmptyKeyProperties,
    #[error("key property \"{0}\" is not of the form key=value")]
    MalformedKeyProperty(Box<str>),
    #[error("key \"{0}\" contains an illegal character")]
    IllegalKey(Box<str>),
    #[error("value of key \"{0}\" contains an illegal character")]
    IllegalValue(Box<str>),
    #[error("value of key \"{0}\" is an unterminated quoted string")]
    UnterminatedQuote(Box<str>),
    #[error("key \"{0}\" is duplicated")]
    DuplicateKey(Box<str>),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_test() {
        let err = Error::InvalidFieldType("ms".into());
        assert_eq!(err.to_string(), "invalid field type specification \"ms\"");
        let err = Error::InvalidObjectName {
            name: "a:".into(),
            source: ObjectNameError::EmptyKeyProperties
        };
        assert!(err.to_string().contains("key properties cannot be empty"));
    }
}
