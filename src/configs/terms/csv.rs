// field types
pub const STRING: &str = "string";
pub const INT: &str = "int";
pub const LONG: &str = "long";
pub const FLOAT: &str = "float";
pub const DOUBLE: &str = "double";
pub const TIME: &str = "time";

// formatting
pub const SEPARATOR: &str = ", ";
pub const HEADER_PREFIX: &str = "# ";
pub const COMMENT: char = '#';
pub const TIMESTAMP: &str = "timestamp";
// MM/dd/yy HH:mm:ss
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S";
pub const UNNAMED_FIELD_PREFIX: &str = "CSVField";
