// protocols
pub const JBOSSCLI: &str = "jbosscli";
pub const JMX: &str = "jmx";
pub const PROTOCOL_SEPARATOR: &str = "://";

// default endpoints
pub const DEFAULT_HOST: &str = "localhost";
pub const JBOSSCLI_DEFAULT_PORT: u16 = 9999;
pub const JMX_DEFAULT_PORT: u16 = 1099;

// value types
pub const STRING: &str = "string";
pub const INT: &str = "int";
pub const LONG: &str = "long";
pub const FLOAT: &str = "float";
pub const DOUBLE: &str = "double";
pub const BOOLEAN: &str = "boolean";
