pub mod formatter;
pub mod reader;
