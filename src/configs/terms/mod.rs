pub mod common;
pub mod csv;
pub mod metric;
