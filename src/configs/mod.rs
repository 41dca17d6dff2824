pub mod address;
pub mod arithmetic;
pub mod config;
pub mod csv;
pub mod date;
pub mod definition;
pub mod event;
pub mod jbosscli;
pub mod jmx;
pub mod objectname;
pub mod terms;
pub mod units;
