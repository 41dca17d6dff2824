pub mod configs;
pub mod error;
pub mod managers;
pub mod utils;
pub mod workers;
