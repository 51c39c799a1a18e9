mod config;
mod unit;

pub use config::{SetupConfig, CONFIG_FILE_NAME};
pub use unit::ServiceUnit;
