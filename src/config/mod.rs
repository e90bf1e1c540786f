pub mod settings;

pub use settings::{LoggingConfig, ServiceConfig, Settings};
