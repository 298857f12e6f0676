mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_optional_config};
pub use types::AnalyzerConfig;
