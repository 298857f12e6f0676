use crate::conf::error::ConfigError;
use crate::conf::types::AnalyzerConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config: AnalyzerConfig = hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    config.validate()?;

    debug!(
        path = %path.display(),
        display_limit = config.display_limit,
        stdout_patterns = config.effective_stdout_patterns().len(),
        "analyzer config loaded"
    );

    Ok(config)
}

/// Loads `path` when given, otherwise returns the built-in defaults.
pub fn load_optional_config(path: Option<&Path>) -> Result<AnalyzerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AnalyzerConfig::default()),
    }
}
