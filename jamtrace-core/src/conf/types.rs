use crate::analysis::{
    AnalysisOptions, DEFAULT_DISPLAY_LIMIT, DEFAULT_STDOUT_PATTERNS, RenderOptions,
    StdoutScanner,
};
use crate::conf::ConfigError;
use serde::Deserialize;

/// Optional analyzer settings, read from an HCL file.
///
/// ```hcl
/// display_limit         = 20
/// extra_stdout_patterns = ["segmentation fault"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Replaces the built-in failure signatures when set.
    #[serde(default)]
    pub stdout_patterns: Option<Vec<String>>,

    /// Appended to whichever signature list is in use.
    #[serde(default)]
    pub extra_stdout_patterns: Vec<String>,
}

fn default_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            display_limit: default_display_limit(),
            stdout_patterns: None,
            extra_stdout_patterns: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display_limit == 0 {
            return Err(ConfigError::InvalidDisplayLimit {
                limit: self.display_limit,
            });
        }
        self.stdout_scanner().map(|_| ())
    }

    /// Signature patterns in match priority order.
    pub fn effective_stdout_patterns(&self) -> Vec<String> {
        let base = match &self.stdout_patterns {
            Some(patterns) => patterns.clone(),
            None => DEFAULT_STDOUT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        };

        base.into_iter()
            .chain(self.extra_stdout_patterns.iter().cloned())
            .collect()
    }

    pub fn stdout_scanner(&self) -> Result<StdoutScanner, ConfigError> {
        StdoutScanner::new(self.effective_stdout_patterns())
    }

    pub fn analysis_options(&self) -> Result<AnalysisOptions, ConfigError> {
        Ok(AnalysisOptions {
            display_limit: self.display_limit,
            scanner: self.stdout_scanner()?,
        })
    }

    pub fn render_options(&self, show_drop_lines: bool) -> RenderOptions {
        RenderOptions {
            display_limit: self.display_limit,
            show_drop_lines,
        }
    }
}
