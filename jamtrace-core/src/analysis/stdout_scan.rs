use crate::conf::ConfigError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// CSI sequences (cursor movement, colors) and two-byte escapes.
static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| static_regex!(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b[@-_]", "ANSI_ESCAPE"));

/// Failure signatures, in match priority order.
pub const DEFAULT_STDOUT_PATTERNS: &[&str] = &[
    r"fatal",
    r"overflow",
    r"send queue length overflow",
    r"malloc\(\)",
    r"unaligned tcache",
    r"aborted",
    r"assert",
    r"network down",
    r"disconnect",
    r"error",
];

/// Removes terminal control sequences and turns carriage-return redraws into lines.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").replace('\r', "\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuspiciousLine {
    pub line: String,
    /// The first pattern that matched.
    pub pattern: String,
}

#[derive(Debug, Clone)]
struct StdoutPattern {
    source: String,
    regex: Regex,
}

/// Flags stdout lines that match a failure signature. All patterns are case-insensitive.
#[derive(Debug, Clone)]
pub struct StdoutScanner {
    patterns: Vec<StdoutPattern>,
}

impl StdoutScanner {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref().to_string();
                RegexBuilder::new(&source)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| StdoutPattern {
                        source: source.clone(),
                        regex,
                    })
                    .map_err(|e| ConfigError::invalid_pattern(source, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    /// Scans raw stdout text. Each line is reported at most once, under its first
    /// matching pattern.
    pub fn scan(&self, text: &str) -> Vec<SuspiciousLine> {
        strip_ansi(text)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                self.patterns
                    .iter()
                    .find(|p| p.regex.is_match(line))
                    .map(|p| SuspiciousLine {
                        line: line.to_string(),
                        pattern: p.source.clone(),
                    })
            })
            .collect()
    }
}

impl Default for StdoutScanner {
    fn default() -> Self {
        Self::new(DEFAULT_STDOUT_PATTERNS)
            .unwrap_or_else(|e| panic!("default stdout patterns failed to compile: {e}"))
    }
}
