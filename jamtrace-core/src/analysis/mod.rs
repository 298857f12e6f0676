//! Run Log Analysis Pipeline
//!
//! This module reconstructs, after a test run has finished, whether the remote-control
//! protocol of a JammerNetz session behaved. Volume and routing commands travel from a
//! client to the server and fan out to the other clients; every hop writes a timestamped,
//! tagged line to a remote-control log, and the server additionally writes a free-text
//! stdout log.
//!
//! The analysis never fails because of the *contents* of a log. Missing files read as
//! empty, malformed lines are skipped, and everything irregular (sequence gaps, reordering,
//! drops, routing drift, crash signatures on stdout) becomes an [`Anomaly`] in the report.
//! Only resolving *which* files to read can fail.
//!
//! The overall data processing architecture is:
//!
//! resolve_run
//! RunFiles
//! read_text
//! parse_line
//! LogEvent
//! extract_facts
//! RemoteLogAggregator
//! summarize
//! analyze_run
//! RunReport
//! render_report
//!

/// Compiles a regex literal, panicking with the pattern name if it is invalid.
///
/// Only used for `static` patterns that are part of this crate.
macro_rules! static_regex {
    ($pattern:expr, $name:expr) => {
        regex::Regex::new($pattern)
            .unwrap_or_else(|_| panic!("static regex '{}' failed to compile", $name))
    };
}

mod aggregate;
mod constants;
mod counts;
mod discover;
mod error;
mod extract;
mod parse;
mod reader;
mod render;
mod report;
mod sequence;
mod stdout_scan;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{AnalysisOptions, RemoteLogAggregator, RemoteLogSnapshot, analyze_run};
pub use constants::{DEFAULT_DISPLAY_LIMIT, DEFAULT_LOGS_DIR};
pub use counts::SourceCounts;
pub use discover::{discover, resolve_glob};
pub use error::AnalyzeError;
pub use extract::{MATCHERS, NamedMatcher, extract_facts};
pub use parse::{ParsedLine, parse_line};
pub use reader::{RunFiles, find_latest_stamp, list_stamps, read_text, resolve_run};
pub use render::{RenderOptions, render_json, render_report, short_list};
pub use report::{
    Anomalies, Anomaly, AnomalySource, ClientFlow, CrossCheckTotals, RunReport,
    ServerRevisionFlow,
};
pub use sequence::{SequenceMode, SequenceSummary, summarize};
pub use stdout_scan::{DEFAULT_STDOUT_PATTERNS, StdoutScanner, SuspiciousLine, strip_ansi};
pub use types::{ApplyRecord, ApplySeq, Fact, LogEvent, RunStamp, SendRecord};
