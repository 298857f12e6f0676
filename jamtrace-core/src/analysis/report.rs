use crate::analysis::counts::SourceCounts;
use crate::analysis::reader::RunFiles;
use crate::analysis::render::short_list;
use crate::analysis::sequence::SequenceSummary;
use crate::analysis::stdout_scan::SuspiciousLine;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "file", rename_all = "snake_case")]
pub enum AnomalySource {
    ServerRevisions,
    Client(String),
    CrossCheck,
    ServerStdout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub source: AnomalySource,
    pub message: String,
}

/// Anomalies of one run, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Anomalies(Vec<Anomaly>);

impl Anomalies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: AnomalySource, message: String) {
        info!(source = ?source, anomaly = %message, "anomaly recorded");
        self.0.push(Anomaly { source, message });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.0.iter()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.message.as_str())
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages().any(|m| m == message)
    }
}

/// Server Revision Anomalies
impl Anomalies {
    pub fn server_revisions_missing(&mut self, missing: &[u64], limit: usize) {
        self.record(
            AnomalySource::ServerRevisions,
            format!(
                "server revisions missing values: {}",
                short_list(missing, limit)
            ),
        );
    }

    pub fn server_revisions_non_monotonic(&mut self, count: usize) {
        self.record(
            AnomalySource::ServerRevisions,
            format!("server revisions non-monotonic events: {count}"),
        );
    }
}

/// Client Flow Anomalies
impl Anomalies {
    pub fn no_client_logs(&mut self) {
        self.record(
            AnomalySource::CrossCheck,
            "no client remote logs found".to_string(),
        );
    }

    pub fn sequence_gaps(&mut self, file: &str, stream: &str, missing: &[u64], limit: usize) {
        self.record(
            AnomalySource::Client(file.to_string()),
            format!(
                "{file}: {stream} sequence gaps {}",
                short_list(missing, limit)
            ),
        );
    }

    pub fn sequence_non_monotonic(&mut self, file: &str, stream: &str, count: usize) {
        self.record(
            AnomalySource::Client(file.to_string()),
            format!("{file}: {stream} non-monotonic count {count}"),
        );
    }

    pub fn drop_lines_present(&mut self, file: &str, count: usize) {
        self.record(
            AnomalySource::Client(file.to_string()),
            format!("{file}: drop lines present ({count})"),
        );
    }

    pub fn routing_drift_detected(&mut self, file: &str, count: u64) {
        self.record(
            AnomalySource::Client(file.to_string()),
            format!("{file}: routing drift detected ({count})"),
        );
    }
}

/// Cross-Check Anomalies
impl Anomalies {
    pub fn no_applies(&mut self) {
        self.record(
            AnomalySource::CrossCheck,
            "no client.apply entries found (older binary or apply logging missing)".to_string(),
        );
    }

    pub fn applies_exceed_sends(&mut self, applies: usize, sends: usize) {
        self.record(
            AnomalySource::CrossCheck,
            format!("apply count ({applies}) exceeds send count ({sends})"),
        );
    }
}

/// Server Stdout Anomalies
impl Anomalies {
    pub fn suspicious_stdout(&mut self, count: usize) {
        self.record(
            AnomalySource::ServerStdout,
            format!("server stdout contains {count} suspicious lines"),
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerRevisionFlow {
    /// Revision markers seen, duplicates included.
    pub events: usize,
    /// Computed over unique revisions.
    pub summary: SequenceSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientFlow {
    pub file_name: String,
    pub path: PathBuf,
    pub send: SequenceSummary,
    pub apply: SequenceSummary,
    pub drops: u64,
    pub routing_drift: u64,
    pub drop_lines: Vec<String>,
    pub counts: SourceCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrossCheckTotals {
    pub sends: usize,
    pub applies: usize,
    pub drops: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub files: RunFiles,
    pub server: ServerRevisionFlow,
    pub clients: Vec<ClientFlow>,
    pub totals: CrossCheckTotals,
    pub suspicious_stdout: Vec<SuspiciousLine>,
    pub anomalies: Anomalies,
}

impl RunReport {
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}
