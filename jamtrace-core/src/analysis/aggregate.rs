use crate::analysis::constants::DEFAULT_DISPLAY_LIMIT;
use crate::analysis::counts::{ROUTING_DRIFT_TOTAL, SKIPPED_LINES, SourceCounts};
use crate::analysis::extract::extract_facts;
use crate::analysis::parse::{ParsedLine, parse_line};
use crate::analysis::reader::{RunFiles, read_text};
use crate::analysis::report::{
    Anomalies, ClientFlow, CrossCheckTotals, RunReport, ServerRevisionFlow,
};
use crate::analysis::sequence::{SequenceMode, summarize};
use crate::analysis::stdout_scan::{StdoutScanner, SuspiciousLine};
use crate::analysis::types::Fact;
use std::path::Path;
use tracing::{debug, info, trace};

/// Knobs for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Values listed in a gap anomaly before it is summarized as `...(+n)`.
    pub display_limit: usize,
    pub scanner: StdoutScanner,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            scanner: StdoutScanner::default(),
        }
    }
}

/// Accumulates the facts of one remote-control log, line by line.
#[derive(Debug, Default)]
pub struct RemoteLogAggregator {
    counts: SourceCounts,
    sends: Vec<u64>,
    applies: Vec<u64>,
    revisions: Vec<u64>,
    drop_lines: Vec<String>,
}

/// Everything extracted from one remote-control log. Streams are in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteLogSnapshot {
    pub counts: SourceCounts,
    pub sends: Vec<u64>,
    pub applies: Vec<u64>,
    pub revisions: Vec<u64>,
    pub drop_lines: Vec<String>,
}

impl RemoteLogAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits on `\n`, `\r\n` and lone `\r`.
    pub fn push_text(&mut self, text: &str) {
        for line in text.split(['\r', '\n']) {
            self.push_line(line);
        }
    }

    pub fn push_line(&mut self, raw: &str) {
        let event = match parse_line(raw) {
            ParsedLine::Event(event) => event,
            ParsedLine::Ignored => return,
            ParsedLine::Malformed => {
                trace!(line = raw, "skipping line outside the event grammar");
                self.counts.increment(SKIPPED_LINES);
                return;
            }
        };

        self.counts.record_tag(&event.tag);

        for fact in extract_facts(&event) {
            match fact {
                Fact::Send(send) => self.sends.push(send.seq),
                Fact::Apply(apply) => {
                    if let Some(seq) = apply.seq.number() {
                        self.applies.push(seq);
                    }
                }
                Fact::Revision(revision) => self.revisions.push(revision),
                Fact::Drop => {
                    self.counts.record_drop(&event.tag);
                    self.drop_lines.push(raw.trim().to_string());
                }
                Fact::RoutingDrift => self.counts.increment(ROUTING_DRIFT_TOTAL),
                Fact::Unparseable(matcher) => {
                    debug!(matcher, line = raw, "numeric field out of range");
                    self.counts.record_unparseable(matcher);
                }
            }
        }
    }

    pub fn finish(self) -> RemoteLogSnapshot {
        RemoteLogSnapshot {
            counts: self.counts,
            sends: self.sends,
            applies: self.applies,
            revisions: self.revisions,
            drop_lines: self.drop_lines,
        }
    }
}

fn aggregate_file(path: &Path) -> RemoteLogSnapshot {
    let mut agg = RemoteLogAggregator::new();
    agg.push_text(&read_text(path));
    agg.finish()
}

/// Analyzes every file of a run and collects the anomalies.
///
/// Files are processed one after another, clients in path order, so the anomaly
/// order is the same on every invocation.
pub fn analyze_run(files: &RunFiles, options: &AnalysisOptions) -> RunReport {
    let mut anomalies = Anomalies::new();
    let limit = options.display_limit;

    let server = analyze_server_revisions(&files.server_remote, &mut anomalies, limit);

    if files.client_remotes.is_empty() {
        anomalies.no_client_logs();
    }

    let clients: Vec<ClientFlow> = files
        .client_remotes
        .iter()
        .map(|path| analyze_client(path, &mut anomalies, limit))
        .collect();

    let totals = cross_check(&clients, &mut anomalies);

    let suspicious_stdout = scan_server_stdout(&files.server_stdout, &options.scanner);
    if !suspicious_stdout.is_empty() {
        anomalies.suspicious_stdout(suspicious_stdout.len());
    }

    info!(
        stamp = %files.stamp,
        clients = clients.len(),
        anomalies = anomalies.len(),
        "run analyzed"
    );

    RunReport {
        files: files.clone(),
        server,
        clients,
        totals,
        suspicious_stdout,
        anomalies,
    }
}

fn analyze_server_revisions(
    path: &Path,
    anomalies: &mut Anomalies,
    limit: usize,
) -> ServerRevisionFlow {
    let snapshot = aggregate_file(path);
    let summary = summarize(&snapshot.revisions, SequenceMode::DedupeAndSort);

    if !summary.missing.is_empty() {
        anomalies.server_revisions_missing(&summary.missing, limit);
    }
    if summary.non_monotonic_count > 0 {
        anomalies.server_revisions_non_monotonic(summary.non_monotonic_count);
    }

    ServerRevisionFlow {
        events: snapshot.revisions.len(),
        summary,
    }
}

fn analyze_client(path: &Path, anomalies: &mut Anomalies, limit: usize) -> ClientFlow {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let snapshot = aggregate_file(path);
    let send = summarize(&snapshot.sends, SequenceMode::Raw);
    let apply = summarize(&snapshot.applies, SequenceMode::Raw);
    let drops = snapshot.counts.drops();
    let routing_drift = snapshot.counts.routing_drift();

    debug!(
        file = %file_name,
        sends = send.count,
        applies = apply.count,
        drops,
        routing_drift,
        "client log aggregated"
    );

    for (stream, summary) in [("send", &send), ("apply", &apply)] {
        if !summary.missing.is_empty() {
            anomalies.sequence_gaps(&file_name, stream, &summary.missing, limit);
        }
        if summary.non_monotonic_count > 0 {
            anomalies.sequence_non_monotonic(&file_name, stream, summary.non_monotonic_count);
        }
    }
    if !snapshot.drop_lines.is_empty() {
        anomalies.drop_lines_present(&file_name, snapshot.drop_lines.len());
    }
    if routing_drift > 0 {
        anomalies.routing_drift_detected(&file_name, routing_drift);
    }

    ClientFlow {
        file_name,
        path: path.to_path_buf(),
        send,
        apply,
        drops,
        routing_drift,
        drop_lines: snapshot.drop_lines,
        counts: snapshot.counts,
    }
}

fn cross_check(clients: &[ClientFlow], anomalies: &mut Anomalies) -> CrossCheckTotals {
    let totals = clients
        .iter()
        .fold(CrossCheckTotals::default(), |acc, client| CrossCheckTotals {
            sends: acc.sends + client.send.count,
            applies: acc.applies + client.apply.count,
            drops: acc.drops + client.drops,
        });

    // Every apply is triggered by an earlier send.
    if totals.applies == 0 {
        anomalies.no_applies();
    } else if totals.applies > totals.sends {
        anomalies.applies_exceed_sends(totals.applies, totals.sends);
    }

    totals
}

fn scan_server_stdout(path: &Path, scanner: &StdoutScanner) -> Vec<SuspiciousLine> {
    let text = read_text(path);
    if text.is_empty() {
        return Vec::new();
    }
    scanner.scan(&text)
}
