use crate::analysis::constants::DEFAULT_DISPLAY_LIMIT;
use crate::analysis::report::{ClientFlow, RunReport};
use crate::analysis::sequence::SequenceSummary;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Suspicious stdout lines and drop lines shown before `... (+n more)`.
    pub display_limit: usize,
    /// List the verbatim drop lines under each client.
    pub show_drop_lines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            show_drop_lines: false,
        }
    }
}

/// Comma separated values, cut after `max_items` with a `,...(+n)` tail. `-` when empty.
pub fn short_list(values: &[u64], max_items: usize) -> String {
    if values.is_empty() {
        return "-".to_string();
    }

    let shown = values
        .iter()
        .take(max_items)
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");

    if values.len() <= max_items {
        shown
    } else {
        format!("{shown},...(+{})", values.len() - max_items)
    }
}

fn bound(value: Option<u64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

fn first_last(summary: &SequenceSummary) -> String {
    format!("{}:{}", bound(summary.first), bound(summary.last))
}

pub fn render_report(report: &RunReport, options: &RenderOptions) -> String {
    let mut out = String::new();
    let limit = options.display_limit;
    let files = &report.files;

    out.push_str(&format!("Log analysis for run {}\n", files.stamp));
    out.push_str(&format!("- server stdout: {}\n", files.server_stdout.display()));
    out.push_str(&format!("- server remote: {}\n", files.server_remote.display()));
    let clients = if files.client_remotes.is_empty() {
        "-".to_string()
    } else {
        files
            .client_remotes
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!("- client remotes: {clients}\n"));

    let server = &report.server;
    out.push_str("\nServer revision flow\n");
    out.push_str(&format!(
        "- revision events: {} | unique revisions: {} | first:last = {}\n",
        server.events,
        server.summary.count,
        first_last(&server.summary)
    ));

    out.push_str("\nClient remote-control flow\n");
    if report.clients.is_empty() {
        out.push_str("- no client remote logs found\n");
    }
    for client in &report.clients {
        render_client(&mut out, client, options);
    }

    let totals = &report.totals;
    out.push_str("\nCross-check\n");
    out.push_str(&format!("- total sends: {}\n", totals.sends));
    out.push_str(&format!("- total applies: {}\n", totals.applies));
    out.push_str(&format!("- total drops in client logs: {}\n", totals.drops));

    let suspicious = &report.suspicious_stdout;
    out.push_str("\nServer stdout scan\n");
    out.push_str(&format!("- suspicious lines: {}\n", suspicious.len()));
    for s in suspicious.iter().take(limit) {
        out.push_str(&format!("  {}\n", s.line));
    }
    if suspicious.len() > limit {
        out.push_str(&format!("  ... (+{} more)\n", suspicious.len() - limit));
    }

    out.push_str("\nResult\n");
    if report.anomalies.is_empty() {
        out.push_str("- no anomalies detected\n");
    } else {
        out.push_str("- anomalies detected:\n");
        for message in report.anomalies.messages() {
            out.push_str(&format!("  - {message}\n"));
        }
    }

    out
}

fn render_client(out: &mut String, client: &ClientFlow, options: &RenderOptions) {
    out.push_str(&format!("- {}\n", client.file_name));
    for (stream, summary) in [("send", &client.send), ("apply", &client.apply)] {
        out.push_str(&format!(
            "  {stream} count={} seq={} missing={} non_monotonic={}\n",
            summary.count,
            first_last(summary),
            summary.missing.len(),
            summary.non_monotonic_count
        ));
    }
    out.push_str(&format!("  drops={}\n", client.drops));
    out.push_str(&format!("  routing_drift={}\n", client.routing_drift));

    if options.show_drop_lines && !client.drop_lines.is_empty() {
        let limit = options.display_limit;
        out.push_str("  drop lines:\n");
        for line in client.drop_lines.iter().take(limit) {
            out.push_str(&format!("    {line}\n"));
        }
        if client.drop_lines.len() > limit {
            out.push_str(&format!(
                "    ... (+{} more)\n",
                client.drop_lines.len() - limit
            ));
        }
    }
}

pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
