use crate::analysis::types::{ApplyRecord, ApplySeq, Fact, LogEvent, SendRecord};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

static SEND: Lazy<Regex> = Lazy::new(|| {
    static_regex!(
        r"SetRemoteVolume targetClientId=(?P<target_client>[0-9]+) targetChannel=(?P<target_channel>[0-9]+) vol=(?P<vol>[0-9.]+) seq=(?P<seq>[0-9]+)",
        "SEND"
    )
});

static APPLY: Lazy<Regex> = Lazy::new(|| {
    static_regex!(
        r"ApplyLocalVolume sourceClientId=(?P<source_client>[0-9]+) targetChannel=(?P<target_channel>-?[0-9]+) controllerIndex=(?P<controller>[0-9]+) vol=(?P<vol>[0-9.]+) seq=(?P<seq>[0-9]+|none)",
        "APPLY"
    )
});

static REVISION: Lazy<Regex> =
    Lazy::new(|| static_regex!(r"session revision=(?P<rev>[0-9]+)", "REVISION"));

const DROP_MARKER: &str = "drop ";
const ROUTING_DRIFT_MARKER: &str = "routing drift ";
const NO_SEQUENCE: &str = "none";

pub type Matcher = fn(&LogEvent) -> Option<Fact>;

/// A named extraction function. Every matcher sees every message.
pub struct NamedMatcher {
    pub name: &'static str,
    pub extract: Matcher,
}

pub const MATCHERS: &[NamedMatcher] = &[
    NamedMatcher {
        name: "send",
        extract: extract_send,
    },
    NamedMatcher {
        name: "apply",
        extract: extract_apply,
    },
    NamedMatcher {
        name: "revision",
        extract: extract_revision,
    },
    NamedMatcher {
        name: "drop",
        extract: extract_drop,
    },
    NamedMatcher {
        name: "routing_drift",
        extract: extract_routing_drift,
    },
];

/// Runs all [`MATCHERS`] over one event. A message can yield several facts; they are
/// returned in matcher order.
pub fn extract_facts(event: &LogEvent) -> Vec<Fact> {
    MATCHERS
        .iter()
        .filter_map(|matcher| (matcher.extract)(event))
        .collect()
}

fn field<T: FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

fn extract_send(event: &LogEvent) -> Option<Fact> {
    let caps = SEND.captures(&event.message)?;
    Some(send_record(&caps).map_or(Fact::Unparseable("send"), Fact::Send))
}

fn send_record(caps: &Captures<'_>) -> Option<SendRecord> {
    Some(SendRecord {
        target_client: field(caps, "target_client")?,
        target_channel: field(caps, "target_channel")?,
        volume: field(caps, "vol"),
        seq: field(caps, "seq")?,
    })
}

fn extract_apply(event: &LogEvent) -> Option<Fact> {
    let caps = APPLY.captures(&event.message)?;
    Some(apply_record(&caps).map_or(Fact::Unparseable("apply"), Fact::Apply))
}

fn apply_record(caps: &Captures<'_>) -> Option<ApplyRecord> {
    let seq = match &caps["seq"] {
        NO_SEQUENCE => ApplySeq::Unsequenced,
        raw => ApplySeq::Numbered(raw.parse().ok()?),
    };

    Some(ApplyRecord {
        source_client: field(caps, "source_client")?,
        target_channel: field(caps, "target_channel")?,
        controller_index: field(caps, "controller")?,
        volume: field(caps, "vol"),
        seq,
    })
}

fn extract_revision(event: &LogEvent) -> Option<Fact> {
    let caps = REVISION.captures(&event.message)?;
    Some(field(&caps, "rev").map_or(Fact::Unparseable("revision"), Fact::Revision))
}

fn extract_drop(event: &LogEvent) -> Option<Fact> {
    event.message.contains(DROP_MARKER).then_some(Fact::Drop)
}

fn extract_routing_drift(event: &LogEvent) -> Option<Fact> {
    event
        .message
        .contains(ROUTING_DRIFT_MARKER)
        .then_some(Fact::RoutingDrift)
}
