use serde::Serialize;
use std::collections::BTreeMap;

pub const DROPS_TOTAL: &str = "drops_total";
pub const ROUTING_DRIFT_TOTAL: &str = "routing_drift_total";
pub const SKIPPED_LINES: &str = "skipped_lines";
pub const UNPARSEABLE_PREFIX: &str = "unparseable:";

/// Occurrence counters for one remote-control log, keyed like `tag:<name>`,
/// `drops_total`, `drops_by_tag:<name>` or `unparseable:<matcher>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceCounts(BTreeMap<String, u64>);

impl SourceCounts {
    pub fn increment(&mut self, key: impl Into<String>) {
        *self.0.entry(key.into()).or_insert(0) += 1;
    }

    pub fn record_tag(&mut self, tag: &str) {
        self.increment(format!("tag:{tag}"));
    }

    pub fn record_drop(&mut self, tag: &str) {
        self.increment(DROPS_TOTAL);
        self.increment(format!("drops_by_tag:{tag}"));
    }

    pub fn record_unparseable(&mut self, matcher: &str) {
        self.increment(format!("{UNPARSEABLE_PREFIX}{matcher}"));
    }

    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn tag(&self, tag: &str) -> u64 {
        self.get(&format!("tag:{tag}"))
    }

    pub fn drops(&self) -> u64 {
        self.get(DROPS_TOTAL)
    }

    pub fn routing_drift(&self) -> u64 {
        self.get(ROUTING_DRIFT_TOTAL)
    }

    pub fn unparseable(&self, matcher: &str) -> u64 {
        self.get(&format!("{UNPARSEABLE_PREFIX}{matcher}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
