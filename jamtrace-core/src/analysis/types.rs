use crate::analysis::error::AnalyzeError;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

static STAMP_FORMAT: Lazy<Regex> =
    Lazy::new(|| static_regex!(r"^[0-9]{8}-[0-9]{6}$", "STAMP_FORMAT"));

/// Identifier of one test run, `YYYYMMDD-HHMMSS`.
///
/// The format is fixed width and date-major, so string ordering is chronological.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn parse(raw: &str) -> Result<Self, AnalyzeError> {
        if STAMP_FORMAT.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(AnalyzeError::InvalidStamp {
                stamp: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RunStamp {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One structured line of a remote-control log: `HH:MM:SS.mmm [tag] message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// `None` when the clock value is out of range, e.g. `24:00:00.000`.
    pub timestamp: Option<NaiveTime>,
    pub tag: String,
    pub message: String,
}

/// A `SetRemoteVolume` command leaving a client.
///
/// Sequence numbers beyond `u64` do not produce a record; see [`Fact::Unparseable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendRecord {
    pub target_client: u32,
    pub target_channel: u32,
    pub volume: Option<f32>,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplySeq {
    Numbered(u64),
    /// Written by binaries that predate apply sequencing (`seq=none`).
    Unsequenced,
}

impl ApplySeq {
    pub fn number(self) -> Option<u64> {
        match self {
            ApplySeq::Numbered(seq) => Some(seq),
            ApplySeq::Unsequenced => None,
        }
    }
}

/// An `ApplyLocalVolume` received and applied by a client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyRecord {
    pub source_client: u32,
    /// Negative values address all channels.
    pub target_channel: i32,
    pub controller_index: u32,
    pub volume: Option<f32>,
    pub seq: ApplySeq,
}

/// A typed fact pulled out of a log message by one of the [`MATCHERS`](super::MATCHERS).
#[derive(Debug, Clone, PartialEq)]
pub enum Fact {
    Send(SendRecord),
    Apply(ApplyRecord),
    Revision(u64),
    Drop,
    RoutingDrift,
    /// The named matcher recognized the message but a numeric field did not fit its type.
    Unparseable(&'static str),
}
