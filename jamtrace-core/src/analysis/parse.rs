use crate::analysis::types::LogEvent;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// `HH:MM:SS.mmm [tag] message`
static EVENT_LINE: Lazy<Regex> = Lazy::new(|| {
    static_regex!(
        r"^(?P<time>[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}) \[(?P<tag>[^\]]+)\] (?P<msg>.*)$",
        "EVENT_LINE"
    )
});

const COMMENT_MARKER: char = '#';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Event(LogEvent),
    /// Blank line or `#` header written by the log writer.
    Ignored,
    /// Banner text, partial writes and anything else outside the line grammar.
    Malformed,
}

impl ParsedLine {
    pub fn into_event(self) -> Option<LogEvent> {
        match self {
            ParsedLine::Event(event) => Some(event),
            _ => None,
        }
    }
}

pub fn parse_line(raw: &str) -> ParsedLine {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return ParsedLine::Ignored;
    }

    let Some(caps) = EVENT_LINE.captures(line) else {
        return ParsedLine::Malformed;
    };

    // The grammar admits clock values such as 24:00:00.000; the line still counts.
    let timestamp = NaiveTime::parse_from_str(&caps["time"], "%H:%M:%S%.3f").ok();

    ParsedLine::Event(LogEvent {
        timestamp,
        tag: caps["tag"].to_string(),
        message: caps["msg"].to_string(),
    })
}
