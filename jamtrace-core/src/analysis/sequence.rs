use serde::Serialize;
use std::collections::BTreeSet;

/// How a stream is prepared before continuity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Emission order, as found in the file. Reordering shows up as non-monotonic steps.
    #[default]
    Raw,
    /// Unique values, ascending. Used for server revisions, which several appenders may
    /// log more than once.
    DedupeAndSort,
}

/// Continuity statistics of one sequence stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequenceSummary {
    pub count: usize,
    pub first: Option<u64>,
    pub last: Option<u64>,
    /// Values skipped by forward gaps, ascending within each gap.
    pub missing: Vec<u64>,
    /// Steps where the next value was not greater than the previous one.
    pub non_monotonic_count: usize,
}

impl SequenceSummary {
    pub fn is_continuous(&self) -> bool {
        self.missing.is_empty() && self.non_monotonic_count == 0
    }
}

pub fn summarize(values: &[u64], mode: SequenceMode) -> SequenceSummary {
    match mode {
        SequenceMode::Raw => summarize_ordered(values),
        SequenceMode::DedupeAndSort => {
            let unique: Vec<u64> = values
                .iter()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            summarize_ordered(&unique)
        }
    }
}

fn summarize_ordered(values: &[u64]) -> SequenceSummary {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return SequenceSummary::default();
    };

    let mut missing = Vec::new();
    let mut non_monotonic_count = 0;

    // A step is either a gap or non-monotonic, never both.
    for pair in values.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if cur <= prev {
            non_monotonic_count += 1;
        } else if cur - prev > 1 {
            missing.extend(prev + 1..cur);
        }
    }

    SequenceSummary {
        count: values.len(),
        first: Some(first),
        last: Some(last),
        missing,
        non_monotonic_count,
    }
}
