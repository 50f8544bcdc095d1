//! `--good`/`--bad` line hints and their resolution to sequence indices.

use std::num::NonZeroUsize;
use std::str::FromStr;

use anyhow::{Error, anyhow};

use crate::core::sequence::LineSequence;

/// A user-supplied line number: a positive 1-based line or `-1` for the last line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHint {
    Last,
    Number(NonZeroUsize),
}

impl FromStr for LineHint {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed == "-1" {
            return Ok(Self::Last);
        }
        trimmed
            .parse::<NonZeroUsize>()
            .map(Self::Number)
            .map_err(|_| anyhow!("invalid line `{raw}`: expected a positive line number or -1"))
    }
}

impl LineHint {
    /// Resolve to an index into `lines`.
    ///
    /// Snaps forward to the first line whose number is `>= hint`, so a hint
    /// that points at a blank or comment line selects the next command. Hints
    /// past the end resolve to the last index.
    pub fn resolve(self, lines: &LineSequence) -> usize {
        match self {
            Self::Last => lines.last_index(),
            Self::Number(number) => lines
                .iter()
                .position(|line| line.number >= number.get())
                .unwrap_or_else(|| lines.last_index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::gapped_sequence;

    fn hint(raw: &str) -> LineHint {
        raw.parse().expect("hint")
    }

    #[test]
    fn parses_positive_and_last() {
        assert_eq!(hint("-1"), LineHint::Last);
        assert_eq!(hint("7"), LineHint::Number(NonZeroUsize::new(7).unwrap()));
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        for raw in ["0", "-2", "abc", "", "1.5"] {
            let err = raw.parse::<LineHint>().unwrap_err();
            assert!(err.to_string().contains("invalid line"), "{raw}: {err}");
        }
    }

    #[test]
    fn last_resolves_to_final_index() {
        let lines = gapped_sequence();
        assert_eq!(hint("-1").resolve(&lines), lines.len() - 1);
    }

    #[test]
    fn exact_line_resolves_to_its_index() {
        let lines = gapped_sequence();
        assert_eq!(hint("1").resolve(&lines), 0);
        assert_eq!(hint("5").resolve(&lines), 3);
        assert_eq!(hint("8").resolve(&lines), 5);
    }

    #[test]
    fn filtered_line_snaps_forward() {
        let lines = gapped_sequence();
        // 3 and 6 are blank/comment lines.
        assert_eq!(hint("3").resolve(&lines), 2);
        assert_eq!(hint("6").resolve(&lines), 4);
    }

    #[test]
    fn past_end_resolves_to_last_index() {
        let lines = gapped_sequence();
        assert_eq!(hint("100").resolve(&lines), 5);
    }
}
