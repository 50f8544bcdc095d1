//! Bisection state machine: boundary bookkeeping and candidate selection.
//!
//! The [`Bisector`] never performs I/O. Orchestration asks it for the next
//! candidate, runs the prefix and test, and feeds the outcome back through
//! [`Bisector::record_outcome`].
//!
//! Boundaries are positions into the [`LineSequence`], not line numbers. A
//! boundary is `None` until it is given by a hint or established by a test.

use std::error::Error;
use std::fmt;

use anyhow::{Result, bail};

use crate::core::hint::LineHint;
use crate::core::sequence::LineSequence;
use crate::core::types::{Line, TestOutcome};

/// Candidate chosen for one step. Only [`Bisector::begin_step`] creates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    index: usize,
    iteration: u32,
}

impl Candidate {
    pub fn index(self) -> usize {
        self.index
    }

    /// 1-indexed step counter, for progress messages only.
    pub fn iteration(self) -> u32 {
        self.iteration
    }
}

/// The test passed at or after the known bad line.
///
/// Happens when `--bad` names a line that does not actually fail and the
/// full script then passes the test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadHintContradicted {
    pub passed_line: usize,
    pub bad_line: usize,
}

impl fmt::Display for BadHintContradicted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "test passed after line {}, which contradicts bad line {}",
            self.passed_line, self.bad_line
        )
    }
}

impl Error for BadHintContradicted {}

#[derive(Debug, Clone)]
pub struct Bisector {
    lines: LineSequence,
    good: Option<usize>,
    bad: Option<usize>,
    iteration: u32,
}

impl Bisector {
    /// Build from already-resolved indices.
    ///
    /// Fails if an index is out of range or the good boundary comes after the
    /// bad one.
    pub fn new(lines: LineSequence, good: Option<usize>, bad: Option<usize>) -> Result<Self> {
        for (name, index) in [("good", good), ("bad", bad)] {
            if let Some(index) = index
                && index >= lines.len()
            {
                bail!(
                    "{name} index {index} out of range for {} lines",
                    lines.len()
                );
            }
        }
        if let (Some(good), Some(bad)) = (good, bad)
            && good > bad
        {
            bail!(
                "good line {} must not come after bad line {}",
                lines.line(good).number,
                lines.line(bad).number
            );
        }
        Ok(Self {
            lines,
            good,
            bad,
            iteration: 0,
        })
    }

    /// Build from optional `--good`/`--bad` hints.
    pub fn from_hints(
        lines: LineSequence,
        good: Option<LineHint>,
        bad: Option<LineHint>,
    ) -> Result<Self> {
        let good = good.map(|hint| hint.resolve(&lines));
        let bad = bad.map(|hint| hint.resolve(&lines));
        Self::new(lines, good, bad)
    }

    pub fn lines(&self) -> &LineSequence {
        &self.lines
    }

    pub fn good_index(&self) -> Option<usize> {
        self.good
    }

    pub fn bad_index(&self) -> Option<usize> {
        self.bad
    }

    pub fn good_line(&self) -> Option<&Line> {
        self.good.map(|index| self.lines.line(index))
    }

    pub fn bad_line(&self) -> Option<&Line> {
        self.bad.map(|index| self.lines.line(index))
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn has_both_boundaries(&self) -> bool {
        self.good.is_some() && self.bad.is_some()
    }

    /// Midpoint of the boundaries, or the last index while either is unknown.
    ///
    /// Probing the last index first validates the full script end-to-end.
    pub fn next_candidate_index(&self) -> usize {
        match (self.good, self.bad) {
            (Some(good), Some(bad)) => (good + bad) / 2,
            _ => self.lines.last_index(),
        }
    }

    /// Loop guard, evaluated once before each step.
    ///
    /// With both boundaries known, continue while they are more than one
    /// position apart. A good boundary on the last line with no known bad
    /// line leaves nothing to search.
    pub fn should_continue(&self) -> bool {
        match (self.good, self.bad) {
            (Some(good), Some(bad)) => good.abs_diff(bad) > 1,
            (Some(good), None) => good != self.lines.last_index(),
            _ => true,
        }
    }

    /// Start a step: bump the iteration counter and pick the candidate.
    pub fn begin_step(&mut self) -> Candidate {
        self.iteration += 1;
        Candidate {
            index: self.next_candidate_index(),
            iteration: self.iteration,
        }
    }

    /// Move exactly one boundary to `candidate` based on the test outcome.
    ///
    /// A failure with the good boundary still unknown sets it to index 0, so
    /// the first line is assumed good without being tested.
    ///
    /// A pass at or after the bad boundary returns [`BadHintContradicted`] and
    /// leaves both boundaries untouched.
    pub fn record_outcome(&mut self, candidate: Candidate, outcome: TestOutcome) -> Result<()> {
        match outcome {
            TestOutcome::Pass => {
                if let Some(bad) = self.bad
                    && candidate.index >= bad
                {
                    return Err(BadHintContradicted {
                        passed_line: self.lines.line(candidate.index).number,
                        bad_line: self.lines.line(bad).number,
                    }
                    .into());
                }
                self.good = Some(candidate.index);
            }
            TestOutcome::Fail => {
                self.bad = Some(candidate.index);
                self.good.get_or_insert(0);
            }
        }
        Ok(())
    }
}
