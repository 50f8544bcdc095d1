//! Shared deterministic types for bisection core logic.
//!
//! These types define stable contracts between core components. They do not
//! depend on external state or I/O.

use std::fmt;

/// One executable statement from the commands file.
///
/// `number` is the 1-based position in the original file, not the position
/// in the filtered sequence. It is the value shown to users and accepted by
/// `--good`/`--bad`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub command: String,
}

impl Line {
    pub fn new(number: usize, command: impl Into<String>) -> Self {
        Self {
            number,
            command: command.into(),
        }
    }

    /// Label handed to the command runner when this line executes.
    pub fn label(&self) -> String {
        format!("line {}", self.number)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.number, self.command)
    }
}

/// Result of running the test command after a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Pass,
    Fail,
}

impl TestOutcome {
    pub fn from_success(success: bool) -> Self {
        if success { Self::Pass } else { Self::Fail }
    }
}
