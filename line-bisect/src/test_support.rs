//! Test-only helpers: line sequences, a scripted command runner, and
//! commands-file fixtures.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::sequence::LineSequence;
use crate::core::types::Line;
use crate::io::command::CommandRunner;

/// Script with commands on lines 1,2,4,5,7,8 and blank/comment lines at 3 and 6.
pub const GAPPED_SCRIPT: &str = "echo 1\necho 2\n\necho 4\necho 5\n# six\necho 7\necho 8\n";

/// Sequence parsed from [`GAPPED_SCRIPT`].
pub fn gapped_sequence() -> LineSequence {
    LineSequence::from_text(GAPPED_SCRIPT).expect("gapped script parses")
}

/// `len` consecutive lines numbered from 1.
pub fn numbered_sequence(len: usize) -> LineSequence {
    let lines = (1..=len)
        .map(|number| Line::new(number, format!("echo {number}")))
        .collect();
    LineSequence::new(lines).expect("numbered sequence")
}

/// One call observed by [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub description: String,
}

/// Runner that succeeds for setup lines (unless told otherwise) and answers
/// test invocations from a predetermined queue.
///
/// Errors when the test queue runs dry, so a test that probes more often
/// than expected fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    tests: RefCell<VecDeque<bool>>,
    failing_lines: HashSet<usize>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn with_tests(outcomes: Vec<bool>) -> Self {
        Self {
            tests: RefCell::new(outcomes.into()),
            ..Self::default()
        }
    }

    /// Make the setup line with this 1-based number exit non-zero.
    pub fn failing_line(mut self, number: usize) -> Self {
        self.failing_lines.insert(number);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Line numbers executed as setup, in call order.
    pub fn setup_lines(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.description.strip_prefix("line "))
            .filter_map(|number| number.parse().ok())
            .collect()
    }

    pub fn test_runs(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.description == "test")
            .count()
    }

    pub fn remaining_tests(&self) -> usize {
        self.tests.borrow().len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, description: &str) -> Result<bool> {
        self.calls.borrow_mut().push(RecordedCall {
            command: command.to_string(),
            description: description.to_string(),
        });
        if description == "test" {
            return self
                .tests
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow!("no scripted test outcome left for `{command}`"));
        }
        let failed = description
            .strip_prefix("line ")
            .and_then(|number| number.parse::<usize>().ok())
            .is_some_and(|number| self.failing_lines.contains(&number));
        Ok(!failed)
    }
}

/// Write `contents` to `commands.sh` inside `dir`.
pub fn write_commands_file(dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = dir.join("commands.sh");
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Temporary directory holding a commands file.
pub struct CommandsFixture {
    dir: TempDir,
    path: PathBuf,
}

impl CommandsFixture {
    pub fn new(contents: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let path = write_commands_file(dir.path(), contents)?;
        Ok(Self { dir, path })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
