//! Filtering raw file text into an ordered, validated line sequence.

use anyhow::{Result, bail};

use crate::core::types::Line;

/// True if a trimmed line is an executable command (non-empty, not a `#` comment).
pub fn is_command(trimmed: &str) -> bool {
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Number every line from 1, trim it, and keep only commands.
///
/// Original numbering is preserved, so filtered-out lines leave gaps.
pub fn parse_lines(contents: &str) -> Vec<Line> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim();
            is_command(trimmed).then(|| Line::new(idx + 1, trimmed))
        })
        .collect()
}

/// Non-empty, order-preserving list of line records.
///
/// Constructed once and never mutated. Line numbers are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    pub fn new(lines: Vec<Line>) -> Result<Self> {
        if lines.is_empty() {
            bail!("no commands to bisect (every line is blank or a comment)");
        }
        if let Some(line) = lines.iter().find(|line| line.number == 0) {
            bail!("line numbers are 1-based, got 0 for `{}`", line.command);
        }
        if let Some(pair) = lines
            .windows(2)
            .find(|pair| pair[0].number >= pair[1].number)
        {
            bail!(
                "line numbers must be strictly increasing: {} is followed by {}",
                pair[0].number,
                pair[1].number
            );
        }
        Ok(Self { lines })
    }

    /// Parse file contents and validate the result.
    pub fn from_text(contents: &str) -> Result<Self> {
        Self::new(parse_lines(contents))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// False for every constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.lines.len() - 1
    }

    /// Line at `index`. Panics if out of range; callers hold validated indices.
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Every line at position `<= index`, in file order.
    pub fn prefix(&self, index: usize) -> &[Line] {
        &self.lines[..=index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
