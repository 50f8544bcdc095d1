//! Reading the commands file into a [`LineSequence`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::sequence::LineSequence;

/// Read `path` and keep every non-blank, non-comment line with its original number.
pub fn read_lines(path: &Path) -> Result<LineSequence> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read commands file {}", path.display()))?;
    let lines = LineSequence::from_text(&contents)
        .with_context(|| format!("load commands file {}", path.display()))?;
    debug!(path = %path.display(), commands = lines.len(), "loaded commands file");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_commands_file;

    #[test]
    fn reads_commands_with_original_numbers() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_commands_file(temp.path(), "# setup\necho a\n\necho b\n").expect("write");
        let lines = read_lines(&path).expect("read");
        let numbers: Vec<usize> = lines.iter().map(|line| line.number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert_eq!(lines.line(1).command, "echo b");
    }

    #[test]
    fn missing_file_errors_with_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = read_lines(&temp.path().join("nope.sh")).unwrap_err();
        assert!(err.to_string().contains("nope.sh"));
    }

    #[test]
    fn comment_only_file_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = write_commands_file(temp.path(), "\n# nothing here\n").expect("write");
        let err = read_lines(&path).unwrap_err();
        assert!(format!("{err:#}").contains("no commands"));
    }
}
