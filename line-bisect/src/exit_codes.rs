//! Stable exit codes for the `line-bisect` CLI.

/// Bisection converged (or the full script already passes).
pub const OK: i32 = 0;
/// Invalid hint, unreadable or empty commands file, invalid config, or other errors.
pub const INVALID: i32 = 1;
/// A setup line in the executed prefix exited non-zero.
///
/// Usage errors detected by clap exit with 2, so this skips it.
pub const SETUP_FAILED: i32 = 3;
