//! Bisect an ordered file of shell commands to find the first line that
//! breaks a test.
//!
//! Each step re-runs every command up to a candidate line, then runs the
//! test, and uses the pass/fail result to halve the range between a known
//! good line and a known bad line. The architecture enforces a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (filtering, hint resolution, the
//!   bisection state machine). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (reading the commands file,
//!   spawning commands, config, console output). Isolated behind the
//!   [`io::command::CommandRunner`] trait so tests can script outcomes.
//!
//! [`bisect`] coordinates core logic with I/O to implement the CLI.

pub mod bisect;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
