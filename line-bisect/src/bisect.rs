//! Orchestration for bisection steps and the full search loop.

use std::error::Error;
use std::fmt;

use anyhow::{Result, anyhow};
use tracing::{debug, info, instrument};

use crate::core::bisector::Bisector;
use crate::core::types::{Line, TestOutcome};
use crate::io::command::CommandRunner;

/// A setup line exited non-zero while running a prefix.
///
/// The bisection cannot decide anything without a clean prefix, so this
/// aborts the run instead of counting as a test failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupLineFailed {
    pub line: usize,
    pub command: String,
}

impl fmt::Display for SetupLineFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} failed: {}", self.line, self.command)
    }
}

impl Error for SetupLineFailed {}

/// Progress reported while a step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// About to run lines 1 through `target`.
    Probe {
        iteration: u32,
        target: Line,
        total: usize,
    },
    /// The test ran after `target`.
    Tested {
        iteration: u32,
        target: Line,
        outcome: TestOutcome,
    },
    /// Boundaries after the step. `bad` is `None` until a test has failed.
    Boundaries { good: Option<Line>, bad: Option<Line> },
}

/// Result of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Iteration number (1-indexed).
    pub iteration: u32,
    /// Last line of the executed prefix.
    pub target: Line,
    pub outcome: TestOutcome,
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BisectOutcome {
    /// Boundaries are adjacent (or coincide); `bad` is the first failing line.
    Found { good: Line, bad: Line, steps: u32 },
    /// The full script passes and no bad line is known.
    NoFailure { good: Line, steps: u32 },
}

/// Execute one step: run the prefix up to the next candidate, run the test,
/// and move one boundary.
///
/// Any setup line failing returns [`SetupLineFailed`] before the test runs. A
/// test passing at or after the bad line returns
/// [`BadHintContradicted`](crate::core::bisector::BadHintContradicted).
#[instrument(skip_all, fields(iteration = bisector.iteration() + 1))]
pub fn run_step<R: CommandRunner, F: FnMut(&ProgressEvent)>(
    bisector: &mut Bisector,
    test: &str,
    runner: &R,
    on_progress: &mut F,
) -> Result<StepOutcome> {
    let candidate = bisector.begin_step();
    let target = bisector.lines().line(candidate.index()).clone();
    on_progress(&ProgressEvent::Probe {
        iteration: candidate.iteration(),
        target: target.clone(),
        total: bisector.lines().len(),
    });

    for line in bisector.lines().prefix(candidate.index()) {
        if !runner.run(&line.command, &line.label())? {
            return Err(SetupLineFailed {
                line: line.number,
                command: line.command.clone(),
            }
            .into());
        }
    }

    let outcome = TestOutcome::from_success(runner.run(test, "test")?);
    debug!(line = target.number, ?outcome, "test finished");
    on_progress(&ProgressEvent::Tested {
        iteration: candidate.iteration(),
        target: target.clone(),
        outcome,
    });

    bisector.record_outcome(candidate, outcome)?;
    on_progress(&ProgressEvent::Boundaries {
        good: bisector.good_line().cloned(),
        bad: bisector.bad_line().cloned(),
    });

    Ok(StepOutcome {
        iteration: candidate.iteration(),
        target,
        outcome,
    })
}

/// Run steps until the boundaries converge.
///
/// Stops immediately on any error, including [`SetupLineFailed`].
pub fn run_bisect<R: CommandRunner, F: FnMut(&ProgressEvent)>(
    bisector: &mut Bisector,
    test: &str,
    runner: &R,
    mut on_progress: F,
) -> Result<BisectOutcome> {
    info!(
        commands = bisector.lines().len(),
        good = ?bisector.good_index(),
        bad = ?bisector.bad_index(),
        "starting bisection"
    );
    while bisector.should_continue() {
        run_step(bisector, test, runner, &mut on_progress)?;
    }

    let steps = bisector.iteration();
    let good = bisector
        .good_line()
        .cloned()
        .ok_or_else(|| anyhow!("bisection stopped without a good line"))?;
    let outcome = match bisector.bad_line() {
        Some(bad) => BisectOutcome::Found {
            good,
            bad: bad.clone(),
            steps,
        },
        None => BisectOutcome::NoFailure { good, steps },
    };
    info!(steps, "bisection finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedRunner, gapped_sequence};

    fn setup_calls(runner: &ScriptedRunner) -> Vec<String> {
        runner
            .calls()
            .into_iter()
            .filter(|call| call.description != "test")
            .map(|call| call.description)
            .collect()
    }

    #[test]
    fn step_runs_prefix_in_order_then_test() {
        let mut bisector = Bisector::new(gapped_sequence(), Some(0), Some(5)).expect("bisector");
        let runner = ScriptedRunner::with_tests(vec![false]);
        let step = run_step(&mut bisector, "make check", &runner, &mut |_| {}).expect("step");

        assert_eq!(step.iteration, 1);
        assert_eq!(step.target.number, 4);
        assert_eq!(step.outcome, TestOutcome::Fail);
        let calls = runner.calls();
        let descriptions: Vec<&str> = calls.iter().map(|call| call.description.as_str()).collect();
        assert_eq!(descriptions, vec!["line 1", "line 2", "line 4", "test"]);
        assert_eq!(calls[3].command, "make check");
        assert_eq!(bisector.bad_index(), Some(2));
    }

    #[test]
    fn step_reports_progress_in_order() {
        let mut bisector = Bisector::new(gapped_sequence(), Some(0), Some(5)).expect("bisector");
        let runner = ScriptedRunner::with_tests(vec![true]);
        let mut events = Vec::new();
        run_step(&mut bisector, "t", &runner, &mut |event: &ProgressEvent| {
            events.push(event.clone());
        })
        .expect("step");

        let lines = gapped_sequence();
        assert_eq!(
            events,
            vec![
                ProgressEvent::Probe {
                    iteration: 1,
                    target: lines.line(2).clone(),
                    total: 6,
                },
                ProgressEvent::Tested {
                    iteration: 1,
                    target: lines.line(2).clone(),
                    outcome: TestOutcome::Pass,
                },
                ProgressEvent::Boundaries {
                    good: Some(lines.line(2).clone()),
                    bad: Some(lines.line(5).clone()),
                },
            ]
        );
    }

    #[test]
    fn failing_setup_line_aborts_before_test() {
        let mut bisector = Bisector::new(gapped_sequence(), Some(0), Some(5)).expect("bisector");
        let runner = ScriptedRunner::with_tests(vec![true]).failing_line(4);
        let err = run_step(&mut bisector, "t", &runner, &mut |_| {}).unwrap_err();

        let failed = err.downcast_ref::<SetupLineFailed>().expect("setup failure");
        assert_eq!(failed.line, 4);
        assert!(err.to_string().contains("line 4"));
        assert!(runner.calls().iter().all(|call| call.description != "test"));
        assert_eq!(setup_calls(&runner), vec!["line 1", "line 2", "line 4"]);
        assert_eq!((bisector.good_index(), bisector.bad_index()), (Some(0), Some(5)));
    }

    #[test]
    fn runner_error_propagates() {
        let mut bisector = Bisector::new(gapped_sequence(), None, None).expect("bisector");
        let runner = ScriptedRunner::with_tests(Vec::new());
        let err = run_step(&mut bisector, "t", &runner, &mut |_| {}).unwrap_err();
        assert!(err.to_string().contains("no scripted test outcome"));
        assert!(err.downcast_ref::<SetupLineFailed>().is_none());
    }

    #[test]
    fn bisect_finds_first_bad_line() {
        let mut bisector = Bisector::new(gapped_sequence(), None, None).expect("bisector");
        // Probes: line 8 fails, line 4 passes, line 5 passes, line 7 fails.
        let runner = ScriptedRunner::with_tests(vec![false, true, true, false]);
        let outcome = run_bisect(&mut bisector, "t", &runner, |_| {}).expect("bisect");

        let lines = gapped_sequence();
        assert_eq!(
            outcome,
            BisectOutcome::Found {
                good: lines.line(3).clone(),
                bad: lines.line(4).clone(),
                steps: 4,
            }
        );
        assert_eq!(runner.remaining_tests(), 0);
    }

    #[test]
    fn bisect_passing_script_reports_no_failure() {
        let mut bisector = Bisector::new(gapped_sequence(), None, None).expect("bisector");
        let runner = ScriptedRunner::with_tests(vec![true]);
        let outcome = run_bisect(&mut bisector, "t", &runner, |_| {}).expect("bisect");
        assert_eq!(
            outcome,
            BisectOutcome::NoFailure {
                good: gapped_sequence().line(5).clone(),
                steps: 1,
            }
        );
    }

    #[test]
    fn adjacent_hints_run_no_steps() {
        let mut bisector = Bisector::new(gapped_sequence(), Some(2), Some(3)).expect("bisector");
        let runner = ScriptedRunner::with_tests(Vec::new());
        let outcome = run_bisect(&mut bisector, "t", &runner, |_| {}).expect("bisect");
        assert!(matches!(outcome, BisectOutcome::Found { steps: 0, .. }));
        assert!(runner.calls().is_empty());
    }
}
