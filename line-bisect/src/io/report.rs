//! Console rendering for bisection progress and the final result.
//!
//! Rendering produces plain text tagged with a [`Tone`]; color is applied only
//! when printing, so text stays testable.

use colored::{ColoredString, Colorize};

use crate::bisect::{BisectOutcome, ProgressEvent};
use crate::core::types::TestOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub tone: Tone,
    pub text: String,
}

impl Message {
    fn new(tone: Tone, text: String) -> Self {
        Self { tone, text }
    }

    pub fn colored(&self) -> ColoredString {
        match self.tone {
            Tone::Info => self.text.blue(),
            Tone::Good => self.text.green(),
            Tone::Bad => self.text.red(),
        }
    }
}

/// Turn color on or off for everything printed by this process.
pub fn set_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

pub fn render_progress(event: &ProgressEvent) -> Vec<Message> {
    match event {
        ProgressEvent::Probe { target, total, .. } => vec![Message::new(
            Tone::Info,
            format!("Running lines 1 to {} of {}.", target.number, total),
        )],
        ProgressEvent::Tested {
            iteration,
            target,
            outcome,
        } => {
            let (tone, verb) = match outcome {
                TestOutcome::Pass => (Tone::Good, "passed"),
                TestOutcome::Fail => (Tone::Bad, "failed"),
            };
            vec![Message::new(
                tone,
                format!(
                    "Test {verb} after line {} on iteration {iteration}.",
                    target.number
                ),
            )]
        }
        ProgressEvent::Boundaries { good, bad } => {
            let mut messages = Vec::with_capacity(2);
            if let Some(bad) = bad {
                messages.push(Message::new(
                    Tone::Bad,
                    format!("Line {} is bad: {}", bad.number, bad.command),
                ));
            }
            if let Some(good) = good {
                messages.push(Message::new(
                    Tone::Good,
                    format!("Line {} is good: {}", good.number, good.command),
                ));
            }
            messages
        }
    }
}

pub fn render_outcome(outcome: &BisectOutcome) -> Vec<Message> {
    match outcome {
        BisectOutcome::Found { good, bad, steps } if good == bad => vec![Message::new(
            Tone::Bad,
            format!(
                "Line {} is both the good and bad boundary after {steps} step(s); nothing left to bisect: {}",
                bad.number, bad.command
            ),
        )],
        BisectOutcome::Found { good, bad, steps } => vec![
            Message::new(
                Tone::Bad,
                format!("First bad line {}: {}", bad.number, bad.command),
            ),
            Message::new(
                Tone::Good,
                format!(
                    "Last good line {}: {} ({steps} step(s))",
                    good.number, good.command
                ),
            ),
        ],
        BisectOutcome::NoFailure { good, steps } => vec![Message::new(
            Tone::Good,
            format!(
                "Test passes after every line through line {} ({steps} step(s)); no failing line found.",
                good.number
            ),
        )],
    }
}

pub fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}", message.colored());
    }
}
