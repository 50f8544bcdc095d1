//! Find the first line in a commands file that makes a test fail.
//!
//! Re-runs every command up to a candidate line, runs the test, and halves
//! the range between a known good line and a known bad line until they are
//! adjacent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use line_bisect::bisect::{SetupLineFailed, run_bisect};
use line_bisect::core::bisector::Bisector;
use line_bisect::core::hint::LineHint;
use line_bisect::exit_codes;
use line_bisect::io::command::ShellRunner;
use line_bisect::io::config::load_config;
use line_bisect::io::line_source::read_lines;
use line_bisect::io::report::{print_messages, render_outcome, render_progress, set_color};
use line_bisect::logging;

#[derive(Parser, Debug)]
#[command(
    name = "line-bisect",
    version,
    about = "Bisect a file of shell commands to find the line that breaks a test"
)]
struct Cli {
    /// Line number where the test succeeds (`-1` means the last line).
    #[arg(long, value_name = "LINE", allow_negative_numbers = true)]
    good: Option<LineHint>,
    /// Line number where the test fails (`-1` means the last line).
    #[arg(long, value_name = "LINE", allow_negative_numbers = true)]
    bad: Option<LineHint>,
    /// TOML config file (shell, color).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Increase diagnostic logging on stderr (`-v`, `-vv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// File with one shell command per line; `#` lines are comments.
    commands_file: PathBuf,
    /// Command whose exit status decides pass/fail.
    test: String,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        let code = if err.downcast_ref::<SetupLineFailed>().is_some() {
            exit_codes::SETUP_FAILED
        } else {
            exit_codes::INVALID
        };
        eprintln!("{}", format!("{:#}", err).red());
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_deref()).context("load config")?;
    set_color(cfg.color);

    let lines = read_lines(&cli.commands_file)?;
    let mut bisector =
        Bisector::from_hints(lines, cli.good, cli.bad).context("resolve --good/--bad")?;
    let runner = ShellRunner::new(&cfg.shell)?;

    let outcome = run_bisect(&mut bisector, &cli.test, &runner, |event| {
        print_messages(&render_progress(event));
    })?;
    print_messages(&render_outcome(&outcome));
    Ok(())
}
