//! Developer workflow tasks for the jindo workspace.
//!
//! `cargo xtask tidy` formats and lints, `cargo xtask check` runs the lints
//! without fixing and then the test suite.

use std::{
    env,
    path::Path,
    process::{Command, ExitCode, Stdio},
};

/// Usage line printed on bad arguments.
const USAGE: &str = "Usage: cargo xtask <tidy|check>";

fn main() -> ExitCode {
    match parse_command() {
        Some(Task::Tidy) => run_steps(&[run_fmt, run_clippy_fix]),
        Some(Task::Check) => run_steps(&[run_clippy, run_tests]),
        None => {
            eprintln!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

/// Available tasks.
enum Task {
    /// Format and apply clippy fixes in place.
    Tidy,
    /// Lint without fixing, then test.
    Check,
}

/// Parse the single task argument.
fn parse_command() -> Option<Task> {
    let mut args = env::args().skip(1);
    let task = match args.next().as_deref() {
        Some("tidy") => Task::Tidy,
        Some("check") => Task::Check,
        _ => return None,
    };
    args.next().is_none().then_some(task)
}

/// Run steps in order, stopping at the first failure.
fn run_steps(steps: &[fn() -> bool]) -> ExitCode {
    if steps.iter().all(|step| step()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Format the workspace with nightly rustfmt.
fn run_fmt() -> bool {
    if Path::new("rustfmt-nightly.toml").exists() {
        cargo(&[
            "+nightly",
            "fmt",
            "--all",
            "--",
            "--config-path",
            "./rustfmt-nightly.toml",
        ])
    } else {
        cargo(&["+nightly", "fmt", "--all"])
    }
}

/// Apply clippy suggestions across every target.
fn run_clippy_fix() -> bool {
    cargo(&[
        "clippy",
        "-q",
        "--fix",
        "--all",
        "--all-targets",
        "--all-features",
        "--allow-dirty",
    ])
}

/// Lint every target, treating warnings as errors.
fn run_clippy() -> bool {
    cargo(&[
        "clippy",
        "-q",
        "--all",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Run the workspace test suite.
fn run_tests() -> bool {
    cargo(&["test", "-q", "--workspace"])
}

/// Run cargo with inherited output, reporting failures.
fn cargo(args: &[&str]) -> bool {
    match Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!("`cargo {}` failed with status {status}", args.join(" "));
            false
        }
        Err(err) => {
            eprintln!("Failed to run cargo: {err}");
            false
        }
    }
}
