use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};

const PACKAGE: &str = "fare_core";
const BENCH: &str = "performance";
const DEMO: &str = "shared_ride_quote";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the shared-ride fare workspace",
    long_about = "Runs the fare demo, the seeded property tests, Criterion\n\
                  benchmarks and CI checks for the fare_core crate."
)]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Price the demo shared ride and print itemized fares
    Quote {
        /// JSON rate table to price with instead of the defaults
        #[arg(long, env = "FARE_RATES")]
        rates: Option<String>,
    },
    /// Run the seeded property tests only
    Properties,
    /// Run Criterion benchmarks
    Bench,
    /// Benchmark the stashed-away HEAD as a baseline, then compare the working tree against it
    BenchCompare {
        /// Criterion baseline name
        #[arg(long, default_value = "head")]
        baseline: String,
    },
    /// Run CI checks
    Ci {
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, tests with and without test helpers
    Check,
    /// Run the demo example
    Examples,
    /// Run benchmarks
    Bench,
    /// Everything above
    All,
}

/// Run `program` with `args`, exiting with its status code on failure.
fn run(program: &str, args: &[&str]) {
    eprintln!("+ {program} {}", args.join(" "));
    let status = match Command::new(program).args(args).status() {
        Ok(status) => status,
        Err(err) => {
            eprintln!("failed to execute {program}: {err}");
            exit(1);
        }
    };
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn bench(criterion_args: &[&str]) {
    let mut args = vec!["bench", "-p", PACKAGE, "--bench", BENCH];
    if !criterion_args.is_empty() {
        args.push("--");
        args.extend_from_slice(criterion_args);
    }
    run("cargo", &args);
}

fn quote(rates: Option<&str>) {
    let mut args = vec!["run", "-p", PACKAGE, "--example", DEMO];
    if let Some(path) = rates {
        args.extend(["--", path]);
    }
    run("cargo", &args);
}

fn bench_compare(baseline: &str) {
    let criterion_dir = Path::new("target/criterion");
    if criterion_dir.exists() {
        if let Err(err) = std::fs::remove_dir_all(criterion_dir) {
            eprintln!("failed to clear {}: {err}", criterion_dir.display());
            exit(1);
        }
    }

    run("git", &["stash", "push", "-m", "xtask bench-compare"]);
    bench(&["--save-baseline", baseline]);
    run("git", &["stash", "pop"]);
    bench(&["--baseline", baseline]);
}

fn ci(job: CiJob) {
    let all = job == CiJob::All;
    if all || job == CiJob::Check {
        run("cargo", &["fmt", "--all", "--", "--check"]);
        run(
            "cargo",
            &["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
        );
        run("cargo", &["test", "-p", PACKAGE]);
        // Library code must not lean on the fixture module.
        run("cargo", &["test", "-p", PACKAGE, "--lib", "--no-default-features"]);
    }
    if all || job == CiJob::Examples {
        quote(None);
    }
    if all || job == CiJob::Bench {
        bench(&[]);
    }
    eprintln!("\nCI job passed.");
}

fn main() {
    match Cli::parse().command {
        Task::Quote { rates } => quote(rates.as_deref()),
        Task::Properties => run(
            "cargo",
            &["test", "-p", PACKAGE, "--test", "pricing_property_tests"],
        ),
        Task::Bench => bench(&[]),
        Task::BenchCompare { baseline } => bench_compare(&baseline),
        Task::Ci { job } => ci(job),
    }
}
