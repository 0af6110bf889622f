//!
//! Command line surface and the process-independent entry point.
//!
//! `batch-bench <mode> [BATCHES] [PUTS] [DELS]`
//!
//! Numbers are parsed leniently: anything that is not a positive integer
//! falls back to the default, and surplus arguments are ignored. An unknown
//! or missing mode prints the valid names and is not an error.
//!

use crate::{
    mode::{self, Mode},
    plan::{BatchPlan, Workload, DEFAULT_BATCHES, DEFAULT_DELS, DEFAULT_PUTS},
    runner::{BenchmarkRunner, Report},
    BenchError, Result,
};
use batchbench_core::{Store, StoreOptions};
use clap::Parser;
use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "batch-bench",
    version,
    about = "Write/delete throughput and memory footprint of atomic store batches"
)]
pub struct Cli {
    /// One of: batch, chained-batch, mem-batch, mem-chained-batch
    #[arg(allow_hyphen_values = true)]
    pub mode: Option<String>,

    /// Number of batches per phase [default: 300]
    #[arg(allow_hyphen_values = true)]
    pub batches: Option<String>,

    /// Insertions per batch [default: 300]
    #[arg(allow_hyphen_values = true)]
    pub puts: Option<String>,

    /// Deletions per batch, at most PUTS [default: 200]
    #[arg(allow_hyphen_values = true)]
    pub dels: Option<String>,

    /// Surplus positionals, ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,

    /// Base directory of the on-disk stores
    #[arg(long, env = "BATCHBENCH_BASE_DIR")]
    pub dir: Option<PathBuf>,

    /// Remove the on-disk store before opening it
    #[arg(long)]
    pub clean: bool,
}

/// Everything a run needs, resolved from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// `None` when the case name is missing or unknown.
    pub mode: Option<Mode>,
    pub workload: Workload,
    pub base_dir: PathBuf,
    pub clean: bool,
}

impl From<Cli> for BenchConfig {
    fn from(cli: Cli) -> Self {
        let workload = Workload {
            batches: lenient(cli.batches.as_deref(), DEFAULT_BATCHES),
            puts: lenient(cli.puts.as_deref(), DEFAULT_PUTS),
            dels: lenient(cli.dels.as_deref(), DEFAULT_DELS),
        };
        Self {
            mode: cli.mode.as_deref().and_then(Mode::from_name),
            workload,
            base_dir: cli.dir.unwrap_or_else(default_base_dir),
            clean: cli.clean,
        }
    }
}

impl BenchConfig {
    pub fn store_options(&self, mode: Mode) -> StoreOptions {
        if mode.configuration().durable {
            StoreOptions::durable(self.base_dir.join(mode.store_dir()))
        } else {
            StoreOptions::memory()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// No valid mode was given, the case list was printed.
    Usage,
    Completed(Report),
}

// zero counts as absent
fn lenient(arg: Option<&str>, default: usize) -> usize {
    arg.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| 0 < *n)
        .unwrap_or(default)
}

fn default_base_dir() -> PathBuf {
    env::var("HOME")
        .map(|h| format!("{}/.batchbench", h))
        .unwrap_or_else(|_| "/tmp/.batchbench".to_owned())
        .into()
}

/// Selects the case, builds the plan, and runs it against the store made
/// by `new_store`.
///
/// The workload is validated before `new_store` is called, so a rejected
/// configuration never creates a store.
pub fn run<S, F>(cfg: &BenchConfig, new_store: F, out: &mut impl Write) -> Result<Outcome>
where
    S: Store,
    F: FnOnce(StoreOptions) -> S,
{
    let Some(mode) = cfg.mode else {
        writeln!(out, "{}", mode::usage())?;
        return Ok(Outcome::Usage);
    };

    writeln!(out, "{}", mode.label())?;
    info!(%mode, workload = ?cfg.workload, "benchmark selected");

    let plan = BatchPlan::generate(cfg.workload)?;
    debug!(puts = plan.puts().len(), dels = plan.dels().len(), "workload materialized");

    let opts = cfg.store_options(mode);
    if cfg.clean && opts.durable {
        remove_store_dir(&opts.location)?;
    }

    let mut runner = BenchmarkRunner::new(new_store(opts), mode.configuration().chained);
    runner.run(&plan, out).map(Outcome::Completed)
}

fn remove_store_dir(location: &Path) -> Result<()> {
    match fs::remove_dir_all(location) {
        Ok(()) => {
            debug!(location = %location.display(), "previous store removed");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BenchError::Io(e)),
    }
}

/// Process-level wrapper around [`run`]: parses `args`, reports failures
/// on `err`, and returns the exit status.
pub fn run_cli<I, T, S, F>(args: I, new_store: F, out: &mut impl Write, err: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    S: Store,
    F: FnOnce(StoreOptions) -> S,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // `--help` and `--version` land here too
            let _ = if e.use_stderr() {
                write!(err, "{e}")
            } else {
                write!(out, "{e}")
            };
            return e.exit_code();
        }
    };

    let cfg = BenchConfig::from(cli);
    match run(&cfg, new_store, out) {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "{e}");
            1
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> BenchConfig {
        Cli::try_parse_from(std::iter::once("batch-bench").chain(args.iter().copied()))
            .unwrap()
            .into()
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["batch"]);
        assert_eq!(Some(Mode::Batch), cfg.mode);
        assert_eq!(Workload::default(), cfg.workload);
        assert!(!cfg.clean);
    }

    #[test]
    fn numeric_overrides() {
        let cfg = parse(&["mem-batch", "2", "3", "1"]);
        assert_eq!(
            Workload {
                batches: 2,
                puts: 3,
                dels: 1
            },
            cfg.workload
        );
    }

    #[test]
    fn lenient_numbers() {
        let cfg = parse(&["mem-batch", "many", "0", "-5"]);
        assert_eq!(Workload::default(), cfg.workload);

        let cfg = parse(&["mem-batch", "7"]);
        assert_eq!(7, cfg.workload.batches);
        assert_eq!(DEFAULT_PUTS, cfg.workload.puts);
        assert_eq!(DEFAULT_DELS, cfg.workload.dels);
    }

    #[test]
    fn unknown_or_missing_mode() {
        assert_eq!(None, parse(&["unknown-mode"]).mode);
        assert_eq!(None, parse(&["-x"]).mode);
        assert_eq!(None, parse(&[]).mode);
    }

    #[test]
    fn hyphenated_and_surplus_args() {
        let cfg = parse(&["mem-batch", "-abc", "3", "1"]);
        assert_eq!(Some(Mode::MemBatch), cfg.mode);
        assert_eq!(DEFAULT_BATCHES, cfg.workload.batches);
        assert_eq!(3, cfg.workload.puts);
        assert_eq!(1, cfg.workload.dels);

        let cfg = parse(&["mem-batch", "2", "3", "1", "extra", "-y", "more"]);
        assert_eq!(
            Workload {
                batches: 2,
                puts: 3,
                dels: 1
            },
            cfg.workload
        );
    }

    #[test]
    fn store_locations() {
        let cfg = parse(&["batch", "--dir", "/data/bench", "--clean"]);
        assert!(cfg.clean);
        assert_eq!(
            StoreOptions::durable("/data/bench/bdb-batch"),
            cfg.store_options(Mode::Batch)
        );
        assert_eq!(
            StoreOptions::durable("/data/bench/bdb-chainedBatch"),
            cfg.store_options(Mode::ChainedBatch)
        );
        assert_eq!(StoreOptions::memory(), cfg.store_options(Mode::MemChainedBatch));
    }
}
