//! # batchbench
//!
//! Measures the write and delete throughput, and the memory footprint, of a
//! store's atomic batches. Four configurations are covered: on-disk or
//! in-memory store, crossed with single-segment or chained batches.
//!
//! A run materializes the whole workload first, then times `BATCHES`
//! sequential put batches followed by `BATCHES` sequential delete batches,
//! printing elapsed time and resident memory around each phase.
//!
//! ```no_run
//! use batchbench::{cli, mode::Mode, plan::Workload};
//! use batchbench_core::{DefaultStore, Store};
//!
//! let cfg = cli::BenchConfig {
//!     mode: Some(Mode::MemBatch),
//!     workload: Workload { batches: 10, puts: 100, dels: 50 },
//!     base_dir: "/tmp/.batchbench".into(),
//!     clean: false,
//! };
//! let mut out = std::io::stdout();
//! cli::run(&cfg, DefaultStore::create, &mut out).unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod instrument;
pub mod mode;
pub mod plan;
pub mod runner;
pub mod workload;

pub use error::{BenchError, Result};
