//!
//! Benchmark cases selectable from the command line.
//!

use std::fmt;

/// Store durability and batch flavour of a run, fixed once selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub durable: bool,
    pub chained: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Batch,
    ChainedBatch,
    MemBatch,
    MemChainedBatch,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Batch,
        Mode::ChainedBatch,
        Mode::MemBatch,
        Mode::MemChainedBatch,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Batch => "batch",
            Self::ChainedBatch => "chained-batch",
            Self::MemBatch => "mem-batch",
            Self::MemChainedBatch => "mem-chained-batch",
        }
    }

    pub fn configuration(self) -> Configuration {
        let (durable, chained) = match self {
            Self::Batch => (true, false),
            Self::ChainedBatch => (true, true),
            Self::MemBatch => (false, false),
            Self::MemChainedBatch => (false, true),
        };
        Configuration { durable, chained }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Batch => "Benchmarking batch (disk)...",
            Self::ChainedBatch => "Benchmarking chained batch (disk)...",
            Self::MemBatch => "Benchmarking batch (memory)...",
            Self::MemChainedBatch => "Benchmarking chained batch (memory)...",
        }
    }

    /// Directory, under the base dir, holding the on-disk store of this
    /// batch flavour. Only disk modes use it.
    pub fn store_dir(self) -> &'static str {
        if self.configuration().chained {
            "bdb-chainedBatch"
        } else {
            "bdb-batch"
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Printed when the case name is missing or unknown.
pub fn usage() -> String {
    let names = Mode::ALL.iter().map(|m| m.name()).collect::<Vec<_>>();
    format!("Choose from: {}", names.join(", "))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        Mode::ALL.into_iter().for_each(|m| {
            assert_eq!(Some(m), Mode::from_name(m.name()));
        });
        assert_eq!(None, Mode::from_name("unknown-mode"));
        assert_eq!(None, Mode::from_name(""));
        assert_eq!(None, Mode::from_name("Batch"));
    }

    #[test]
    fn configurations() {
        let cfg = |durable, chained| Configuration { durable, chained };
        assert_eq!(cfg(true, false), Mode::Batch.configuration());
        assert_eq!(cfg(true, true), Mode::ChainedBatch.configuration());
        assert_eq!(cfg(false, false), Mode::MemBatch.configuration());
        assert_eq!(cfg(false, true), Mode::MemChainedBatch.configuration());
    }

    #[test]
    fn usage_lists_every_case() {
        assert_eq!(
            "Choose from: batch, chained-batch, mem-batch, mem-chained-batch",
            usage()
        );
    }

    #[test]
    fn store_dirs() {
        assert_eq!("bdb-batch", Mode::Batch.store_dir());
        assert_eq!("bdb-chainedBatch", Mode::ChainedBatch.store_dir());
    }
}
