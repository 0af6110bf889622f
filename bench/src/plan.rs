//!
//! Precomputed put and delete operations, grouped by round.
//!
//! The whole plan is materialized before any timing starts, so the measured
//! phases only cover store interaction.
//!

use crate::{
    workload::{Entry, WorkloadGenerator},
    BenchError, Result,
};
use batchbench_core::RawKey;
use rand::{CryptoRng, RngCore};

pub const DEFAULT_BATCHES: usize = 300;
pub const DEFAULT_PUTS: usize = 300;
pub const DEFAULT_DELS: usize = 200;

/// Shape of a run: `batches` rounds of `puts` insertions, then the same
/// number of rounds deleting `dels` of each round's keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    pub batches: usize,
    pub puts: usize,
    pub dels: usize,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            batches: DEFAULT_BATCHES,
            puts: DEFAULT_PUTS,
            dels: DEFAULT_DELS,
        }
    }
}

impl Workload {
    pub fn validate(&self) -> Result<()> {
        if self.dels > self.puts {
            return Err(BenchError::Config {
                puts: self.puts,
                dels: self.dels,
            });
        }
        self.entries().map(|_| ())
    }

    /// Number of entries the plan materializes.
    pub fn entries(&self) -> Result<usize> {
        self.batches
            .checked_mul(self.puts)
            .ok_or(BenchError::Oversized {
                batches: self.batches,
                puts: self.puts,
            })
    }
}

#[derive(Debug)]
pub struct BatchPlan {
    workload: Workload,
    // `batches * puts` entries, round after round
    puts: Vec<Entry>,
    // the first `dels` keys of every round
    dels: Vec<RawKey>,
}

impl BatchPlan {
    pub fn generate(workload: Workload) -> Result<Self> {
        Self::generate_with(workload, &mut WorkloadGenerator::new())
    }

    pub fn generate_with<R: RngCore + CryptoRng>(
        workload: Workload,
        gen: &mut WorkloadGenerator<R>,
    ) -> Result<Self> {
        workload.validate()?;

        let Workload {
            batches,
            puts: n_puts,
            dels: n_dels,
        } = workload;

        let oversized = |_| BenchError::Oversized {
            batches,
            puts: n_puts,
        };
        let mut puts = Vec::new();
        puts.try_reserve_exact(workload.entries()?)
            .map_err(oversized)?;
        let mut dels = Vec::new();
        // dels <= puts
        dels.try_reserve_exact(batches * n_dels)
            .map_err(oversized)?;

        for _ in 0..batches {
            for j in 0..n_puts {
                let entry = gen.entry();
                if j < n_dels {
                    dels.push(entry.key.clone());
                }
                puts.push(entry);
            }
        }

        Ok(Self {
            workload,
            puts,
            dels,
        })
    }

    #[inline(always)]
    pub fn rounds(&self) -> usize {
        self.workload.batches
    }

    /// # Panics
    ///
    /// `round` must be lower than `rounds()`.
    pub fn round_puts(&self, round: usize) -> &[Entry] {
        let n = self.workload.puts;
        &self.puts[round * n..(round + 1) * n]
    }

    /// # Panics
    ///
    /// `round` must be lower than `rounds()`.
    pub fn round_dels(&self, round: usize) -> &[RawKey] {
        let n = self.workload.dels;
        &self.dels[round * n..(round + 1) * n]
    }

    pub fn puts(&self) -> &[Entry] {
        &self.puts
    }

    pub fn dels(&self) -> &[RawKey] {
        &self.dels
    }
}
