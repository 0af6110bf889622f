//!
//! Timed put and delete phases against one store.
//!
//! The runner owns the store for the whole run and walks it through
//! `Unopened -> Opened -> PutPhase -> DeletePhase -> Closed`. Every round
//! gets a fresh batch handle, and the next round only starts once the
//! previous commit has returned, so batches never overlap.
//!

use crate::{
    instrument::{as_millis, now, MemorySnapshot, Probe},
    plan::BatchPlan,
    BenchError, Result,
};
use batchbench_core::{BatchTrait, Store};
use std::{fmt, io::Write, time::Duration};
use tracing::{debug, trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Puts,
    Dels,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Puts => f.write_str("PUTS"),
            Self::Dels => f.write_str("DELS"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Unopened,
    Opened,
    PutPhase,
    DeletePhase,
    Closed,
}

/// Raw numbers of one completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report {
    pub puts: Duration,
    pub dels: Duration,
    /// Before puts, after puts, after dels.
    pub memory: [MemorySnapshot; 3],
}

pub struct BenchmarkRunner<S: Store> {
    store: S,
    chained: bool,
    state: State,
    probe: Probe,
}

impl<S: Store> BenchmarkRunner<S> {
    pub fn new(store: S, chained: bool) -> Self {
        Self {
            store,
            chained,
            state: State::Unopened,
            probe: Probe::new(),
        }
    }

    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Opens the store, runs both phases and closes the store.
    ///
    /// Once opened, the store is closed on every exit path. A close failure
    /// while unwinding from an earlier error is only logged.
    pub fn run(&mut self, plan: &BatchPlan, out: &mut impl Write) -> Result<Report> {
        self.open()?;

        match self.phases(plan, out) {
            Ok(report) => {
                self.close()?;
                Ok(report)
            }
            Err(e) => {
                if let Err(ce) = self.close() {
                    warn!(error = %ce, "store close failed after an aborted run");
                }
                Err(e)
            }
        }
    }

    fn open(&mut self) -> Result<()> {
        self.store.open().map_err(|e| BenchError::Open {
            location: self.store.options().location.display().to_string(),
            msg: e.to_string(),
        })?;
        self.state = State::Opened;
        debug!(durable = self.store.options().durable, chained = self.chained, "store opened");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let ret = self
            .store
            .close()
            .map_err(|e| BenchError::Close { msg: e.to_string() });
        self.state = State::Closed;
        debug!("store closed");
        ret
    }

    fn phases(&mut self, plan: &BatchPlan, out: &mut impl Write) -> Result<Report> {
        if self.chained {
            self.timed(plan, out, S::chained_batch)
        } else {
            self.timed(plan, out, S::batch)
        }
    }

    fn timed<B: BatchTrait>(
        &mut self,
        plan: &BatchPlan,
        out: &mut impl Write,
        new_batch: fn(&S) -> ruc::Result<B>,
    ) -> Result<Report> {
        writeln!(out, "Running puts...")?;
        self.state = State::PutPhase;
        debug!(rounds = plan.rounds(), "put phase started");

        let m0 = self.probe.log_memory(out)?;
        let t0 = now();

        for round in 0..plan.rounds() {
            let mut batch = new_batch(&self.store).map_err(|e| write_err(Phase::Puts, round, e))?;
            for entry in plan.round_puts(round) {
                batch.put(&entry.key, &entry.value);
            }
            batch.write().map_err(|e| write_err(Phase::Puts, round, e))?;
            trace!(round, "put batch committed");
        }

        let t1 = now();
        let m1 = self.probe.log_memory(out)?;
        let puts = t1.duration_since(t0);
        writeln!(out, "PUTS: {:.3} ms", as_millis(puts))?;

        writeln!(out, "Running dels...")?;
        self.state = State::DeletePhase;
        debug!(rounds = plan.rounds(), "delete phase started");

        let t2 = now();

        for round in 0..plan.rounds() {
            let mut batch = new_batch(&self.store).map_err(|e| write_err(Phase::Dels, round, e))?;
            for key in plan.round_dels(round) {
                batch.del(key);
            }
            batch.write().map_err(|e| write_err(Phase::Dels, round, e))?;
            trace!(round, "delete batch committed");
        }

        let t3 = now();
        let dels = t3.duration_since(t2);
        writeln!(out, "DELS: {:.3} ms", as_millis(dels))?;
        let m2 = self.probe.log_memory(out)?;

        Ok(Report {
            puts,
            dels,
            memory: [m0, m1, m2],
        })
    }
}

fn write_err(phase: Phase, round: usize, e: impl fmt::Display) -> BenchError {
    BenchError::Write {
        phase,
        round,
        msg: e.to_string(),
    }
}
