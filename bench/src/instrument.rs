//!
//! Timestamps and process memory snapshots taken around each phase.
//!
//! Values are informational only, nothing asserts on them.
//!

use batchbench_core::MB;
use std::{
    fmt,
    io::{self, Write},
    time::{Duration, Instant},
};
use sysinfo::{Pid, System};

/// Monotonic timestamp, only meaningful as a difference.
#[inline(always)]
pub fn now() -> Instant {
    Instant::now()
}

#[inline(always)]
pub fn as_millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Memory usage of the current process, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub rss: u64,
    pub virt: u64,
}

impl fmt::Display for MemorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rss={:.2}mb, virt={:.2}mb",
            self.rss as f64 / MB as f64,
            self.virt as f64 / MB as f64
        )
    }
}

pub struct Probe {
    sys: System,
    pid: Option<Pid>,
}

impl Probe {
    pub fn new() -> Self {
        Self {
            sys: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    /// Zeroed if the platform cannot report on the current process.
    pub fn memory(&mut self) -> MemorySnapshot {
        let Some(pid) = self.pid else {
            return MemorySnapshot::default();
        };
        self.sys.refresh_process(pid);
        self.sys
            .process(pid)
            .map(|p| MemorySnapshot {
                rss: p.memory(),
                virt: p.virtual_memory(),
            })
            .unwrap_or_default()
    }

    pub fn log_memory(&mut self, out: &mut impl Write) -> io::Result<MemorySnapshot> {
        let snapshot = self.memory();
        writeln!(out, "{snapshot}")?;
        Ok(snapshot)
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::new()
    }
}
