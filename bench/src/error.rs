use crate::runner::Phase;
use std::io;
use thiserror::Error;

pub type Result<T, E = BenchError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// Rejected before any workload is generated or any store is created.
    #[error("DELS must be lower than PUTS (DELS={dels}, PUTS={puts})")]
    Config { puts: usize, dels: usize },

    /// `batches * puts` entries cannot be held in memory.
    #[error("workload too large (BATCHES={batches}, PUTS={puts})")]
    Oversized { batches: usize, puts: usize },

    #[error("failed to open store at '{location}': {msg}")]
    Open { location: String, msg: String },

    #[error("{phase} batch {round} failed: {msg}")]
    Write {
        phase: Phase,
        round: usize,
        msg: String,
    },

    #[error("failed to close store: {msg}")]
    Close { msg: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BenchError {
    /// Whether the run was rejected before a store was created.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Oversized { .. })
    }
}
