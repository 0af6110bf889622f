//!
//! # Common components
//!

pub mod engines;

use ruc::*;
use std::path::{Path, PathBuf};

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

pub type RawBytes = Vec<u8>;
pub type RawKey = RawBytes;
pub type RawValue = RawBytes;

pub const MB: u64 = 1 << 20;

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

/// Options handed to a store when it is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// `false` keeps every byte in volatile memory.
    pub durable: bool,
    /// Ignored when `durable` is `false`.
    pub location: PathBuf,
}

impl StoreOptions {
    #[inline(always)]
    pub fn durable(location: impl AsRef<Path>) -> Self {
        Self {
            durable: true,
            location: location.as_ref().to_path_buf(),
        }
    }

    /// Non-durable store, discarded on close.
    ///
    /// With sled the data lives under `/dev/shm` on linux. Where that is
    /// missing, sled falls back to the system temp dir, which may be disk
    /// backed, so pages can still reach a device.
    #[inline(always)]
    pub fn memory() -> Self {
        Self {
            durable: false,
            location: PathBuf::new(),
        }
    }
}

/// One operation recorded by a single-segment batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOp {
    Put(RawKey, RawValue),
    Del(RawKey),
}

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

/// Trait for batch write operations
pub trait BatchTrait {
    /// Buffers an insertion, nothing reaches the store before `write`.
    fn put(&mut self, key: &[u8], value: &[u8]);

    /// Buffers a deletion, nothing reaches the store before `write`.
    fn del(&mut self, key: &[u8]);

    /// Number of buffered operations.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        0 == self.len()
    }

    /// Applies every buffered operation atomically and returns once the
    /// store has acknowledged the whole batch.
    ///
    /// The handle is consumed, so a batch can be committed at most once.
    /// Dropping a batch without calling this discards its operations.
    fn write(self) -> Result<()>;
}

/// Low-level store interface.
///
/// A store is created without touching any resource, then goes through
/// `open` and `close` exactly once each.
pub trait Store: Sized {
    /// Single-segment batch: operations are kept in an ordered list and
    /// converted into one native write batch on commit.
    type Batch: BatchTrait;

    /// Multi-segment batch: every operation is appended to the native
    /// write batch as soon as it is buffered.
    type ChainedBatch: BatchTrait;

    fn create(opts: StoreOptions) -> Self;

    fn options(&self) -> &StoreOptions;

    fn is_open(&self) -> bool;

    /// Fails on an unavailable or corrupt location, or if already open.
    fn open(&mut self) -> Result<()>;

    /// Releases the underlying handle, flushing it first if durable.
    /// Closing a store that is not open is a no-op.
    fn close(&mut self) -> Result<()>;

    fn batch(&self) -> Result<Self::Batch>;

    fn chained_batch(&self) -> Result<Self::ChainedBatch>;

    fn get(&self, key: &[u8]) -> Result<Option<RawValue>>;
}
