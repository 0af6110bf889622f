//! # batchbench_core
//!
//! `batchbench_core` binds the embedded key-value stores measured by the
//! `batchbench` harness. It is deliberately thin: the storage engines own their
//! on-disk formats, logs and compaction; this crate only exposes the
//! open/close lifecycle and the two atomic batch flavours the harness drives.

#![cfg_attr(test, allow(warnings))]

/// Store and batch interfaces, options, and the engine backends.
///
/// `Store` is the lifecycle handle (`open`, `close`, batch constructors) and
/// `BatchTrait` is the buffering write handle committed with `write`.
pub mod common;

/// The engine selected by cargo features.
pub use common::engines::DefaultStore;

#[cfg(feature = "sled_engine")]
pub use common::engines::{SledBatch, SledChainedBatch, SledStore};

#[cfg(feature = "rocks_engine")]
pub use common::engines::{RocksBatch, RocksChainedBatch, RocksStore};

pub use common::{
    BatchOp, BatchTrait, MB, RawBytes, RawKey, RawValue, Store, StoreOptions,
};
