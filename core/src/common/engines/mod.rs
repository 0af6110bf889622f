/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

#[cfg(feature = "rocks_engine")]
mod rocks_backend;

#[cfg(feature = "sled_engine")]
mod sled_backend;


/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

#[cfg(feature = "rocks_engine")]
pub use rocks_backend::{RocksBatch, RocksChainedBatch, RocksStore};

#[cfg(feature = "sled_engine")]
pub use sled_backend::{SledBatch, SledChainedBatch, SledStore};

#[cfg(feature = "rocks_engine")]
pub type DefaultStore = RocksStore;

#[cfg(all(feature = "sled_engine", not(feature = "rocks_engine")))]
pub type DefaultStore = SledStore;

#[cfg(all(not(feature = "rocks_engine"), not(feature = "sled_engine")))]
compile_error!("enable at least one of the `sled_engine` or `rocks_engine` features");

/////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////

use crate::common::BatchOp;

// Shared by the single-segment batches of every engine.
#[inline(always)]
fn push_put(ops: &mut Vec<BatchOp>, key: &[u8], value: &[u8]) {
    ops.push(BatchOp::Put(key.to_vec(), value.to_vec()));
}

#[inline(always)]
fn push_del(ops: &mut Vec<BatchOp>, key: &[u8]) {
    ops.push(BatchOp::Del(key.to_vec()));
}
