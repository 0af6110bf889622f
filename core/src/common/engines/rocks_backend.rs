use super::{push_del, push_put};
use crate::common::{BatchOp, BatchTrait, RawValue, Store, StoreOptions, MB};
use rocksdb::{DBCompressionType, Env, Options, WriteBatch, DB};
use ruc::*;
use std::{fs, sync::Arc, thread::available_parallelism};
use tracing::debug;

// virtual path of a non-durable instance, only meaningful inside `Env::mem_env`
const MEM_LOCATION: &str = "/batchbench/mem";

const WR_BUF_SIZE: usize = 64 * MB as usize;

pub struct RocksStore {
    opts: StoreOptions,
    hdr: Option<Arc<DB>>,
    // must outlive `hdr` for non-durable instances
    env: Option<Env>,
}

impl RocksStore {
    #[inline(always)]
    fn hdr(&self) -> Result<&Arc<DB>> {
        self.hdr.as_ref().c(d!("store is not open"))
    }
}

impl Store for RocksStore {
    type Batch = RocksBatch;
    type ChainedBatch = RocksChainedBatch;

    fn create(opts: StoreOptions) -> Self {
        Self {
            opts,
            hdr: None,
            env: None,
        }
    }

    fn options(&self) -> &StoreOptions {
        &self.opts
    }

    fn is_open(&self) -> bool {
        self.hdr.is_some()
    }

    fn open(&mut self) -> Result<()> {
        if self.hdr.is_some() {
            return Err(eg!("store is already open"));
        }
        let (db, env) = rocksdb_open(&self.opts).c(d!())?;
        debug!(durable = self.opts.durable, location = %self.opts.location.display(), "rocksdb store opened");
        self.hdr = Some(Arc::new(db));
        self.env = env;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(db) = self.hdr.take() {
            if self.opts.durable {
                db.flush().c(d!())?;
                debug!("rocksdb store flushed");
            }
            drop(db);
            self.env.take();
            debug!("rocksdb store closed");
        }
        Ok(())
    }

    fn batch(&self) -> Result<RocksBatch> {
        self.hdr().map(|db| RocksBatch {
            hdr: Arc::clone(db),
            ops: vec![],
        })
    }

    fn chained_batch(&self) -> Result<RocksChainedBatch> {
        self.hdr().map(|db| RocksChainedBatch {
            hdr: Arc::clone(db),
            inner: WriteBatch::default(),
        })
    }

    fn get(&self, key: &[u8]) -> Result<Option<RawValue>> {
        self.hdr()?.get(key).c(d!())
    }
}

/// Single-segment batch over RocksDB.
pub struct RocksBatch {
    hdr: Arc<DB>,
    ops: Vec<BatchOp>,
}

impl BatchTrait for RocksBatch {
    #[inline(always)]
    fn put(&mut self, key: &[u8], value: &[u8]) {
        push_put(&mut self.ops, key, value);
    }

    #[inline(always)]
    fn del(&mut self, key: &[u8]) {
        push_del(&mut self.ops, key);
    }

    fn len(&self) -> usize {
        self.ops.len()
    }

    fn write(self) -> Result<()> {
        let mut batch = WriteBatch::default();
        for op in self.ops {
            match op {
                BatchOp::Put(k, v) => batch.put(k, v),
                BatchOp::Del(k) => batch.delete(k),
            }
        }
        self.hdr.write(batch).c(d!())
    }
}

/// Chained batch over RocksDB, operations go straight into the native batch.
pub struct RocksChainedBatch {
    hdr: Arc<DB>,
    inner: WriteBatch,
}

impl BatchTrait for RocksChainedBatch {
    #[inline(always)]
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.inner.put(key, value);
    }

    #[inline(always)]
    fn del(&mut self, key: &[u8]) {
        self.inner.delete(key);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn write(self) -> Result<()> {
        self.hdr.write(self.inner).c(d!())
    }
}

fn rocksdb_open(opts: &StoreOptions) -> Result<(DB, Option<Env>)> {
    let mut cfg = Options::default();

    cfg.create_if_missing(true);
    cfg.set_write_buffer_size(WR_BUF_SIZE);

    let parallelism = available_parallelism().c(d!())?.get() as i32;
    cfg.increase_parallelism(parallelism);

    #[cfg(feature = "rocks_compress")]
    cfg.set_compression_type(DBCompressionType::Lz4);

    #[cfg(not(feature = "rocks_compress"))]
    cfg.set_compression_type(DBCompressionType::None);

    if opts.durable {
        fs::create_dir_all(&opts.location).c(d!())?;
        let db = DB::open(&cfg, &opts.location)
            .c(d!(format!("{}", opts.location.display())))?;
        Ok((db, None))
    } else {
        let env = Env::mem_env().c(d!())?;
        cfg.set_env(&env);
        let db = DB::open(&cfg, MEM_LOCATION).c(d!())?;
        Ok((db, Some(env)))
    }
}
