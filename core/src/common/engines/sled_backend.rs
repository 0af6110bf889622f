use super::{push_del, push_put};
use crate::common::{BatchOp, BatchTrait, RawValue, Store, StoreOptions, MB};
use ruc::*;
use sled::{Batch, Config, Db, Mode};
use std::fs;
use tracing::debug;

// system page cache used by sled
const CACHE_CAPACITY: u64 = 256 * MB;

#[derive(Debug)]
pub struct SledStore {
    opts: StoreOptions,
    hdr: Option<Db>,
}

impl SledStore {
    #[inline(always)]
    fn hdr(&self) -> Result<&Db> {
        self.hdr.as_ref().c(d!("store is not open"))
    }
}

impl Store for SledStore {
    type Batch = SledBatch;
    type ChainedBatch = SledChainedBatch;

    fn create(opts: StoreOptions) -> Self {
        Self { opts, hdr: None }
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
        let db = sled_open(&self.opts).c(d!())?;
        debug!(durable = self.opts.durable, location = %self.opts.location.display(), "sled store opened");
        self.hdr = Some(db);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(db) = self.hdr.take() {
            if self.opts.durable {
                let flushed = db.flush().c(d!())?;
                debug!(flushed, "sled store flushed");
            }
            debug!("sled store closed");
        }
        Ok(())
    }

    fn batch(&self) -> Result<SledBatch> {
        self.hdr().map(|db| SledBatch {
            hdr: db.clone(),
            ops: vec![],
        })
    }

    fn chained_batch(&self) -> Result<SledChainedBatch> {
        self.hdr().map(|db| SledChainedBatch {
            hdr: db.clone(),
            inner: Batch::default(),
            cnt: 0,
        })
    }

    fn get(&self, key: &[u8]) -> Result<Option<RawValue>> {
        self.hdr()?
            .get(key)
            .c(d!())
            .map(|v| v.map(|iv| iv.to_vec()))
    }
}

/// Single-segment batch over sled.
pub struct SledBatch {
    hdr: Db,
    ops: Vec<BatchOp>,
}

impl BatchTrait for SledBatch {
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
        let mut batch = Batch::default();
        for op in self.ops {
            match op {
                BatchOp::Put(k, v) => batch.insert(k, v),
                BatchOp::Del(k) => batch.remove(k),
            }
        }
        self.hdr.apply_batch(batch).c(d!())
    }
}

/// Chained batch over sled, operations go straight into the native batch.
pub struct SledChainedBatch {
    hdr: Db,
    inner: Batch,
    cnt: usize,
}

impl BatchTrait for SledChainedBatch {
    #[inline(always)]
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.inner.insert(key, value);
        self.cnt += 1;
    }

    #[inline(always)]
    fn del(&mut self, key: &[u8]) {
        self.inner.remove(key);
        self.cnt += 1;
    }

    fn len(&self) -> usize {
        self.cnt
    }

    fn write(self) -> Result<()> {
        self.hdr.apply_batch(self.inner).c(d!())
    }
}

fn sled_open(opts: &StoreOptions) -> Result<Db> {
    let cfg = Config::new()
        .cache_capacity(CACHE_CAPACITY)
        // fastest
        .mode(Mode::HighThroughput);

    // a temporary db lives under `/dev/shm` on linux and is removed on drop
    let cfg = if opts.durable {
        fs::create_dir_all(&opts.location).c(d!())?;
        cfg.path(&opts.location)
    } else {
        cfg.temporary(true)
    };

    cfg.open().c(d!(format!("{}", opts.location.display())))
}
