//! Recording store used to observe what the harness does to a store.

#![allow(dead_code)]

use batchbench_core::{BatchTrait, RawKey, RawValue, Store, StoreOptions};
use ruc::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Open { durable: bool },
    Close,
    NewBatch { chained: bool },
    Put { key: RawKey, value_len: usize },
    Del { key: RawKey },
    WriteBegin { chained: bool, puts: usize, dels: usize },
    WriteEnd,
}

#[derive(Debug, Default)]
pub struct Log {
    pub events: Vec<Event>,
    pub opts: Option<StoreOptions>,
    live_batches: usize,
    writing: bool,
    /// Set when a batch was created or committed while another one was live.
    pub overlap: bool,
}

pub type SharedLog = Rc<RefCell<Log>>;

pub fn new_log() -> SharedLog {
    Rc::new(RefCell::new(Log::default()))
}

impl Log {
    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Committed batches as `(chained, puts, dels)`, in commit order.
    pub fn commits(&self) -> Vec<(bool, usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::WriteBegin {
                    chained,
                    puts,
                    dels,
                } => Some((*chained, *puts, *dels)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Faults {
    pub open: bool,
    /// Zero-based index of the commit that fails.
    pub write_at: Option<usize>,
    pub close: bool,
}

pub struct MockStore {
    opts: StoreOptions,
    log: SharedLog,
    faults: Faults,
    open: bool,
}

impl MockStore {
    pub fn with_log(opts: StoreOptions, log: SharedLog) -> Self {
        Self::with_faults(opts, log, Faults::default())
    }

    pub fn with_faults(opts: StoreOptions, log: SharedLog, faults: Faults) -> Self {
        log.borrow_mut().opts = Some(opts.clone());
        Self {
            opts,
            log,
            faults,
            open: false,
        }
    }

    fn new_batch(&self, chained: bool) -> Result<MockBatch> {
        if !self.open {
            return Err(eg!("store is not open"));
        }
        let mut log = self.log.borrow_mut();
        if 0 < log.live_batches {
            log.overlap = true;
        }
        log.live_batches += 1;
        log.events.push(Event::NewBatch { chained });
        let fail = self.faults.write_at == Some(log.count(|e| matches!(e, Event::WriteBegin { .. })));
        Ok(MockBatch {
            log: Rc::clone(&self.log),
            chained,
            puts: 0,
            dels: 0,
            fail,
        })
    }
}

impl Store for MockStore {
    type Batch = MockBatch;
    type ChainedBatch = MockBatch;

    fn create(opts: StoreOptions) -> Self {
        Self::with_log(opts, new_log())
    }

    fn options(&self) -> &StoreOptions {
        &self.opts
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        self.log.borrow_mut().events.push(Event::Open {
            durable: self.opts.durable,
        });
        if self.faults.open {
            return Err(eg!("location is locked"));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.log.borrow_mut().events.push(Event::Close);
        if self.faults.close {
            return Err(eg!("close failed"));
        }
        Ok(())
    }

    fn batch(&self) -> Result<MockBatch> {
        self.new_batch(false)
    }

    fn chained_batch(&self) -> Result<MockBatch> {
        self.new_batch(true)
    }

    fn get(&self, _key: &[u8]) -> Result<Option<RawValue>> {
        Ok(None)
    }
}

pub struct MockBatch {
    log: SharedLog,
    chained: bool,
    puts: usize,
    dels: usize,
    fail: bool,
}

impl BatchTrait for MockBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.puts += 1;
        self.log.borrow_mut().events.push(Event::Put {
            key: key.to_vec(),
            value_len: value.len(),
        });
    }

    fn del(&mut self, key: &[u8]) {
        self.dels += 1;
        self.log
            .borrow_mut()
            .events
            .push(Event::Del { key: key.to_vec() });
    }

    fn len(&self) -> usize {
        self.puts + self.dels
    }

    fn write(self) -> Result<()> {
        {
            let mut log = self.log.borrow_mut();
            if log.writing || 1 < log.live_batches {
                log.overlap = true;
            }
            log.writing = true;
            log.events.push(Event::WriteBegin {
                chained: self.chained,
                puts: self.puts,
                dels: self.dels,
            });
        }

        let ret = if self.fail {
            Err(eg!("commit rejected"))
        } else {
            Ok(())
        };

        let mut log = self.log.borrow_mut();
        log.writing = false;
        log.events.push(Event::WriteEnd);
        ret
    }
}

impl Drop for MockBatch {
    fn drop(&mut self) {
        self.log.borrow_mut().live_batches -= 1;
    }
}
