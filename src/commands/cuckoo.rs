//! Cuckoo filter operations
//!
//! CF.* commands, including the chunked SCANDUMP / LOADCHUNK transfer.
//! Boolean replies are true only for positive integers; the server uses
//! negative values as failure markers.

use log::{debug, warn};

use crate::args::{ArgList, ItemList};
use crate::channel::Channel;
use crate::client::{Client, items_args};
use crate::command::CuckooCommand;
use crate::dump::{DumpChunk, ScanDump};
use crate::error::Result;
use crate::options::{CfInsertOptions, CfReserveOptions};
use crate::reply::{self, BoolPolicy, Context, InfoMap};

const POLICY: BoolPolicy = BoolPolicy::Positive;

impl<C: Channel> Client<C> {
    /// CF.RESERVE {key} {capacity} [BUCKETSIZE b] [MAXITERATIONS m] [EXPANSION n]
    pub fn cf_reserve(&self, key: impl AsRef<[u8]>, options: &CfReserveOptions) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.extend(options.encode());
        let reply = self.dispatch(CuckooCommand::Reserve, args)?;
        reply::expect_ok(&Context::new(CuckooCommand::Reserve, key), reply)
    }

    /// CF.ADD {key} {item}
    pub fn cf_add(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        self.cf_single(CuckooCommand::Add, key.as_ref(), item.as_ref())
    }

    /// CF.ADDNX {key} {item}
    ///
    /// False when the item (probably) exists already.
    pub fn cf_addnx(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        self.cf_single(CuckooCommand::AddNx, key.as_ref(), item.as_ref())
    }

    /// CF.INSERT {key} [CAPACITY c] [NOCREATE] ITEMS {item} ...
    pub fn cf_insert(
        &self,
        key: impl AsRef<[u8]>,
        options: &CfInsertOptions,
        items: impl Into<ItemList>,
    ) -> Result<Vec<bool>> {
        self.cf_insert_with(CuckooCommand::Insert, key.as_ref(), options, &items.into())
    }

    /// CF.INSERTNX {key} [CAPACITY c] [NOCREATE] ITEMS {item} ...
    pub fn cf_insertnx(
        &self,
        key: impl AsRef<[u8]>,
        options: &CfInsertOptions,
        items: impl Into<ItemList>,
    ) -> Result<Vec<bool>> {
        self.cf_insert_with(CuckooCommand::InsertNx, key.as_ref(), options, &items.into())
    }

    /// CF.EXISTS {key} {item}
    pub fn cf_exists(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        self.cf_single(CuckooCommand::Exists, key.as_ref(), item.as_ref())
    }

    /// CF.DEL {key} {item}
    pub fn cf_del(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        self.cf_single(CuckooCommand::Del, key.as_ref(), item.as_ref())
    }

    /// CF.COUNT {key} {item}
    pub fn cf_count(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<i64> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_bytes(item.as_ref());
        let reply = self.dispatch(CuckooCommand::Count, args)?;
        reply::decode_integer(&Context::new(CuckooCommand::Count, key), reply)
    }

    /// CF.SCANDUMP {key} {cursor}, one step
    pub fn cf_scan_dump_at(&self, key: impl AsRef<[u8]>, cursor: i64) -> Result<DumpChunk> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_int(cursor);
        let reply = self.dispatch(CuckooCommand::ScanDump, args)?;
        reply::decode_dump_chunk(&Context::new(CuckooCommand::ScanDump, key), reply)
    }

    /// Iterate over every chunk of the filter at `key`.
    ///
    /// Nothing is sent until the first call to `next`.
    pub fn cf_scan_dump(&self, key: impl AsRef<[u8]>) -> ScanDump<'_, C> {
        ScanDump::new(self, key.as_ref())
    }

    /// CF.LOADCHUNK {key} {cursor} {payload}
    ///
    /// Chunks must be loaded once each, in the order they were dumped.
    pub fn cf_load_chunk(&self, key: impl AsRef<[u8]>, chunk: &DumpChunk) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_capacity(3);
        args.push_bytes(key)
            .push_int(chunk.cursor)
            .push_bytes(&chunk.payload);
        let reply = self.dispatch(CuckooCommand::LoadChunk, args)?;
        reply::expect_ok(&Context::new(CuckooCommand::LoadChunk, key), reply)
    }

    /// Replay dumped chunks into `key`, stopping at the first failure.
    ///
    /// Returns the number of chunks loaded.
    pub fn cf_load_chunks<I>(&self, key: impl AsRef<[u8]>, chunks: I) -> Result<usize>
    where
        I: IntoIterator<Item = DumpChunk>,
    {
        let key = key.as_ref();
        let mut loaded = 0;
        for chunk in chunks {
            self.cf_load_chunk(key, &chunk)?;
            loaded += 1;
        }
        debug!(
            "loaded {} chunks into '{}'",
            loaded,
            String::from_utf8_lossy(key)
        );
        Ok(loaded)
    }

    /// CF.INFO {key}
    pub fn cf_info(&self, key: impl AsRef<[u8]>) -> Result<InfoMap> {
        let key = key.as_ref();
        let reply = self.dispatch(CuckooCommand::Info, ArgList::with_key(key))?;
        reply::decode_info(&Context::new(CuckooCommand::Info, key), reply)
    }

    fn cf_single(&self, command: CuckooCommand, key: &[u8], item: &[u8]) -> Result<bool> {
        let mut args = ArgList::with_key(key);
        args.push_bytes(item);
        let reply = self.dispatch(command, args)?;
        reply::decode_bool(&Context::new(command, key), reply, POLICY)
    }

    fn cf_insert_with(
        &self,
        command: CuckooCommand,
        key: &[u8],
        options: &CfInsertOptions,
        items: &ItemList,
    ) -> Result<Vec<bool>> {
        if options.conflicts() {
            warn!(
                "{} on '{}' combines NOCREATE with CAPACITY",
                command.as_str(),
                String::from_utf8_lossy(key)
            );
        }
        let args = items_args(key, options.encode(), items)?;
        let reply = self.dispatch(command, args)?;
        reply::decode_bool_array(&Context::new(command, key), reply, POLICY, items.len())
    }
}
