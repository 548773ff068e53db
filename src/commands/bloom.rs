//! Bloom filter operations
//!
//! BF.* commands. Boolean replies are true for any non-zero integer.

use log::warn;

use crate::args::{ArgList, ItemList};
use crate::channel::Channel;
use crate::client::{Client, items_args, key_items_args};
use crate::command::BloomCommand;
use crate::error::Result;
use crate::options::{BfInsertOptions, BfReserveOptions};
use crate::reply::{self, BoolPolicy, Context, InfoMap};

const POLICY: BoolPolicy = BoolPolicy::NonZero;

impl<C: Channel> Client<C> {
    /// BF.RESERVE {key} {error_rate} {capacity} [EXPANSION n] [NONSCALING]
    pub fn bf_reserve(
        &self,
        key: impl AsRef<[u8]>,
        error_rate: f64,
        capacity: u64,
        options: &BfReserveOptions,
    ) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_float(error_rate)
            .push_uint(capacity)
            .extend(options.encode());
        let reply = self.dispatch(BloomCommand::Reserve, args)?;
        reply::expect_ok(&Context::new(BloomCommand::Reserve, key), reply)
    }

    /// BF.ADD {key} {item}
    ///
    /// Returns false when the item may already have been present.
    pub fn bf_add(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_bytes(item.as_ref());
        let reply = self.dispatch(BloomCommand::Add, args)?;
        reply::decode_bool(&Context::new(BloomCommand::Add, key), reply, POLICY)
    }

    /// BF.MADD {key} {item} [item ...]
    pub fn bf_madd(&self, key: impl AsRef<[u8]>, items: impl Into<ItemList>) -> Result<Vec<bool>> {
        self.bf_multi(BloomCommand::MAdd, key.as_ref(), &items.into())
    }

    /// BF.EXISTS {key} {item}
    ///
    /// A missing key answers false rather than failing.
    pub fn bf_exists(&self, key: impl AsRef<[u8]>, item: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_bytes(item.as_ref());
        let reply = self.dispatch(BloomCommand::Exists, args)?;
        reply::decode_bool(&Context::new(BloomCommand::Exists, key), reply, POLICY)
    }

    /// BF.MEXISTS {key} {item} [item ...]
    pub fn bf_mexists(
        &self,
        key: impl AsRef<[u8]>,
        items: impl Into<ItemList>,
    ) -> Result<Vec<bool>> {
        self.bf_multi(BloomCommand::MExists, key.as_ref(), &items.into())
    }

    /// BF.INSERT {key} [CAPACITY c] [ERROR e] [EXPANSION n] [NONSCALING] [NOCREATE] ITEMS {item} ...
    ///
    /// The result may be shorter than `items` when the server stops at a
    /// failure (for example a full non-scaling filter).
    pub fn bf_insert(
        &self,
        key: impl AsRef<[u8]>,
        options: &BfInsertOptions,
        items: impl Into<ItemList>,
    ) -> Result<Vec<bool>> {
        let key = key.as_ref();
        let items = items.into();
        if options.conflicts() {
            warn!(
                "BF.INSERT on '{}' combines NOCREATE with creation parameters",
                String::from_utf8_lossy(key)
            );
        }
        let args = items_args(key, options.encode(), &items)?;
        let reply = self.dispatch(BloomCommand::Insert, args)?;
        let ctx = Context::new(BloomCommand::Insert, key);
        reply::decode_bool_array(&ctx, reply, POLICY, items.len())
    }

    /// BF.INFO {key}
    pub fn bf_info(&self, key: impl AsRef<[u8]>) -> Result<InfoMap> {
        let key = key.as_ref();
        let reply = self.dispatch(BloomCommand::Info, ArgList::with_key(key))?;
        reply::decode_info(&Context::new(BloomCommand::Info, key), reply)
    }

    fn bf_multi(&self, command: BloomCommand, key: &[u8], items: &ItemList) -> Result<Vec<bool>> {
        let args = key_items_args(key, items)?;
        let reply = self.dispatch(command, args)?;
        reply::decode_bool_array(&Context::new(command, key), reply, POLICY, items.len())
    }
}
