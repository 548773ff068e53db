//! Top-K operations
//!
//! TOPK.* commands. Items expelled from the top list come back as bulk
//! strings; a null means nothing was expelled.

use bytes::Bytes;

use crate::args::{ArgList, ItemList};
use crate::channel::Channel;
use crate::client::{Client, key_items_args};
use crate::command::TopKCommand;
use crate::error::{Error, Result};
use crate::options::TopKReserveOptions;
use crate::protocol::RespValue;
use crate::reply::{self, BoolPolicy, Context, InfoMap};

impl<C: Channel> Client<C> {
    /// TOPK.RESERVE {key} {topk} [width depth decay]
    pub fn topk_reserve(&self, key: impl AsRef<[u8]>, options: &TopKReserveOptions) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.extend(options.encode());
        let reply = self.dispatch(TopKCommand::Reserve, args)?;
        reply::expect_ok(&Context::new(TopKCommand::Reserve, key), reply)
    }

    /// TOPK.ADD {key} {item} [item ...]
    ///
    /// One slot per item: the item expelled from the list, if any.
    pub fn topk_add(
        &self,
        key: impl AsRef<[u8]>,
        items: impl Into<ItemList>,
    ) -> Result<Vec<Option<Bytes>>> {
        let key = key.as_ref();
        let args = key_items_args(key, &items.into())?;
        let reply = self.dispatch(TopKCommand::Add, args)?;
        reply::decode_optional_bulk_array(&Context::new(TopKCommand::Add, key), reply)
    }

    /// TOPK.INCRBY {key} {item} {increment}
    pub fn topk_incrby(
        &self,
        key: impl AsRef<[u8]>,
        item: impl AsRef<[u8]>,
        increment: u64,
    ) -> Result<Option<Bytes>> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_bytes(item.as_ref()).push_uint(increment);
        let reply = self.dispatch(TopKCommand::IncrBy, args)?;

        let ctx = Context::new(TopKCommand::IncrBy, key);
        if let RespValue::Array(items) = &reply
            && let Some(RespValue::Error(msg)) = items.first()
        {
            return Err(ctx.server_data(msg));
        }
        reply::decode_optional_bulk_array(&ctx, reply)?
            .into_iter()
            .next()
            .ok_or_else(|| ctx.violation("empty array where one element was expected"))
    }

    /// TOPK.INCRBY {key} {item} {increment} [{item} {increment} ...]
    pub fn topk_incrby_multi<I>(
        &self,
        key: impl AsRef<[u8]>,
        increments: &[(I, u64)],
    ) -> Result<Vec<Option<Bytes>>>
    where
        I: AsRef<[u8]>,
    {
        if increments.is_empty() {
            return Err(Error::InvalidArgument("at least one item is required"));
        }
        let key = key.as_ref();
        let mut args = ArgList::with_capacity(increments.len() * 2 + 1);
        args.push_bytes(key);
        for (item, increment) in increments {
            args.push_bytes(item.as_ref()).push_uint(*increment);
        }
        let reply = self.dispatch(TopKCommand::IncrBy, args)?;
        reply::decode_optional_bulk_array(&Context::new(TopKCommand::IncrBy, key), reply)
    }

    /// TOPK.QUERY {key} {item} [item ...]
    pub fn topk_query(
        &self,
        key: impl AsRef<[u8]>,
        items: impl Into<ItemList>,
    ) -> Result<Vec<bool>> {
        let key = key.as_ref();
        let items = items.into();
        let args = key_items_args(key, &items)?;
        let reply = self.dispatch(TopKCommand::Query, args)?;
        reply::decode_bool_array(
            &Context::new(TopKCommand::Query, key),
            reply,
            BoolPolicy::NonZero,
            items.len(),
        )
    }

    /// TOPK.COUNT {key} {item} [item ...]
    pub fn topk_count(
        &self,
        key: impl AsRef<[u8]>,
        items: impl Into<ItemList>,
    ) -> Result<Vec<i64>> {
        let key = key.as_ref();
        let args = key_items_args(key, &items.into())?;
        let reply = self.dispatch(TopKCommand::Count, args)?;
        reply::decode_integer_array(&Context::new(TopKCommand::Count, key), reply)
    }

    /// TOPK.LIST {key}
    pub fn topk_list(&self, key: impl AsRef<[u8]>) -> Result<Vec<Bytes>> {
        let key = key.as_ref();
        let reply = self.dispatch(TopKCommand::List, ArgList::with_key(key))?;
        reply::decode_bulk_array(&Context::new(TopKCommand::List, key), reply)
    }

    /// TOPK.INFO {key}
    pub fn topk_info(&self, key: impl AsRef<[u8]>) -> Result<InfoMap> {
        let key = key.as_ref();
        let reply = self.dispatch(TopKCommand::Info, ArgList::with_key(key))?;
        reply::decode_info(&Context::new(TopKCommand::Info, key), reply)
    }
}
