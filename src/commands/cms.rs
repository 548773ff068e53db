//! Count-Min Sketch operations
//!
//! CMS.* commands.

use crate::args::{ArgList, ItemList};
use crate::channel::Channel;
use crate::client::{Client, key_items_args};
use crate::command::{CmsCommand, Keyword};
use crate::error::{Error, Result};
use crate::reply::{self, Context, InfoMap};

impl<C: Channel> Client<C> {
    /// CMS.INITBYDIM {key} {width} {depth}
    pub fn cms_init_by_dim(&self, key: impl AsRef<[u8]>, width: u64, depth: u64) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_uint(width).push_uint(depth);
        let reply = self.dispatch(CmsCommand::InitByDim, args)?;
        reply::expect_ok(&Context::new(CmsCommand::InitByDim, key), reply)
    }

    /// CMS.INITBYPROB {key} {error} {probability}
    pub fn cms_init_by_prob(
        &self,
        key: impl AsRef<[u8]>,
        error: f64,
        probability: f64,
    ) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_float(error).push_float(probability);
        let reply = self.dispatch(CmsCommand::InitByProb, args)?;
        reply::expect_ok(&Context::new(CmsCommand::InitByProb, key), reply)
    }

    /// CMS.INCRBY {key} {item} {increment}
    ///
    /// Returns the item's count after the increment. The server answers with
    /// a one-element array; an error in that slot fails the call.
    pub fn cms_incrby(
        &self,
        key: impl AsRef<[u8]>,
        item: impl AsRef<[u8]>,
        increment: u64,
    ) -> Result<i64> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        args.push_bytes(item.as_ref()).push_uint(increment);
        let reply = self.dispatch(CmsCommand::IncrBy, args)?;
        reply::decode_leading_integer(&Context::new(CmsCommand::IncrBy, key), reply)
    }

    /// CMS.INCRBY {key} {item} {increment} [{item} {increment} ...]
    pub fn cms_incrby_multi<I>(
        &self,
        key: impl AsRef<[u8]>,
        increments: &[(I, u64)],
    ) -> Result<Vec<i64>>
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
        let reply = self.dispatch(CmsCommand::IncrBy, args)?;
        reply::decode_integer_array(&Context::new(CmsCommand::IncrBy, key), reply)
    }

    /// CMS.QUERY {key} {item} [item ...]
    ///
    /// Unlike the filters, a missing sketch is an error.
    pub fn cms_query(&self, key: impl AsRef<[u8]>, items: impl Into<ItemList>) -> Result<Vec<i64>> {
        let key = key.as_ref();
        let args = key_items_args(key, &items.into())?;
        let reply = self.dispatch(CmsCommand::Query, args)?;
        reply::decode_integer_array(&Context::new(CmsCommand::Query, key), reply)
    }

    /// CMS.MERGE {dest} {numkeys} {src} [src ...]
    pub fn cms_merge<K: AsRef<[u8]>>(&self, dest: impl AsRef<[u8]>, sources: &[K]) -> Result<()> {
        let dest = dest.as_ref();
        let args = merge_args(dest, sources.iter().map(|s| s.as_ref()), sources.len())?;
        let reply = self.dispatch(CmsCommand::Merge, args)?;
        reply::expect_ok(&Context::new(CmsCommand::Merge, dest), reply)
    }

    /// CMS.MERGE {dest} {numkeys} {src} [src ...] WEIGHTS {w} [w ...]
    ///
    /// Weights follow the source order. The destination keeps its existing
    /// counts; merged counts are added on top.
    pub fn cms_merge_weighted<K: AsRef<[u8]>>(
        &self,
        dest: impl AsRef<[u8]>,
        sources: &[(K, u64)],
    ) -> Result<()> {
        let dest = dest.as_ref();
        let mut args = merge_args(dest, sources.iter().map(|(s, _)| s.as_ref()), sources.len())?;
        args.push_keyword(Keyword::Weights);
        for (_, weight) in sources {
            args.push_uint(*weight);
        }
        let reply = self.dispatch(CmsCommand::Merge, args)?;
        reply::expect_ok(&Context::new(CmsCommand::Merge, dest), reply)
    }

    /// CMS.INFO {key}
    pub fn cms_info(&self, key: impl AsRef<[u8]>) -> Result<InfoMap> {
        let key = key.as_ref();
        let reply = self.dispatch(CmsCommand::Info, ArgList::with_key(key))?;
        reply::decode_info(&Context::new(CmsCommand::Info, key), reply)
    }
}

fn merge_args<'a>(
    dest: &[u8],
    sources: impl Iterator<Item = &'a [u8]>,
    count: usize,
) -> Result<ArgList> {
    if count == 0 {
        return Err(Error::InvalidArgument("at least one source key is required"));
    }
    let mut args = ArgList::with_capacity(count * 2 + 3);
    args.push_bytes(dest).push_uint(count as u64);
    for source in sources {
        args.push_bytes(source);
    }
    Ok(args)
}
