//! Request dispatcher
//!
//! [`Client`] binds argument encoding, one channel round trip and reply
//! decoding for each call. The per-family operations live in
//! `crate::commands`.

use log::{debug, trace};
use parking_lot::{Mutex, MutexGuard};

use crate::args::{ArgList, ItemList};
use crate::channel::Channel;
use crate::command::{Command, KeyspaceCommand, Keyword};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::protocol::RespValue;
use crate::reply::{self, BoolPolicy, Context};

/// Typed client for the probabilistic data-structure commands
pub struct Client<C> {
    channel: Mutex<C>,
    config: ClientConfig,
}

impl<C: Channel> Client<C> {
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, ClientConfig::default())
    }

    pub fn with_config(channel: C, config: ClientConfig) -> Self {
        trace!(
            "client created (resp{}, max bulk {} bytes)",
            config.protocol.as_u8(),
            config.proto_max_bulk_len
        );
        Self {
            channel: Mutex::new(channel),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Exclusive access to the underlying channel
    pub fn lock_channel(&self) -> MutexGuard<'_, C> {
        self.channel.lock()
    }

    pub fn into_inner(self) -> C {
        self.channel.into_inner()
    }

    /// Send one command and return its raw reply.
    ///
    /// The channel is held only for the round trip; the guard is released on
    /// every path before the caller decodes.
    pub fn dispatch(&self, command: impl Into<Command>, args: ArgList) -> Result<RespValue> {
        let command = command.into();
        trace!("{} ({} args)", command, args.len());

        let reply = {
            let mut channel = self.channel.lock();
            channel.request(command.name(), args.as_slice())?
        };

        if let RespValue::Error(msg) = &reply {
            debug!("{} rejected: {}", command, String::from_utf8_lossy(msg));
        }
        Ok(reply)
    }

    /// DEL {key}: remove a structure of any type. Returns whether it existed.
    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        let reply = self.dispatch(KeyspaceCommand::Del, ArgList::with_key(key))?;
        let ctx = Context::new(KeyspaceCommand::Del, key);
        reply::decode_bool(&ctx, reply, BoolPolicy::NonZero)
    }
}

/// `key [options...] ITEMS item...`
pub(crate) fn items_args(key: &[u8], options: ArgList, items: &ItemList) -> Result<ArgList> {
    require_items(items)?;
    let mut args = ArgList::with_capacity(options.len() + items.len() + 2);
    args.push_bytes(key)
        .extend(options)
        .push_keyword(Keyword::Items)
        .push_items(items);
    Ok(args)
}

/// `key item...`
pub(crate) fn key_items_args(key: &[u8], items: &ItemList) -> Result<ArgList> {
    require_items(items)?;
    let mut args = ArgList::with_capacity(items.len() + 1);
    args.push_bytes(key).push_items(items);
    Ok(args)
}

pub(crate) fn require_items(items: &ItemList) -> Result<()> {
    if items.is_empty() {
        return Err(Error::InvalidArgument("at least one item is required"));
    }
    Ok(())
}
