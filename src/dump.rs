//! Resumable CF.SCANDUMP / CF.LOADCHUNK transfer
//!
//! A cuckoo filter is dumped as an ordered sequence of chunks. Cursor 0 is
//! both the first request and the server's "no more chunks" answer, so the
//! iterator tracks whether the first call has happened separately from the
//! cursor value.

use std::iter::FusedIterator;

use bytes::Bytes;

use crate::channel::Channel;
use crate::client::Client;
use crate::command::CuckooCommand;
use crate::error::Result;
use crate::reply::Context;

/// One chunk of a filter's serialized state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpChunk {
    /// Cursor to pass to the next SCANDUMP call, and to LOADCHUNK
    pub cursor: i64,
    pub payload: Bytes,
}

impl DumpChunk {
    pub fn new(cursor: i64, payload: impl Into<Bytes>) -> Self {
        Self {
            cursor,
            payload: payload.into(),
        }
    }
}

/// Position of a scan dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    NotStarted,
    InProgress(i64),
    Done,
}

/// Lazy, single-pass sequence of the chunks of one cuckoo filter.
///
/// Created by [`Client::cf_scan_dump`]. The first reply is always yielded,
/// even when its cursor is already 0; after that a cursor of 0 ends the
/// iteration without yielding. An error is yielded once and ends it too.
pub struct ScanDump<'c, C> {
    client: &'c Client<C>,
    key: Bytes,
    state: ScanState,
    yielded: usize,
    max_chunks: Option<usize>,
}

impl<'c, C: Channel> ScanDump<'c, C> {
    pub(crate) fn new(client: &'c Client<C>, key: &[u8]) -> Self {
        Self {
            client,
            key: Bytes::copy_from_slice(key),
            state: ScanState::NotStarted,
            yielded: 0,
            max_chunks: client.config().scan_dump_max_chunks,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Number of chunks yielded so far
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<C: Channel> Iterator for ScanDump<'_, C> {
    type Item = Result<DumpChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        let (cursor, first) = match self.state {
            ScanState::NotStarted => (0, true),
            ScanState::InProgress(cursor) => (cursor, false),
            ScanState::Done => return None,
        };

        let chunk = match self.client.cf_scan_dump_at(&self.key, cursor) {
            Ok(chunk) => chunk,
            Err(e) => {
                self.state = ScanState::Done;
                return Some(Err(e));
            }
        };

        if chunk.cursor == 0 {
            self.state = ScanState::Done;
            if !first {
                return None;
            }
        } else {
            self.state = ScanState::InProgress(chunk.cursor);
        }

        // counted after the fetch; a terminal reply is never a chunk
        if let Some(max) = self.max_chunks
            && self.yielded >= max
        {
            self.state = ScanState::Done;
            let ctx = Context::new(CuckooCommand::ScanDump, &self.key);
            return Some(Err(ctx.violation(format!(
                "dump did not terminate within {} chunks",
                max
            ))));
        }

        self.yielded += 1;
        Some(Ok(chunk))
    }
}

impl<C: Channel> FusedIterator for ScanDump<'_, C> {}
