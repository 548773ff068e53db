//! Typed client for probabilistic data-structure commands
//!
//! Encodes Bloom, Cuckoo, Count-Min Sketch, Top-K and T-Digest operations
//! into RESP commands, sends them over a caller-supplied [`Channel`] and
//! decodes the replies into typed results.

pub mod args;
pub mod channel;
pub mod client;
pub mod command;
pub mod commands;
pub mod config;
pub mod dump;
pub mod error;
pub mod options;
pub mod protocol;
pub mod reply;


pub use args::{ArgList, ItemList};
pub use channel::{Channel, StreamChannel};
pub use client::Client;
pub use command::{Command, Family, Keyword};
pub use config::{ClientConfig, ProtocolVersion};
pub use dump::{DumpChunk, ScanDump, ScanState};
pub use error::{Error, Result};
pub use options::{
    BfInsertOptions, BfReserveOptions, CfInsertOptions, CfReserveOptions, TopKReserveOptions,
};
pub use reply::{BoolPolicy, InfoMap, InfoValue};
