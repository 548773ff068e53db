//! RESP protocol types and the client-side reply parser

mod parser;
mod types;

pub use parser::{DEFAULT_MAX_BULK_LEN, Parser};
pub use types::{RespValue, write_command};
