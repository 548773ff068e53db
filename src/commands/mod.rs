//! Probabilistic data-structure commands
//!
//! Each module adds one family's operations to [`Client`](crate::Client).

pub mod bloom;
pub mod cms;
pub mod cuckoo;
pub mod tdigest;
pub mod topk;
