//! Option encoders
//!
//! Each options struct is an immutable value built fluently and encoded into
//! an argument fragment in the order the server grammar mandates.

use crate::args::ArgList;
use crate::command::Keyword;

/// `BF.RESERVE key error_rate capacity [EXPANSION n] [NONSCALING]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BfReserveOptions {
    expansion: u32,
    non_scaling: bool,
}

impl BfReserveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Growth factor of sub-filters; 0 leaves the server default
    pub fn expansion(mut self, expansion: u32) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn non_scaling(mut self) -> Self {
        self.non_scaling = true;
        self
    }

    pub fn encode(&self) -> ArgList {
        let mut args = ArgList::new();
        if self.expansion > 0 {
            args.push_keyword(Keyword::Expansion)
                .push_uint(self.expansion as u64);
        }
        if self.non_scaling {
            args.push_keyword(Keyword::NonScaling);
        }
        args
    }
}

/// `BF.INSERT key [CAPACITY c] [ERROR e] [EXPANSION n] [NONSCALING] [NOCREATE] ITEMS ...`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BfInsertOptions {
    capacity: Option<u64>,
    error_rate: Option<f64>,
    expansion: u32,
    non_scaling: bool,
    no_create: bool,
}

impl BfInsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    pub fn expansion(mut self, expansion: u32) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn non_scaling(mut self) -> Self {
        self.non_scaling = true;
        self
    }

    pub fn no_create(mut self) -> Self {
        self.no_create = true;
        self
    }

    /// NOCREATE together with CAPACITY or ERROR. The server rejects this.
    pub fn conflicts(&self) -> bool {
        self.no_create && (self.capacity.is_some() || self.error_rate.is_some())
    }

    pub fn encode(&self) -> ArgList {
        let mut args = ArgList::new();
        if let Some(capacity) = self.capacity {
            args.push_keyword(Keyword::Capacity).push_uint(capacity);
        }
        if let Some(error_rate) = self.error_rate {
            args.push_keyword(Keyword::Error).push_float(error_rate);
        }
        if self.expansion > 0 {
            args.push_keyword(Keyword::Expansion)
                .push_uint(self.expansion as u64);
        }
        if self.non_scaling {
            args.push_keyword(Keyword::NonScaling);
        }
        if self.no_create {
            args.push_keyword(Keyword::NoCreate);
        }
        args
    }
}

/// `CF.RESERVE key capacity [BUCKETSIZE b] [MAXITERATIONS m] [EXPANSION n]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfReserveOptions {
    capacity: u64,
    bucket_size: Option<u64>,
    max_iterations: Option<u64>,
    expansion: Option<u64>,
}

impl CfReserveOptions {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            bucket_size: None,
            max_iterations: None,
            expansion: None,
        }
    }

    pub fn bucket_size(mut self, bucket_size: u64) -> Self {
        self.bucket_size = Some(bucket_size);
        self
    }

    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn expansion(mut self, expansion: u64) -> Self {
        self.expansion = Some(expansion);
        self
    }

    /// Capacity is positional and always emitted first
    pub fn encode(&self) -> ArgList {
        let mut args = ArgList::with_capacity(7);
        args.push_uint(self.capacity);
        if let Some(bucket_size) = self.bucket_size {
            args.push_keyword(Keyword::BucketSize).push_uint(bucket_size);
        }
        if let Some(max_iterations) = self.max_iterations {
            args.push_keyword(Keyword::MaxIterations)
                .push_uint(max_iterations);
        }
        if let Some(expansion) = self.expansion {
            args.push_keyword(Keyword::Expansion).push_uint(expansion);
        }
        args
    }
}

/// `CF.INSERT[NX] key [CAPACITY c] [NOCREATE] ITEMS ...`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CfInsertOptions {
    capacity: Option<u64>,
    no_create: bool,
}

impl CfInsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn no_create(mut self) -> Self {
        self.no_create = true;
        self
    }

    pub fn conflicts(&self) -> bool {
        self.no_create && self.capacity.is_some()
    }

    pub fn encode(&self) -> ArgList {
        let mut args = ArgList::new();
        if let Some(capacity) = self.capacity {
            args.push_keyword(Keyword::Capacity).push_uint(capacity);
        }
        if self.no_create {
            args.push_keyword(Keyword::NoCreate);
        }
        args
    }
}

/// `TOPK.RESERVE key topk [width depth decay]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopKReserveOptions {
    topk: u64,
    dimensions: Option<(u64, u64, f64)>,
}

impl TopKReserveOptions {
    pub fn new(topk: u64) -> Self {
        Self {
            topk,
            dimensions: None,
        }
    }

    /// The server accepts width, depth and decay only as a group
    pub fn dimensions(mut self, width: u64, depth: u64, decay: f64) -> Self {
        self.dimensions = Some((width, depth, decay));
        self
    }

    pub fn encode(&self) -> ArgList {
        let mut args = ArgList::with_capacity(4);
        args.push_uint(self.topk);
        if let Some((width, depth, decay)) = self.dimensions {
            args.push_uint(width).push_uint(depth).push_float(decay);
        }
        args
    }
}
