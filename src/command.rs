//! Wire vocabulary
//!
//! Every logical operation maps 1:1 to a fixed, case-sensitive command
//! token. Keyword tokens are always sent uppercase.

use bytes::Bytes;

/// Probabilistic data-structure family a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Bloom,
    Cuckoo,
    Cms,
    TopK,
    TDigest,
    /// Generic commands that act on a key of any type
    Keyspace,
}

macro_rules! wire_commands {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[inline]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }
    };
}

wire_commands!(
    /// BF.* commands
    BloomCommand {
        Reserve => "BF.RESERVE",
        Add => "BF.ADD",
        MAdd => "BF.MADD",
        Exists => "BF.EXISTS",
        MExists => "BF.MEXISTS",
        Insert => "BF.INSERT",
        Info => "BF.INFO",
    }
);

wire_commands!(
    /// CF.* commands
    CuckooCommand {
        Reserve => "CF.RESERVE",
        Add => "CF.ADD",
        AddNx => "CF.ADDNX",
        Insert => "CF.INSERT",
        InsertNx => "CF.INSERTNX",
        Exists => "CF.EXISTS",
        Del => "CF.DEL",
        Count => "CF.COUNT",
        ScanDump => "CF.SCANDUMP",
        LoadChunk => "CF.LOADCHUNK",
        Info => "CF.INFO",
    }
);

wire_commands!(
    /// CMS.* commands
    CmsCommand {
        InitByDim => "CMS.INITBYDIM",
        InitByProb => "CMS.INITBYPROB",
        IncrBy => "CMS.INCRBY",
        Query => "CMS.QUERY",
        Merge => "CMS.MERGE",
        Info => "CMS.INFO",
    }
);

wire_commands!(
    /// TOPK.* commands
    TopKCommand {
        Reserve => "TOPK.RESERVE",
        Add => "TOPK.ADD",
        IncrBy => "TOPK.INCRBY",
        Query => "TOPK.QUERY",
        Count => "TOPK.COUNT",
        List => "TOPK.LIST",
        Info => "TOPK.INFO",
    }
);

wire_commands!(
    /// TDIGEST.* commands
    TDigestCommand {
        Create => "TDIGEST.CREATE",
        Reset => "TDIGEST.RESET",
        Add => "TDIGEST.ADD",
        Merge => "TDIGEST.MERGE",
        Info => "TDIGEST.INFO",
        Cdf => "TDIGEST.CDF",
        Quantile => "TDIGEST.QUANTILE",
        Min => "TDIGEST.MIN",
        Max => "TDIGEST.MAX",
    }
);

wire_commands!(
    /// Type-independent key commands
    KeyspaceCommand {
        Del => "DEL",
    }
);

/// A logical operation within one family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Bloom(BloomCommand),
    Cuckoo(CuckooCommand),
    Cms(CmsCommand),
    TopK(TopKCommand),
    TDigest(TDigestCommand),
    Keyspace(KeyspaceCommand),
}

impl Command {
    /// Wire token sent as the first element of the request
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Command::Bloom(c) => c.as_str(),
            Command::Cuckoo(c) => c.as_str(),
            Command::Cms(c) => c.as_str(),
            Command::TopK(c) => c.as_str(),
            Command::TDigest(c) => c.as_str(),
            Command::Keyspace(c) => c.as_str(),
        }
    }

    #[inline]
    pub const fn family(self) -> Family {
        match self {
            Command::Bloom(_) => Family::Bloom,
            Command::Cuckoo(_) => Family::Cuckoo,
            Command::Cms(_) => Family::Cms,
            Command::TopK(_) => Family::TopK,
            Command::TDigest(_) => Family::TDigest,
            Command::Keyspace(_) => Family::Keyspace,
        }
    }
}

impl From<BloomCommand> for Command {
    fn from(c: BloomCommand) -> Self {
        Command::Bloom(c)
    }
}

impl From<CuckooCommand> for Command {
    fn from(c: CuckooCommand) -> Self {
        Command::Cuckoo(c)
    }
}

impl From<CmsCommand> for Command {
    fn from(c: CmsCommand) -> Self {
        Command::Cms(c)
    }
}

impl From<TopKCommand> for Command {
    fn from(c: TopKCommand) -> Self {
        Command::TopK(c)
    }
}

impl From<TDigestCommand> for Command {
    fn from(c: TDigestCommand) -> Self {
        Command::TDigest(c)
    }
}

impl From<KeyspaceCommand> for Command {
    fn from(c: KeyspaceCommand) -> Self {
        Command::Keyspace(c)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Option keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Capacity,
    Error,
    NoCreate,
    Items,
    Expansion,
    NonScaling,
    BucketSize,
    MaxIterations,
    Weights,
    Compression,
}

impl Keyword {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Capacity => "CAPACITY",
            Keyword::Error => "ERROR",
            Keyword::NoCreate => "NOCREATE",
            Keyword::Items => "ITEMS",
            Keyword::Expansion => "EXPANSION",
            Keyword::NonScaling => "NONSCALING",
            Keyword::BucketSize => "BUCKETSIZE",
            Keyword::MaxIterations => "MAXITERATIONS",
            Keyword::Weights => "WEIGHTS",
            Keyword::Compression => "COMPRESSION",
        }
    }

    #[inline]
    pub fn to_bytes(self) -> Bytes {
        Bytes::from_static(self.as_str().as_bytes())
    }
}
