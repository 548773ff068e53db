//! Argument encoding
//!
//! Builds the ordered, binary-safe argument list that follows the command
//! token. Position is significant: the server parses these left to right.

use bytes::Bytes;

use crate::command::Keyword;

/// Canonical text form of a float argument.
///
/// Finite values use the shortest representation that round-trips;
/// infinities become `+inf`/`-inf` and NaN becomes `nan`, which is what
/// the reply decoder accepts back.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "+inf" } else { "-inf" }.to_string()
    } else {
        value.to_string()
    }
}

/// Items passed to a multi-item command, decided once at the API boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemList {
    Text(Vec<String>),
    Binary(Vec<Bytes>),
}

impl ItemList {
    pub fn text<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ItemList::Text(items.into_iter().map(Into::into).collect())
    }

    pub fn binary<I, B>(items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        ItemList::Binary(
            items
                .into_iter()
                .map(|b| Bytes::copy_from_slice(b.as_ref()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            ItemList::Text(items) => items.len(),
            ItemList::Binary(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wire form of every item, in order
    pub fn to_bytes(&self) -> Vec<Bytes> {
        match self {
            ItemList::Text(items) => items
                .iter()
                .map(|s| Bytes::copy_from_slice(s.as_bytes()))
                .collect(),
            ItemList::Binary(items) => items.clone(),
        }
    }
}

impl From<Vec<String>> for ItemList {
    fn from(items: Vec<String>) -> Self {
        ItemList::Text(items)
    }
}

impl From<Vec<&str>> for ItemList {
    fn from(items: Vec<&str>) -> Self {
        ItemList::text(items)
    }
}

impl From<&[&str]> for ItemList {
    fn from(items: &[&str]) -> Self {
        ItemList::text(items.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for ItemList {
    fn from(items: [&str; N]) -> Self {
        ItemList::text(items)
    }
}

impl From<Vec<Bytes>> for ItemList {
    fn from(items: Vec<Bytes>) -> Self {
        ItemList::Binary(items)
    }
}

impl From<Vec<Vec<u8>>> for ItemList {
    fn from(items: Vec<Vec<u8>>) -> Self {
        ItemList::Binary(items.into_iter().map(Bytes::from).collect())
    }
}

impl From<&[&[u8]]> for ItemList {
    fn from(items: &[&[u8]]) -> Self {
        ItemList::binary(items.iter().copied())
    }
}

impl<const N: usize> From<[&[u8]; N]> for ItemList {
    fn from(items: [&[u8]; N]) -> Self {
        ItemList::binary(items)
    }
}

/// Ordered argument list for one command invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgList {
    args: Vec<Bytes>,
}

impl ArgList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            args: Vec::with_capacity(capacity),
        }
    }

    /// Start a list with the key as first argument
    pub fn with_key(key: &[u8]) -> Self {
        let mut args = Self::with_capacity(4);
        args.push_bytes(key);
        args
    }

    /// Raw bytes, copied verbatim
    #[inline]
    pub fn push_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.args.push(Bytes::copy_from_slice(data));
        self
    }

    #[inline]
    pub fn push_int(&mut self, value: i64) -> &mut Self {
        self.args
            .push(Bytes::copy_from_slice(itoa::Buffer::new().format(value).as_bytes()));
        self
    }

    #[inline]
    pub fn push_uint(&mut self, value: u64) -> &mut Self {
        self.args
            .push(Bytes::copy_from_slice(itoa::Buffer::new().format(value).as_bytes()));
        self
    }

    #[inline]
    pub fn push_float(&mut self, value: f64) -> &mut Self {
        self.args.push(Bytes::from(format_float(value)));
        self
    }

    #[inline]
    pub fn push_keyword(&mut self, keyword: Keyword) -> &mut Self {
        self.args.push(keyword.to_bytes());
        self
    }

    pub fn push_items(&mut self, items: &ItemList) -> &mut Self {
        self.args.extend(items.to_bytes());
        self
    }

    pub fn extend(&mut self, other: ArgList) -> &mut Self {
        self.args.extend(other.args);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn as_slice(&self) -> &[Bytes] {
        &self.args
    }

    pub fn into_vec(self) -> Vec<Bytes> {
        self.args
    }
}
