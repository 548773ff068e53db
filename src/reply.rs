//! Reply decoding
//!
//! Turns a raw [`RespValue`] into the typed result an operation promises.
//! Four reply shapes are handled: status, integer, integer array and
//! heterogeneous object array (INFO maps and SCANDUMP chunks).

use bytes::Bytes;

use crate::command::Command;
use crate::dump::DumpChunk;
use crate::error::{Error, Result};
use crate::protocol::RespValue;

/// Parse a float token as sent by the server.
///
/// Accepts the canonical decimal form plus `inf`, `+inf`, `-inf` and `nan`
/// in any case.
pub fn parse_float(raw: &[u8]) -> Option<f64> {
    let s = std::str::from_utf8(raw).ok()?.trim();
    match s.to_ascii_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        "nan" | "+nan" | "-nan" => Some(f64::NAN),
        _ => s.parse().ok(),
    }
}

/// Which call a reply belongs to, for error reporting
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub command: Command,
    pub key: &'a [u8],
}

impl<'a> Context<'a> {
    pub fn new(command: impl Into<Command>, key: &'a [u8]) -> Self {
        Self {
            command: command.into(),
            key,
        }
    }

    fn key_lossy(&self) -> String {
        String::from_utf8_lossy(self.key).into_owned()
    }

    pub fn rejected(&self, message: &[u8]) -> Error {
        Error::Rejected {
            command: self.command.name(),
            key: self.key_lossy(),
            message: String::from_utf8_lossy(message).into_owned(),
        }
    }

    pub fn server_data(&self, message: &[u8]) -> Error {
        Error::ServerData {
            command: self.command.name(),
            key: self.key_lossy(),
            message: String::from_utf8_lossy(message).into_owned(),
        }
    }

    pub fn violation(&self, detail: impl Into<String>) -> Error {
        Error::ProtocolViolation {
            command: self.command.name(),
            key: self.key_lossy(),
            detail: detail.into(),
        }
    }

    fn unexpected(&self, expected: &str, got: &RespValue) -> Error {
        self.violation(format!("expected {}, got {}", expected, got.kind()))
    }
}

/// How an integer reply collapses to a boolean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolPolicy {
    /// `n != 0` (Bloom, Top-K)
    NonZero,
    /// `n > 0`; negative error markers are false (Cuckoo)
    Positive,
}

impl BoolPolicy {
    #[inline]
    pub fn truth(self, n: i64) -> bool {
        match self {
            BoolPolicy::NonZero => n != 0,
            BoolPolicy::Positive => n > 0,
        }
    }
}

/// A single value from an INFO-style reply
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Nested(Vec<InfoValue>),
    Null,
}

impl InfoValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            InfoValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            InfoValue::Integer(n) => Some(*n as f64),
            InfoValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Field/value pairs of an INFO reply, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoMap {
    fields: Vec<(String, InfoValue)>,
}

impl InfoMap {
    /// First value stored under `name`
    pub fn get(&self, name: &str) -> Option<&InfoValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(InfoValue::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(InfoValue::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(InfoValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_vec(self) -> Vec<(String, InfoValue)> {
        self.fields
    }
}

/// Surface a top-level error reply as a rejection
#[inline]
fn reject_error(ctx: &Context<'_>, reply: RespValue) -> Result<RespValue> {
    match reply {
        RespValue::Error(msg) => Err(ctx.rejected(&msg)),
        other => Ok(other),
    }
}

/// Status reply: only `OK` succeeds
pub fn expect_ok(ctx: &Context<'_>, reply: RespValue) -> Result<()> {
    match reject_error(ctx, reply)? {
        RespValue::SimpleString(s) | RespValue::BulkString(s) => {
            if s.as_ref() == b"OK" {
                Ok(())
            } else {
                Err(ctx.rejected(&s))
            }
        }
        other => Err(ctx.unexpected("status reply", &other)),
    }
}

/// Integer reply
pub fn decode_integer(ctx: &Context<'_>, reply: RespValue) -> Result<i64> {
    match reject_error(ctx, reply)? {
        RespValue::Integer(n) => Ok(n),
        RespValue::Boolean(b) => Ok(b as i64),
        other => Err(ctx.unexpected("integer", &other)),
    }
}

/// Integer reply collapsed under `policy`
pub fn decode_bool(ctx: &Context<'_>, reply: RespValue, policy: BoolPolicy) -> Result<bool> {
    decode_integer(ctx, reply).map(|n| policy.truth(n))
}

/// Scalar carried as the first element of an array reply.
///
/// An error in that position is the failure of the whole call.
pub fn decode_leading_integer(ctx: &Context<'_>, reply: RespValue) -> Result<i64> {
    match reject_error(ctx, reply)? {
        RespValue::Array(items) => match items.into_iter().next() {
            Some(RespValue::Error(msg)) => Err(ctx.server_data(&msg)),
            Some(RespValue::Integer(n)) => Ok(n),
            Some(other) => Err(ctx.unexpected("integer element", &other)),
            None => Err(ctx.violation("empty array where one integer was expected")),
        },
        RespValue::Integer(n) => Ok(n),
        other => Err(ctx.unexpected("array", &other)),
    }
}

/// Elements of a multi-value reply with embedded error markers dropped
fn array_items(ctx: &Context<'_>, reply: RespValue) -> Result<Vec<RespValue>> {
    match reject_error(ctx, reply)? {
        RespValue::Array(items) => Ok(items.into_iter().filter(|v| !v.is_error()).collect()),
        other => Err(ctx.unexpected("array", &other)),
    }
}

/// Integer array → one boolean per successfully processed item.
///
/// The result is shorter than `requested` when the server appended a failure
/// marker; it is never longer.
pub fn decode_bool_array(
    ctx: &Context<'_>,
    reply: RespValue,
    policy: BoolPolicy,
    requested: usize,
) -> Result<Vec<bool>> {
    let items = array_items(ctx, reply)?;
    if items.len() > requested {
        return Err(ctx.violation(format!(
            "{} results for {} items",
            items.len(),
            requested
        )));
    }
    items
        .into_iter()
        .map(|item| match item {
            RespValue::Integer(n) => Ok(policy.truth(n)),
            RespValue::Boolean(b) => Ok(b),
            other => Err(ctx.unexpected("integer element", &other)),
        })
        .collect()
}

pub fn decode_integer_array(ctx: &Context<'_>, reply: RespValue) -> Result<Vec<i64>> {
    array_items(ctx, reply)?
        .into_iter()
        .map(|item| match item {
            RespValue::Integer(n) => Ok(n),
            other => Err(ctx.unexpected("integer element", &other)),
        })
        .collect()
}

fn float_value(ctx: &Context<'_>, value: RespValue) -> Result<f64> {
    match value {
        RespValue::Double(d) => Ok(d),
        RespValue::Integer(n) => Ok(n as f64),
        // the server answers NaN results with a null in some versions
        RespValue::Null => Ok(f64::NAN),
        RespValue::BulkString(raw) | RespValue::SimpleString(raw) => parse_float(&raw)
            .ok_or_else(|| {
                ctx.violation(format!(
                    "malformed float token '{}'",
                    String::from_utf8_lossy(&raw)
                ))
            }),
        other => Err(ctx.unexpected("float", &other)),
    }
}

pub fn decode_float(ctx: &Context<'_>, reply: RespValue) -> Result<f64> {
    let value = reject_error(ctx, reply)?;
    float_value(ctx, value)
}

pub fn decode_float_array(ctx: &Context<'_>, reply: RespValue) -> Result<Vec<f64>> {
    array_items(ctx, reply)?
        .into_iter()
        .map(|item| float_value(ctx, item))
        .collect()
}

/// Bulk array where nulls mean "nothing here" (TOPK.ADD / TOPK.INCRBY)
pub fn decode_optional_bulk_array(
    ctx: &Context<'_>,
    reply: RespValue,
) -> Result<Vec<Option<Bytes>>> {
    array_items(ctx, reply)?
        .into_iter()
        .map(|item| match item {
            RespValue::Null => Ok(None),
            RespValue::BulkString(b) | RespValue::SimpleString(b) => Ok(Some(b)),
            other => Err(ctx.unexpected("bulk string element", &other)),
        })
        .collect()
}

pub fn decode_bulk_array(ctx: &Context<'_>, reply: RespValue) -> Result<Vec<Bytes>> {
    array_items(ctx, reply)?
        .into_iter()
        .map(|item| match item {
            RespValue::BulkString(b) | RespValue::SimpleString(b) => Ok(b),
            other => Err(ctx.unexpected("bulk string element", &other)),
        })
        .collect()
}

fn info_value(ctx: &Context<'_>, value: RespValue) -> Result<InfoValue> {
    Ok(match value {
        RespValue::Integer(n) => InfoValue::Integer(n),
        RespValue::Boolean(b) => InfoValue::Integer(b as i64),
        RespValue::Double(d) => InfoValue::Float(d),
        RespValue::BulkString(raw) | RespValue::SimpleString(raw) => {
            let integer = std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse::<i64>().ok());
            match (integer, parse_float(&raw)) {
                (Some(n), _) => InfoValue::Integer(n),
                (None, Some(f)) => InfoValue::Float(f),
                (None, None) => InfoValue::Text(String::from_utf8_lossy(&raw).into_owned()),
            }
        }
        RespValue::Null | RespValue::NullArray => InfoValue::Null,
        RespValue::Array(items) => InfoValue::Nested(
            items
                .into_iter()
                .map(|item| info_value(ctx, item))
                .collect::<Result<_>>()?,
        ),
        RespValue::Map(pairs) => InfoValue::Nested(
            pairs
                .into_iter()
                .flat_map(|(k, v)| [k, v])
                .map(|item| info_value(ctx, item))
                .collect::<Result<_>>()?,
        ),
        RespValue::Error(msg) => return Err(ctx.server_data(&msg)),
    })
}

fn info_name(ctx: &Context<'_>, name: RespValue) -> Result<String> {
    match name {
        RespValue::BulkString(raw) | RespValue::SimpleString(raw) => {
            Ok(String::from_utf8_lossy(&raw).into_owned())
        }
        other => Err(ctx.unexpected("field name", &other)),
    }
}

/// INFO reply: `[name, value, name, value, ...]` or a RESP3 map
pub fn decode_info(ctx: &Context<'_>, reply: RespValue) -> Result<InfoMap> {
    let pairs: Vec<(RespValue, RespValue)> = match reject_error(ctx, reply)? {
        RespValue::Map(pairs) => pairs,
        RespValue::Array(items) => {
            if items.len() % 2 != 0 {
                return Err(ctx.violation(format!(
                    "odd number of elements ({}) in info reply",
                    items.len()
                )));
            }
            let mut iter = items.into_iter();
            let mut pairs = Vec::with_capacity(iter.len() / 2);
            while let (Some(name), Some(value)) = (iter.next(), iter.next()) {
                pairs.push((name, value));
            }
            pairs
        }
        other => return Err(ctx.unexpected("array", &other)),
    };

    let mut fields = Vec::with_capacity(pairs.len());
    for (name, value) in pairs {
        fields.push((info_name(ctx, name)?, info_value(ctx, value)?));
    }
    Ok(InfoMap { fields })
}

/// SCANDUMP reply: `[cursor, payload]`, decoded positionally
pub fn decode_dump_chunk(ctx: &Context<'_>, reply: RespValue) -> Result<DumpChunk> {
    let items = match reject_error(ctx, reply)? {
        RespValue::Array(items) => items,
        other => return Err(ctx.unexpected("array", &other)),
    };
    let [cursor, payload] = <[RespValue; 2]>::try_from(items).map_err(|items| {
        ctx.violation(format!(
            "expected 2 elements in dump reply, got {}",
            items.len()
        ))
    })?;

    let cursor = match cursor {
        RespValue::Error(msg) => return Err(ctx.server_data(&msg)),
        value => value
            .as_int()
            .ok_or_else(|| ctx.unexpected("integer cursor", &value))?,
    };
    let payload = match payload {
        RespValue::BulkString(b) | RespValue::SimpleString(b) => b,
        RespValue::Null => Bytes::new(),
        other => return Err(ctx.unexpected("bulk payload", &other)),
    };

    Ok(DumpChunk { cursor, payload })
}
