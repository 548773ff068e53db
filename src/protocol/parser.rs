use bytes::{Buf, Bytes, BytesMut};

use super::types::RespValue;
use crate::error::{Error, Result};

/// Default cap on a single bulk reply (matches proto-max-bulk-len)
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Incremental RESP2/RESP3 reply parser
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    max_bulk_len: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
        }
    }
}

impl Parser {
    pub fn new(max_bulk_len: usize) -> Self {
        Self { max_bulk_len }
    }

    /// Parse a complete RESP value from buffer.
    /// Returns None if buffer doesn't contain a complete message.
    /// Advances buffer past the parsed data.
    #[inline]
    pub fn parse(&self, buf: &mut BytesMut) -> Result<Option<RespValue>> {
        if buf.is_empty() {
            return Ok(None);
        }

        match self.parse_value(buf)? {
            Some((value, consumed)) => {
                buf.advance(consumed);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Parse value, returning (value, bytes_consumed) or None if incomplete
    fn parse_value(&self, buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        if buf.is_empty() {
            return Ok(None);
        }

        match buf[0] {
            b'+' => Self::parse_line(buf, RespValue::SimpleString),
            b'-' => Self::parse_line(buf, RespValue::Error),
            b':' => Self::parse_integer(buf),
            b'$' => self.parse_bulk_string(buf),
            b'*' => self.parse_array(buf),
            b'%' => self.parse_map(buf),
            b'_' => Self::parse_null(buf),
            b',' => Self::parse_double(buf),
            b'#' => Self::parse_boolean(buf),
            other => Err(Error::Protocol(format!(
                "unexpected reply type byte 0x{:02x}",
                other
            ))),
        }
    }

    /// Find \r\n in buffer, return position of \r
    #[inline]
    fn find_crlf(buf: &[u8]) -> Option<usize> {
        memchr::memmem::find(buf, b"\r\n")
    }

    /// Parse the decimal header that follows a type byte
    fn parse_header(buf: &[u8], what: &str) -> Result<Option<(i64, usize)>> {
        let crlf_pos = match Self::find_crlf(buf) {
            Some(pos) => pos,
            None => return Ok(None),
        };
        let n = std::str::from_utf8(&buf[1..crlf_pos])
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| Error::Protocol(format!("invalid {}", what)))?;
        Ok(Some((n, crlf_pos + 2)))
    }

    fn parse_line(
        buf: &[u8],
        wrap: fn(Bytes) -> RespValue,
    ) -> Result<Option<(RespValue, usize)>> {
        match Self::find_crlf(buf) {
            Some(pos) => {
                let s = Bytes::copy_from_slice(&buf[1..pos]);
                Ok(Some((wrap(s), pos + 2)))
            }
            None => Ok(None),
        }
    }

    fn parse_integer(buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        Ok(Self::parse_header(buf, "integer")?.map(|(n, used)| (RespValue::Integer(n), used)))
    }

    fn parse_null(buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        match Self::find_crlf(buf) {
            Some(1) => Ok(Some((RespValue::Null, 3))),
            Some(_) => Err(Error::Protocol("invalid null".into())),
            None => Ok(None),
        }
    }

    fn parse_boolean(buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        match Self::find_crlf(buf) {
            Some(pos) => match &buf[1..pos] {
                b"t" => Ok(Some((RespValue::Boolean(true), pos + 2))),
                b"f" => Ok(Some((RespValue::Boolean(false), pos + 2))),
                _ => Err(Error::Protocol("invalid boolean".into())),
            },
            None => Ok(None),
        }
    }

    fn parse_double(buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        match Self::find_crlf(buf) {
            Some(pos) => {
                let d = crate::reply::parse_float(&buf[1..pos])
                    .ok_or_else(|| Error::Protocol("invalid double".into()))?;
                Ok(Some((RespValue::Double(d), pos + 2)))
            }
            None => Ok(None),
        }
    }

    fn parse_bulk_string(&self, buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        let (len, header_len) = match Self::parse_header(buf, "bulk length")? {
            Some(h) => h,
            None => return Ok(None),
        };

        if len == -1 {
            return Ok(Some((RespValue::Null, header_len)));
        }
        if len < 0 {
            return Err(Error::Protocol("invalid bulk length".into()));
        }

        let len = len as usize;
        if len > self.max_bulk_len {
            return Err(Error::Protocol(format!(
                "bulk length {} exceeds limit {}",
                len, self.max_bulk_len
            )));
        }

        let data_end = header_len + len;
        let total_len = data_end + 2; // +2 for trailing \r\n

        if buf.len() < total_len {
            return Ok(None);
        }
        if &buf[data_end..total_len] != b"\r\n" {
            return Err(Error::Protocol("bulk string missing CRLF".into()));
        }

        let data = Bytes::copy_from_slice(&buf[header_len..data_end]);
        Ok(Some((RespValue::BulkString(data), total_len)))
    }

    fn parse_array(&self, buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        let (len, mut offset) = match Self::parse_header(buf, "array length")? {
            Some(h) => h,
            None => return Ok(None),
        };

        if len == -1 {
            return Ok(Some((RespValue::NullArray, offset)));
        }
        if len < 0 {
            return Err(Error::Protocol("invalid array length".into()));
        }

        let mut items = Vec::with_capacity((len as usize).min(1024));
        for _ in 0..len {
            match self.parse_value(&buf[offset..])? {
                Some((value, consumed)) => {
                    items.push(value);
                    offset += consumed;
                }
                None => return Ok(None),
            }
        }

        Ok(Some((RespValue::Array(items), offset)))
    }

    fn parse_map(&self, buf: &[u8]) -> Result<Option<(RespValue, usize)>> {
        let (len, mut offset) = match Self::parse_header(buf, "map length")? {
            Some(h) => h,
            None => return Ok(None),
        };
        if len < 0 {
            return Err(Error::Protocol("invalid map length".into()));
        }

        let mut pairs = Vec::with_capacity((len as usize).min(1024));
        for _ in 0..len {
            let (key, used) = match self.parse_value(&buf[offset..])? {
                Some(v) => v,
                None => return Ok(None),
            };
            offset += used;
            let (value, used) = match self.parse_value(&buf[offset..])? {
                Some(v) => v,
                None => return Ok(None),
            };
            offset += used;
            pairs.push((key, value));
        }

        Ok(Some((RespValue::Map(pairs), offset)))
    }
}
