use bytes::Bytes;

/// RESP2/RESP3 reply types as seen by the client
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    /// Simple string: +OK\r\n
    SimpleString(Bytes),
    /// Error: -ERR message\r\n
    Error(Bytes),
    /// Integer: :1000\r\n
    Integer(i64),
    /// Bulk string: $5\r\nhello\r\n
    BulkString(Bytes),
    /// Null bulk string: $-1\r\n (RESP2) or _\r\n (RESP3)
    Null,
    /// Null array: *-1\r\n (RESP2)
    NullArray,
    /// Array: *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n
    Array(Vec<RespValue>),
    /// RESP3 Map: %2\r\n...
    Map(Vec<(RespValue, RespValue)>),
    /// RESP3 Boolean: #t\r\n or #f\r\n
    Boolean(bool),
    /// RESP3 Double: ,3.14159\r\n
    Double(f64),
}

impl RespValue {
    pub const OK: RespValue = RespValue::SimpleString(Bytes::from_static(b"OK"));

    #[inline]
    pub fn ok() -> Self {
        Self::OK
    }

    #[inline]
    pub fn error(msg: &str) -> Self {
        Self::Error(Bytes::copy_from_slice(msg.as_bytes()))
    }

    #[inline]
    pub fn integer(n: i64) -> Self {
        Self::Integer(n)
    }

    #[inline]
    pub fn bulk(data: Bytes) -> Self {
        Self::BulkString(data)
    }

    #[inline]
    pub fn bulk_string(s: &str) -> Self {
        Self::BulkString(Bytes::copy_from_slice(s.as_bytes()))
    }

    #[inline]
    pub fn array(items: Vec<RespValue>) -> Self {
        Self::Array(items)
    }

    /// Short type name used in protocol violation messages
    pub fn kind(&self) -> &'static str {
        match self {
            RespValue::SimpleString(_) => "simple string",
            RespValue::Error(_) => "error",
            RespValue::Integer(_) => "integer",
            RespValue::BulkString(_) => "bulk string",
            RespValue::Null => "null",
            RespValue::NullArray => "null array",
            RespValue::Array(_) => "array",
            RespValue::Map(_) => "map",
            RespValue::Boolean(_) => "boolean",
            RespValue::Double(_) => "double",
        }
    }

    /// Try to interpret as integer
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RespValue::Integer(n) => Some(*n),
            RespValue::Boolean(b) => Some(*b as i64),
            RespValue::BulkString(b) | RespValue::SimpleString(b) => {
                std::str::from_utf8(b).ok()?.parse().ok()
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, RespValue::Error(_))
    }
}

/// Reply encoding for the in-crate fake server and the parser tests
#[cfg(test)]
impl RespValue {
    /// Serialize to RESP wire format (RESP2)
    pub(crate) fn serialize(&self) -> Bytes {
        let mut buf = Vec::with_capacity(64);
        self.write_to_protocol(&mut buf, 2);
        Bytes::from(buf)
    }

    /// Write to buffer with specified protocol version
    pub(crate) fn write_to_protocol(&self, buf: &mut Vec<u8>, protocol: u8) {
        match self {
            RespValue::SimpleString(s) => {
                buf.push(b'+');
                buf.extend_from_slice(s);
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::Error(e) => {
                buf.push(b'-');
                buf.extend_from_slice(e);
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::Integer(n) => {
                buf.push(b':');
                buf.extend_from_slice(itoa::Buffer::new().format(*n).as_bytes());
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::BulkString(s) => write_bulk(buf, s),
            RespValue::Null => {
                if protocol >= 3 {
                    buf.extend_from_slice(b"_\r\n");
                } else {
                    buf.extend_from_slice(b"$-1\r\n");
                }
            }
            RespValue::NullArray => {
                if protocol >= 3 {
                    buf.extend_from_slice(b"_\r\n");
                } else {
                    buf.extend_from_slice(b"*-1\r\n");
                }
            }
            RespValue::Array(items) => {
                buf.push(b'*');
                buf.extend_from_slice(itoa::Buffer::new().format(items.len()).as_bytes());
                buf.extend_from_slice(b"\r\n");
                for item in items {
                    item.write_to_protocol(buf, protocol);
                }
            }
            RespValue::Map(pairs) => {
                // RESP2 has no map type: flatten to [k1, v1, k2, v2, ...]
                buf.push(if protocol >= 3 { b'%' } else { b'*' });
                let len = if protocol >= 3 { pairs.len() } else { pairs.len() * 2 };
                buf.extend_from_slice(itoa::Buffer::new().format(len).as_bytes());
                buf.extend_from_slice(b"\r\n");
                for (key, value) in pairs {
                    key.write_to_protocol(buf, protocol);
                    value.write_to_protocol(buf, protocol);
                }
            }
            RespValue::Boolean(b) => {
                if protocol >= 3 {
                    buf.extend_from_slice(if *b { b"#t\r\n" } else { b"#f\r\n" });
                } else {
                    buf.extend_from_slice(if *b { b":1\r\n" } else { b":0\r\n" });
                }
            }
            RespValue::Double(d) => {
                let s = crate::args::format_float(*d);
                if protocol >= 3 {
                    buf.push(b',');
                    buf.extend_from_slice(s.as_bytes());
                    buf.extend_from_slice(b"\r\n");
                } else {
                    write_bulk(buf, s.as_bytes());
                }
            }
        }
    }

    /// Try to interpret as bytes
    #[inline]
    pub(crate) fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            RespValue::BulkString(b) | RespValue::SimpleString(b) => Some(b),
            _ => None,
        }
    }
}

fn write_bulk(buf: &mut Vec<u8>, data: &[u8]) {
    buf.push(b'$');
    buf.extend_from_slice(itoa::Buffer::new().format(data.len()).as_bytes());
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(data);
    buf.extend_from_slice(b"\r\n");
}

/// Encode a command as a RESP array of bulk strings
pub fn write_command(buf: &mut Vec<u8>, name: &str, args: &[Bytes]) {
    buf.push(b'*');
    buf.extend_from_slice(itoa::Buffer::new().format(args.len() + 1).as_bytes());
    buf.extend_from_slice(b"\r\n");
    write_bulk(buf, name.as_bytes());
    for arg in args {
        write_bulk(buf, arg);
    }
}
