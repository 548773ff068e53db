//! Request/response channel
//!
//! The client never opens connections itself. Anything that can carry one
//! command and hand back one reply implements [`Channel`]; [`StreamChannel`]
//! frames RESP over an already-connected byte stream.

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};
use log::{trace, warn};

use crate::config::{ClientConfig, ProtocolVersion};
use crate::error::{Error, Result};
use crate::protocol::{Parser, RespValue, write_command};

/// Synchronous request/response transport
pub trait Channel {
    /// Send `name args...` and return the single reply.
    ///
    /// Server error replies are returned as `RespValue::Error`, not as `Err`.
    fn request(&mut self, name: &str, args: &[Bytes]) -> Result<RespValue>;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn request(&mut self, name: &str, args: &[Bytes]) -> Result<RespValue> {
        (**self).request(name, args)
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn request(&mut self, name: &str, args: &[Bytes]) -> Result<RespValue> {
        (**self).request(name, args)
    }
}

/// RESP framing over a connected stream (TCP, TLS, unix socket, ...)
///
/// A failed read or write leaves the stream at an unknown position in the
/// reply sequence. The channel then marks itself broken and every later
/// request fails with [`Error::ConnectionClosed`].
pub struct StreamChannel<S> {
    stream: S,
    parser: Parser,
    protocol: ProtocolVersion,
    read_buf: BytesMut,
    scratch: Vec<u8>,
    write_buf: Vec<u8>,
    broken: bool,
}

impl<S: Read + Write> StreamChannel<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &ClientConfig::default())
    }

    pub fn with_config(stream: S, config: &ClientConfig) -> Self {
        Self {
            stream,
            parser: Parser::new(config.proto_max_bulk_len),
            protocol: config.protocol,
            read_buf: BytesMut::with_capacity(config.read_buffer_size),
            scratch: vec![0; config.read_buffer_size.max(1)],
            write_buf: Vec::with_capacity(256),
            broken: false,
        }
    }

    /// Protocol this channel asks for in [`handshake`](Self::handshake)
    pub fn protocol(&self) -> ProtocolVersion {
        self.protocol
    }

    /// Switch the connection to RESP3 with `HELLO 3` when the configured
    /// protocol is RESP3; a no-op for RESP2
    pub fn handshake(&mut self) -> Result<()> {
        if self.protocol == ProtocolVersion::Resp2 {
            return Ok(());
        }
        let version = Bytes::from_static(b"3");
        match self.request("HELLO", &[version])? {
            RespValue::Error(msg) => Err(Error::Protocol(format!(
                "HELLO 3 refused: {}",
                String::from_utf8_lossy(&msg)
            ))),
            _ => Ok(()),
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Whether an earlier I/O or framing failure has poisoned the stream
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn round_trip(&mut self, name: &str, args: &[Bytes]) -> Result<RespValue> {
        self.write_buf.clear();
        write_command(&mut self.write_buf, name, args);
        trace!("write {} bytes for {}", self.write_buf.len(), name);
        self.stream.write_all(&self.write_buf)?;
        self.stream.flush()?;
        self.read_reply()
    }

    fn read_reply(&mut self) -> Result<RespValue> {
        loop {
            if let Some(value) = self.parser.parse(&mut self.read_buf)? {
                return Ok(value);
            }
            let n = self.stream.read(&mut self.scratch)?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            trace!("read {} bytes", n);
            self.read_buf.extend_from_slice(&self.scratch[..n]);
        }
    }
}

impl<S: Read + Write> Channel for StreamChannel<S> {
    fn request(&mut self, name: &str, args: &[Bytes]) -> Result<RespValue> {
        if self.broken {
            return Err(Error::ConnectionClosed);
        }
        let result = self.round_trip(name, args);
        if let Err(e) = &result {
            warn!("{} failed, dropping connection state: {}", name, e);
            self.broken = true;
            self.read_buf.clear();
        }
        result
    }
}
