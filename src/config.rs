//! Client configuration

use crate::protocol::DEFAULT_MAX_BULK_LEN;

/// RESP protocol version negotiated with the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVersion {
    #[default]
    Resp2,
    Resp3,
}

impl ProtocolVersion {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Resp2 => 2,
            Self::Resp3 => 3,
        }
    }
}

impl std::str::FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2" | "resp2" => Ok(Self::Resp2),
            "3" | "resp3" => Ok(Self::Resp3),
            _ => Err(format!("Unknown protocol: {}", s)),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Protocol requested by `StreamChannel::handshake` (default: resp2)
    pub protocol: ProtocolVersion,
    /// Bytes read from the stream per syscall (default: 16kb)
    pub read_buffer_size: usize,
    /// Largest bulk reply accepted (default: 512mb)
    pub proto_max_bulk_len: usize,
    /// Upper bound on chunks yielded by one scan dump (default: unlimited)
    pub scan_dump_max_chunks: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolVersion::Resp2,
            read_buffer_size: 16 * 1024,
            proto_max_bulk_len: DEFAULT_MAX_BULK_LEN,
            scan_dump_max_chunks: None,
        }
    }
}

impl ClientConfig {
    /// Set one option by its config-file name
    pub fn apply(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name.to_lowercase().as_str() {
            "protocol" => self.protocol = value.parse()?,
            "read-buffer-size" => self.read_buffer_size = parse_memory(value)?,
            "proto-max-bulk-len" => self.proto_max_bulk_len = parse_memory(value)?,
            "scan-dump-max-chunks" => {
                let n: usize = value
                    .parse()
                    .map_err(|_| format!("Invalid scan-dump-max-chunks: {}", value))?;
                // 0 disables the cap
                self.scan_dump_max_chunks = (n > 0).then_some(n);
            }
            _ => return Err(format!("Unknown option: {}", name)),
        }
        Ok(())
    }

    /// Parse `name value` lines; blank lines and `#` comments are skipped
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut config = Self::default();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, value) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("line {}: missing value for '{}'", lineno + 1, line))?;
            config
                .apply(name, value.trim())
                .map_err(|e| format!("line {}: {}", lineno + 1, e))?;
        }
        Ok(config)
    }
}

/// Parse a size with an optional kb/mb/gb suffix (1k = 1000, 1kb = 1024)
fn parse_memory(value: &str) -> Result<usize, String> {
    let lower = value.to_lowercase();
    let (digits, multiplier) = [
        ("gb", 1024 * 1024 * 1024),
        ("mb", 1024 * 1024),
        ("kb", 1024),
        ("g", 1_000_000_000),
        ("m", 1_000_000),
        ("k", 1_000),
    ]
    .iter()
    .find_map(|(suffix, mult)| lower.strip_suffix(suffix).map(|d| (d.to_string(), *mult)))
    .unwrap_or((lower.clone(), 1));

    digits
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| format!("Invalid size: {}", value))
}
