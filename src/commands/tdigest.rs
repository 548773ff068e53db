//! T-Digest operations
//!
//! TDIGEST.* commands. Estimates on an empty digest come back as NaN.

use crate::args::ArgList;
use crate::channel::Channel;
use crate::client::Client;
use crate::command::{Keyword, TDigestCommand};
use crate::error::{Error, Result};
use crate::reply::{self, Context, InfoMap};

impl<C: Channel> Client<C> {
    /// TDIGEST.CREATE {key} [COMPRESSION c]
    pub fn tdigest_create(&self, key: impl AsRef<[u8]>, compression: Option<u64>) -> Result<()> {
        let key = key.as_ref();
        let mut args = ArgList::with_key(key);
        if let Some(compression) = compression {
            args.push_keyword(Keyword::Compression).push_uint(compression);
        }
        let reply = self.dispatch(TDigestCommand::Create, args)?;
        reply::expect_ok(&Context::new(TDigestCommand::Create, key), reply)
    }

    /// TDIGEST.RESET {key}
    pub fn tdigest_reset(&self, key: impl AsRef<[u8]>) -> Result<()> {
        let key = key.as_ref();
        let reply = self.dispatch(TDigestCommand::Reset, ArgList::with_key(key))?;
        reply::expect_ok(&Context::new(TDigestCommand::Reset, key), reply)
    }

    /// TDIGEST.ADD {key} {value} [value ...]
    pub fn tdigest_add(&self, key: impl AsRef<[u8]>, values: &[f64]) -> Result<()> {
        let key = key.as_ref();
        let args = key_values_args(key, values)?;
        let reply = self.dispatch(TDigestCommand::Add, args)?;
        reply::expect_ok(&Context::new(TDigestCommand::Add, key), reply)
    }

    /// TDIGEST.MERGE {dest} {numkeys} {src} [src ...]
    pub fn tdigest_merge<K: AsRef<[u8]>>(
        &self,
        dest: impl AsRef<[u8]>,
        sources: &[K],
    ) -> Result<()> {
        if sources.is_empty() {
            return Err(Error::InvalidArgument("at least one source key is required"));
        }
        let dest = dest.as_ref();
        let mut args = ArgList::with_capacity(sources.len() + 2);
        args.push_bytes(dest).push_uint(sources.len() as u64);
        for source in sources {
            args.push_bytes(source.as_ref());
        }
        let reply = self.dispatch(TDigestCommand::Merge, args)?;
        reply::expect_ok(&Context::new(TDigestCommand::Merge, dest), reply)
    }

    /// TDIGEST.INFO {key}
    pub fn tdigest_info(&self, key: impl AsRef<[u8]>) -> Result<InfoMap> {
        let key = key.as_ref();
        let reply = self.dispatch(TDigestCommand::Info, ArgList::with_key(key))?;
        reply::decode_info(&Context::new(TDigestCommand::Info, key), reply)
    }

    /// TDIGEST.CDF {key} {value} [value ...]
    pub fn tdigest_cdf(&self, key: impl AsRef<[u8]>, values: &[f64]) -> Result<Vec<f64>> {
        self.tdigest_estimates(TDigestCommand::Cdf, key.as_ref(), values)
    }

    /// TDIGEST.QUANTILE {key} {quantile} [quantile ...]
    pub fn tdigest_quantile(&self, key: impl AsRef<[u8]>, quantiles: &[f64]) -> Result<Vec<f64>> {
        self.tdigest_estimates(TDigestCommand::Quantile, key.as_ref(), quantiles)
    }

    /// TDIGEST.MIN {key}
    pub fn tdigest_min(&self, key: impl AsRef<[u8]>) -> Result<f64> {
        self.tdigest_bound(TDigestCommand::Min, key.as_ref())
    }

    /// TDIGEST.MAX {key}
    pub fn tdigest_max(&self, key: impl AsRef<[u8]>) -> Result<f64> {
        self.tdigest_bound(TDigestCommand::Max, key.as_ref())
    }

    fn tdigest_estimates(
        &self,
        command: TDigestCommand,
        key: &[u8],
        values: &[f64],
    ) -> Result<Vec<f64>> {
        let args = key_values_args(key, values)?;
        let reply = self.dispatch(command, args)?;
        reply::decode_float_array(&Context::new(command, key), reply)
    }

    fn tdigest_bound(&self, command: TDigestCommand, key: &[u8]) -> Result<f64> {
        let reply = self.dispatch(command, ArgList::with_key(key))?;
        reply::decode_float(&Context::new(command, key), reply)
    }
}

fn key_values_args(key: &[u8], values: &[f64]) -> Result<ArgList> {
    if values.is_empty() {
        return Err(Error::InvalidArgument("at least one value is required"));
    }
    let mut args = ArgList::with_capacity(values.len() + 1);
    args.push_bytes(key);
    for value in values {
        args.push_float(*value);
    }
    Ok(args)
}
