use std::future::Future;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Memcache(#[from] memcache::MemcacheError),

    #[error("Invalid memcached key: {0:?}")]
    InvalidKey(String),

    #[error("Memcached request was aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// The subset of the memcached protocol a session store needs.
pub trait MemcacheClient: Send + Sync + 'static {
    /// Fetches the item stored at `key`.
    fn get(&self, key: &[u8]) -> impl Future<Output = Result<Option<Vec<u8>>, ClientError>> + Send;

    /// Stores `value` at `key` with zero flags, replacing any existing item.
    ///
    /// `exptime` follows memcached's convention: up to 30 days it is a number
    /// of seconds from now, above that it is an absolute unix timestamp.
    fn set(
        &self,
        key: &[u8],
        exptime: u32,
        value: &[u8],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// [memcache](https://docs.rs/memcache) clients are blocking, so every
/// request runs on tokio's blocking pool.
impl MemcacheClient for memcache::Client {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, ClientError> {
        let key = key_str(key)?;
        let client = self.clone();

        let value = tokio::task::spawn_blocking(move || client.get::<Vec<u8>>(&key)).await??;
        Ok(value)
    }

    async fn set(&self, key: &[u8], exptime: u32, value: &[u8]) -> Result<(), ClientError> {
        let key = key_str(key)?;
        let value = value.to_vec();
        let client = self.clone();

        tokio::task::spawn_blocking(move || client.set(&key, value.as_slice(), exptime)).await??;
        Ok(())
    }
}

fn key_str(key: &[u8]) -> Result<String, ClientError> {
    std::str::from_utf8(key)
        .map(str::to_owned)
        .map_err(|_| ClientError::InvalidKey(String::from_utf8_lossy(key).into_owned()))
}
