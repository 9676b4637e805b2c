#[cfg(feature = "memcached-store")]
pub mod memcached;

#[cfg(feature = "redis-store")]
pub mod redis;

pub mod memory;

use crate::codec::{Codec, DecodeError, EncodeError};
use crate::{Session, SessionId};
use std::future::Future;
use time::{Duration, OffsetDateTime};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Decoding failed with: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encoding failed with: {0}")]
    Encode(#[from] EncodeError),

    #[error("Update failed for session {session}: {reason}")]
    Update { session: String, reason: String },

    #[error("Session {session} already expired at {expires_at}")]
    Expired {
        session: String,
        expires_at: OffsetDateTime,
    },

    #[cfg(feature = "memcached-store")]
    #[error(transparent)]
    Memcache(#[from] memcached::ClientError),

    #[cfg(feature = "redis-store")]
    #[error(transparent)]
    Redis(#[from] fred::error::Error),
}

/// A backend that persists [`Session`]s.
///
/// Every backend honors the same contract:
///
/// - `get` resolves to `Ok(None)` when nothing is stored for the key, and
///   only fails when the backend fails or the stored bytes cannot be decoded.
/// - `update` only fails when encoding fails, the backend fails, or the
///   backend refuses the write.
/// - The codec is applied at the boundary; stores never inspect payloads.
pub trait SessionStore: Send + Sync + 'static {
    /// Loads the session stored at `key`.
    ///
    /// The returned session carries `key` itself, expiration included.
    fn get<A, C>(
        &self,
        key: &SessionId,
        codec: &C,
    ) -> impl Future<Output = Result<Option<Session<A>>, Error>> + Send
    where
        A: Send,
        C: Codec<A> + Sync;

    /// Persists `session`, expiring it at its id's expiration instant.
    fn update<A, C>(
        &self,
        session: &Session<A>,
        codec: &C,
    ) -> impl Future<Output = Result<(), Error>> + Send
    where
        A: Sync,
        C: Codec<A> + Sync;
}

/// Seconds a backend should keep `id` alive, counted from `now`.
///
/// An already expired session is an error. A positive remainder below one
/// second is rounded up.
#[cfg_attr(
    not(any(feature = "memcached-store", feature = "redis-store")),
    allow(dead_code)
)]
pub(crate) fn ttl_seconds(id: &SessionId, now: OffsetDateTime) -> Result<i64, Error> {
    let remaining = id.expires_in(now);
    if remaining <= Duration::ZERO {
        return Err(Error::Expired {
            session: id.to_string(),
            expires_at: id.expires_at(),
        });
    }

    Ok(remaining.whole_seconds().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds() {
        let now = OffsetDateTime::now_utc();
        let id = SessionId::new(b"id".to_vec(), now + Duration::seconds(90));
        assert_eq!(ttl_seconds(&id, now).unwrap(), 90);

        let id = SessionId::new(b"id".to_vec(), now + Duration::milliseconds(300));
        assert_eq!(ttl_seconds(&id, now).unwrap(), 1);
    }

    #[test]
    fn test_ttl_seconds_rejects_expired() {
        let now = OffsetDateTime::now_utc();

        let id = SessionId::new(b"id".to_vec(), now);
        assert!(matches!(ttl_seconds(&id, now), Err(Error::Expired { .. })));

        let id = SessionId::new(b"id".to_vec(), now - Duration::minutes(5));
        assert!(matches!(ttl_seconds(&id, now), Err(Error::Expired { .. })));
    }
}
