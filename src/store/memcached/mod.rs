mod client;

pub use client::{ClientError, MemcacheClient};
pub use memcache::Client;

use crate::codec::Codec;
use crate::store::{Error, SessionStore, ttl_seconds};
use crate::{Session, SessionId};
use std::fmt::{self, Debug};
use std::sync::Arc;
use time::OffsetDateTime;

/// Longest expiration memcached treats as relative; larger values are read
/// as unix timestamps.
const MAX_RELATIVE_EXPTIME: i64 = 60 * 60 * 24 * 30;

/// A memcached session store implementation.
///
/// Sessions are stored as plain items under the id's base64 key, expiring at
/// the id's expiration instant, with zero flags. A second `update` for an id
/// replaces the stored payload.
pub struct MemcachedStore<C: MemcacheClient = Client> {
    client: Arc<C>,
}

impl<C: MemcacheClient> MemcachedStore<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: MemcacheClient> Clone for MemcachedStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: MemcacheClient + Debug> Debug for MemcachedStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemcachedStore")
            .field("client", &self.client)
            .finish()
    }
}

impl<C: MemcacheClient> SessionStore for MemcachedStore<C> {
    #[tracing::instrument(name = "getting session from memcached", skip_all, fields(session = %key))]
    async fn get<A, C2>(&self, key: &SessionId, codec: &C2) -> Result<Option<Session<A>>, Error>
    where
        A: Send,
        C2: Codec<A> + Sync,
    {
        let value = self.client.get(&key.to_key()).await.map_err(|err| {
            tracing::error!(err = %err, "failed to get session from memcached");
            err
        })?;

        let Some(value) = value else {
            tracing::debug!("session not found");
            return Ok(None);
        };

        let data = codec.decode(&value).map_err(|err| {
            tracing::error!(err = %err, "failed to decode session");
            err
        })?;

        Ok(Some(Session::new(key.clone(), data)))
    }

    #[tracing::instrument(name = "updating session in memcached", skip_all, fields(session = %session.id()))]
    async fn update<A, C2>(&self, session: &Session<A>, codec: &C2) -> Result<(), Error>
    where
        A: Sync,
        C2: Codec<A> + Sync,
    {
        let encoded = codec.encode(session.data())?;
        let exptime = exptime(session.id(), OffsetDateTime::now_utc())?;

        self.client
            .set(&session.id().to_key(), exptime, &encoded)
            .await
            .map_err(|err| {
                tracing::error!(err = %err, "failed to save session to memcached");
                err
            })?;

        Ok(())
    }
}

/// Converts the id's expiration into memcached's `exptime`.
fn exptime(id: &SessionId, now: OffsetDateTime) -> Result<u32, Error> {
    let ttl = ttl_seconds(id, now)?;
    let exptime = if ttl <= MAX_RELATIVE_EXPTIME {
        ttl
    } else {
        id.expires_at().unix_timestamp()
    };

    u32::try_from(exptime).map_err(|_| Error::Update {
        session: id.to_string(),
        reason: format!("expiration {exptime} does not fit memcached's exptime"),
    })
}
