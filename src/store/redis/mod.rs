use crate::codec::{Codec, DecodeError};
use crate::store::{Error, SessionStore, ttl_seconds};
use crate::{Session, SessionId};
use fred::clients::Pool;
use fred::interfaces::KeysInterface;
use fred::types::{Expiration, Key, Value};
use std::{fmt::Debug, sync::Arc};
use time::OffsetDateTime;

/// A redis session store implementation.
///
/// Each session is a plain string key holding the encoded payload, written
/// with `SET .. EX` so that redis expires it at the id's expiration instant.
/// A second `update` for an id replaces the stored payload.
#[derive(Debug)]
pub struct RedisStore<C: KeysInterface + Send + Sync = Pool> {
    client: Arc<C>,
}

impl<C> RedisStore<C>
where
    C: KeysInterface + Send + Sync,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> Clone for RedisStore<C>
where
    C: KeysInterface + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> SessionStore for RedisStore<C>
where
    C: KeysInterface + Send + Sync + 'static,
{
    #[tracing::instrument(name = "getting session from redis", skip_all, fields(session = %key))]
    async fn get<A, C2>(&self, key: &SessionId, codec: &C2) -> Result<Option<Session<A>>, Error>
    where
        A: Send,
        C2: Codec<A> + Sync,
    {
        let value = self
            .client
            .get::<Value, _>(Key::from(key))
            .await
            .map_err(|err| {
                tracing::error!(err = %err, "failed to get session from redis");
                err
            })?;

        let Some(bytes) = from_value(value)? else {
            tracing::debug!("session not found");
            return Ok(None);
        };

        let data = codec.decode(&bytes).map_err(|err| {
            tracing::error!(err = %err, "failed to decode session");
            err
        })?;

        Ok(Some(Session::new(key.clone(), data)))
    }

    #[tracing::instrument(name = "updating session in redis", skip_all, fields(session = %session.id()))]
    async fn update<A, C2>(&self, session: &Session<A>, codec: &C2) -> Result<(), Error>
    where
        A: Sync,
        C2: Codec<A> + Sync,
    {
        let encoded = codec.encode(session.data())?;
        let ttl = ttl_seconds(session.id(), OffsetDateTime::now_utc())?;

        self.client
            .set::<(), _, _>(
                Key::from(session.id()),
                to_value(encoded),
                Some(Expiration::EX(ttl)),
                None,
                false,
            )
            .await
            .map_err(|err| {
                tracing::error!(err = %err, "failed to save session to redis");
                err
            })?;

        Ok(())
    }
}

fn to_value(bytes: Vec<u8>) -> Value {
    Value::Bytes(bytes.into())
}

/// Converts a reply from `GET` back into payload bytes. `Null` is a miss.
fn from_value(value: Value) -> Result<Option<Vec<u8>>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Bytes(bytes) => Ok(Some(bytes.to_vec())),
        Value::String(string) => Ok(Some(string.as_bytes().to_vec())),
        other => Err(DecodeError::new(format!(
            "expected a bulk string from redis, got {other:?}"
        ))
        .into()),
    }
}
