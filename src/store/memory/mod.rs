use crate::codec::Codec;
use crate::store::{Error, SessionStore};
use crate::{Session, SessionId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// An in-memory session store implementation.
///
/// It keeps encoded payloads in a concurrent set keyed by session id.
/// Entries never expire, and an id can only be written once: a second
/// `update` for the same id fails instead of replacing the stored payload.
///
/// Cloning the store shares the underlying set.
///
/// ### Note
///
/// Do not use this in a production environment.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<DashMap<SessionId, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl SessionStore for MemoryStore {
    #[tracing::instrument(name = "getting session from memory store", skip_all, fields(session = %key))]
    async fn get<A, C>(&self, key: &SessionId, codec: &C) -> Result<Option<Session<A>>, Error>
    where
        A: Send,
        C: Codec<A> + Sync,
    {
        let Some(entry) = self.data.get(key) else {
            tracing::debug!("session not found");
            return Ok(None);
        };

        let data = codec.decode(entry.value()).map_err(|err| {
            tracing::error!(err = %err, "failed to decode session");
            err
        })?;

        Ok(Some(Session::new(key.clone(), data)))
    }

    #[tracing::instrument(name = "updating session in memory store", skip_all, fields(session = %session.id()))]
    async fn update<A, C>(&self, session: &Session<A>, codec: &C) -> Result<(), Error>
    where
        A: Sync,
        C: Codec<A> + Sync,
    {
        let encoded = codec.encode(session.data())?;

        match self.data.entry(session.id().clone()) {
            Entry::Occupied(_) => {
                tracing::error!("session already stored");
                Err(Error::Update {
                    session: session.id().to_string(),
                    reason: "update failed: session already stored".to_string(),
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(encoded);
                Ok(())
            }
        }
    }
}
