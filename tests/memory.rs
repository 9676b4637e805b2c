mod common;

#[cfg(test)]
mod tests {
    use super::*;

    use common::*;
    use gatehouse::store::memory::MemoryStore;
    use gatehouse::store::{Error, SessionStore};
    use gatehouse::{Bincode, Session, SessionId};
    use std::sync::Arc;
    use time::{Duration, OffsetDateTime};

    #[tokio::test]
    async fn test_miss_returns_none() {
        assert_miss_returns_none(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_write_then_read() {
        assert_write_then_read(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_undecodable_payload_fails() {
        assert_undecodable_fails(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_second_update_fails() {
        let store = MemoryStore::new();
        let id = new_session_id();
        let data = create_test_session();

        store
            .update(&Session::new(id.clone(), data.clone()), &Bincode)
            .await
            .unwrap();

        let mut updated = data.clone();
        updated.user.name = "Updated User".to_string();
        let result = store
            .update(&Session::new(id.clone(), updated), &Bincode)
            .await;
        assert!(matches!(result, Err(Error::Update { .. })));

        // Identical payloads are refused as well.
        let result = store
            .update(&Session::new(id.clone(), data.clone()), &Bincode)
            .await;
        assert!(matches!(result, Err(Error::Update { .. })));

        let session: Session<TestSession> = store.get(&id, &Bincode).await.unwrap().unwrap();
        assert_eq!(session.data(), &data);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_error_names_the_session() {
        let store = MemoryStore::new();
        let id = new_session_id();

        store.update(&Session::new(id.clone(), 1u32), &Bincode).await.unwrap();
        let err = store
            .update(&Session::new(id.clone(), 2u32), &Bincode)
            .await
            .unwrap_err();

        assert!(err.to_string().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_get_returns_callers_key() {
        let store = MemoryStore::new();
        let now = OffsetDateTime::now_utc();
        let stored_id = SessionId::new(b"session".to_vec(), now + Duration::minutes(1));
        let lookup_id = SessionId::new(b"session".to_vec(), now + Duration::hours(2));

        store
            .update(&Session::new(stored_id, create_test_session()), &Bincode)
            .await
            .unwrap();

        let session: Session<TestSession> =
            store.get(&lookup_id, &Bincode).await.unwrap().unwrap();
        let (id, data) = session.into_parts();
        assert_eq!(id.expires_at(), lookup_id.expires_at());
        assert_eq!(data, create_test_session());
    }

    #[tokio::test]
    async fn test_racing_updates() {
        let store = Arc::new(MemoryStore::new());
        let id = new_session_id();

        let handles: Vec<_> = (0..16u32)
            .map(|n| {
                let store = Arc::clone(&store);
                let id = id.clone();
                tokio::spawn(async move { store.update(&Session::new(id, n), &Bincode).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(store.len(), 1);
    }
}
