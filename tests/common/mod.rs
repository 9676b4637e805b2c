use gatehouse::store::{Error, SessionStore};
use gatehouse::{Bincode, Session, SessionId};
use serde::{Deserialize, Serialize};
use time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub(crate) struct TestUser {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TestSession {
    pub user: TestUser,
    pub preferences: TestPreferences,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub(crate) struct TestPreferences {
    pub theme: String,
    pub language: String,
}

pub fn create_test_session() -> TestSession {
    TestSession {
        user: TestUser {
            id: 1,
            name: "Test User".to_string(),
        },
        preferences: TestPreferences {
            theme: "dark".to_string(),
            language: "en".to_string(),
        },
    }
}

pub fn new_session_id() -> SessionId {
    SessionId::generate(Duration::minutes(10))
}

pub async fn assert_miss_returns_none<S: SessionStore>(store: &S) {
    let session: Option<Session<TestSession>> =
        store.get(&new_session_id(), &Bincode).await.unwrap();
    assert!(session.is_none());
}

pub async fn assert_write_then_read<S: SessionStore>(store: &S) {
    let id = new_session_id();
    let data = create_test_session();

    store
        .update(&Session::new(id.clone(), data.clone()), &Bincode)
        .await
        .unwrap();

    let session: Session<TestSession> = store.get(&id, &Bincode).await.unwrap().unwrap();
    assert_eq!(session.id(), &id);
    assert_eq!(session.id().expires_at(), id.expires_at());
    assert_eq!(session.data(), &data);
}

/// Stores a payload of one type and reads it back as another.
pub async fn assert_undecodable_fails<S: SessionStore>(store: &S) {
    let id = new_session_id();

    store
        .update(&Session::new(id.clone(), 7u8), &Bincode)
        .await
        .unwrap();

    let result: Result<Option<Session<TestSession>>, Error> = store.get(&id, &Bincode).await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

pub async fn assert_expired_is_rejected<S: SessionStore>(store: &S) {
    let id = SessionId::generate(Duration::seconds(-5));

    let result = store
        .update(&Session::new(id.clone(), create_test_session()), &Bincode)
        .await;
    assert!(matches!(result, Err(Error::Expired { .. })));

    let session: Option<Session<TestSession>> = store.get(&id, &Bincode).await.unwrap();
    assert!(session.is_none());
}
