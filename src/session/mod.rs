//! The session entity persisted by the stores.

mod id;
pub use id::SessionId;

/// A session identifier paired with its typed payload.
///
/// Stores only read a `Session` when persisting it, and build a fresh one
/// when loading.
#[derive(Clone, Debug, PartialEq)]
pub struct Session<A> {
    id: SessionId,
    data: A,
}

impl<A> Session<A> {
    pub fn new(id: SessionId, data: A) -> Self {
        Self { id, data }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn data(&self) -> &A {
        &self.data
    }

    pub fn into_data(self) -> A {
        self.data
    }

    /// Splits the session into its id and payload.
    pub fn into_parts(self) -> (SessionId, A) {
        (self.id, self.data)
    }
}
