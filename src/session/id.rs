use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use rand::TryRngCore;
use rand::rngs::OsRng;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use time::{Duration, OffsetDateTime};

const GENERATED_ID_LEN: usize = 16;

/// An opaque session identifier with an absolute expiration instant.
///
/// Equality and hashing only look at the identifier bytes, so two ids that
/// name the same session compare equal even if they carry different
/// expirations.
#[derive(Clone, Debug)]
pub struct SessionId {
    bytes: Box<[u8]>,
    expires_at: OffsetDateTime,
}

impl SessionId {
    pub fn new(bytes: impl Into<Box<[u8]>>, expires_at: OffsetDateTime) -> Self {
        Self {
            bytes: bytes.into(),
            expires_at,
        }
    }

    /// Generates a random identifier that expires `lifetime` from now.
    ///
    /// # Panics
    ///
    /// Panics if the operating system's random number generator fails.
    pub fn generate(lifetime: Duration) -> Self {
        let mut bytes = [0u8; GENERATED_ID_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .expect("OS random number generator failed");
        Self::new(bytes.to_vec(), OffsetDateTime::now_utc() + lifetime)
    }

    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The generic byte key used by byte-addressed backends.
    ///
    /// This is the URL-safe, unpadded base64 text of the identifier, which
    /// keeps keys printable and free of whitespace.
    pub fn to_key(&self) -> Vec<u8> {
        BASE64_URL_SAFE_NO_PAD.encode(&self.bytes).into_bytes()
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    /// Time left until expiration, measured from `now`. Negative once expired.
    pub fn expires_in(&self, now: OffsetDateTime) -> Duration {
        self.expires_at - now
    }

    /// Whole seconds left until expiration.
    pub fn seconds_remaining(&self) -> i64 {
        self.expires_in(OffsetDateTime::now_utc()).whole_seconds()
    }
}

impl PartialEq for SessionId {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for SessionId {}

impl Hash for SessionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&BASE64_URL_SAFE_NO_PAD.encode(&self.bytes))
    }
}

#[cfg(feature = "redis-store")]
impl From<&SessionId> for fred::types::Key {
    fn from(value: &SessionId) -> Self {
        value.to_string().into()
    }
}
