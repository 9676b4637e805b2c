//! # Gatehouse: session stores for an authentication gateway
//!
//! `gatehouse` persists typed session payloads keyed by a [`SessionId`]. It
//! works against interchangeable backends that all honor one contract,
//! [`store::SessionStore`]:
//!
//! - `get` resolves to `Ok(None)` for a missing session, to the decoded
//!   [`Session`] for a stored one, and fails only when the backend fails or the
//!   stored bytes cannot be decoded.
//! - `update` encodes the payload and writes it with the id's expiration as the
//!   backend's TTL.
//!
//! Payloads go through a [`Codec`] passed to every call, so the stores never
//! look inside them.
//!
//! # Quick Start
//!
//! ```rust
//! use gatehouse::store::SessionStore;
//! use gatehouse::store::memory::MemoryStore;
//! use gatehouse::{Bincode, Session, SessionId};
//! use time::Duration;
//!
//! #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = MemoryStore::new();
//! let id = SessionId::generate(Duration::hours(1));
//!
//! let user = User { id: 1, name: "alice".to_string() };
//! store.update(&Session::new(id.clone(), user), &Bincode).await.unwrap();
//!
//! let session: Option<Session<User>> = store.get(&id, &Bincode).await.unwrap();
//! assert_eq!(session.unwrap().data().name, "alice");
//! # }
//! ```
//!
//! # Stores
//!
//! ## Memcached
//!
//! Requires the `memcached-store` feature. Sessions are plain items; the
//! expiration is sent as memcached's `exptime`. The default client is
//! [memcache](https://docs.rs/memcache)'s pooled `Client`, whose blocking
//! requests run on tokio's blocking pool.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gatehouse::store::memcached::{Client, MemcachedStore};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = tokio::task::spawn_blocking(|| Client::connect("memcache://127.0.0.1:11211"))
//!     .await
//!     .unwrap()
//!     .unwrap();
//! let store = MemcachedStore::new(Arc::new(client));
//! # }
//! ```
//!
//! ## Redis
//!
//! Requires the `redis-store` feature. Sessions are written with `SET .. EX`
//! through a [fred](https://docs.rs/fred) client or pool.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fred::clients::Client;
//! use fred::interfaces::ClientLike;
//! use gatehouse::store::redis::RedisStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = Client::default();
//! client.init().await.unwrap();
//! let store = RedisStore::new(Arc::new(client));
//! # }
//! ```
//!
//! ## Memory
//!
//! [`store::memory::MemoryStore`] keeps sessions in process and is meant for
//! tests. Unlike the network stores it refuses to overwrite a session: a
//! second `update` for the same id fails.
//!
//! # Serialization
//!
//! Two serde codecs ship with the crate:
//!
//! - [`Bincode`] (feature `bincode`, default) - fast, compact binary encoding.
//! - `MessagePack` (feature `messagepack`) - cross-language encoding via
//!   [`rmp-serde`](https://crates.io/crates/rmp-serde).
//!
//! Any other encoding can be plugged in by implementing [`Codec`].
//!
//! # Expiration
//!
//! Sessions whose id has already expired are refused by the network stores
//! with [`store::Error::Expired`], since a zero TTL means "never expire" to
//! memcached.

pub mod codec;
pub use codec::{Codec, DecodeError, EncodeError};

#[cfg(feature = "bincode")]
pub use codec::Bincode;

#[cfg(feature = "messagepack")]
pub use codec::MessagePack;

#[cfg(feature = "redis-store")]
pub use fred;

mod session;
pub use session::*;

pub mod store;
