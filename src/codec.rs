//! Conversion between typed session payloads and the bytes a store persists.

use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The payload could not be converted to bytes.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct EncodeError(#[source] BoxError);

impl EncodeError {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Stored bytes could not be converted back into the payload type.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct DecodeError(#[source] BoxError);

impl DecodeError {
    pub fn new(err: impl Into<BoxError>) -> Self {
        Self(err.into())
    }
}

/// Encodes and decodes a payload of type `A`.
///
/// Implementations must round-trip: `decode(&encode(x)?)` yields a value
/// equal to `x`. `decode` must return an error, never panic, on bytes it
/// does not understand.
pub trait Codec<A> {
    fn encode(&self, value: &A) -> Result<Vec<u8>, EncodeError>;

    fn decode(&self, bytes: &[u8]) -> Result<A, DecodeError>;
}

/// [bincode](https://crates.io/crates/bincode) encoding for any serde type,
/// using the standard configuration.
#[cfg(feature = "bincode")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Bincode;

#[cfg(feature = "bincode")]
impl<A> Codec<A> for Bincode
where
    A: serde::Serialize + serde::de::DeserializeOwned,
{
    fn encode(&self, value: &A) -> Result<Vec<u8>, EncodeError> {
        bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(EncodeError::new)
    }

    fn decode(&self, bytes: &[u8]) -> Result<A, DecodeError> {
        let (value, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
            .map_err(DecodeError::new)?;
        Ok(value)
    }
}

/// [MessagePack](https://crates.io/crates/rmp-serde) encoding for any serde
/// type. Structs are written as maps so fields survive reordering.
#[cfg(feature = "messagepack")]
#[derive(Clone, Copy, Debug, Default)]
pub struct MessagePack;

#[cfg(feature = "messagepack")]
impl<A> Codec<A> for MessagePack
where
    A: serde::Serialize + serde::de::DeserializeOwned,
{
    fn encode(&self, value: &A) -> Result<Vec<u8>, EncodeError> {
        rmp_serde::to_vec_named(value).map_err(EncodeError::new)
    }

    fn decode(&self, bytes: &[u8]) -> Result<A, DecodeError> {
        rmp_serde::from_slice(bytes).map_err(DecodeError::new)
    }
}
