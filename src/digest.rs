//! Digest handling: the fixed byte sequence every avatar is derived from.

use rand::Rng;
use sha1::{Digest as _, Sha1};

use crate::error::{Error, Result};

/// Bytes of entropy drawn when no source is supplied.
pub const RANDOM_SOURCE_LEN: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// SHA-1 of arbitrary source bytes.
    pub fn of(source: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(source);
        Digest(hasher.finalize().to_vec())
    }

    /// A pre-computed digest in hex, used as-is without re-hashing.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded.trim())?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::EmptyDigest);
        }
        Ok(Digest(bytes))
    }

    /// Digest of fresh entropy from the caller's generator.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut source = [0u8; RANDOM_SOURCE_LEN];
        rng.fill(&mut source[..]);
        Self::of(&source)
    }

    /// SHA-1 of this digest's bytes. Feeds the color derivation so hue and
    /// shape vary independently.
    pub fn rehash(&self) -> Digest {
        Self::of(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
