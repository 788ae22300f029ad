use sha1::{Digest, Sha1};
use std::fmt::{Debug, Display};
use std::str::FromStr;

use crate::error::Error;

/// A 160-bit content identifier: the SHA-1 of an object's framed bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Oid {
    hash: [u8; 20],
}

impl Oid {
    pub fn new(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        let hash = hasher.finalize();
        Self { hash: hash.into() }
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.hash
    }

    /// Builds an id from the 20 raw bytes a tree entry carries on the wire.
    pub fn from_raw(raw: &[u8]) -> Result<Self, Error> {
        let hash = raw.try_into().map_err(|_| {
            Error::MalformedObject(format!("expected 20 raw hash bytes, got {}", raw.len()))
        })?;
        Ok(Self { hash })
    }

    /// Splits the hex form into the shard directory name (first two
    /// characters) and the file name within it (remaining 38).
    pub fn split_path(&self) -> (String, String) {
        let hex = self.to_string();
        let (group, rest) = hex.split_at(2);
        (group.to_owned(), rest.to_owned())
    }
}

impl Debug for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base16ct::lower::encode_string(&self.hash))
    }
}

impl Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", base16ct::lower::encode_string(&self.hash))
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let raw = hex::decode(s)
            .map_err(|_| Error::MalformedObject(format!("invalid object id {s:?}")))?;
        Self::from_raw(&raw)
    }
}
