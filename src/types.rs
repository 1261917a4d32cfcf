use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::block::BlockId;
use crate::error::SearchError;

/// Length of a checksum in bytes.
pub const CHECKSUM_LEN: usize = 20;

/// The 4-byte secret being searched for.
///
/// Byte 0 is the block id, bytes 1..4 are the position inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationBytes(pub [u8; 4]);

impl ActivationBytes {
    /// Build from a big-endian `u32`.
    pub fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// Big-endian integer form.
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Block this value belongs to.
    pub fn block(self) -> BlockId {
        BlockId(self.0[0])
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ActivationBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for ActivationBytes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// 20-byte output of the checksum derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(pub [u8; CHECKSUM_LEN]);

impl Checksum {
    pub fn as_bytes(&self) -> &[u8; CHECKSUM_LEN] {
        &self.0
    }
}

impl From<[u8; CHECKSUM_LEN]> for Checksum {
    fn from(bytes: [u8; CHECKSUM_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Checksum {
    type Err = SearchError;

    /// Parse exactly 40 hex digits, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != CHECKSUM_LEN * 2 {
            return Err(SearchError::InvalidChecksum(format!(
                "expected {} hex digits, got {}",
                CHECKSUM_LEN * 2,
                s.len()
            )));
        }
        let mut out = [0u8; CHECKSUM_LEN];
        hex::decode_to_slice(s, &mut out)
            .map_err(|e| SearchError::InvalidChecksum(format!("{s:?}: {e}")))?;
        Ok(Self(out))
    }
}

impl fmt::LowerHex for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl Serialize for Checksum {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
