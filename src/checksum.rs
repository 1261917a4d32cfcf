//! Checksum derivation.
//!
//! ```text
//! key    = SHA1(fixed_key || activation_bytes)
//! iv     = SHA1(fixed_key || key || activation_bytes)
//! digest = SHA1(key[..16] || iv[..16])
//! ```

use sha1::{Digest, Sha1};

use crate::config::FixedKey;
use crate::types::{ActivationBytes, Checksum};

/// Maps a candidate to the checksum it would produce.
pub trait Derive: Send + Sync {
    fn derive(&self, candidate: ActivationBytes) -> Checksum;
}

/// SHA-1 checksum chain keyed by a [`FixedKey`].
#[derive(Clone)]
pub struct ChecksumDeriver {
    // SHA-1 state that has already absorbed `key`.
    keyed: Sha1,
}

impl ChecksumDeriver {
    pub fn new(key: FixedKey) -> Self {
        Self {
            keyed: Sha1::new_with_prefix(key.0),
        }
    }
}

impl Default for ChecksumDeriver {
    fn default() -> Self {
        Self::new(FixedKey::AUDIBLE)
    }
}

impl Derive for ChecksumDeriver {
    #[inline]
    fn derive(&self, candidate: ActivationBytes) -> Checksum {
        let ab = candidate.as_bytes();

        let mut h = self.keyed.clone();
        h.update(ab);
        let intermediate_key: [u8; 20] = h.finalize().into();

        let mut h = self.keyed.clone();
        h.update(intermediate_key);
        h.update(ab);
        let intermediate_iv: [u8; 20] = h.finalize().into();

        let mut h = Sha1::new();
        h.update(&intermediate_key[..16]);
        h.update(&intermediate_iv[..16]);
        Checksum(h.finalize().into())
    }
}

/// Derive with the given key without keeping a deriver around.
pub fn derive_checksum(key: &FixedKey, candidate: ActivationBytes) -> Checksum {
    ChecksumDeriver::new(*key).derive(candidate)
}
