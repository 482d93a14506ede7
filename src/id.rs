use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::OBJECT_ID_SIZE;

// UnitsObjectId names an object, a controller, a token or an owner.
// It is 32 opaque bytes and is only ever compared for exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitsObjectId([u8; OBJECT_ID_SIZE]);

impl fmt::Display for UnitsObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = hex::encode(&self.0[0..6]);
        write!(f, "obj:{}", prefix)
    }
}

impl Ord for UnitsObjectId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for UnitsObjectId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for UnitsObjectId {
    fn default() -> Self {
        UnitsObjectId([0; OBJECT_ID_SIZE])
    }
}

impl Deref for UnitsObjectId {
    type Target = [u8; OBJECT_ID_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

static TEST_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

impl UnitsObjectId {
    pub const fn new(uid: [u8; OBJECT_ID_SIZE]) -> Self {
        UnitsObjectId(uid)
    }

    /// Get a reference to the internal bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Generate a unique UnitsObjectId for testing purposes
    pub fn unique_id_for_tests() -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .to_le_bytes();
        let sequence = TEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes();

        let digest = Self::create_object_id(&[b"test".as_slice(), &timestamp, &sequence], 0);
        UnitsObjectId(digest)
    }

    pub fn create_object_id(seeds: &[&[u8]], bump: u8) -> [u8; OBJECT_ID_SIZE] {
        let mut hasher = Sha256::new();

        // Domain separator
        hasher.update(b"UNITS_Object");

        for seed in seeds {
            hasher.update(seed);
        }

        hasher.update([bump]);

        hasher.finalize().into()
    }

    /// Returns true if the bytes do not decompress to a point on the ed25519 curve,
    /// so no private key can ever sign for this identifier.
    pub fn is_off_curve(bytes: &[u8; OBJECT_ID_SIZE]) -> bool {
        let Ok(compressed_edwards_y) = CompressedEdwardsY::from_slice(bytes.as_ref()) else {
            return true;
        };
        compressed_edwards_y.decompress().is_none()
    }

    /// Try to find an off-curve UnitsObjectId for the given seeds
    pub fn try_find_uid(seeds: &[&[u8]]) -> Option<(UnitsObjectId, u8)> {
        for bump in 0..=u8::MAX {
            let id = UnitsObjectId::create_object_id(seeds, bump);
            if UnitsObjectId::is_off_curve(&id) {
                return Some((UnitsObjectId(id), bump));
            }
        }
        None
    }

    /// Derive the identifier a host pre-allocates for `owner`'s balance of `token`.
    pub fn derive_balance_id(
        token_id: &UnitsObjectId,
        owner_id: &UnitsObjectId,
    ) -> Option<UnitsObjectId> {
        Self::try_find_uid(&[b"balance".as_slice(), token_id.bytes(), owner_id.bytes()]).map(|(id, _)| id)
    }

    /// Derive the identifier a host pre-allocates for a new token.
    pub fn derive_token_id(creator_id: &UnitsObjectId, symbol: &str) -> Option<UnitsObjectId> {
        Self::try_find_uid(&[b"token".as_slice(), creator_id.bytes(), symbol.as_bytes()]).map(|(id, _)| id)
    }
}
