//! RngSeed – доменный seed для RNG колоды.
//!
//! Базовый seed стола + детерминированное hash-reseeding:
//!     new = H(domain || old || table_id || hand_id || hand_index)
//! Каждая раздача воспроизводится по (base seed, table id, hand id).

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Случайный seed из системной энтропии (для столов без заданного seed).
    pub fn random() -> Self {
        let mut b = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut b);
        Self { bytes: b }
    }

    /// Seed для конкретной раздачи конкретного стола.
    pub fn derive(&self, table_id: u64, hand_id: u64, hand_index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"HOLDEM_ENGINE_DECK_V1");
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(hand_id.to_le_bytes());
        hasher.update(hand_index.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
