// crates/caremesh-core/src/fingerprint.rs
//
// Patient fingerprint: the deterministic identity key that lets records
// from different participants be matched without a shared patient id.
//
// The fingerprint is the SHA-256 hex digest of the canonical string
//   normalize(full_name) + "|" + dob + "|" + phone_last4
// where normalization trims, lowercases, and collapses internal
// whitespace. The digest is stable across processes and restarts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::MeshError;

/// Deterministic identity key for a patient.
///
/// Matching is exact-fingerprint only: knowing *that* two records share a
/// fingerprint is never gated, only their content is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint for a presented identity triple.
    ///
    /// # Errors
    /// `InvalidInput` if `phone_last4` is not exactly four ASCII digits
    /// or the normalized name is empty.
    pub fn compute(
        full_name: &str,
        dob: NaiveDate,
        phone_last4: &str,
    ) -> Result<Fingerprint, MeshError> {
        if phone_last4.len() != 4 || !phone_last4.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MeshError::InvalidInput(
                "phoneLast4 must be exactly 4 digits".to_string(),
            ));
        }

        let name = normalize_name(full_name);
        if name.is_empty() {
            return Err(MeshError::InvalidInput(
                "fullName must not be empty".to_string(),
            ));
        }

        let canonical = format!("{}|{}|{}", name, dob.format("%Y-%m-%d"), phone_last4);
        let digest = Sha256::digest(canonical.as_bytes());

        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{:02x}", byte));
        }
        Ok(Fingerprint(hex))
    }

    /// The hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a patient name: trim, lowercase, collapse runs of whitespace
/// into single spaces.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
