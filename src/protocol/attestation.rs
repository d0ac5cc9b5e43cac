//! Multi-signature attestation verification
//!
//! An attestation is a raw concatenation of 65-byte secp256k1 signatures
//! (r || s || v) over the Keccak-256 digest of a message. Rules for a
//! valid attestation:
//!
//! 1. length of the attestation == 65 * signature threshold
//! 2. addresses recovered from the signatures must be in strictly
//!    increasing order; if signature A is signed by address 0x1... and
//!    signature B by address 0x2..., the attestation must be passed as AB
//! 3. no duplicate signers (implied by rule 2)
//! 4. every signer must be an enabled attester

use alloy_primitives::{hex, keccak256, Address};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CctpError, Result};

use super::SIGNATURE_LENGTH;

/// A registered attester: the hex-encoded 65-byte uncompressed secp256k1
/// public key of an off-chain signer authorized to co-sign attestations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attester {
    pub attester: String,
}

impl Attester {
    pub fn new(public_key_hex: impl Into<String>) -> Self {
        Self {
            attester: public_key_hex.into(),
        }
    }
}

/// Verifies that `attestation` proves `signature_threshold` registered
/// attesters signed `message`.
pub fn verify_attestation_signatures(
    message: &[u8],
    attestation: &[u8],
    attesters: &[Attester],
    signature_threshold: u32,
) -> Result<()> {
    if attestation.len() != SIGNATURE_LENGTH * signature_threshold as usize {
        return Err(CctpError::SignatureVerification {
            reason: format!(
                "invalid attestation length: expected {}, got {}",
                SIGNATURE_LENGTH * signature_threshold as usize,
                attestation.len()
            ),
        });
    }

    if signature_threshold == 0 {
        return Err(CctpError::SignatureVerification {
            reason: "signature verification threshold cannot be 0".to_string(),
        });
    }

    let digest = keccak256(message);

    // Tracking only the previously recovered address enforces both the
    // sorted-order rule and the no-duplicates rule in one comparison.
    let mut latest: Option<Address> = None;

    for i in 0..signature_threshold as usize {
        let signature = &attestation[i * SIGNATURE_LENGTH..(i + 1) * SIGNATURE_LENGTH];

        // Legacy Bitcoin-style signers set v to 27/28 instead of 0/1.
        let mut v = signature[SIGNATURE_LENGTH - 1];
        if v == 27 || v == 28 {
            v -= 27;
        }
        let recovery_id = RecoveryId::from_byte(v).ok_or_else(|| CctpError::SignatureVerification {
            reason: format!("invalid recovery id: {v}"),
        })?;

        let parsed = Signature::from_slice(&signature[..SIGNATURE_LENGTH - 1]).map_err(|e| {
            CctpError::SignatureVerification {
                reason: format!("malformed signature at index {i}: {e}"),
            }
        })?;

        let recovered = VerifyingKey::recover_from_prehash(digest.as_slice(), &parsed, recovery_id)
            .map_err(|e| CctpError::SignatureVerification {
                reason: format!("failed to recover public key: {e}"),
            })?;
        let recovered_key = recovered.to_encoded_point(false);
        let address = public_key_to_address(recovered_key.as_bytes());

        if let Some(previous) = latest {
            if address <= previous {
                return Err(CctpError::SignatureVerification {
                    reason: "invalid signature order or dupe".to_string(),
                });
            }
        }

        let enabled = attesters.iter().any(|attester| {
            hex::decode(&attester.attester)
                .map(|key| key == recovered_key.as_bytes())
                .unwrap_or(false)
        });
        if !enabled {
            debug!(signer = %address, event = "attestation_unknown_signer");
            return Err(CctpError::SignatureVerification {
                reason: "invalid signature: not an attester".to_string(),
            });
        }

        latest = Some(address);
    }

    Ok(())
}

/// Derives the account-style address of an uncompressed secp256k1 public
/// key: the last 20 bytes of the Keccak-256 digest of the key without its
/// 0x04 tag byte.
fn public_key_to_address(uncompressed: &[u8]) -> Address {
    Address::from_slice(&keccak256(&uncompressed[1..])[12..])
}
