//! Wire-level protocol types and verification
//!
//! This module contains the fixed-layout binary records exchanged between
//! chains (the [`Message`] envelope and the [`BurnMessage`] body) and the
//! multi-signature attestation verifier. The byte layout here must match
//! the external protocol exactly; remote attesters sign the encoded bytes.

mod attestation;
mod burn_message;
mod message;

pub use attestation::{verify_attestation_signatures, Attester};
pub use burn_message::BurnMessage;
pub use message::Message;

use alloy_primitives::{Address, FixedBytes};

use crate::error::{CctpError, Result};

/// Version stamped into every outbound [`Message`] envelope.
pub const MESSAGE_VERSION: u32 = 0;

/// Version stamped into every outbound [`BurnMessage`] body.
pub const MESSAGE_BODY_VERSION: u32 = 0;

/// Length of one secp256k1 signature (r || s || v) inside an attestation.
pub const SIGNATURE_LENGTH: usize = 65;

/// Converts untrusted variable-length bytes into an exactly-32-byte field.
///
/// Every handler that accepts raw recipient, mint-recipient, or
/// destination-caller bytes goes through this check before the value can
/// reach the codec.
pub fn exact_bytes32(field: &'static str, bytes: &[u8]) -> Result<FixedBytes<32>> {
    if bytes.len() != 32 {
        return Err(CctpError::Validation {
            field,
            reason: format!("must be 32 bytes, got {}", bytes.len()),
        });
    }
    Ok(FixedBytes::from_slice(bytes))
}

/// Left-pads a 20-byte account address into the 32-byte wire representation.
pub fn pad_address(address: Address) -> FixedBytes<32> {
    let mut padded = [0u8; 32];
    padded[12..].copy_from_slice(address.as_slice());
    FixedBytes::from(padded)
}

/// Extracts the account address from the low 20 bytes of a wire field.
pub fn address_from_padded(bytes: &FixedBytes<32>) -> Address {
    Address::from_slice(&bytes[12..])
}
