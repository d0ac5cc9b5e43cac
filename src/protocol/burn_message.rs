//! The burn message body
//!
//! A [`BurnMessage`] is the payload carried inside a [`Message`] body when
//! the transfer is a burn-and-mint. Byte layout (big-endian):
//!
//! - version: uint32 (offset 0)
//! - burnToken: bytes32 (offset 4) - Keccak-256 digest of the denom
//! - mintRecipient: bytes32 (offset 36)
//! - amount: uint256 (offset 68) - zero-padded to 32 bytes
//! - messageSender: bytes32 (offset 100)
//!
//! Total length is always exactly 132 bytes.
//!
//! [`Message`]: crate::protocol::Message

use alloy_primitives::{Bytes, FixedBytes, U256};

use crate::error::{CctpError, Result};

const VERSION_INDEX: usize = 0;
const BURN_TOKEN_INDEX: usize = 4;
const MINT_RECIPIENT_INDEX: usize = 36;
const AMOUNT_INDEX: usize = 68;
const MESSAGE_SENDER_INDEX: usize = 100;

/// A token burn-and-mint instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnMessage {
    /// Body format version
    pub version: u32,
    /// Keccak-256 digest of the burned token's denom identifier
    pub burn_token: FixedBytes<32>,
    /// Account to mint to on the destination chain, left-padded to 32 bytes
    pub mint_recipient: FixedBytes<32>,
    /// Amount burned, and to be minted
    pub amount: U256,
    /// Account that initiated the burn, left-padded to 32 bytes
    pub message_sender: FixedBytes<32>,
}

impl BurnMessage {
    /// Exact length of an encoded burn message.
    pub const LEN: usize = 132;

    /// Encodes the burn message into its 132-byte wire representation.
    pub fn encode(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(Self::LEN);

        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(self.burn_token.as_slice());
        bytes.extend_from_slice(self.mint_recipient.as_slice());
        bytes.extend_from_slice(&self.amount.to_be_bytes::<32>());
        bytes.extend_from_slice(self.message_sender.as_slice());

        Bytes::from(bytes)
    }

    /// Decodes a burn message from its wire representation.
    ///
    /// A generic message body is not always a burn message, so callers
    /// check the body length before decoding; the length check here is a
    /// backstop, not a dispatch mechanism.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(CctpError::MalformedBurnMessage {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            version: u32::from_be_bytes(bytes[VERSION_INDEX..BURN_TOKEN_INDEX].try_into().unwrap()),
            burn_token: FixedBytes::from_slice(&bytes[BURN_TOKEN_INDEX..MINT_RECIPIENT_INDEX]),
            mint_recipient: FixedBytes::from_slice(&bytes[MINT_RECIPIENT_INDEX..AMOUNT_INDEX]),
            amount: U256::from_be_slice(&bytes[AMOUNT_INDEX..MESSAGE_SENDER_INDEX]),
            message_sender: FixedBytes::from_slice(&bytes[MESSAGE_SENDER_INDEX..Self::LEN]),
        })
    }
}
