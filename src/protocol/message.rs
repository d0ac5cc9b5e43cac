//! The outer message envelope
//!
//! Byte layout (big-endian integers, absolute offsets):
//!
//! - version: uint32 (offset 0)
//! - sourceDomain: uint32 (offset 4)
//! - destinationDomain: uint32 (offset 8)
//! - nonce: uint64 (offset 12)
//! - sender: bytes32 (offset 20)
//! - recipient: bytes32 (offset 52)
//! - destinationCaller: bytes32 (offset 84) - zero means anyone may submit
//! - messageBody: dynamic bytes (offset 116)

use alloy_primitives::{Bytes, FixedBytes};

use crate::error::{CctpError, Result};

const VERSION_INDEX: usize = 0;
const SOURCE_DOMAIN_INDEX: usize = 4;
const DESTINATION_DOMAIN_INDEX: usize = 8;
const NONCE_INDEX: usize = 12;
const SENDER_INDEX: usize = 20;
const RECIPIENT_INDEX: usize = 52;
const DESTINATION_CALLER_INDEX: usize = 84;
const MESSAGE_BODY_INDEX: usize = 116;

/// A cross-chain message envelope.
///
/// Messages are ephemeral: they are constructed, encoded into a
/// `MessageSent` event for off-chain attesters, and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Envelope format version
    pub version: u32,
    /// Domain the message was sent from
    pub source_domain: u32,
    /// Domain the message is addressed to
    pub destination_domain: u32,
    /// Sequence number assigned by the source chain
    pub nonce: u64,
    /// Sender account, left-padded to 32 bytes
    pub sender: FixedBytes<32>,
    /// Recipient account on the destination chain, left-padded to 32 bytes
    pub recipient: FixedBytes<32>,
    /// Only account allowed to submit the message on the destination
    /// chain; all zeroes means any caller
    pub destination_caller: FixedBytes<32>,
    /// Opaque payload, forwarded to the destination recipient
    pub message_body: Bytes,
}

impl Message {
    /// Length of the fixed-offset header preceding the body.
    pub const HEADER_SIZE: usize = MESSAGE_BODY_INDEX;

    /// Encodes the message into its wire representation.
    ///
    /// Output length is always `HEADER_SIZE + message_body.len()`.
    pub fn encode(&self) -> Bytes {
        let mut bytes = Vec::with_capacity(Self::HEADER_SIZE + self.message_body.len());

        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.source_domain.to_be_bytes());
        bytes.extend_from_slice(&self.destination_domain.to_be_bytes());
        bytes.extend_from_slice(&self.nonce.to_be_bytes());
        bytes.extend_from_slice(self.sender.as_slice());
        bytes.extend_from_slice(self.recipient.as_slice());
        bytes.extend_from_slice(self.destination_caller.as_slice());
        bytes.extend_from_slice(&self.message_body);

        Bytes::from(bytes)
    }

    /// Decodes a message from its wire representation.
    ///
    /// Fails only when the input is shorter than [`Message::HEADER_SIZE`];
    /// the fixed fields are sliced at absolute offsets and are always
    /// exactly the right width by construction.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_SIZE {
            return Err(CctpError::MessageTooShort {
                expected: Self::HEADER_SIZE,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            version: u32::from_be_bytes(
                bytes[VERSION_INDEX..SOURCE_DOMAIN_INDEX].try_into().unwrap(),
            ),
            source_domain: u32::from_be_bytes(
                bytes[SOURCE_DOMAIN_INDEX..DESTINATION_DOMAIN_INDEX]
                    .try_into()
                    .unwrap(),
            ),
            destination_domain: u32::from_be_bytes(
                bytes[DESTINATION_DOMAIN_INDEX..NONCE_INDEX].try_into().unwrap(),
            ),
            nonce: u64::from_be_bytes(bytes[NONCE_INDEX..SENDER_INDEX].try_into().unwrap()),
            sender: FixedBytes::from_slice(&bytes[SENDER_INDEX..RECIPIENT_INDEX]),
            recipient: FixedBytes::from_slice(&bytes[RECIPIENT_INDEX..DESTINATION_CALLER_INDEX]),
            destination_caller: FixedBytes::from_slice(
                &bytes[DESTINATION_CALLER_INDEX..MESSAGE_BODY_INDEX],
            ),
            message_body: Bytes::copy_from_slice(&bytes[MESSAGE_BODY_INDEX..]),
        })
    }
}
