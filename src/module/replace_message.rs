//! Message replacement
//!
//! A sender may re-issue a message it originally sent, keeping the nonce
//! but swapping the body or the destination caller. The original message
//! must carry a valid attestation; the replacement is only usable on the
//! destination if the original was never received there.

use alloy_primitives::{hex, keccak256, Address, Bytes, FixedBytes};
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::{
    exact_bytes32, pad_address, verify_attestation_signatures, BurnMessage, Message,
};
use crate::state::StateStore;
use crate::traits::{MessageRouter, TokenFactory};

use super::{CctpModule, Context};

/// Request to replace a previously sent message, keeping its nonce.
#[derive(Debug, Clone)]
pub struct MsgReplaceMessage {
    pub from: Address,
    pub original_message: Bytes,
    pub original_attestation: Bytes,
    pub new_message_body: Bytes,
    /// 32 bytes; zero removes any caller restriction.
    pub new_destination_caller: Bytes,
}

/// Request to replace a previously sent deposit-for-burn, keeping its
/// nonce and amount but redirecting the mint.
#[derive(Debug, Clone)]
pub struct MsgReplaceDepositForBurn {
    pub from: Address,
    pub original_message: Bytes,
    pub original_attestation: Bytes,
    /// 32 bytes, nonzero.
    pub new_mint_recipient: Bytes,
    /// 32 bytes; zero removes any caller restriction.
    pub new_destination_caller: Bytes,
}

impl<S, F, R> CctpModule<S, F, R>
where
    S: StateStore,
    F: TokenFactory,
    R: MessageRouter,
{
    /// Re-sends a message under its original nonce with a new body and
    /// destination caller. Only the original sender may replace.
    pub fn replace_message(&mut self, msg: MsgReplaceMessage) -> Result<()> {
        let mut ctx = Context::default();
        self.replace_message_internal(
            &mut ctx,
            msg.from,
            &msg.original_message,
            &msg.original_attestation,
            msg.new_message_body,
            &msg.new_destination_caller,
        )?;
        self.commit(ctx);
        Ok(())
    }

    /// Re-sends a deposit-for-burn under its original nonce with a new
    /// mint recipient. Only the original depositor may replace.
    pub fn replace_deposit_for_burn(&mut self, msg: MsgReplaceDepositForBurn) -> Result<()> {
        let mut ctx = Context::default();
        self.replace_deposit_for_burn_internal(&mut ctx, msg)?;
        self.commit(ctx);
        Ok(())
    }

    fn replace_message_internal(
        &mut self,
        ctx: &mut Context,
        from: Address,
        original_message: &[u8],
        original_attestation: &[u8],
        new_message_body: Bytes,
        new_destination_caller: &[u8],
    ) -> Result<()> {
        // Checked before any attestation or authorization work so a
        // paused module answers with the pause, not a secondary error.
        if self.sending_and_receiving_paused(ctx) {
            return Err(CctpError::Paused("sending and receiving messages"));
        }

        let signature_threshold = self
            .signature_threshold(ctx)
            .ok_or(CctpError::NotConfigured {
                role: "signature threshold",
            })?;
        let attesters = self.get_all_attesters(ctx);
        verify_attestation_signatures(
            original_message,
            original_attestation,
            &attesters,
            signature_threshold,
        )?;

        let original = Message::decode(original_message)?;

        if original.sender != pad_address(from) {
            return Err(CctpError::Unauthorized(format!(
                "{from} is not the sender of the original message"
            )));
        }

        // Replacement must originate where the original did.
        if original.source_domain != self.local_domain() {
            return Err(CctpError::Validation {
                field: "source domain",
                reason: format!(
                    "message was sent from domain {}, not from this domain",
                    original.source_domain
                ),
            });
        }

        let new_destination_caller = exact_bytes32("destination caller", new_destination_caller)?;

        info!(
            nonce = original.nonce,
            destination_domain = original.destination_domain,
            event = "message_replaced"
        );
        self.send_message_internal(
            ctx,
            original.destination_domain,
            original.recipient,
            new_destination_caller,
            original.sender,
            original.nonce,
            new_message_body,
        )
    }

    fn replace_deposit_for_burn_internal(
        &mut self,
        ctx: &mut Context,
        msg: MsgReplaceDepositForBurn,
    ) -> Result<()> {
        if self.burning_and_minting_paused(ctx) {
            return Err(CctpError::Paused("burning and minting"));
        }

        let original = Message::decode(&msg.original_message)?;
        let original_burn = BurnMessage::decode(&original.message_body)?;

        if original_burn.message_sender != pad_address(msg.from) {
            return Err(CctpError::Unauthorized(format!(
                "{} is not the depositor of the original burn",
                msg.from
            )));
        }

        let new_mint_recipient = exact_bytes32("mint recipient", &msg.new_mint_recipient)?;
        if new_mint_recipient == FixedBytes::ZERO {
            return Err(CctpError::Validation {
                field: "mint recipient",
                reason: "must be nonzero".to_string(),
            });
        }

        let new_burn_message = BurnMessage {
            mint_recipient: new_mint_recipient,
            ..original_burn.clone()
        };

        // The envelope sender of a deposit-for-burn is the module, so
        // the replacement is issued on the module's behalf.
        self.replace_message_internal(
            ctx,
            self.module_address(),
            &msg.original_message,
            &msg.original_attestation,
            new_burn_message.encode(),
            &msg.new_destination_caller,
        )?;

        ctx.emit(Event::DepositForBurn {
            nonce: original.nonce,
            burn_token: hex::encode(keccak256(original_burn.burn_token.as_slice())),
            amount: original_burn.amount,
            depositor: msg.from,
            mint_recipient: new_mint_recipient,
            destination_domain: original.destination_domain,
            destination_token_messenger: original.recipient,
            destination_caller: exact_bytes32(
                "destination caller",
                &msg.new_destination_caller,
            )?,
        });

        Ok(())
    }
}
