//! Deposit-for-burn: burn locally, instruct a mint on the destination

use alloy_primitives::{hex, keccak256, Address, Bytes, FixedBytes, U256};
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::{exact_bytes32, pad_address, BurnMessage, MESSAGE_BODY_VERSION};
use crate::state::StateStore;
use crate::traits::{MessageRouter, TokenFactory};

use super::{CctpModule, Context};

/// Request to burn tokens locally and mint them to `mint_recipient` on
/// the destination domain.
#[derive(Debug, Clone)]
pub struct MsgDepositForBurn {
    pub from: Address,
    pub amount: U256,
    pub destination_domain: u32,
    /// Recipient of the mint on the destination chain, 32 bytes.
    pub mint_recipient: Bytes,
    /// Denom to burn; must match the token factory's minting denom.
    pub burn_token: String,
}

/// Like [`MsgDepositForBurn`], but only `destination_caller` may submit
/// the message on the destination chain.
#[derive(Debug, Clone)]
pub struct MsgDepositForBurnWithCaller {
    pub from: Address,
    pub amount: U256,
    pub destination_domain: u32,
    pub mint_recipient: Bytes,
    pub burn_token: String,
    /// Required nonzero, 32 bytes.
    pub destination_caller: Bytes,
}

impl<S, F, R> CctpModule<S, F, R>
where
    S: StateStore,
    F: TokenFactory,
    R: MessageRouter,
{
    /// Burns `amount` of `burn_token` and sends the corresponding burn
    /// message. Returns the nonce assigned to the message.
    pub fn deposit_for_burn(&mut self, msg: MsgDepositForBurn) -> Result<u64> {
        let mut ctx = Context::default();
        let nonce = self.deposit_for_burn_internal(
            &mut ctx,
            msg.from,
            msg.amount,
            msg.destination_domain,
            &msg.mint_recipient,
            &msg.burn_token,
            None,
        )?;
        self.commit(ctx);
        Ok(nonce)
    }

    /// [`CctpModule::deposit_for_burn`] with a destination-caller
    /// restriction.
    pub fn deposit_for_burn_with_caller(&mut self, msg: MsgDepositForBurnWithCaller) -> Result<u64> {
        let destination_caller = exact_bytes32("destination caller", &msg.destination_caller)?;
        if destination_caller == FixedBytes::ZERO {
            return Err(CctpError::Validation {
                field: "destination caller",
                reason: "must be nonzero".to_string(),
            });
        }
        let mut ctx = Context::default();
        let nonce = self.deposit_for_burn_internal(
            &mut ctx,
            msg.from,
            msg.amount,
            msg.destination_domain,
            &msg.mint_recipient,
            &msg.burn_token,
            Some(destination_caller),
        )?;
        self.commit(ctx);
        Ok(nonce)
    }

    fn deposit_for_burn_internal(
        &mut self,
        ctx: &mut Context,
        from: Address,
        amount: U256,
        destination_domain: u32,
        mint_recipient: &[u8],
        burn_token: &str,
        destination_caller: Option<FixedBytes<32>>,
    ) -> Result<u64> {
        if amount.is_zero() {
            return Err(CctpError::Validation {
                field: "amount",
                reason: "must be positive".to_string(),
            });
        }

        let mint_recipient = exact_bytes32("mint recipient", mint_recipient)?;
        if mint_recipient == FixedBytes::ZERO {
            return Err(CctpError::Validation {
                field: "mint recipient",
                reason: "must be nonzero".to_string(),
            });
        }

        let token_messenger = self
            .get_remote_token_messenger(ctx, destination_domain)
            .ok_or(CctpError::RemoteTokenMessengerNotFound {
                domain: destination_domain,
            })?;

        // The token factory only supports burning one denom.
        let denom = self.token_factory_mut().minting_denom();
        if !denom.eq_ignore_ascii_case(burn_token) {
            return Err(CctpError::BurnFailed(format!(
                "burning denom {burn_token} is not supported"
            )));
        }

        if self.burning_and_minting_paused(ctx) {
            return Err(CctpError::Paused("burning and minting"));
        }

        let lowercase_denom = burn_token.to_lowercase();
        if let Some(limit) = self.per_message_burn_limit(ctx, &lowercase_denom) {
            if amount > limit {
                return Err(CctpError::BurnFailed(
                    "cannot burn more than the maximum per message burn limit".to_string(),
                ));
            }
        }

        self.token_factory_mut().burn(from, burn_token, amount)?;

        let burn_message = BurnMessage {
            version: MESSAGE_BODY_VERSION,
            burn_token: keccak256(lowercase_denom.as_bytes()),
            mint_recipient,
            amount,
            message_sender: pad_address(from),
        };
        let message_body = burn_message.encode();

        // The envelope is sent by the module itself; the depositor is
        // carried inside the burn message.
        let sender = pad_address(self.module_address());
        let nonce = self.reserve_and_increment_nonce(ctx);
        self.send_message_internal(
            ctx,
            destination_domain,
            token_messenger.address,
            destination_caller.unwrap_or(FixedBytes::ZERO),
            sender,
            nonce,
            message_body,
        )?;

        info!(
            nonce,
            destination_domain,
            amount = %amount,
            burn_token,
            event = "deposit_for_burn"
        );
        ctx.emit(Event::DepositForBurn {
            nonce,
            burn_token: hex::encode(keccak256(burn_token.as_bytes())),
            amount,
            depositor: from,
            mint_recipient,
            destination_domain,
            destination_token_messenger: token_messenger.address,
            destination_caller: destination_caller.unwrap_or(FixedBytes::ZERO),
        });

        Ok(nonce)
    }
}
