//! Inbound message processing

use alloy_primitives::{Address, Bytes, FixedBytes};
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::{
    address_from_padded, pad_address, verify_attestation_signatures, BurnMessage, Message,
    MESSAGE_BODY_VERSION, MESSAGE_VERSION,
};
use crate::state::StateStore;
use crate::traits::{MessageRouter, TokenFactory};

use super::{CctpModule, Context};

/// Request to process an attested inbound message.
#[derive(Debug, Clone)]
pub struct MsgReceiveMessage {
    pub from: Address,
    pub message: Bytes,
    pub attestation: Bytes,
}

impl<S, F, R> CctpModule<S, F, R>
where
    S: StateStore,
    F: TokenFactory,
    R: MessageRouter,
{
    /// Verifies the attestation, consumes the nonce, mints if the body is
    /// a burn message, and forwards the raw message downstream.
    pub fn receive_message(&mut self, msg: MsgReceiveMessage) -> Result<()> {
        let mut ctx = Context::default();
        self.receive_message_with_ctx(&mut ctx, msg)?;
        self.commit(ctx);
        Ok(())
    }

    fn receive_message_with_ctx(&mut self, ctx: &mut Context, msg: MsgReceiveMessage) -> Result<()> {
        if self.sending_and_receiving_paused(ctx) {
            return Err(CctpError::Paused("sending and receiving messages"));
        }

        let attesters = self.get_all_attesters(ctx);
        if attesters.is_empty() {
            return Err(CctpError::SignatureVerification {
                reason: "no attesters found".to_string(),
            });
        }
        let signature_threshold = self
            .signature_threshold(ctx)
            .ok_or(CctpError::NotConfigured {
                role: "signature threshold",
            })?;

        verify_attestation_signatures(
            &msg.message,
            &msg.attestation,
            &attesters,
            signature_threshold,
        )?;

        let message = Message::decode(&msg.message)?;

        if message.destination_domain != self.local_domain() {
            return Err(CctpError::Validation {
                field: "destination domain",
                reason: format!(
                    "incorrect destination domain: {}",
                    message.destination_domain
                ),
            });
        }

        if message.destination_caller != FixedBytes::ZERO
            && message.destination_caller != pad_address(msg.from)
        {
            return Err(CctpError::Validation {
                field: "destination caller",
                reason: format!("incorrect destination caller for sender {}", msg.from),
            });
        }

        if message.version != MESSAGE_VERSION {
            return Err(CctpError::Validation {
                field: "message version",
                reason: format!(
                    "expected {MESSAGE_VERSION}, found {}",
                    message.version
                ),
            });
        }

        // Replay protection: check and mark before any external effect.
        if self.is_nonce_used(ctx, message.source_domain, message.nonce) {
            return Err(CctpError::NonceAlreadyUsed {
                source_domain: message.source_domain,
                nonce: message.nonce,
            });
        }
        self.mark_nonce_used(ctx, message.source_domain, message.nonce);

        // A body of exactly the burn-message length is a mint
        // instruction; anything else is forwarded untouched.
        if message.message_body.len() == BurnMessage::LEN {
            self.mint_from_burn_message(ctx, &message)?;
        }

        // Decode failures downstream surface as NotApplicable and are
        // tolerated; real router errors abort the receive.
        self.router_mut().route(&msg.message)?;

        info!(
            source_domain = message.source_domain,
            nonce = message.nonce,
            caller = %msg.from,
            event = "message_received"
        );
        ctx.emit(Event::MessageReceived {
            caller: msg.from,
            source_domain: message.source_domain,
            nonce: message.nonce,
            sender: message.sender,
            message_body: message.message_body,
        });

        Ok(())
    }

    fn mint_from_burn_message(&mut self, ctx: &mut Context, message: &Message) -> Result<()> {
        if self.burning_and_minting_paused(ctx) {
            return Err(CctpError::Paused("burning and minting"));
        }

        let burn_message = BurnMessage::decode(&message.message_body)?;

        if burn_message.version != MESSAGE_BODY_VERSION {
            return Err(CctpError::Validation {
                field: "message body version",
                reason: format!(
                    "expected {MESSAGE_BODY_VERSION}, found {}",
                    burn_message.version
                ),
            });
        }

        let token_pair = self
            .get_token_pair(ctx, message.source_domain, &burn_message.burn_token)
            .ok_or(CctpError::TokenPairNotFound {
                remote_domain: message.source_domain,
            })?;

        let remote_token_messenger = self
            .get_remote_token_messenger(ctx, message.source_domain)
            .ok_or(CctpError::RemoteTokenMessengerNotFound {
                domain: message.source_domain,
            })?;
        if message.sender != remote_token_messenger.address {
            return Err(CctpError::Validation {
                field: "sender",
                reason: "message sender is not the remote token messenger".to_string(),
            });
        }

        let mint_recipient = address_from_padded(&burn_message.mint_recipient);
        let mint_token = token_pair.local_token.to_lowercase();
        self.token_factory_mut()
            .mint(mint_recipient, &mint_token, burn_message.amount)?;

        ctx.emit(Event::MintAndWithdraw {
            mint_recipient: burn_message.mint_recipient,
            amount: burn_message.amount,
            mint_token,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{RemoteTokenMessenger, TokenPair, DEFAULT_LOCAL_DOMAIN};
    use crate::state::MemoryStore;
    use crate::testing::{
        sign_attestation, FailingRouter, MockTokenFactory, NoopRouter, TestSigner,
        TEST_MODULE_ADDRESS,
    };
    use alloy_primitives::{address, keccak256, U256};

    const CALLER: Address = address!("1234567890abcdef1234567890abcdef12345678");
    const REMOTE_DOMAIN: u32 = 0;

    fn remote_messenger() -> FixedBytes<32> {
        FixedBytes::from([9u8; 32])
    }

    fn module_with_attesters(
        signers: &[&TestSigner],
        threshold: u32,
    ) -> CctpModule<MemoryStore, MockTokenFactory, NoopRouter> {
        module_with_router(signers, threshold, NoopRouter)
    }

    fn module_with_router<Rt: crate::traits::MessageRouter>(
        signers: &[&TestSigner],
        threshold: u32,
        router: Rt,
    ) -> CctpModule<MemoryStore, MockTokenFactory, Rt> {
        let mut module = CctpModule::builder()
            .store(MemoryStore::new())
            .token_factory(MockTokenFactory::new("uusdc"))
            .router(router)
            .module_address(TEST_MODULE_ADDRESS)
            .build();
        let mut ctx = Context::default();
        for signer in signers {
            module.set_attester(&mut ctx, &signer.attester());
        }
        module.set_signature_threshold(&mut ctx, threshold);
        module.set_token_pair(
            &mut ctx,
            &TokenPair {
                remote_domain: REMOTE_DOMAIN,
                remote_token: keccak256(b"usdc"),
                local_token: "uusdc".to_string(),
            },
        );
        module.set_remote_token_messenger(
            &mut ctx,
            &RemoteTokenMessenger {
                domain_id: REMOTE_DOMAIN,
                address: remote_messenger(),
            },
        );
        module.commit(ctx);
        module
    }

    fn burn_body() -> Bytes {
        BurnMessage {
            version: MESSAGE_BODY_VERSION,
            burn_token: keccak256(b"usdc"),
            mint_recipient: pad_address(CALLER),
            amount: U256::from(250u64),
            message_sender: FixedBytes::from([4u8; 32]),
        }
        .encode()
    }

    fn inbound_message(body: Bytes) -> Message {
        Message {
            version: MESSAGE_VERSION,
            source_domain: REMOTE_DOMAIN,
            destination_domain: DEFAULT_LOCAL_DOMAIN,
            nonce: 5,
            sender: remote_messenger(),
            recipient: pad_address(TEST_MODULE_ADDRESS),
            destination_caller: FixedBytes::ZERO,
            message_body: body,
        }
    }

    fn receive(
        module: &mut CctpModule<MemoryStore, MockTokenFactory, NoopRouter>,
        signer: &TestSigner,
        message: &Message,
    ) -> Result<()> {
        let encoded = message.encode();
        let attestation = sign_attestation(&encoded, &[signer]);
        module.receive_message(MsgReceiveMessage {
            from: CALLER,
            message: encoded,
            attestation: Bytes::from(attestation),
        })
    }

    #[test]
    fn test_burn_message_mints_to_recipient() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        receive(&mut module, &signer, &inbound_message(burn_body())).unwrap();

        assert_eq!(
            module.token_factory_mut().mints(),
            vec![(CALLER, "uusdc".to_string(), U256::from(250u64))]
        );
        let events = module.take_events();
        assert!(matches!(events[0], Event::MintAndWithdraw { .. }));
        assert!(matches!(events[1], Event::MessageReceived { .. }));

        let ctx = Context::default();
        assert!(module.is_nonce_used(&ctx, REMOTE_DOMAIN, 5));
    }

    #[test]
    fn test_non_burn_body_skips_mint() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        let message = inbound_message(Bytes::from_static(b"arbitrary payload"));
        receive(&mut module, &signer, &message).unwrap();

        assert!(module.token_factory_mut().mints().is_empty());
        let events = module.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::MessageReceived { .. }));
    }

    #[test]
    fn test_replay_rejected_before_mint() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        receive(&mut module, &signer, &inbound_message(burn_body())).unwrap();
        let err = receive(&mut module, &signer, &inbound_message(burn_body())).unwrap_err();
        assert!(matches!(
            err,
            CctpError::NonceAlreadyUsed { source_domain: REMOTE_DOMAIN, nonce: 5 }
        ));
        // Only the first submission minted.
        assert_eq!(module.token_factory_mut().mints().len(), 1);
    }

    #[test]
    fn test_wrong_destination_domain_rejected_without_consuming_nonce() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        let message = Message {
            destination_domain: DEFAULT_LOCAL_DOMAIN + 1,
            ..inbound_message(burn_body())
        };
        let err = receive(&mut module, &signer, &message).unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "destination domain", .. }));
        assert!(err.to_string().contains("destination domain"));

        let ctx = Context::default();
        assert!(!module.is_nonce_used(&ctx, REMOTE_DOMAIN, 5));
    }

    #[test]
    fn test_destination_caller_restriction() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        let bound_to_other = Message {
            destination_caller: pad_address(TEST_MODULE_ADDRESS),
            ..inbound_message(burn_body())
        };
        let err = receive(&mut module, &signer, &bound_to_other).unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "destination caller", .. }));

        let bound_to_caller = Message {
            destination_caller: pad_address(CALLER),
            ..inbound_message(burn_body())
        };
        receive(&mut module, &signer, &bound_to_caller).unwrap();
    }

    #[test]
    fn test_wrong_message_version_rejected() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        let message = Message {
            version: 99,
            ..inbound_message(burn_body())
        };
        let err = receive(&mut module, &signer, &message).unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "message version", .. }));
    }

    #[test]
    fn test_no_attesters_rejected() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[], 1);

        let err = receive(&mut module, &signer, &inbound_message(burn_body())).unwrap_err();
        assert!(err.to_string().contains("no attesters"));
    }

    #[test]
    fn test_unset_threshold_rejected() {
        let signer = TestSigner::new(1);
        let mut module = CctpModule::builder()
            .store(MemoryStore::new())
            .token_factory(MockTokenFactory::new("uusdc"))
            .router(NoopRouter)
            .module_address(TEST_MODULE_ADDRESS)
            .build();
        let mut ctx = Context::default();
        module.set_attester(&mut ctx, &signer.attester());
        module.commit(ctx);

        let err = receive(&mut module, &signer, &inbound_message(burn_body())).unwrap_err();
        assert!(matches!(
            err,
            CctpError::NotConfigured { role: "signature threshold" }
        ));
    }

    #[test]
    fn test_bad_attestation_rejected() {
        let signer = TestSigner::new(1);
        let stranger = TestSigner::new(2);
        let mut module = module_with_attesters(&[&signer], 1);

        let encoded = inbound_message(burn_body()).encode();
        let attestation = sign_attestation(&encoded, &[&stranger]);
        let err = module
            .receive_message(MsgReceiveMessage {
                from: CALLER,
                message: encoded,
                attestation: Bytes::from(attestation),
            })
            .unwrap_err();
        assert!(matches!(err, CctpError::SignatureVerification { .. }));
    }

    #[test]
    fn test_missing_token_pair_rejected() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);
        let mut ctx = Context::default();
        module.delete_token_pair(&mut ctx, REMOTE_DOMAIN, &keccak256(b"usdc"));
        module.commit(ctx);

        let err = receive(&mut module, &signer, &inbound_message(burn_body())).unwrap_err();
        assert!(matches!(err, CctpError::TokenPairNotFound { .. }));
    }

    #[test]
    fn test_sender_must_be_remote_token_messenger() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);

        let message = Message {
            sender: FixedBytes::from([7u8; 32]),
            ..inbound_message(burn_body())
        };
        let err = receive(&mut module, &signer, &message).unwrap_err();
        assert!(err.to_string().contains("remote token messenger"));
    }

    #[test]
    fn test_router_failure_aborts_receive() {
        let signer = TestSigner::new(1);
        let mut module = module_with_router(&[&signer], 1, FailingRouter);

        let message = inbound_message(burn_body());
        let encoded = message.encode();
        let attestation = sign_attestation(&encoded, &[&signer]);
        let err = module
            .receive_message(MsgReceiveMessage {
                from: CALLER,
                message: encoded,
                attestation: Bytes::from(attestation),
            })
            .unwrap_err();
        assert!(matches!(err, CctpError::RouterFailed(_)));

        // The aborted transition left no trace: the nonce is free again.
        let ctx = Context::default();
        assert!(!module.is_nonce_used(&ctx, REMOTE_DOMAIN, 5));
        assert!(module.take_events().is_empty());
    }

    #[test]
    fn test_receive_paused_rejected() {
        let signer = TestSigner::new(1);
        let mut module = module_with_attesters(&[&signer], 1);
        let mut ctx = Context::default();
        module.set_sending_and_receiving_paused(&mut ctx, true);
        module.commit(ctx);

        let err = receive(&mut module, &signer, &inbound_message(burn_body())).unwrap_err();
        assert!(matches!(err, CctpError::Paused("sending and receiving messages")));
    }
}
