//! Outbound message sending

use alloy_primitives::{Address, Bytes, FixedBytes};
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::{exact_bytes32, pad_address, Message, MESSAGE_VERSION};
use crate::state::StateStore;

use super::{CctpModule, Context};

/// Request to send a generic cross-chain message.
#[derive(Debug, Clone)]
pub struct MsgSendMessage {
    pub from: Address,
    pub destination_domain: u32,
    /// Recipient on the destination chain, 32 bytes.
    pub recipient: Bytes,
    pub message_body: Bytes,
}

/// Like [`MsgSendMessage`], but only `destination_caller` may submit the
/// message on the destination chain.
#[derive(Debug, Clone)]
pub struct MsgSendMessageWithCaller {
    pub from: Address,
    pub destination_domain: u32,
    pub recipient: Bytes,
    pub message_body: Bytes,
    /// Required nonzero, 32 bytes.
    pub destination_caller: Bytes,
}

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Sends a message to a destination domain, submittable by anyone.
    /// Returns the nonce assigned to the message.
    pub fn send_message(&mut self, msg: MsgSendMessage) -> Result<u64> {
        let mut ctx = Context::default();
        let nonce = self.send_message_with_ctx(&mut ctx, msg)?;
        self.commit(ctx);
        Ok(nonce)
    }

    /// Sends a message that only `destination_caller` may submit.
    /// Returns the nonce assigned to the message.
    pub fn send_message_with_caller(&mut self, msg: MsgSendMessageWithCaller) -> Result<u64> {
        let mut ctx = Context::default();
        let nonce = self.send_message_with_caller_ctx(&mut ctx, msg)?;
        self.commit(ctx);
        Ok(nonce)
    }

    pub(crate) fn send_message_with_ctx(
        &self,
        ctx: &mut Context,
        msg: MsgSendMessage,
    ) -> Result<u64> {
        let recipient = exact_bytes32("recipient", &msg.recipient)?;
        let nonce = self.reserve_and_increment_nonce(ctx);
        self.send_message_internal(
            ctx,
            msg.destination_domain,
            recipient,
            FixedBytes::ZERO,
            pad_address(msg.from),
            nonce,
            msg.message_body,
        )?;
        Ok(nonce)
    }

    pub(crate) fn send_message_with_caller_ctx(
        &self,
        ctx: &mut Context,
        msg: MsgSendMessageWithCaller,
    ) -> Result<u64> {
        let recipient = exact_bytes32("recipient", &msg.recipient)?;
        let destination_caller = exact_bytes32("destination caller", &msg.destination_caller)?;
        if destination_caller == FixedBytes::ZERO {
            return Err(CctpError::Validation {
                field: "destination caller",
                reason: "must be nonzero".to_string(),
            });
        }
        let nonce = self.reserve_and_increment_nonce(ctx);
        self.send_message_internal(
            ctx,
            msg.destination_domain,
            recipient,
            destination_caller,
            pad_address(msg.from),
            nonce,
            msg.message_body,
        )?;
        Ok(nonce)
    }

    /// Shared by send and replace. Replace passes the original nonce
    /// instead of reserving a new one.
    pub(crate) fn send_message_internal(
        &self,
        ctx: &mut Context,
        destination_domain: u32,
        recipient: FixedBytes<32>,
        destination_caller: FixedBytes<32>,
        sender: FixedBytes<32>,
        nonce: u64,
        message_body: Bytes,
    ) -> Result<()> {
        if self.sending_and_receiving_paused(ctx) {
            return Err(CctpError::Paused("sending and receiving messages"));
        }

        // Body size cap is optional; absence means unlimited.
        if let Some(max) = self.max_message_body_size(ctx) {
            if message_body.len() as u64 > max {
                return Err(CctpError::Validation {
                    field: "message body",
                    reason: format!("exceeds max size of {max} bytes"),
                });
            }
        }

        if recipient == FixedBytes::ZERO {
            return Err(CctpError::Validation {
                field: "recipient",
                reason: "must be nonzero".to_string(),
            });
        }

        let message = Message {
            version: MESSAGE_VERSION,
            source_domain: self.local_domain(),
            destination_domain,
            nonce,
            sender,
            recipient,
            destination_caller,
            message_body,
        };

        let encoded = message.encode();
        info!(
            nonce,
            destination_domain,
            message_length_bytes = encoded.len(),
            event = "message_sent"
        );
        ctx.emit(Event::MessageSent { message: encoded });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;
    use crate::testing::{MockTokenFactory, NoopRouter, TEST_MODULE_ADDRESS};
    use alloy_primitives::address;

    fn module() -> CctpModule<MemoryStore, MockTokenFactory, NoopRouter> {
        CctpModule::builder()
            .store(MemoryStore::new())
            .token_factory(MockTokenFactory::new("uusdc"))
            .router(NoopRouter)
            .module_address(TEST_MODULE_ADDRESS)
            .build()
    }

    fn sample_msg() -> MsgSendMessage {
        MsgSendMessage {
            from: address!("1234567890abcdef1234567890abcdef12345678"),
            destination_domain: 0,
            recipient: Bytes::from(vec![2u8; 32]),
            message_body: Bytes::from_static(b"hello"),
        }
    }

    #[test]
    fn test_send_assigns_sequential_nonces() {
        let mut module = module();
        assert_eq!(module.send_message(sample_msg()).unwrap(), 0);
        assert_eq!(module.send_message(sample_msg()).unwrap(), 1);
        assert_eq!(module.send_message(sample_msg()).unwrap(), 2);
    }

    #[test]
    fn test_send_emits_decodable_message() {
        let mut module = module();
        module.send_message(sample_msg()).unwrap();

        let events = module.take_events();
        assert_eq!(events.len(), 1);
        let Event::MessageSent { message } = &events[0] else {
            panic!("expected MessageSent, got {events:?}");
        };
        let decoded = Message::decode(message).unwrap();
        assert_eq!(decoded.version, MESSAGE_VERSION);
        assert_eq!(decoded.source_domain, module.local_domain());
        assert_eq!(decoded.destination_domain, 0);
        assert_eq!(decoded.nonce, 0);
        assert_eq!(decoded.sender, pad_address(sample_msg().from));
        assert_eq!(decoded.destination_caller, FixedBytes::ZERO);
        assert_eq!(decoded.message_body.as_ref(), b"hello");
    }

    #[test]
    fn test_send_rejected_when_paused_without_consuming_nonce() {
        let mut module = module();
        let mut ctx = Context::default();
        module.set_sending_and_receiving_paused(&mut ctx, true);
        module.commit(ctx);

        let err = module.send_message(sample_msg()).unwrap_err();
        assert!(matches!(err, CctpError::Paused(_)));

        let ctx = Context::default();
        assert_eq!(module.next_available_nonce(&ctx), 0);
    }

    #[test]
    fn test_send_rejects_zero_recipient() {
        let mut module = module();
        let err = module
            .send_message(MsgSendMessage {
                recipient: Bytes::from(vec![0u8; 32]),
                ..sample_msg()
            })
            .unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "recipient", .. }));
    }

    #[test]
    fn test_send_rejects_wrong_length_recipient() {
        let mut module = module();
        let err = module
            .send_message(MsgSendMessage {
                recipient: Bytes::from(vec![2u8; 20]),
                ..sample_msg()
            })
            .unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "recipient", .. }));
    }

    #[test]
    fn test_send_enforces_configured_body_size() {
        let mut module = module();
        let mut ctx = Context::default();
        module.set_max_message_body_size(&mut ctx, 4);
        module.commit(ctx);

        let err = module.send_message(sample_msg()).unwrap_err();
        assert!(matches!(err, CctpError::Validation { field: "message body", .. }));

        // At the limit is fine.
        module
            .send_message(MsgSendMessage {
                message_body: Bytes::from_static(b"hell"),
                ..sample_msg()
            })
            .unwrap();
    }

    #[test]
    fn test_send_with_caller_requires_nonzero_caller() {
        let mut module = module();
        let base = sample_msg();
        let err = module
            .send_message_with_caller(MsgSendMessageWithCaller {
                from: base.from,
                destination_domain: base.destination_domain,
                recipient: base.recipient.clone(),
                message_body: base.message_body.clone(),
                destination_caller: Bytes::from(vec![0u8; 32]),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            CctpError::Validation { field: "destination caller", .. }
        ));

        let nonce = module
            .send_message_with_caller(MsgSendMessageWithCaller {
                from: base.from,
                destination_domain: base.destination_domain,
                recipient: base.recipient,
                message_body: base.message_body,
                destination_caller: Bytes::from(vec![7u8; 32]),
            })
            .unwrap();
        assert_eq!(nonce, 0);

        let events = module.take_events();
        let Event::MessageSent { message } = &events[0] else {
            panic!("expected MessageSent");
        };
        let decoded = Message::decode(message).unwrap();
        assert_eq!(decoded.destination_caller, FixedBytes::from([7u8; 32]));
    }
}
