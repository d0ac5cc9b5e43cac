//! Token pair, remote messenger, and limit administration

use alloy_primitives::{Address, Bytes, U256};
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::protocol::exact_bytes32;
use crate::state::StateStore;

use super::{CctpModule, Context, RemoteTokenMessenger, TokenPair};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Maps a remote token to the local denom it mints as on receive.
    pub fn link_token_pair(
        &mut self,
        from: Address,
        remote_domain: u32,
        remote_token: &Bytes,
        local_token: &str,
    ) -> Result<()> {
        let mut ctx = Context::default();
        self.require_token_controller(&ctx, from)?;

        let remote_token = exact_bytes32("remote token", remote_token)?;
        if self.get_token_pair(&ctx, remote_domain, &remote_token).is_some() {
            return Err(CctpError::TokenPairAlreadyExists);
        }

        let local_token = local_token.to_lowercase();
        self.set_token_pair(
            &mut ctx,
            &TokenPair {
                remote_domain,
                remote_token,
                local_token: local_token.clone(),
            },
        );

        info!(remote_domain, local_token, event = "token_pair_linked");
        ctx.emit(Event::TokenPairLinked {
            local_token,
            remote_domain,
            remote_token,
        });
        self.commit(ctx);
        Ok(())
    }

    /// Removes a token pair mapping.
    pub fn unlink_token_pair(
        &mut self,
        from: Address,
        remote_domain: u32,
        remote_token: &Bytes,
    ) -> Result<()> {
        let mut ctx = Context::default();
        self.require_token_controller(&ctx, from)?;

        let remote_token = exact_bytes32("remote token", remote_token)?;
        let pair = self
            .get_token_pair(&ctx, remote_domain, &remote_token)
            .ok_or(CctpError::TokenPairNotFound { remote_domain })?;
        self.delete_token_pair(&mut ctx, remote_domain, &remote_token);

        info!(remote_domain, local_token = pair.local_token, event = "token_pair_unlinked");
        ctx.emit(Event::TokenPairUnlinked {
            local_token: pair.local_token,
            remote_domain,
            remote_token,
        });
        self.commit(ctx);
        Ok(())
    }

    /// Registers the token messenger address for a remote domain.
    pub fn add_remote_token_messenger(
        &mut self,
        from: Address,
        domain: u32,
        address: &Bytes,
    ) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        if self.get_remote_token_messenger(&ctx, domain).is_some() {
            return Err(CctpError::RemoteTokenMessengerAlreadyExists(domain));
        }
        let address = exact_bytes32("remote token messenger", address)?;
        self.set_remote_token_messenger(
            &mut ctx,
            &RemoteTokenMessenger {
                domain_id: domain,
                address,
            },
        );

        info!(domain, event = "remote_token_messenger_added");
        ctx.emit(Event::RemoteTokenMessengerAdded { domain, address });
        self.commit(ctx);
        Ok(())
    }

    /// Deregisters the token messenger for a remote domain.
    pub fn remove_remote_token_messenger(&mut self, from: Address, domain: u32) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        let messenger = self
            .get_remote_token_messenger(&ctx, domain)
            .ok_or(CctpError::RemoteTokenMessengerNotFound { domain })?;
        self.delete_remote_token_messenger(&mut ctx, domain);

        info!(domain, event = "remote_token_messenger_removed");
        ctx.emit(Event::RemoteTokenMessengerRemoved {
            domain,
            address: messenger.address,
        });
        self.commit(ctx);
        Ok(())
    }

    /// Caps how much of `local_token` a single message may burn.
    pub fn set_max_burn_amount_per_message(
        &mut self,
        from: Address,
        local_token: &str,
        amount: U256,
    ) -> Result<()> {
        let mut ctx = Context::default();
        self.require_token_controller(&ctx, from)?;

        let token = local_token.to_lowercase();
        self.set_per_message_burn_limit(&mut ctx, &token, amount);

        info!(token, amount = %amount, event = "burn_limit_per_message_set");
        ctx.emit(Event::BurnLimitPerMessageSet {
            token,
            burn_limit_per_message: amount,
        });
        self.commit(ctx);
        Ok(())
    }

    /// Caps the body size of outbound messages.
    pub fn update_max_message_body_size(&mut self, from: Address, size: u64) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        self.set_max_message_body_size(&mut ctx, size);

        info!(size, event = "max_message_body_size_updated");
        ctx.emit(Event::MaxMessageBodySizeUpdated {
            new_max_message_body_size: size,
        });
        self.commit(ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;
    use crate::testing::{MockTokenFactory, NoopRouter, TEST_MODULE_ADDRESS};
    use alloy_primitives::{address, keccak256, FixedBytes};

    const OWNER: Address = address!("00000000000000000000000000000000000000c1");
    const CONTROLLER: Address = address!("00000000000000000000000000000000000000c2");
    const STRANGER: Address = address!("00000000000000000000000000000000000000c3");

    fn module() -> CctpModule<MemoryStore, MockTokenFactory, NoopRouter> {
        let mut module = CctpModule::builder()
            .store(MemoryStore::new())
            .token_factory(MockTokenFactory::new("uusdc"))
            .router(NoopRouter)
            .module_address(TEST_MODULE_ADDRESS)
            .build();
        let mut ctx = Context::default();
        module.set_owner(&mut ctx, OWNER);
        module.set_token_controller(&mut ctx, CONTROLLER);
        module.commit(ctx);
        module
    }

    fn remote_token() -> Bytes {
        Bytes::copy_from_slice(keccak256(b"usdc").as_slice())
    }

    #[test]
    fn test_link_and_unlink_token_pair() {
        let mut module = module();
        module
            .link_token_pair(CONTROLLER, 0, &remote_token(), "uUSDC")
            .unwrap();

        let ctx = Context::default();
        let pair = module.get_token_pair(&ctx, 0, &keccak256(b"usdc")).unwrap();
        // Denoms are stored lowercased.
        assert_eq!(pair.local_token, "uusdc");

        let err = module
            .link_token_pair(CONTROLLER, 0, &remote_token(), "uusdc")
            .unwrap_err();
        assert!(matches!(err, CctpError::TokenPairAlreadyExists));

        module.unlink_token_pair(CONTROLLER, 0, &remote_token()).unwrap();
        let ctx = Context::default();
        assert!(module.get_token_pair(&ctx, 0, &keccak256(b"usdc")).is_none());

        let err = module
            .unlink_token_pair(CONTROLLER, 0, &remote_token())
            .unwrap_err();
        assert!(matches!(err, CctpError::TokenPairNotFound { .. }));
    }

    #[test]
    fn test_token_pair_requires_controller() {
        let mut module = module();
        let err = module
            .link_token_pair(OWNER, 0, &remote_token(), "uusdc")
            .unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
    }

    #[test]
    fn test_add_and_remove_remote_token_messenger() {
        let mut module = module();
        let address = Bytes::from(vec![9u8; 32]);
        module.add_remote_token_messenger(OWNER, 0, &address).unwrap();

        let ctx = Context::default();
        let messenger = module.get_remote_token_messenger(&ctx, 0).unwrap();
        assert_eq!(messenger.address, FixedBytes::from([9u8; 32]));

        let err = module
            .add_remote_token_messenger(OWNER, 0, &address)
            .unwrap_err();
        assert!(matches!(err, CctpError::RemoteTokenMessengerAlreadyExists(0)));

        module.remove_remote_token_messenger(OWNER, 0).unwrap();
        let err = module.remove_remote_token_messenger(OWNER, 0).unwrap_err();
        assert!(matches!(err, CctpError::RemoteTokenMessengerNotFound { domain: 0 }));
    }

    #[test]
    fn test_messenger_admin_requires_owner() {
        let mut module = module();
        let err = module
            .add_remote_token_messenger(STRANGER, 0, &Bytes::from(vec![9u8; 32]))
            .unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
    }

    #[test]
    fn test_burn_limit_is_stored_lowercased() {
        let mut module = module();
        module
            .set_max_burn_amount_per_message(CONTROLLER, "uUSDC", U256::from(1000u64))
            .unwrap();

        let ctx = Context::default();
        assert_eq!(
            module.per_message_burn_limit(&ctx, "uusdc"),
            Some(U256::from(1000u64))
        );
    }

    #[test]
    fn test_max_body_size_requires_owner() {
        let mut module = module();
        let err = module.update_max_message_body_size(STRANGER, 100).unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));

        module.update_max_message_body_size(OWNER, 100).unwrap();
        let ctx = Context::default();
        assert_eq!(module.max_message_body_size(&ctx), Some(100));
    }
}
