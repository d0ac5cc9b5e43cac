//! Role administration
//!
//! Ownership transfers are two-step: the owner nominates a pending
//! owner, who must accept before the role moves. The other roles are
//! rotated directly by the owner.

use alloy_primitives::Address;
use tracing::info;

use crate::error::{CctpError, Result};
use crate::events::Event;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Nominates a new owner. The role does not move until the nominee
    /// calls [`CctpModule::accept_owner`].
    pub fn update_owner(&mut self, from: Address, new_owner: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        let previous_owner = self.owner(&ctx)?;
        self.set_pending_owner(&mut ctx, new_owner);

        info!(%previous_owner, %new_owner, event = "ownership_transfer_started");
        ctx.emit(Event::OwnershipTransferStarted {
            previous_owner,
            new_owner,
        });
        self.commit(ctx);
        Ok(())
    }

    /// Completes a pending ownership transfer. Only the nominee may call.
    pub fn accept_owner(&mut self, from: Address) -> Result<()> {
        let mut ctx = Context::default();
        let pending_owner = self
            .pending_owner(&ctx)
            .ok_or(CctpError::NotConfigured { role: "pending owner" })?;
        if from != pending_owner {
            return Err(CctpError::Unauthorized(format!(
                "{from} is not the pending owner"
            )));
        }

        let previous_owner = self.owner(&ctx)?;
        self.set_owner(&mut ctx, pending_owner);
        self.delete_pending_owner(&mut ctx);

        info!(%previous_owner, new_owner = %pending_owner, event = "owner_updated");
        ctx.emit(Event::OwnerUpdated {
            previous_owner,
            new_owner: pending_owner,
        });
        self.commit(ctx);
        Ok(())
    }

    pub fn update_attester_manager(&mut self, from: Address, new_manager: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        let previous = self.attester_manager(&ctx).ok();
        self.set_attester_manager(&mut ctx, new_manager);

        info!(new_attester_manager = %new_manager, event = "attester_manager_updated");
        ctx.emit(Event::AttesterManagerUpdated {
            previous_attester_manager: previous,
            new_attester_manager: new_manager,
        });
        self.commit(ctx);
        Ok(())
    }

    pub fn update_pauser(&mut self, from: Address, new_pauser: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        let previous = self.pauser(&ctx).ok();
        self.set_pauser(&mut ctx, new_pauser);

        info!(new_pauser = %new_pauser, event = "pauser_updated");
        ctx.emit(Event::PauserUpdated {
            previous_pauser: previous,
            new_pauser,
        });
        self.commit(ctx);
        Ok(())
    }

    pub fn update_token_controller(&mut self, from: Address, new_controller: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_owner(&ctx, from)?;

        let previous = self.token_controller(&ctx).ok();
        self.set_token_controller(&mut ctx, new_controller);

        info!(new_token_controller = %new_controller, event = "token_controller_updated");
        ctx.emit(Event::TokenControllerUpdated {
            previous_token_controller: previous,
            new_token_controller: new_controller,
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
    use alloy_primitives::address;

    const OWNER: Address = address!("00000000000000000000000000000000000000a1");
    const NOMINEE: Address = address!("00000000000000000000000000000000000000a2");
    const STRANGER: Address = address!("00000000000000000000000000000000000000a3");

    fn module() -> CctpModule<MemoryStore, MockTokenFactory, NoopRouter> {
        let mut module = CctpModule::builder()
            .store(MemoryStore::new())
            .token_factory(MockTokenFactory::new("uusdc"))
            .router(NoopRouter)
            .module_address(TEST_MODULE_ADDRESS)
            .build();
        let mut ctx = Context::default();
        module.set_owner(&mut ctx, OWNER);
        module.commit(ctx);
        module
    }

    #[test]
    fn test_two_step_ownership_transfer() {
        let mut module = module();
        module.update_owner(OWNER, NOMINEE).unwrap();

        // Nomination alone does not move the role.
        let ctx = Context::default();
        assert_eq!(module.owner(&ctx).unwrap(), OWNER);
        assert_eq!(module.pending_owner(&ctx), Some(NOMINEE));

        module.accept_owner(NOMINEE).unwrap();
        let ctx = Context::default();
        assert_eq!(module.owner(&ctx).unwrap(), NOMINEE);
        assert!(module.pending_owner(&ctx).is_none());

        let events = module.take_events();
        assert!(matches!(events[0], Event::OwnershipTransferStarted { .. }));
        let Event::OwnerUpdated { previous_owner, new_owner } = events[1] else {
            panic!("expected OwnerUpdated");
        };
        assert_eq!((previous_owner, new_owner), (OWNER, NOMINEE));
    }

    #[test]
    fn test_only_nominee_may_accept() {
        let mut module = module();
        module.update_owner(OWNER, NOMINEE).unwrap();

        let err = module.accept_owner(STRANGER).unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
        let err = module.accept_owner(OWNER).unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
    }

    #[test]
    fn test_accept_without_nomination_rejected() {
        let mut module = module();
        let err = module.accept_owner(NOMINEE).unwrap_err();
        assert!(matches!(
            err,
            CctpError::NotConfigured { role: "pending owner" }
        ));
    }

    #[test]
    fn test_update_owner_requires_owner() {
        let mut module = module();
        let err = module.update_owner(STRANGER, NOMINEE).unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
    }

    #[test]
    fn test_owner_rotates_other_roles() {
        let mut module = module();
        module.update_attester_manager(OWNER, NOMINEE).unwrap();
        module.update_pauser(OWNER, NOMINEE).unwrap();
        module.update_token_controller(OWNER, NOMINEE).unwrap();

        let ctx = Context::default();
        assert_eq!(module.attester_manager(&ctx).unwrap(), NOMINEE);
        assert_eq!(module.pauser(&ctx).unwrap(), NOMINEE);
        assert_eq!(module.token_controller(&ctx).unwrap(), NOMINEE);

        let events = module.take_events();
        let Event::AttesterManagerUpdated {
            previous_attester_manager,
            new_attester_manager,
        } = &events[0]
        else {
            panic!("expected AttesterManagerUpdated");
        };
        assert_eq!(
            (*previous_attester_manager, *new_attester_manager),
            (None, NOMINEE)
        );

        let err = module.update_pauser(STRANGER, STRANGER).unwrap_err();
        assert!(matches!(err, CctpError::Unauthorized(_)));
    }

    #[test]
    fn test_role_rotation_records_previous_holder() {
        let mut module = module();
        module.update_pauser(OWNER, NOMINEE).unwrap();
        module.update_pauser(OWNER, STRANGER).unwrap();

        let events = module.take_events();
        let Event::PauserUpdated { previous_pauser, new_pauser } = &events[1] else {
            panic!("expected PauserUpdated");
        };
        assert_eq!((*previous_pauser, *new_pauser), (Some(NOMINEE), STRANGER));
    }
}
