//! Role addresses
//!
//! Owner, attester manager, pauser, and token controller are stored as
//! raw 20-byte addresses under their own keys. A missing role always
//! reads as a typed "not configured" error, never a panic; operations
//! against an unconfigured module must fail gracefully.

use alloy_primitives::Address;

use crate::error::{CctpError, Result};
use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn owner(&self, ctx: &Context) -> Result<Address> {
        self.role(ctx, keys::OWNER_KEY, "owner")
    }

    pub fn pending_owner(&self, ctx: &Context) -> Option<Address> {
        self.role(ctx, keys::PENDING_OWNER_KEY, "pending owner").ok()
    }

    pub fn attester_manager(&self, ctx: &Context) -> Result<Address> {
        self.role(ctx, keys::ATTESTER_MANAGER_KEY, "attester manager")
    }

    pub fn pauser(&self, ctx: &Context) -> Result<Address> {
        self.role(ctx, keys::PAUSER_KEY, "pauser")
    }

    pub fn token_controller(&self, ctx: &Context) -> Result<Address> {
        self.role(ctx, keys::TOKEN_CONTROLLER_KEY, "token controller")
    }

    fn role(&self, ctx: &Context, key: &[u8], role: &'static str) -> Result<Address> {
        let bytes = self
            .state_get(ctx, key)
            .ok_or(CctpError::NotConfigured { role })?;
        if bytes.len() != Address::len_bytes() {
            return Err(CctpError::NotConfigured { role });
        }
        Ok(Address::from_slice(&bytes))
    }

    pub(crate) fn set_owner(&self, ctx: &mut Context, owner: Address) {
        self.state_set(ctx, keys::OWNER_KEY, owner.to_vec());
    }

    pub(crate) fn set_pending_owner(&self, ctx: &mut Context, pending_owner: Address) {
        self.state_set(ctx, keys::PENDING_OWNER_KEY, pending_owner.to_vec());
    }

    pub(crate) fn delete_pending_owner(&self, ctx: &mut Context) {
        self.state_delete(ctx, keys::PENDING_OWNER_KEY);
    }

    pub(crate) fn set_attester_manager(&self, ctx: &mut Context, attester_manager: Address) {
        self.state_set(ctx, keys::ATTESTER_MANAGER_KEY, attester_manager.to_vec());
    }

    pub(crate) fn set_pauser(&self, ctx: &mut Context, pauser: Address) {
        self.state_set(ctx, keys::PAUSER_KEY, pauser.to_vec());
    }

    pub(crate) fn set_token_controller(&self, ctx: &mut Context, token_controller: Address) {
        self.state_set(ctx, keys::TOKEN_CONTROLLER_KEY, token_controller.to_vec());
    }

    pub(crate) fn require_owner(&self, ctx: &Context, caller: Address) -> Result<()> {
        if self.owner(ctx)? != caller {
            return Err(CctpError::Unauthorized(format!("{caller} is not the owner")));
        }
        Ok(())
    }

    pub(crate) fn require_attester_manager(&self, ctx: &Context, caller: Address) -> Result<()> {
        if self.attester_manager(ctx)? != caller {
            return Err(CctpError::Unauthorized(format!(
                "{caller} is not the attester manager"
            )));
        }
        Ok(())
    }

    pub(crate) fn require_pauser(&self, ctx: &Context, caller: Address) -> Result<()> {
        if self.pauser(ctx)? != caller {
            return Err(CctpError::Unauthorized(format!("{caller} is not the pauser")));
        }
        Ok(())
    }

    pub(crate) fn require_token_controller(&self, ctx: &Context, caller: Address) -> Result<()> {
        if self.token_controller(ctx)? != caller {
            return Err(CctpError::Unauthorized(format!(
                "{caller} is not the token controller"
            )));
        }
        Ok(())
    }
}
