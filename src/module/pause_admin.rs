//! Circuit breakers
//!
//! The pauser role can halt the burn/mint path and the raw messaging
//! path independently. Pausing is idempotent.

use alloy_primitives::Address;
use tracing::info;

use crate::error::Result;
use crate::events::Event;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn pause_burning_and_minting(&mut self, from: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_pauser(&ctx, from)?;
        self.set_burning_and_minting_paused(&mut ctx, true);

        info!(event = "burning_and_minting_paused");
        ctx.emit(Event::BurningAndMintingPaused {});
        self.commit(ctx);
        Ok(())
    }

    pub fn unpause_burning_and_minting(&mut self, from: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_pauser(&ctx, from)?;
        self.set_burning_and_minting_paused(&mut ctx, false);

        info!(event = "burning_and_minting_unpaused");
        ctx.emit(Event::BurningAndMintingUnpaused {});
        self.commit(ctx);
        Ok(())
    }

    pub fn pause_sending_and_receiving(&mut self, from: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_pauser(&ctx, from)?;
        self.set_sending_and_receiving_paused(&mut ctx, true);

        info!(event = "sending_and_receiving_paused");
        ctx.emit(Event::SendingAndReceivingPaused {});
        self.commit(ctx);
        Ok(())
    }

    pub fn unpause_sending_and_receiving(&mut self, from: Address) -> Result<()> {
        let mut ctx = Context::default();
        self.require_pauser(&ctx, from)?;
        self.set_sending_and_receiving_paused(&mut ctx, false);

        info!(event = "sending_and_receiving_unpaused");
        ctx.emit(Event::SendingAndReceivingUnpaused {});
        self.commit(ctx);
        Ok(())
    }
}
