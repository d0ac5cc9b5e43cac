//! Pause flags
//!
//! Two independent booleans gate different operation subsets. A missing
//! record reads as "not paused".

use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn burning_and_minting_paused(&self, ctx: &Context) -> bool {
        self.state_get(ctx, keys::BURNING_AND_MINTING_PAUSED_KEY)
            .is_some_and(|bytes| bytes == [1])
    }

    pub fn sending_and_receiving_paused(&self, ctx: &Context) -> bool {
        self.state_get(ctx, keys::SENDING_AND_RECEIVING_PAUSED_KEY)
            .is_some_and(|bytes| bytes == [1])
    }

    pub(crate) fn set_burning_and_minting_paused(&self, ctx: &mut Context, paused: bool) {
        self.state_set(
            ctx,
            keys::BURNING_AND_MINTING_PAUSED_KEY,
            vec![u8::from(paused)],
        );
    }

    pub(crate) fn set_sending_and_receiving_paused(&self, ctx: &mut Context, paused: bool) {
        self.state_set(
            ctx,
            keys::SENDING_AND_RECEIVING_PAUSED_KEY,
            vec![u8::from(paused)],
        );
    }
}
