//! The message lifecycle orchestrator
//!
//! [`CctpModule`] owns the state store and the external collaborators and
//! implements every protocol operation as a single atomic transition:
//! writes accumulate in a [`Context`] overlay and reach the backing store
//! only when the operation returns `Ok`. The host's execution model is
//! assumed to serialize calls; the module itself holds no locks.

mod attester_admin;
mod attesters;
mod deposit_for_burn;
mod nonces;
mod params;
mod pause;
mod pause_admin;
mod receive_message;
mod replace_message;
mod role_admin;
mod roles;
mod send_message;
mod token_admin;
mod tokens;

pub use deposit_for_burn::{MsgDepositForBurn, MsgDepositForBurnWithCaller};
pub use receive_message::MsgReceiveMessage;
pub use replace_message::{MsgReplaceDepositForBurn, MsgReplaceMessage};
pub use send_message::{MsgSendMessage, MsgSendMessageWithCaller};
pub use tokens::{RemoteTokenMessenger, TokenPair};

use std::collections::BTreeMap;

use alloy_primitives::Address;
use bon::Builder;

use crate::events::Event;
use crate::state::StateStore;

/// Default local domain identifier, overridable via the builder.
pub const DEFAULT_LOCAL_DOMAIN: u32 = 4;

/// Pending writes and events of one in-flight state transition.
///
/// A `None` value is a pending delete. The overlay is applied to the
/// backing store only on commit; dropping the context rolls the whole
/// transition back.
#[derive(Debug, Default)]
pub struct Context {
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    events: Vec<Event>,
}

impl Context {
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// The on-chain half of the cross-chain transfer protocol.
///
/// Generic over the state store and the two external collaborators so
/// hosts can supply their own persistence and token service, and tests
/// can substitute fakes.
#[derive(Builder, Debug)]
pub struct CctpModule<S, F, R> {
    store: S,
    token_factory: F,
    router: R,
    /// Account the module itself acts as when it sends or replaces
    /// messages on behalf of a depositor.
    module_address: Address,
    /// Domain identifier of the local chain.
    #[builder(default = DEFAULT_LOCAL_DOMAIN)]
    local_domain: u32,
    #[builder(skip)]
    events: Vec<Event>,
}

impl<S, F, R> CctpModule<S, F, R> {
    /// Returns the local chain's domain identifier.
    pub fn local_domain(&self) -> u32 {
        self.local_domain
    }

    /// Returns the module's own account address.
    pub fn module_address(&self) -> Address {
        self.module_address
    }

    /// Drains the events emitted by committed operations, in order.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// The token service the module burns and mints through.
    pub fn token_factory(&self) -> &F {
        &self.token_factory
    }

    pub(crate) fn token_factory_mut(&mut self) -> &mut F {
        &mut self.token_factory
    }

    pub(crate) fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }
}

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Read-only access to the backing store, bypassing any transaction.
    /// Used by queries and genesis export.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn state_get(&self, ctx: &Context, key: &[u8]) -> Option<Vec<u8>> {
        match ctx.writes.get(key) {
            Some(pending) => pending.clone(),
            None => self.store.get(key),
        }
    }

    pub(crate) fn state_has(&self, ctx: &Context, key: &[u8]) -> bool {
        self.state_get(ctx, key).is_some()
    }

    pub(crate) fn state_set(&self, ctx: &mut Context, key: &[u8], value: Vec<u8>) {
        ctx.writes.insert(key.to_vec(), Some(value));
    }

    pub(crate) fn state_delete(&self, ctx: &mut Context, key: &[u8]) {
        ctx.writes.insert(key.to_vec(), None);
    }

    /// Prefix scan that sees both committed state and the pending overlay,
    /// in ascending key order.
    pub(crate) fn state_prefix(&self, ctx: &Context, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.store.prefix_iter(prefix).collect();
        for (key, pending) in &ctx.writes {
            if !key.starts_with(prefix) {
                continue;
            }
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        merged.into_iter().collect()
    }

    /// Applies a completed transition: overlay writes land in the store
    /// and its events become visible via [`CctpModule::take_events`].
    pub(crate) fn commit(&mut self, ctx: Context) {
        for (key, pending) in ctx.writes {
            match pending {
                Some(value) => self.store.set(&key, value),
                None => self.store.delete(&key),
            }
        }
        self.events.extend(ctx.events);
    }
}
