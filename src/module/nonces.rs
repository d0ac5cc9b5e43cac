//! Nonce ledger
//!
//! Outbound nonces come from a single monotonically increasing counter
//! per chain. Inbound `(source_domain, nonce)` pairs are recorded as
//! spent forever; existence of the record means "already consumed".

use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Returns the nonce the next outbound message will be assigned.
    pub fn next_available_nonce(&self, ctx: &Context) -> u64 {
        self.state_get(ctx, keys::NEXT_AVAILABLE_NONCE_KEY)
            .and_then(|bytes| bytes.try_into().ok())
            .map(u64::from_be_bytes)
            .unwrap_or(0)
    }

    /// Returns the current counter value and persists counter + 1.
    ///
    /// Called exactly once per outbound send; the read-modify-write is
    /// atomic because the whole transition is.
    pub(crate) fn reserve_and_increment_nonce(&self, ctx: &mut Context) -> u64 {
        let nonce = self.next_available_nonce(ctx);
        self.set_next_available_nonce(ctx, nonce + 1);
        nonce
    }

    pub(crate) fn set_next_available_nonce(&self, ctx: &mut Context, nonce: u64) {
        self.state_set(ctx, keys::NEXT_AVAILABLE_NONCE_KEY, nonce.to_be_bytes().to_vec());
    }

    /// Whether an inbound `(source_domain, nonce)` pair was already
    /// consumed.
    pub fn is_nonce_used(&self, ctx: &Context, source_domain: u32, nonce: u64) -> bool {
        self.state_has(ctx, &keys::used_nonce_key(source_domain, nonce))
    }

    /// Marks an inbound nonce as consumed. Idempotent.
    pub(crate) fn mark_nonce_used(&self, ctx: &mut Context, source_domain: u32, nonce: u64) {
        self.state_set(ctx, &keys::used_nonce_key(source_domain, nonce), vec![1]);
    }

    /// All consumed `(source_domain, nonce)` pairs, in key order.
    pub fn get_used_nonces(&self, ctx: &Context) -> Vec<(u32, u64)> {
        self.state_prefix(ctx, keys::USED_NONCE_KEY_PREFIX)
            .into_iter()
            .filter_map(|(key, _)| {
                let suffix = &key[keys::USED_NONCE_KEY_PREFIX.len()..];
                if suffix.len() != 12 {
                    return None;
                }
                let source_domain = u32::from_be_bytes(suffix[..4].try_into().ok()?);
                let nonce = u64::from_be_bytes(suffix[4..].try_into().ok()?);
                Some((source_domain, nonce))
            })
            .collect()
    }
}
