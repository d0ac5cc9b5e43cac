//! Attester set storage
//!
//! Attesters are indexed by their hex-encoded public key; set order
//! carries no meaning here, ordering only matters inside an attestation.

use crate::protocol::Attester;
use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn get_attester(&self, ctx: &Context, public_key_hex: &str) -> Option<Attester> {
        self.state_get(ctx, &keys::attester_key(public_key_hex))
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    pub(crate) fn set_attester(&self, ctx: &mut Context, attester: &Attester) {
        let bytes = serde_json::to_vec(attester).expect("attester record serializes");
        self.state_set(ctx, &keys::attester_key(&attester.attester), bytes);
    }

    pub(crate) fn delete_attester(&self, ctx: &mut Context, public_key_hex: &str) {
        self.state_delete(ctx, &keys::attester_key(public_key_hex));
    }

    pub fn get_all_attesters(&self, ctx: &Context) -> Vec<Attester> {
        self.state_prefix(ctx, keys::ATTESTER_KEY_PREFIX)
            .into_iter()
            .filter_map(|(_, value)| serde_json::from_slice(&value).ok())
            .collect()
    }
}
