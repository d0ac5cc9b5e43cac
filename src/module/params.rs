//! Tunable parameters
//!
//! Signature threshold, max message body size, and per-denom burn limits.
//! The size and limit parameters are optional; absence means unlimited.

use alloy_primitives::U256;

use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Number of attester signatures an attestation must carry, if set.
    pub fn signature_threshold(&self, ctx: &Context) -> Option<u32> {
        self.state_get(ctx, keys::SIGNATURE_THRESHOLD_KEY)
            .and_then(|bytes| bytes.try_into().ok())
            .map(u32::from_be_bytes)
    }

    pub(crate) fn set_signature_threshold(&self, ctx: &mut Context, amount: u32) {
        self.state_set(ctx, keys::SIGNATURE_THRESHOLD_KEY, amount.to_be_bytes().to_vec());
    }

    /// Maximum allowed message body length, if configured.
    pub fn max_message_body_size(&self, ctx: &Context) -> Option<u64> {
        self.state_get(ctx, keys::MAX_MESSAGE_BODY_SIZE_KEY)
            .and_then(|bytes| bytes.try_into().ok())
            .map(u64::from_be_bytes)
    }

    pub(crate) fn set_max_message_body_size(&self, ctx: &mut Context, size: u64) {
        self.state_set(ctx, keys::MAX_MESSAGE_BODY_SIZE_KEY, size.to_be_bytes().to_vec());
    }

    /// Per-message burn limit for a denom, if configured. The denom is
    /// stored lowercased.
    pub fn per_message_burn_limit(&self, ctx: &Context, denom: &str) -> Option<U256> {
        self.state_get(ctx, &keys::per_message_burn_limit_key(denom))
            .map(|bytes| U256::from_be_slice(&bytes))
    }

    pub(crate) fn set_per_message_burn_limit(&self, ctx: &mut Context, denom: &str, amount: U256) {
        self.state_set(
            ctx,
            &keys::per_message_burn_limit_key(denom),
            amount.to_be_bytes::<32>().to_vec(),
        );
    }

    /// All configured burn limits as `(denom, amount)` pairs.
    pub fn get_per_message_burn_limits(&self, ctx: &Context) -> Vec<(String, U256)> {
        self.state_prefix(ctx, keys::PER_MESSAGE_BURN_LIMIT_KEY_PREFIX)
            .into_iter()
            .filter_map(|(key, value)| {
                let denom =
                    String::from_utf8(key[keys::PER_MESSAGE_BURN_LIMIT_KEY_PREFIX.len()..].to_vec())
                        .ok()?;
                Some((denom, U256::from_be_slice(&value)))
            })
            .collect()
    }
}
