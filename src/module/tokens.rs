//! Token pairs and remote token messengers
//!
//! A token pair maps a (remote domain, remote token digest) to the local
//! denom minted on receive. A remote token messenger is the counterparty
//! module on another domain that deposit-for-burn messages are addressed
//! to, and that inbound burn messages must come from.

use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};

use crate::state::keys;
use crate::state::StateStore;

use super::{CctpModule, Context};

/// Mapping from a remote token to the local denom it mints as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub remote_domain: u32,
    pub remote_token: FixedBytes<32>,
    /// Stored lowercased.
    pub local_token: String,
}

/// The token messenger registered for a remote domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTokenMessenger {
    pub domain_id: u32,
    pub address: FixedBytes<32>,
}

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn get_token_pair(
        &self,
        ctx: &Context,
        remote_domain: u32,
        remote_token: &FixedBytes<32>,
    ) -> Option<TokenPair> {
        self.state_get(ctx, &keys::token_pair_key(remote_domain, remote_token.as_slice()))
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    pub(crate) fn set_token_pair(&self, ctx: &mut Context, pair: &TokenPair) {
        let bytes = serde_json::to_vec(pair).expect("token pair record serializes");
        self.state_set(
            ctx,
            &keys::token_pair_key(pair.remote_domain, pair.remote_token.as_slice()),
            bytes,
        );
    }

    pub(crate) fn delete_token_pair(
        &self,
        ctx: &mut Context,
        remote_domain: u32,
        remote_token: &FixedBytes<32>,
    ) {
        self.state_delete(ctx, &keys::token_pair_key(remote_domain, remote_token.as_slice()));
    }

    pub fn get_all_token_pairs(&self, ctx: &Context) -> Vec<TokenPair> {
        self.state_prefix(ctx, keys::TOKEN_PAIR_KEY_PREFIX)
            .into_iter()
            .filter_map(|(_, value)| serde_json::from_slice(&value).ok())
            .collect()
    }

    pub fn get_remote_token_messenger(
        &self,
        ctx: &Context,
        domain: u32,
    ) -> Option<RemoteTokenMessenger> {
        self.state_get(ctx, &keys::remote_token_messenger_key(domain))
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }

    pub(crate) fn set_remote_token_messenger(
        &self,
        ctx: &mut Context,
        messenger: &RemoteTokenMessenger,
    ) {
        let bytes = serde_json::to_vec(messenger).expect("remote token messenger serializes");
        self.state_set(ctx, &keys::remote_token_messenger_key(messenger.domain_id), bytes);
    }

    pub(crate) fn delete_remote_token_messenger(&self, ctx: &mut Context, domain: u32) {
        self.state_delete(ctx, &keys::remote_token_messenger_key(domain));
    }

    pub fn get_all_remote_token_messengers(&self, ctx: &Context) -> Vec<RemoteTokenMessenger> {
        self.state_prefix(ctx, keys::REMOTE_TOKEN_MESSENGER_KEY_PREFIX)
            .into_iter()
            .filter_map(|(_, value)| serde_json::from_slice(&value).ok())
            .collect()
    }
}
