//! Genesis import and export
//!
//! The full module state as one serializable document, so a chain can be
//! initialized from a snapshot and an existing chain can be exported
//! losslessly. `export` then `init` on a fresh store reproduces the same
//! state.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::module::{CctpModule, Context, RemoteTokenMessenger, TokenPair};
use crate::protocol::Attester;
use crate::state::StateStore;

/// An inbound nonce consumed before the snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedNonce {
    pub source_domain: u32,
    pub nonce: u64,
}

/// A per-denom burn cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnLimit {
    pub denom: String,
    pub amount: U256,
}

/// Complete module state at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    pub owner: Option<Address>,
    pub pending_owner: Option<Address>,
    pub attester_manager: Option<Address>,
    pub pauser: Option<Address>,
    pub token_controller: Option<Address>,
    pub attester_list: Vec<Attester>,
    pub signature_threshold: Option<u32>,
    pub burning_and_minting_paused: bool,
    pub sending_and_receiving_paused: bool,
    pub max_message_body_size: Option<u64>,
    pub next_available_nonce: u64,
    pub per_message_burn_limit_list: Vec<BurnLimit>,
    pub token_pair_list: Vec<TokenPair>,
    pub remote_token_messenger_list: Vec<RemoteTokenMessenger>,
    pub used_nonce_list: Vec<UsedNonce>,
}

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    /// Loads a genesis document into the store.
    pub fn init_genesis(&mut self, genesis: GenesisState) {
        let mut ctx = Context::default();

        if let Some(owner) = genesis.owner {
            self.set_owner(&mut ctx, owner);
        }
        if let Some(pending_owner) = genesis.pending_owner {
            self.set_pending_owner(&mut ctx, pending_owner);
        }
        if let Some(attester_manager) = genesis.attester_manager {
            self.set_attester_manager(&mut ctx, attester_manager);
        }
        if let Some(pauser) = genesis.pauser {
            self.set_pauser(&mut ctx, pauser);
        }
        if let Some(token_controller) = genesis.token_controller {
            self.set_token_controller(&mut ctx, token_controller);
        }

        for attester in &genesis.attester_list {
            self.set_attester(&mut ctx, attester);
        }
        if let Some(signature_threshold) = genesis.signature_threshold {
            self.set_signature_threshold(&mut ctx, signature_threshold);
        }

        self.set_burning_and_minting_paused(&mut ctx, genesis.burning_and_minting_paused);
        self.set_sending_and_receiving_paused(&mut ctx, genesis.sending_and_receiving_paused);
        if let Some(size) = genesis.max_message_body_size {
            self.set_max_message_body_size(&mut ctx, size);
        }
        self.set_next_available_nonce(&mut ctx, genesis.next_available_nonce);

        for limit in &genesis.per_message_burn_limit_list {
            self.set_per_message_burn_limit(&mut ctx, &limit.denom, limit.amount);
        }
        for pair in &genesis.token_pair_list {
            self.set_token_pair(&mut ctx, pair);
        }
        for messenger in &genesis.remote_token_messenger_list {
            self.set_remote_token_messenger(&mut ctx, messenger);
        }
        for used in &genesis.used_nonce_list {
            self.mark_nonce_used(&mut ctx, used.source_domain, used.nonce);
        }

        info!(
            attesters = genesis.attester_list.len(),
            token_pairs = genesis.token_pair_list.len(),
            event = "genesis_initialized"
        );
        self.commit(ctx);
    }

    /// Snapshots the entire module state.
    pub fn export_genesis(&self) -> GenesisState {
        let ctx = Context::default();
        GenesisState {
            owner: self.owner(&ctx).ok(),
            pending_owner: self.pending_owner(&ctx),
            attester_manager: self.attester_manager(&ctx).ok(),
            pauser: self.pauser(&ctx).ok(),
            token_controller: self.token_controller(&ctx).ok(),
            attester_list: self.get_all_attesters(&ctx),
            signature_threshold: self.signature_threshold(&ctx),
            burning_and_minting_paused: self.burning_and_minting_paused(&ctx),
            sending_and_receiving_paused: self.sending_and_receiving_paused(&ctx),
            max_message_body_size: self.max_message_body_size(&ctx),
            next_available_nonce: self.next_available_nonce(&ctx),
            per_message_burn_limit_list: self
                .get_per_message_burn_limits(&ctx)
                .into_iter()
                .map(|(denom, amount)| BurnLimit { denom, amount })
                .collect(),
            token_pair_list: self.get_all_token_pairs(&ctx),
            remote_token_messenger_list: self.get_all_remote_token_messengers(&ctx),
            used_nonce_list: self
                .get_used_nonces(&ctx)
                .into_iter()
                .map(|(source_domain, nonce)| UsedNonce { source_domain, nonce })
                .collect(),
        }
    }
}
