//! Typed events emitted by the module
//!
//! Every state-mutating operation appends events to its transaction
//! context; the host reads them back after a successful commit and
//! publishes them to off-chain consumers (attesters watch `MessageSent`).

use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    MessageSent {
        message: Bytes,
    },
    MessageReceived {
        caller: Address,
        source_domain: u32,
        nonce: u64,
        sender: FixedBytes<32>,
        message_body: Bytes,
    },
    DepositForBurn {
        nonce: u64,
        /// Hex of the Keccak-256 digest of the burned denom
        burn_token: String,
        amount: U256,
        depositor: Address,
        mint_recipient: FixedBytes<32>,
        destination_domain: u32,
        destination_token_messenger: FixedBytes<32>,
        destination_caller: FixedBytes<32>,
    },
    MintAndWithdraw {
        mint_recipient: FixedBytes<32>,
        amount: U256,
        mint_token: String,
    },

    AttesterEnabled {
        attester: String,
    },
    AttesterDisabled {
        attester: String,
    },
    SignatureThresholdUpdated {
        old_signature_threshold: u32,
        new_signature_threshold: u32,
    },

    OwnershipTransferStarted {
        previous_owner: Address,
        new_owner: Address,
    },
    OwnerUpdated {
        previous_owner: Address,
        new_owner: Address,
    },
    AttesterManagerUpdated {
        previous_attester_manager: Option<Address>,
        new_attester_manager: Address,
    },
    PauserUpdated {
        previous_pauser: Option<Address>,
        new_pauser: Address,
    },
    TokenControllerUpdated {
        previous_token_controller: Option<Address>,
        new_token_controller: Address,
    },

    BurningAndMintingPaused {},
    BurningAndMintingUnpaused {},
    SendingAndReceivingPaused {},
    SendingAndReceivingUnpaused {},

    TokenPairLinked {
        local_token: String,
        remote_domain: u32,
        remote_token: FixedBytes<32>,
    },
    TokenPairUnlinked {
        local_token: String,
        remote_domain: u32,
        remote_token: FixedBytes<32>,
    },
    RemoteTokenMessengerAdded {
        domain: u32,
        address: FixedBytes<32>,
    },
    RemoteTokenMessengerRemoved {
        domain: u32,
        address: FixedBytes<32>,
    },
    BurnLimitPerMessageSet {
        token: String,
        burn_limit_per_message: U256,
    },
    MaxMessageBodySizeUpdated {
        new_max_message_body_size: u64,
    },
}
