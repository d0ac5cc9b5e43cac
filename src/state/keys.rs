//! Store key layout
//!
//! Every record kind lives under its own stable prefix so unrelated
//! records never collide and prefix iteration stays scoped.

pub const OWNER_KEY: &[u8] = b"owner";
pub const PENDING_OWNER_KEY: &[u8] = b"pending-owner";
pub const ATTESTER_MANAGER_KEY: &[u8] = b"attester-manager";
pub const PAUSER_KEY: &[u8] = b"pauser";
pub const TOKEN_CONTROLLER_KEY: &[u8] = b"token-controller";

pub const BURNING_AND_MINTING_PAUSED_KEY: &[u8] = b"BurningAndMintingPaused/value/";
pub const SENDING_AND_RECEIVING_PAUSED_KEY: &[u8] = b"SendingAndReceivingMessagesPaused/value/";
pub const MAX_MESSAGE_BODY_SIZE_KEY: &[u8] = b"MaxMessageBodySize/value/";
pub const NEXT_AVAILABLE_NONCE_KEY: &[u8] = b"NextAvailableNonce/value/";
pub const SIGNATURE_THRESHOLD_KEY: &[u8] = b"SignatureThreshold/value/";

pub const ATTESTER_KEY_PREFIX: &[u8] = b"Attester/value/";
pub const PER_MESSAGE_BURN_LIMIT_KEY_PREFIX: &[u8] = b"PerMessageBurnLimit/value/";
pub const REMOTE_TOKEN_MESSENGER_KEY_PREFIX: &[u8] = b"RemoteTokenMessenger/value/";
pub const TOKEN_PAIR_KEY_PREFIX: &[u8] = b"TokenPair/value/";
pub const USED_NONCE_KEY_PREFIX: &[u8] = b"UsedNonce/value/";

/// Key of one attester record, indexed by its hex-encoded public key.
pub fn attester_key(public_key_hex: &str) -> Vec<u8> {
    [ATTESTER_KEY_PREFIX, public_key_hex.as_bytes()].concat()
}

/// Key of the per-message burn limit for a (lowercased) denom.
pub fn per_message_burn_limit_key(denom: &str) -> Vec<u8> {
    [PER_MESSAGE_BURN_LIMIT_KEY_PREFIX, denom.as_bytes()].concat()
}

/// Key of the remote token messenger registered for a domain.
pub fn remote_token_messenger_key(domain: u32) -> Vec<u8> {
    [REMOTE_TOKEN_MESSENGER_KEY_PREFIX, &domain.to_be_bytes()[..]].concat()
}

/// Key of a token pair, indexed by remote domain and remote token.
pub fn token_pair_key(remote_domain: u32, remote_token: &[u8]) -> Vec<u8> {
    [
        TOKEN_PAIR_KEY_PREFIX,
        &remote_domain.to_be_bytes()[..],
        remote_token,
    ]
    .concat()
}

/// Key of a spent inbound nonce, indexed by source domain and nonce.
pub fn used_nonce_key(source_domain: u32, nonce: u64) -> Vec<u8> {
    [
        USED_NONCE_KEY_PREFIX,
        &source_domain.to_be_bytes()[..],
        &nonce.to_be_bytes()[..],
    ]
    .concat()
}
