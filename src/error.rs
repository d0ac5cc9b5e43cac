use thiserror::Error;

#[derive(Error, Debug)]
pub enum CctpError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{role} is not configured")]
    NotConfigured { role: &'static str },

    #[error("{0} paused")]
    Paused(&'static str),

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("message too short: expected at least {expected} bytes, got {actual}")]
    MessageTooShort { expected: usize, actual: usize },

    #[error("burn message must be {expected} bytes, got {actual}")]
    MalformedBurnMessage { expected: usize, actual: usize },

    #[error("unable to verify signatures: {reason}")]
    SignatureVerification { reason: String },

    #[error("nonce {nonce} from domain {source_domain} already used")]
    NonceAlreadyUsed { source_domain: u32, nonce: u64 },

    #[error("local mint token not found for remote domain {remote_domain}")]
    TokenPairNotFound { remote_domain: u32 },

    #[error("remote token messenger not found for domain {domain}")]
    RemoteTokenMessengerNotFound { domain: u32 },

    #[error("attester {0} not found")]
    AttesterNotFound(String),

    #[error("attester {0} already exists")]
    AttesterAlreadyExists(String),

    #[error("token pair for this remote domain and token already exists")]
    TokenPairAlreadyExists,

    #[error("remote token messenger for domain {0} already exists")]
    RemoteTokenMessengerAlreadyExists(u32),

    #[error("invalid signature threshold: {reason}")]
    InvalidSignatureThreshold { reason: String },

    #[error("burn failed: {0}")]
    BurnFailed(String),

    #[error("mint failed: {0}")]
    MintFailed(String),

    #[error("message router failed: {0}")]
    RouterFailed(String),
}

pub type Result<T> = std::result::Result<T, CctpError>;
