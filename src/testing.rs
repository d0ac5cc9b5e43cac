//! Shared test fixtures: deterministic signers and fake collaborators.
//!
//! Public so integration tests and downstream crates can drive the
//! module without a real chain behind it.

use alloy_primitives::{address, hex, keccak256, Address, U256};
use k256::ecdsa::{SigningKey, VerifyingKey};

use crate::error::{CctpError, Result};
use crate::protocol::Attester;
use crate::traits::{MessageRouter, RouterOutcome, TokenFactory};

/// Stand-in for the module's own account.
pub const TEST_MODULE_ADDRESS: Address = address!("00000000000000000000000000000000000cc1c0");

/// A secp256k1 signer with a key derived deterministically from a seed.
#[derive(Debug, Clone)]
pub struct TestSigner {
    key: SigningKey,
}

impl TestSigner {
    /// Panics on a zero seed (not a valid scalar).
    pub fn new(seed: u8) -> Self {
        let key = SigningKey::from_bytes(&[seed; 32].into()).expect("seed is a valid scalar");
        Self { key }
    }

    /// Hex-encoded 65-byte uncompressed public key, as registered in the
    /// attester set.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    pub fn attester(&self) -> Attester {
        Attester::new(self.public_key_hex())
    }

    /// Account-style address of the key: last 20 bytes of the Keccak-256
    /// digest of the untagged public key.
    pub fn address(&self) -> Address {
        Address::from_slice(&keccak256(&self.public_key_bytes()[1..])[12..])
    }

    /// Signs the Keccak-256 digest of `message`, returning r || s || v.
    pub fn sign(&self, message: &[u8]) -> [u8; 65] {
        let digest = keccak256(message);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest.as_slice())
            .expect("signing a 32-byte digest succeeds");
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        out
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        VerifyingKey::from(&self.key)
            .to_encoded_point(false)
            .as_bytes()
            .to_vec()
    }
}

/// Builds a valid attestation over `message`: one signature per signer,
/// concatenated in ascending signer-address order.
pub fn sign_attestation(message: &[u8], signers: &[&TestSigner]) -> Vec<u8> {
    let mut sorted = signers.to_vec();
    sorted.sort_by_key(|signer| signer.address());
    let mut attestation = Vec::with_capacity(sorted.len() * 65);
    for signer in sorted {
        attestation.extend_from_slice(&signer.sign(message));
    }
    attestation
}

/// Records burns and mints instead of touching a bank; failures can be
/// staged one call ahead.
#[derive(Debug)]
pub struct MockTokenFactory {
    denom: String,
    burns: Vec<(Address, String, U256)>,
    mints: Vec<(Address, String, U256)>,
    fail_next_burn: bool,
    fail_next_mint: bool,
}

impl MockTokenFactory {
    pub fn new(denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            burns: Vec::new(),
            mints: Vec::new(),
            fail_next_burn: false,
            fail_next_mint: false,
        }
    }

    pub fn burns(&self) -> Vec<(Address, String, U256)> {
        self.burns.clone()
    }

    pub fn mints(&self) -> Vec<(Address, String, U256)> {
        self.mints.clone()
    }

    pub fn fail_next_burn(&mut self) {
        self.fail_next_burn = true;
    }

    pub fn fail_next_mint(&mut self) {
        self.fail_next_mint = true;
    }
}

impl TokenFactory for MockTokenFactory {
    fn minting_denom(&self) -> String {
        self.denom.clone()
    }

    fn burn(&mut self, from: Address, denom: &str, amount: U256) -> Result<()> {
        if self.fail_next_burn {
            self.fail_next_burn = false;
            return Err(CctpError::BurnFailed("staged burn failure".to_string()));
        }
        self.burns.push((from, denom.to_string(), amount));
        Ok(())
    }

    fn mint(&mut self, to: Address, denom: &str, amount: U256) -> Result<()> {
        if self.fail_next_mint {
            self.fail_next_mint = false;
            return Err(CctpError::MintFailed("staged mint failure".to_string()));
        }
        self.mints.push((to, denom.to_string(), amount));
        Ok(())
    }
}

/// A router with no downstream handlers: every message is declined.
#[derive(Debug, Default)]
pub struct NoopRouter;

impl MessageRouter for NoopRouter {
    fn route(&mut self, _message: &[u8]) -> Result<RouterOutcome> {
        Ok(RouterOutcome::NotApplicable)
    }
}

/// A router whose downstream handler always fails.
#[derive(Debug, Default)]
pub struct FailingRouter;

impl MessageRouter for FailingRouter {
    fn route(&mut self, _message: &[u8]) -> Result<RouterOutcome> {
        Err(CctpError::RouterFailed(
            "downstream handler failure".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signer_is_deterministic() {
        let a = TestSigner::new(1);
        let b = TestSigner::new(1);
        assert_eq!(a.public_key_hex(), b.public_key_hex());
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), TestSigner::new(2).address());
    }

    #[test]
    fn test_signature_shape() {
        let signer = TestSigner::new(1);
        let signature = signer.sign(b"payload");
        assert_eq!(signature.len(), 65);
        assert!(signature[64] < 2);
    }

    #[test]
    fn test_sign_attestation_orders_by_address() {
        let a = TestSigner::new(1);
        let b = TestSigner::new(2);
        let forward = sign_attestation(b"payload", &[&a, &b]);
        let reverse = sign_attestation(b"payload", &[&b, &a]);
        assert_eq!(forward, reverse);
        assert_eq!(forward.len(), 130);
    }

    #[test]
    fn test_mock_token_factory_staged_failure() {
        let mut factory = MockTokenFactory::new("uusdc");
        factory.fail_next_burn();
        assert!(factory
            .burn(TEST_MODULE_ADDRESS, "uusdc", U256::from(1u64))
            .is_err());
        // The failure is consumed.
        factory
            .burn(TEST_MODULE_ADDRESS, "uusdc", U256::from(1u64))
            .unwrap();
        assert_eq!(factory.burns().len(), 1);
    }
}
