//! Capability traits for external collaborators
//!
//! The module core never talks to the token service or the downstream
//! message router directly; both sit behind traits so hosts can wire in
//! their own implementations and tests can substitute fakes, including
//! ones that simulate failures.

use alloy_primitives::{Address, U256};

use crate::error::Result;

/// The external token mint/burn service.
///
/// Only one denom is mintable at a time; [`TokenFactory::minting_denom`]
/// names it and deposit-for-burn rejects any other burn token.
pub trait TokenFactory {
    /// The denom this factory is currently willing to mint and burn.
    fn minting_denom(&self) -> String;

    /// Burns `amount` of `denom` held by `from`.
    fn burn(&mut self, from: Address, denom: &str, amount: U256) -> Result<()>;

    /// Mints `amount` of `denom` to `to`.
    fn mint(&mut self, to: Address, denom: &str, amount: U256) -> Result<()>;
}

/// What a router did with a received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterOutcome {
    /// The router recognized and processed the message.
    Handled,
    /// The message is not addressed to the router. Not an error; receive
    /// continues normally.
    NotApplicable,
}

/// Downstream consumer of raw received messages.
///
/// The contract deliberately separates "unrecognized payload"
/// ([`RouterOutcome::NotApplicable`], non-fatal) from a real processing
/// failure (`Err`, which aborts the whole receive).
pub trait MessageRouter {
    fn route(&mut self, message: &[u8]) -> Result<RouterOutcome>;
}
