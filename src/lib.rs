//! # cctp-module
//!
//! The on-chain core of a Cross-Chain Transfer Protocol (CCTP) deployment:
//! a burn-and-mint bridge module that sends attested messages between
//! chain domains and moves a stablecoin by burning it at the source and
//! minting it at the destination.
//!
//! The module is host-agnostic. Persistence sits behind [`StateStore`],
//! the token service behind [`TokenFactory`], and downstream message
//! consumers behind [`MessageRouter`]; a chain runtime wires in its own
//! implementations and the module supplies the protocol semantics:
//! wire formats, multi-signature attestation verification, replay
//! protection, and the role-gated admin surface.
//!
//! ## Quick Start
//!
//! ```rust
//! use alloy_primitives::{address, Bytes, U256};
//! use cctp_module::{CctpModule, GenesisState, MemoryStore, MsgDepositForBurn};
//! use cctp_module::testing::{MockTokenFactory, NoopRouter};
//!
//! # fn main() -> Result<(), cctp_module::CctpError> {
//! let mut module = CctpModule::builder()
//!     .store(MemoryStore::new())
//!     .token_factory(MockTokenFactory::new("uusdc"))
//!     .router(NoopRouter)
//!     .module_address(address!("00000000000000000000000000000000000cc1c0"))
//!     .build();
//!
//! let owner = address!("742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
//! module.init_genesis(GenesisState {
//!     owner: Some(owner),
//!     ..GenesisState::default()
//! });
//!
//! // The owner registers the token messenger on domain 0, then a user
//! // burns 500 uusdc toward it.
//! module.add_remote_token_messenger(owner, 0, &Bytes::from(vec![9u8; 32]))?;
//! let nonce = module.deposit_for_burn(MsgDepositForBurn {
//!     from: owner,
//!     amount: U256::from(500u64),
//!     destination_domain: 0,
//!     mint_recipient: Bytes::from(vec![3u8; 32]),
//!     burn_token: "uusdc".to_string(),
//! })?;
//! assert_eq!(nonce, 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! - [`protocol`]: wire formats ([`Message`], [`BurnMessage`]) and
//!   attestation verification
//! - [`module`]: the [`CctpModule`] orchestrator and every protocol
//!   operation
//! - [`state`]: the [`StateStore`] abstraction and key layout
//! - [`genesis`] / [`query`]: snapshot import/export and the paginated
//!   read surface
//! - [`testing`]: deterministic signers and fake collaborators

pub mod error;
pub mod events;
pub mod genesis;
pub mod module;
pub mod protocol;
pub mod query;
pub mod state;
pub mod testing;
pub mod traits;

pub use error::{CctpError, Result};
pub use events::Event;
pub use genesis::GenesisState;
pub use module::{
    CctpModule, Context, MsgDepositForBurn, MsgDepositForBurnWithCaller, MsgReceiveMessage,
    MsgReplaceDepositForBurn, MsgReplaceMessage, MsgSendMessage, MsgSendMessageWithCaller,
    RemoteTokenMessenger, TokenPair,
};
pub use protocol::{verify_attestation_signatures, Attester, BurnMessage, Message};
pub use query::{PageRequest, PageResponse};
pub use state::{MemoryStore, StateStore};
pub use traits::{MessageRouter, RouterOutcome, TokenFactory};
