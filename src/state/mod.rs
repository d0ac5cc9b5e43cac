//! Persistent state abstraction
//!
//! The module core is written against a narrow key-value [`StateStore`]
//! trait so it can run on top of whatever persistence the host chain
//! provides. [`MemoryStore`] is the in-crate implementation used by tests
//! and by hosts that snapshot state themselves.

pub mod keys;

mod store;

pub use store::{MemoryStore, StateStore};
