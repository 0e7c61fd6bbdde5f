//! Storage-proof construction for the L2 resolver.
//!
//! This crate holds the proof half of the gateway core:
//! - [`slot`]: deterministic storage slot derivation for the resolver's
//!   declared layout
//! - [`value`]: the inline-or-spilled dynamic value codec
//! - [`commitment`]: lookup of the newest finalized L2 output on L1
//! - [`service`]: per-record proof generation against that commitment

pub mod commitment;
pub mod error;
pub mod service;
pub mod slot;
pub mod types;
pub mod value;

pub use error::ProofError;
pub use service::ProofService;
pub use types::{Node, ProofResult};
