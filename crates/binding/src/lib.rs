//! Contract bindings for all external contracts.
//!
//! This crate consolidates the Solidity interfaces the gateway reads from or
//! encodes for:
//! - L2OutputOracle (the L1 state commitment chain)
//! - The proof structures the on-chain verifier decodes
//!
//! All bindings are generated using alloy's `sol!` macro. The proof structs
//! double as the gateway's proof parameter type registry: the verifier
//! decodes exactly these shapes, so the proof service and the resolution
//! router must both source them from here.

pub mod oracle;
pub mod proof;
