//! Configuration types for the resolution gateway.
//!
//! This crate provides:
//! - Network configurations (mainnet, testnet)
//! - Contract addresses for the L1 commitment chain and the L2 resolver
//! - Configuration loading and validation

pub mod network;

pub use network::{L1Config, L2Config, NetworkConfig, NetworkConfigBuilder, NetworkType};
