//! Common test setup utilities shared across integration tests.
#![allow(dead_code)] // used in ignored tests

use alloy_primitives::{keccak256, B256};
use alloy_provider::Provider;
use gateway::config::Config;

/// Load test configuration. Panics if not found or invalid.
pub fn load_test_config() -> Config {
    let config_path = "tests/test-config.toml";
    Config::from_file(config_path).expect("Failed to load tests/test-config.toml.")
}

/// Common test setup: create a provider for the given RPC url.
pub async fn setup_provider(url: &str) -> impl Provider + Clone {
    client::create_provider(url)
        .await
        .expect("Failed to create provider")
}

/// Compute the namehash of a dot-separated name.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut data = [0u8; 64];
        data[0..32].copy_from_slice(node.as_slice());
        data[32..64].copy_from_slice(label_hash.as_slice());
        node = keccak256(data);
    }
    node
}
