use alloy_primitives::Address;
use config::{NetworkConfig, NetworkConfigBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// L1 RPC endpoint url
    pub l1_rpc_url: String,

    /// L2 RPC endpoint url
    pub l2_rpc_url: String,

    /// Network preset: "mainnet" or "testnet"
    pub network: String,

    /// Override the preset L2 resolver address
    pub resolver_address: Option<Address>,

    /// Override the preset L1 output oracle address
    pub output_oracle_address: Option<Address>,

    /// Prometheus exporter port (exporter disabled when absent)
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Resolve the network preset plus any address overrides.
    pub fn network_config(&self) -> eyre::Result<NetworkConfig> {
        let mut builder = match self.network.as_str() {
            "mainnet" => NetworkConfigBuilder::mainnet(),
            "testnet" | "sepolia" => NetworkConfigBuilder::testnet(),
            other => eyre::bail!("unknown network `{}`", other),
        };

        if let Some(resolver) = self.resolver_address {
            builder = builder.resolver(resolver);
        }
        if let Some(oracle) = self.output_oracle_address {
            builder = builder.output_oracle(oracle);
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_applies_overrides() {
        let config = Config {
            l1_rpc_url: "http://localhost:8545".into(),
            l2_rpc_url: "http://localhost:9545".into(),
            network: "testnet".into(),
            resolver_address: Some(Address::from([0xaa; 20])),
            output_oracle_address: None,
            metrics_port: None,
        };

        let network = config.network_config().unwrap();
        assert_eq!(network.l2.resolver, Address::from([0xaa; 20]));
        assert_eq!(network.l1.chain_id, 11155111);
    }

    #[test]
    fn test_network_config_rejects_unknown_preset() {
        let config = Config {
            l1_rpc_url: String::new(),
            l2_rpc_url: String::new(),
            network: "devnet".into(),
            resolver_address: None,
            output_oracle_address: None,
            metrics_port: None,
        };

        assert!(config.network_config().is_err());
    }
}
