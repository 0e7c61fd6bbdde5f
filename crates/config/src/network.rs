//! Network configuration for the resolution gateway.
//!
//! Provides chain-specific addresses and parameters for different networks
//! (mainnet, testnet, etc.).

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Network type (mainnet or testnet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

/// L1 (Ethereum) network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L1Config {
    /// Chain ID
    pub chain_id: u64,
    /// L2OutputOracle contract address (state commitment chain)
    pub output_oracle: Address,
    /// Block time in seconds (12 for Ethereum mainnet)
    pub block_time_secs: u64,
}

impl L1Config {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            // https://etherscan.io/address/0xdfe97868233d1aa22e815a266982f2cf17685a27
            output_oracle: address!("0xdfe97868233d1aa22e815a266982f2cf17685a27"),
            block_time_secs: 12,
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            // https://sepolia.etherscan.io/address/0x90E9c4f8a994a250F6aEfd61CAFb4F2e895D458F
            output_oracle: address!("0x90E9c4f8a994a250F6aEfd61CAFb4F2e895D458F"),
            block_time_secs: 12,
        }
    }
}

/// L2 (Optimism) network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Config {
    /// Chain ID
    pub chain_id: u64,
    /// Public resolver contract address holding the name records
    pub resolver: Address,
    /// Block time in seconds (2 for OP Stack chains)
    pub block_time_secs: u64,
}

impl L2Config {
    /// Optimism mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 10,
            // https://optimistic.etherscan.io/address/0x2D2d42a1200d8e3ACDFa45Fe58b47F45ebbbaCd6
            resolver: address!("0x2D2d42a1200d8e3ACDFa45Fe58b47F45ebbbaCd6"),
            block_time_secs: 2,
        }
    }

    /// Optimism Sepolia testnet configuration.
    ///
    /// The resolver is deployed per environment; override it with
    /// [`NetworkConfigBuilder::resolver`].
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155420,
            resolver: Address::ZERO,
            block_time_secs: 2,
        }
    }
}

/// Complete network configuration for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network type (mainnet or testnet)
    pub network_type: NetworkType,
    /// Ethereum/L1 configuration
    pub l1: L1Config,
    /// Optimism/L2 configuration
    pub l2: L2Config,
}

impl NetworkConfig {
    /// Create mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            l1: L1Config::mainnet(),
            l2: L2Config::mainnet(),
        }
    }

    /// Create testnet (Sepolia) configuration.
    pub const fn sepolia() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            l1: L1Config::sepolia(),
            l2: L2Config::sepolia(),
        }
    }

    /// Create configuration from network type.
    pub const fn from_network_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::Mainnet => Self::mainnet(),
            NetworkType::Testnet => Self::sepolia(),
        }
    }
}

/// Builder for custom network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    network_type: NetworkType,
    l1: L1Config,
    l2: L2Config,
}

impl NetworkConfigBuilder {
    /// Start with mainnet defaults.
    pub const fn mainnet() -> Self {
        Self {
            network_type: NetworkType::Mainnet,
            l1: L1Config::mainnet(),
            l2: L2Config::mainnet(),
        }
    }

    /// Start with testnet defaults.
    pub const fn testnet() -> Self {
        Self {
            network_type: NetworkType::Testnet,
            l1: L1Config::sepolia(),
            l2: L2Config::sepolia(),
        }
    }

    /// Override the L1 output oracle address.
    pub const fn output_oracle(mut self, oracle: Address) -> Self {
        self.l1.output_oracle = oracle;
        self
    }

    /// Override the L2 resolver address.
    pub const fn resolver(mut self, resolver: Address) -> Self {
        self.l2.resolver = resolver;
        self
    }

    /// Build the final configuration.
    pub const fn build(self) -> NetworkConfig {
        NetworkConfig {
            network_type: self.network_type,
            l1: self.l1,
            l2: self.l2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_config() {
        let config = NetworkConfig::mainnet();
        assert_eq!(config.l1.chain_id, 1);
        assert_eq!(config.l2.chain_id, 10);
        assert_ne!(config.l1.output_oracle, Address::ZERO);
        assert_ne!(config.l2.resolver, Address::ZERO);
    }

    #[test]
    fn test_builder_overrides() {
        let resolver = Address::from([0xaa; 20]);
        let config = NetworkConfigBuilder::testnet().resolver(resolver).build();

        assert_eq!(config.network_type, NetworkType::Testnet);
        assert_eq!(config.l2.resolver, resolver);
    }

    #[test]
    fn test_from_network_type() {
        let mainnet = NetworkConfig::from_network_type(NetworkType::Mainnet);
        assert_eq!(mainnet.l1.chain_id, 1);

        let testnet = NetworkConfig::from_network_type(NetworkType::Testnet);
        assert_eq!(testnet.l1.chain_id, 11155111);
    }
}
