//! Resolution gateway CLI.
//!
//! One-shot record resolution against the configured chains: derives the
//! record's storage slots, proves them against the latest finalized L1
//! commitment, and prints the ABI-encoded `(result, proof)` response.

use alloy_primitives::{Address, FixedBytes, B256, U256};
use clap::{Parser, Subcommand};
use gateway::{
    config::Config,
    metrics::{install_prometheus_exporter, Metrics},
    resolve_once,
};
use resolve::RecordCall;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Storage-proof resolution gateway for the L2 name resolver")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a record and print the ABI-encoded (result, proof) response
    Resolve {
        /// Resolution function signature, e.g. "text(bytes32,string)"
        signature: String,

        /// Resolver contract address on L2 (defaults to the network preset)
        #[arg(long)]
        context: Option<Address>,

        /// Namehash of the name being resolved
        #[arg(long)]
        node: B256,

        /// Text record key
        #[arg(long)]
        key: Option<String>,

        /// ABI content-type bitmask
        #[arg(long)]
        content_types: Option<U256>,

        /// Interface identifier (4-byte selector)
        #[arg(long)]
        interface_id: Option<FixedBytes<4>>,

        /// DNS name hash
        #[arg(long)]
        name: Option<B256>,

        /// DNS resource type
        #[arg(long)]
        resource: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
    }
    let metrics = Metrics::new();

    let network = config.network_config()?;
    info!("Loaded config:");
    info!("  Network: {}", config.network);
    info!("  L1 RPC URL: {}", config.l1_rpc_url);
    info!("  L2 RPC URL: {}", config.l2_rpc_url);
    info!("  Output oracle: {}", network.l1.output_oracle);
    info!("  Resolver: {}", network.l2.resolver);

    match cli.command {
        Command::Resolve {
            signature,
            context,
            node,
            key,
            content_types,
            interface_id,
            name,
            resource,
        } => {
            let call = RecordCall {
                context: context.unwrap_or(network.l2.resolver),
                node,
                key,
                content_types,
                interface_id,
                name,
                resource,
            };

            info!(signature, node = %call.node, "Resolving record");
            let started = Instant::now();

            match resolve_once(&config, &signature, &call).await {
                Ok(Some(response)) => {
                    metrics.record_resolution(&signature, true, started.elapsed());
                    println!("{}", response);
                }
                Ok(None) => {
                    metrics.record_no_match(&signature);
                    eyre::bail!("signature `{}` is not resolved by this gateway", signature);
                }
                Err(e) => {
                    metrics.record_resolution(&signature, false, started.elapsed());
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
