//! Gateway wiring.
//!
//! Builds providers and the resolution router from configuration. The CCIP
//! HTTP transport sits in front of this in production; the binary drives the
//! same router directly for operations and debugging.

pub mod config;
pub mod metrics;

use crate::config::Config;
use alloy_primitives::Bytes;
use proof::ProofService;
use resolve::{RecordCall, Router};
use tracing::info;

/// Resolve a single `(signature, call)` pair against the configured chains.
///
/// Returns `Ok(None)` when the signature is not one this gateway resolves.
pub async fn resolve_once(
    config: &Config,
    signature: &str,
    call: &RecordCall,
) -> eyre::Result<Option<Bytes>> {
    let network = config.network_config()?;

    info!("Connecting to L1...");
    let l1_provider = client::create_provider(&config.l1_rpc_url).await?;
    info!("Connecting to L2...");
    let l2_provider = client::create_provider(&config.l2_rpc_url).await?;

    let service = ProofService::new(l1_provider, l2_provider, network.l1.output_oracle);
    let router = Router::new(service);

    Ok(router.handle(signature, call).await?)
}
