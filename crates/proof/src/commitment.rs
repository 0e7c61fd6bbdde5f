//! L1 commitment lookup.
//!
//! Walks the L2 output oracle backwards from the newest proposal to find the
//! most recent output whose finalization period has elapsed. The oracle is
//! append-only and only ever read.

use crate::error::ProofError;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::BlockNumberOrTag;
use binding::oracle::IL2OutputOracle;
use tracing::debug;

/// Bounded lookback when walking proposals back to the newest finalized one.
const MAX_OUTPUT_LOOKBACK: u64 = 100;

/// An L2 output root committed and finalized on L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment {
    /// Index of the output in the oracle.
    pub output_index: U256,
    /// The committed output root.
    pub output_root: B256,
    /// L2 block the output commits to.
    pub l2_block: u64,
    /// L1 timestamp at which the output was proposed.
    pub timestamp: u64,
}

/// Find the newest finalized L2 output on L1.
///
/// Returns [`ProofError::CommitmentUnavailable`] while the oracle is empty
/// or every proposal within the lookback window is still inside its
/// finalization period.
pub async fn latest_finalized_commitment<P>(
    l1_provider: &P,
    oracle_address: Address,
) -> Result<Commitment, ProofError>
where
    P: Provider + Clone,
{
    let oracle = IL2OutputOracle::new(oracle_address, l1_provider);

    // latestOutputIndex reverts while the oracle holds no proposals
    let latest_index = match oracle.latestOutputIndex().call().await {
        Ok(index) => index,
        Err(alloy_contract::Error::TransportError(e)) if e.is_error_resp() => {
            return Err(ProofError::CommitmentUnavailable);
        }
        Err(e) => return Err(ProofError::ChainRead(e.to_string())),
    };

    let finalization_period = oracle
        .FINALIZATION_PERIOD_SECONDS()
        .call()
        .await
        .map_err(|e| ProofError::ChainRead(e.to_string()))?;
    let finalization_period = u64::try_from(finalization_period).map_err(|_| {
        ProofError::MalformedState("finalization period exceeds u64 range".into())
    })?;

    let now = l1_provider
        .get_block_by_number(BlockNumberOrTag::Latest)
        .await
        .map_err(|e| ProofError::ChainRead(e.to_string()))?
        .ok_or_else(|| ProofError::ChainRead("latest L1 block not found".into()))?
        .header
        .timestamp;

    let mut index = latest_index;
    for _ in 0..=MAX_OUTPUT_LOOKBACK {
        let output = oracle
            .getL2Output(index)
            .call()
            .await
            .map_err(|e| ProofError::ChainRead(e.to_string()))?;

        let proposed_at = u64::try_from(output.timestamp).map_err(|_| {
            ProofError::MalformedState(format!("output {index} timestamp out of range"))
        })?;
        let l2_block = u64::try_from(output.l2BlockNumber).map_err(|_| {
            ProofError::MalformedState(format!("output {index} L2 block out of range"))
        })?;

        if proposed_at.saturating_add(finalization_period) <= now {
            debug!(
                index = %index,
                l2_block,
                proposed_at,
                "Found finalized L2 output"
            );
            return Ok(Commitment {
                output_index: index,
                output_root: output.outputRoot,
                l2_block,
                timestamp: proposed_at,
            });
        }

        if index.is_zero() {
            break;
        }
        index -= U256::from(1u8);
    }

    Err(ProofError::CommitmentUnavailable)
}
