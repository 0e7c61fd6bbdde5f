//! Per-record proof generation.
//!
//! For each record type the service derives the record's storage slot(s),
//! reads the current value from L2 at the block covered by the newest
//! finalized L1 commitment, and assembles a [`StateProof`] binding that
//! value to the committed output root.
//!
//! The service is request-scoped and side-effect-free apart from read-only
//! RPC calls; nothing is cached, since a stale read would produce a proof
//! against the wrong root.

use crate::{
    commitment::{latest_finalized_commitment, Commitment},
    error::ProofError,
    slot,
    types::{Node, ProofResult},
    value::{decode_dynamic_word, reconstruct_value, DynamicWord, WORD_SIZE},
};
use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{BlockNumberOrTag, EIP1186AccountProofResponse};
use binding::proof::{
    output_root, OutputRootProof, StateProof, StorageSlotProof, MESSAGE_PASSER_ADDRESS,
    OUTPUT_VERSION_V0,
};
use std::future::Future;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, warn};

/// Cap on ABI content-type probes for a single request.
const MAX_ABI_PROBES: usize = 8;

/// Shared per-request context: the finalized commitment, the output root
/// preimage it must hash to, and the node's current record version.
struct RecordContext {
    commitment: Commitment,
    output_root_proof: OutputRootProof,
    version: u64,
}

struct HeaderInfo {
    state_root: B256,
    hash: B256,
}

/// Generates storage proofs for resolver records against the latest
/// finalized L1 commitment.
pub struct ProofService<P1, P2> {
    l1_provider: P1,
    l2_provider: P2,
    oracle_address: Address,
}

/// Retry transient chain reads with exponential backoff.
/// 100ms, 200ms, 400ms, 800ms, 1.6s (max 5 attempts)
async fn with_retry<T, F, Fut>(op: F) -> Result<T, ProofError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProofError>>,
{
    let retry_strategy = ExponentialBackoff::from_millis(100).take(5);

    RetryIf::spawn(retry_strategy, op, |e: &ProofError| {
        let transient = matches!(e, ProofError::ChainRead(_));
        if transient {
            warn!(error = %e, "Chain read failed, will retry");
        }
        transient
    })
    .await
}

fn chain_read<E: std::fmt::Display>(e: E) -> ProofError {
    ProofError::ChainRead(e.to_string())
}

fn slot_proofs(response: &EIP1186AccountProofResponse) -> Vec<StorageSlotProof> {
    response
        .storage_proof
        .iter()
        .map(|p| StorageSlotProof {
            key: p.key.as_b256(),
            value: B256::from(p.value),
            proof: p.proof.clone(),
        })
        .collect()
}

impl<P1, P2> ProofService<P1, P2>
where
    P1: Provider + Clone,
    P2: Provider + Clone,
{
    pub const fn new(l1_provider: P1, l2_provider: P2, oracle_address: Address) -> Self {
        Self {
            l1_provider,
            l2_provider,
            oracle_address,
        }
    }

    /// Prove the text record `versionable_texts[version][node][key]`.
    pub async fn proof_text(
        &self,
        target: Address,
        node: Node,
        key: &str,
    ) -> Result<ProofResult<String>, ProofError> {
        if key.is_empty() {
            return Err(ProofError::Request("empty text record key".into()));
        }
        let ctx = self.context(target, node).await?;
        let base_slot = slot::text_slot(ctx.version, node, key);
        let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
        let value = String::from_utf8(raw.to_vec()).map_err(|_| {
            ProofError::MalformedState("text record is not valid UTF-8".into())
        })?;
        Ok(ProofResult { proof, value })
    }

    /// Prove the address record for `coin_type`.
    ///
    /// The value is the raw stored address bytes; empty when no record is
    /// set.
    pub async fn proof_addr(
        &self,
        target: Address,
        node: Node,
        coin_type: U256,
    ) -> Result<ProofResult<Bytes>, ProofError> {
        let ctx = self.context(target, node).await?;
        let base_slot = slot::addr_slot(ctx.version, node, coin_type);
        let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
        if !raw.is_empty() && raw.len() != 20 {
            return Err(ProofError::MalformedState(format!(
                "address record has {} bytes, expected 20",
                raw.len()
            )));
        }
        Ok(ProofResult { proof, value: raw })
    }

    /// Prove the ABI record best matching the requested content-type mask.
    ///
    /// Set bits are probed in ascending order and the first stored value
    /// wins. When no requested type holds a value, the result is
    /// `(contentType 0, empty)` with the proof of the first probed slot.
    pub async fn proof_abi(
        &self,
        target: Address,
        node: Node,
        content_types: U256,
    ) -> Result<ProofResult<(U256, Bytes)>, ProofError> {
        if content_types.is_zero() {
            return Err(ProofError::Request("empty ABI content-type mask".into()));
        }
        let ctx = self.context(target, node).await?;

        let mut absent: Option<StateProof> = None;
        let mut probes = 0usize;
        for bit in 0..256 {
            if !content_types.bit(bit) {
                continue;
            }
            probes += 1;
            if probes > MAX_ABI_PROBES {
                break;
            }
            let content_type = U256::from(1u8) << bit;
            let base_slot = slot::abi_slot(ctx.version, node, content_type);
            let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
            if !raw.is_empty() {
                debug!(content_type = %content_type, "Found matching ABI content type");
                return Ok(ProofResult {
                    proof,
                    value: (content_type, raw),
                });
            }
            if absent.is_none() {
                absent = Some(proof);
            }
        }

        // no stored value for any requested type
        let proof = absent.ok_or_else(|| {
            ProofError::Request("ABI content-type mask has no probeable bits".into())
        })?;
        Ok(ProofResult {
            proof,
            value: (U256::ZERO, Bytes::new()),
        })
    }

    /// Prove the content hash record.
    pub async fn proof_content_hash(
        &self,
        target: Address,
        node: Node,
    ) -> Result<ProofResult<Bytes>, ProofError> {
        let ctx = self.context(target, node).await?;
        let base_slot = slot::content_hash_slot(ctx.version, node);
        let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
        Ok(ProofResult { proof, value: raw })
    }

    /// Prove the interface implementer record for `interface_id`.
    pub async fn proof_interface(
        &self,
        target: Address,
        node: Node,
        interface_id: FixedBytes<4>,
    ) -> Result<ProofResult<Address>, ProofError> {
        let ctx = self.context(target, node).await?;
        let slot = slot::interface_slot(ctx.version, node, interface_id);
        let (proof, words) = self.prove_fixed(target, &ctx, vec![slot]).await?;
        let word = words[0];
        if word.0[..12].iter().any(|b| *b != 0) {
            return Err(ProofError::MalformedState(
                "interface implementer slot holds more than an address".into(),
            ));
        }
        Ok(ProofResult {
            proof,
            value: Address::from_slice(&word.0[12..]),
        })
    }

    /// Prove the reverse name record.
    pub async fn proof_name(
        &self,
        target: Address,
        node: Node,
    ) -> Result<ProofResult<String>, ProofError> {
        let ctx = self.context(target, node).await?;
        let base_slot = slot::name_slot(ctx.version, node);
        let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
        let value = String::from_utf8(raw.to_vec()).map_err(|_| {
            ProofError::MalformedState("name record is not valid UTF-8".into())
        })?;
        Ok(ProofResult { proof, value })
    }

    /// Prove the public key record (x and y halves in consecutive slots).
    pub async fn proof_pubkey(
        &self,
        target: Address,
        node: Node,
    ) -> Result<ProofResult<(B256, B256)>, ProofError> {
        let ctx = self.context(target, node).await?;
        let (x_slot, y_slot) = slot::pubkey_slots(ctx.version, node);
        let (proof, words) = self.prove_fixed(target, &ctx, vec![x_slot, y_slot]).await?;
        Ok(ProofResult {
            proof,
            value: (words[0], words[1]),
        })
    }

    /// Prove the DNS wire-format record for `(name_hash, resource)`.
    pub async fn proof_dns_record(
        &self,
        target: Address,
        node: Node,
        name_hash: B256,
        resource: u16,
    ) -> Result<ProofResult<Bytes>, ProofError> {
        let ctx = self.context(target, node).await?;
        let base_slot = slot::dns_record_slot(ctx.version, node, name_hash, resource);
        let (proof, raw) = self.prove_dynamic(target, &ctx, base_slot).await?;
        Ok(ProofResult { proof, value: raw })
    }

    /// Prove whether any DNS records exist under `name_hash`.
    pub async fn proof_has_dns_records(
        &self,
        target: Address,
        node: Node,
        name_hash: B256,
    ) -> Result<ProofResult<bool>, ProofError> {
        let ctx = self.context(target, node).await?;
        let slot = slot::dns_record_count_slot(ctx.version, node, name_hash);
        let (proof, words) = self.prove_fixed(target, &ctx, vec![slot]).await?;
        let count = U256::from_be_bytes(words[0].0);
        if count > U256::from(u16::MAX) {
            return Err(ProofError::MalformedState(
                "DNS record count exceeds uint16 range".into(),
            ));
        }
        Ok(ProofResult {
            proof,
            value: !count.is_zero(),
        })
    }

    /// Build the per-request context.
    ///
    /// The L1 commitment lookup must come first; the block header, the
    /// message passer storage root, and the node's record version are then
    /// independent reads against the committed block and proceed in
    /// parallel.
    async fn context(&self, target: Address, node: Node) -> Result<RecordContext, ProofError> {
        let commitment = with_retry(|| {
            latest_finalized_commitment(&self.l1_provider, self.oracle_address)
        })
        .await?;

        debug!(
            output_index = %commitment.output_index,
            l2_block = commitment.l2_block,
            "Proving against finalized commitment"
        );

        let (header, message_passer, version_word) = tokio::try_join!(
            self.l2_block_header(commitment.l2_block),
            self.l2_proof(MESSAGE_PASSER_ADDRESS, vec![], commitment.l2_block),
            self.l2_storage(target, slot::record_version_slot(node), commitment.l2_block),
        )?;

        let output_root_proof = OutputRootProof {
            version: OUTPUT_VERSION_V0,
            stateRoot: header.state_root,
            messagePasserStorageRoot: message_passer.storage_hash,
            latestBlockhash: header.hash,
        };

        // Both providers must agree on the committed block; a mismatch here
        // is a transient split between L1 and L2 views.
        let recomputed = output_root(&output_root_proof);
        if recomputed != commitment.output_root {
            return Err(ProofError::ChainRead(format!(
                "recomputed output root {recomputed} does not match committed root {}",
                commitment.output_root
            )));
        }

        let version = u64::try_from(version_word).map_err(|_| {
            ProofError::MalformedState("record version exceeds u64 range".into())
        })?;

        Ok(RecordContext {
            commitment,
            output_root_proof,
            version,
        })
    }

    /// Prove a record stored as a dynamic `bytes`/`string` value.
    ///
    /// Inline values need only the base slot proof. Spilled values add one
    /// batched proof request for the whole `base+1 … base+N` run; the proof
    /// sequence ends up in exactly the slot order used for reconstruction.
    async fn prove_dynamic(
        &self,
        target: Address,
        ctx: &RecordContext,
        base_slot: B256,
    ) -> Result<(StateProof, Bytes), ProofError> {
        let block = ctx.commitment.l2_block;
        let base = self.l2_proof(target, vec![base_slot], block).await?;
        check_proof_keys(&base, &[base_slot])?;
        let base_word = B256::from(base.storage_proof[0].value);

        let word = decode_dynamic_word(base_word)?;
        let mut proofs = slot_proofs(&base);

        let value = match word {
            DynamicWord::Inline { .. } => reconstruct_value(base_word, &[], &word)?,
            DynamicWord::Spilled { slot_count, .. } => {
                let follow_slots = slot::follow_on_slots(base_slot, slot_count);
                let follow = self.l2_proof(target, follow_slots.clone(), block).await?;
                check_proof_keys(&follow, &follow_slots)?;

                let words: Vec<B256> = follow
                    .storage_proof
                    .iter()
                    .map(|p| B256::from(p.value))
                    .collect();
                proofs.extend(slot_proofs(&follow));
                reconstruct_value(base_word, &words, &word)?
            }
        };

        debug!(
            slot = %base_slot,
            length = value.len(),
            slots = proofs.len(),
            "Proved dynamic record value"
        );

        let proof = assemble(target, ctx, &base, proofs, value.len());
        Ok((proof, value))
    }

    /// Prove record value(s) at fixed slots.
    async fn prove_fixed(
        &self,
        target: Address,
        ctx: &RecordContext,
        slots: Vec<B256>,
    ) -> Result<(StateProof, Vec<B256>), ProofError> {
        let response = self
            .l2_proof(target, slots.clone(), ctx.commitment.l2_block)
            .await?;
        check_proof_keys(&response, &slots)?;

        let words: Vec<B256> = response
            .storage_proof
            .iter()
            .map(|p| B256::from(p.value))
            .collect();
        let proofs = slot_proofs(&response);
        let length = words.len() * WORD_SIZE;

        Ok((assemble(target, ctx, &response, proofs, length), words))
    }

    async fn l2_block_header(&self, number: u64) -> Result<HeaderInfo, ProofError> {
        with_retry(|| async {
            let block = self
                .l2_provider
                .get_block_by_number(BlockNumberOrTag::Number(number))
                .await
                .map_err(chain_read)?
                .ok_or_else(|| ProofError::ChainRead(format!("L2 block {number} not found")))?;
            Ok(HeaderInfo {
                state_root: block.header.state_root,
                hash: block.header.hash,
            })
        })
        .await
    }

    async fn l2_proof(
        &self,
        address: Address,
        slots: Vec<B256>,
        block: u64,
    ) -> Result<EIP1186AccountProofResponse, ProofError> {
        with_retry(|| async {
            self.l2_provider
                .get_proof(address, slots.clone())
                .block_id(BlockNumberOrTag::Number(block).into())
                .await
                .map_err(chain_read)
        })
        .await
    }

    async fn l2_storage(
        &self,
        address: Address,
        slot: B256,
        block: u64,
    ) -> Result<U256, ProofError> {
        with_retry(|| async {
            self.l2_provider
                .get_storage_at(address, U256::from_be_bytes(slot.0))
                .block_id(BlockNumberOrTag::Number(block).into())
                .await
                .map_err(chain_read)
        })
        .await
    }
}

fn check_proof_keys(
    response: &EIP1186AccountProofResponse,
    expected: &[B256],
) -> Result<(), ProofError> {
    if response.storage_proof.len() != expected.len() {
        return Err(ProofError::ChainRead(format!(
            "expected {} storage proofs, got {}",
            expected.len(),
            response.storage_proof.len()
        )));
    }
    for (proof, slot) in response.storage_proof.iter().zip(expected) {
        if proof.key.as_b256() != *slot {
            return Err(ProofError::ChainRead(format!(
                "storage proof key {} does not match requested slot {slot}",
                proof.key.as_b256()
            )));
        }
    }
    Ok(())
}

fn assemble(
    target: Address,
    ctx: &RecordContext,
    response: &EIP1186AccountProofResponse,
    storage_proofs: Vec<StorageSlotProof>,
    length: usize,
) -> StateProof {
    StateProof {
        target,
        l2OutputIndex: ctx.commitment.output_index,
        outputRootProof: ctx.output_root_proof.clone(),
        accountProof: response.account_proof.clone(),
        storageRoot: response.storage_hash,
        storageProofs: storage_proofs,
        length: U256::from(length),
    }
}
