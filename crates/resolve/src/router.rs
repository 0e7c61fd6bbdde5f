//! Resolution router.
//!
//! Dispatches a typed [`ResolveRequest`] to the matching proof service
//! method and record encoder, then ABI-encodes the final `(result, proof)`
//! response pair with the shared proof type from `binding::proof`.

use crate::{
    encode,
    error::ResolveError,
    request::{RecordCall, ResolveRequest},
};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::Provider;
use alloy_sol_types::SolValue;
use binding::proof::StateProof;
use proof::{ProofResult, ProofService};
use tracing::debug;

/// The gateway resolves only the canonical chain address record, so the
/// addr path pins this coin type regardless of caller input.
pub const ETH_COIN_TYPE: u64 = 60;

/// Routes resolution requests through proof generation and encoding.
///
/// Constructed once with its chain-read handles and shared across requests;
/// it holds no per-request state.
pub struct Router<P1, P2> {
    service: ProofService<P1, P2>,
}

impl<P1, P2> Router<P1, P2>
where
    P1: Provider + Clone,
    P2: Provider + Clone,
{
    pub const fn new(service: ProofService<P1, P2>) -> Self {
        Self { service }
    }

    /// Handle an inbound `(signature, decoded request)` pair.
    ///
    /// Returns `Ok(None)` when the signature is not one this gateway
    /// resolves, so the transport can decide fallback behavior.
    pub async fn handle(
        &self,
        signature: &str,
        call: &RecordCall,
    ) -> Result<Option<Bytes>, ResolveError> {
        let Some(request) = ResolveRequest::from_signature(signature, call)? else {
            debug!(signature, "Unsupported resolution signature");
            return Ok(None);
        };
        self.resolve(request).await.map(Some)
    }

    /// Resolve one typed request into the ABI-encoded response.
    pub async fn resolve(&self, request: ResolveRequest) -> Result<Bytes, ResolveError> {
        match request {
            ResolveRequest::Text { context, node, key } => {
                let ProofResult { proof, value } =
                    self.service.proof_text(context, node, &key).await?;
                Ok(respond(encode::encode_text(&value), &proof))
            }
            ResolveRequest::Addr { context, node } => {
                let result = self
                    .service
                    .proof_addr(context, node, U256::from(ETH_COIN_TYPE))
                    .await?;
                let addr = if result.value.is_empty() {
                    None
                } else {
                    Some(Address::from_slice(&result.value))
                };
                Ok(respond(encode::encode_addr(addr), &result.proof))
            }
            ResolveRequest::Abi {
                context,
                node,
                content_types,
            } => {
                let result = self.service.proof_abi(context, node, content_types).await?;
                let (content_type, data) = result.value;
                Ok(respond(encode::encode_abi(content_type, &data), &result.proof))
            }
            ResolveRequest::ContentHash { context, node } => {
                let result = self.service.proof_content_hash(context, node).await?;
                Ok(respond(
                    encode::encode_content_hash(&result.value),
                    &result.proof,
                ))
            }
            ResolveRequest::Interface {
                context,
                node,
                interface_id,
            } => {
                let result = self
                    .service
                    .proof_interface(context, node, interface_id)
                    .await?;
                let implementer = if result.value == Address::ZERO {
                    None
                } else {
                    Some(result.value)
                };
                Ok(respond(encode::encode_interface(implementer), &result.proof))
            }
            ResolveRequest::Name { context, node } => {
                let result = self.service.proof_name(context, node).await?;
                Ok(respond(encode::encode_name(&result.value), &result.proof))
            }
            ResolveRequest::Pubkey { context, node } => {
                let result = self.service.proof_pubkey(context, node).await?;
                let (x, y) = result.value;
                Ok(respond(encode::encode_pubkey(x, y), &result.proof))
            }
            ResolveRequest::DnsRecord {
                context,
                node,
                name,
                resource,
            } => {
                let result = self
                    .service
                    .proof_dns_record(context, node, name, resource)
                    .await?;
                Ok(respond(
                    encode::encode_dns_record(&result.value),
                    &result.proof,
                ))
            }
            ResolveRequest::HasDnsRecords {
                context,
                node,
                name,
            } => {
                let result = self
                    .service
                    .proof_has_dns_records(context, node, name)
                    .await?;
                Ok(respond(
                    encode::encode_has_dns_records(result.value),
                    &result.proof,
                ))
            }
        }
    }
}

/// ABI-encode the `(result, proof)` response pair with the proof's declared
/// parameter type.
fn respond(encoded: Bytes, proof: &StateProof) -> Bytes {
    Bytes::from((encoded, proof.clone()).abi_encode_sequence())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binding::proof::{OutputRootProof, StorageSlotProof, OUTPUT_VERSION_V0};
    use alloy_primitives::B256;

    fn dummy_proof() -> StateProof {
        StateProof {
            target: Address::from([0xaa; 20]),
            l2OutputIndex: U256::from(7u8),
            outputRootProof: OutputRootProof {
                version: OUTPUT_VERSION_V0,
                stateRoot: B256::from([0x01; 32]),
                messagePasserStorageRoot: B256::from([0x02; 32]),
                latestBlockhash: B256::from([0x03; 32]),
            },
            accountProof: vec![Bytes::from(vec![0x01])],
            storageRoot: B256::from([0x04; 32]),
            storageProofs: vec![StorageSlotProof {
                key: B256::from([0x05; 32]),
                value: B256::from([0x06; 32]),
                proof: vec![Bytes::from(vec![0x02])],
            }],
            length: U256::from(3u8),
        }
    }

    #[test]
    fn test_respond_round_trips_result_and_proof() {
        let proof = dummy_proof();
        let encoded_result = encode::encode_text("bar");
        let response = respond(encoded_result.clone(), &proof);

        let (result, decoded_proof) =
            <(Bytes, StateProof)>::abi_decode_sequence(&response).unwrap();
        assert_eq!(result, encoded_result);
        assert_eq!(decoded_proof, proof);
        assert_eq!(decoded_proof.storageProofs.len(), 1);
    }
}
