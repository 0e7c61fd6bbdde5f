use alloy_primitives::B256;
use binding::proof::StateProof;

/// 32-byte namehash identifying a registered name.
pub type Node = B256;

/// A proof paired with exactly the decoded value it attests to.
///
/// The pairing is constructed once per request; a proof is never reused
/// across a different slot set or a different state root.
#[derive(Debug)]
pub struct ProofResult<T> {
    pub proof: StateProof,
    pub value: T,
}
