//! Proof structures shared between proof generation and response encoding.
//!
//! These are the exact ABI shapes the on-chain verifier decodes. A response
//! is `abi.encode(bytes result, StateProof proof)`; the verifier recomputes
//! the output root from `outputRootProof`, walks `accountProof` to the
//! resolver's storage root, then replays `storageProofs` in order to
//! reconstruct the value independently. Slot order in `storageProofs` is
//! therefore part of the contract, not a presentation detail.

use alloy_primitives::{address, keccak256, Address, B256};
use alloy_sol_types::sol;

sol! {
    /// Preimage of an OP Stack output root.
    #[derive(Debug, PartialEq, Eq)]
    struct OutputRootProof {
        bytes32 version;
        bytes32 stateRoot;
        bytes32 messagePasserStorageRoot;
        bytes32 latestBlockhash;
    }

    /// Merkle proof for a single storage slot.
    #[derive(Debug, PartialEq, Eq)]
    struct StorageSlotProof {
        bytes32 key;
        bytes32 value;
        bytes[] proof;
    }

    /// Proof that a set of storage slot values belongs to the L2 state
    /// committed at `l2OutputIndex`.
    ///
    /// `storageProofs` holds exactly one entry for a fixed-size record, or
    /// `[base, base+1, …, base+N]` for a dynamic value spanning N follow-on
    /// slots. `length` is the declared byte length of the reconstructed
    /// value.
    #[derive(Debug, PartialEq, Eq)]
    struct StateProof {
        address target;
        uint256 l2OutputIndex;
        OutputRootProof outputRootProof;
        bytes[] accountProof;
        bytes32 storageRoot;
        StorageSlotProof[] storageProofs;
        uint256 length;
    }
}

/// Output root version byte (v0 is the only defined version).
pub const OUTPUT_VERSION_V0: B256 = B256::ZERO;

/// Recompute an output root from its preimage.
///
/// `keccak256(version ‖ stateRoot ‖ messagePasserStorageRoot ‖
/// latestBlockhash)`, matching the on-chain hashing.
pub fn output_root(proof: &OutputRootProof) -> B256 {
    let mut data = [0u8; 128];
    data[0..32].copy_from_slice(proof.version.as_slice());
    data[32..64].copy_from_slice(proof.stateRoot.as_slice());
    data[64..96].copy_from_slice(proof.messagePasserStorageRoot.as_slice());
    data[96..128].copy_from_slice(proof.latestBlockhash.as_slice());
    keccak256(data)
}

/// L2ToL1MessagePasser predeploy. Its storage root is part of the output
/// root preimage, so the gateway must fetch it for every proof.
pub const MESSAGE_PASSER_ADDRESS: Address =
    address!("0x4200000000000000000000000000000000000016");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_root_deterministic() {
        let preimage = OutputRootProof {
            version: OUTPUT_VERSION_V0,
            stateRoot: B256::from([0x01; 32]),
            messagePasserStorageRoot: B256::from([0x02; 32]),
            latestBlockhash: B256::from([0x03; 32]),
        };
        assert_eq!(output_root(&preimage), output_root(&preimage));
    }

    #[test]
    fn test_output_root_binds_every_field() {
        let base = OutputRootProof {
            version: OUTPUT_VERSION_V0,
            stateRoot: B256::from([0x01; 32]),
            messagePasserStorageRoot: B256::from([0x02; 32]),
            latestBlockhash: B256::from([0x03; 32]),
        };
        let root = output_root(&base);

        let mut changed = base.clone();
        changed.stateRoot = B256::from([0xff; 32]);
        assert_ne!(output_root(&changed), root);

        let mut changed = base.clone();
        changed.messagePasserStorageRoot = B256::from([0xff; 32]);
        assert_ne!(output_root(&changed), root);

        let mut changed = base;
        changed.latestBlockhash = B256::from([0xff; 32]);
        assert_ne!(output_root(&changed), root);
    }
}
