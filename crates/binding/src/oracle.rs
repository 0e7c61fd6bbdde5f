//! L1 state commitment chain bindings.
//!
//! The L2OutputOracle is the OP Stack contract on L1 that records L2 output
//! roots as they are proposed. The gateway only reads it: it looks up the
//! newest output that has passed the finalization period and proves storage
//! against that output's state root.

use alloy_sol_types::sol;

sol! {
    /// L2OutputOracle - L1 contract holding the append-only chain of L2
    /// output proposals.
    #[sol(rpc)]
    interface IL2OutputOracle {
        /// A committed L2 output.
        ///
        /// `outputRoot` is `keccak256(version ‖ stateRoot ‖
        /// messagePasserStorageRoot ‖ latestBlockhash)`.
        #[derive(Debug)]
        struct OutputProposal {
            bytes32 outputRoot;
            uint128 timestamp;
            uint128 l2BlockNumber;
        }

        /// Emitted when an output is proposed.
        event OutputProposed(
            bytes32 indexed outputRoot,
            uint256 indexed l2OutputIndex,
            uint256 indexed l2BlockNumber,
            uint256 l1Timestamp
        );

        /// Index of the most recently proposed output.
        ///
        /// Reverts while the oracle is empty.
        function latestOutputIndex() external view returns (uint256);

        /// Get an output proposal by index.
        function getL2Output(uint256 _l2OutputIndex)
            external view returns (OutputProposal memory);

        /// Seconds an output must age before it is considered finalized.
        function FINALIZATION_PERIOD_SECONDS() external view returns (uint256);
    }
}
