use thiserror::Error;

/// Errors surfaced by the proof service.
///
/// All chain-read failures are caught and classified here, at the proof
/// service boundary; the router never interprets raw network errors. The
/// transport layer maps retryable errors to a retry-after response and fatal
/// errors to a client error response.
#[derive(Debug, Error)]
pub enum ProofError {
    /// No finalized L1 commitment covers the desired L2 state yet.
    /// Retryable: resolves itself once the next output finalizes.
    #[error("no finalized state commitment available on L1")]
    CommitmentUnavailable,

    /// Transient RPC failure that survived bounded retries.
    #[error("chain read failed: {0}")]
    ChainRead(String),

    /// On-chain data decoded to something implausible. Never retried.
    #[error("malformed on-chain state: {0}")]
    MalformedState(String),

    /// Request rejected before any network call was issued.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ProofError {
    /// Whether the caller may retry the request later.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::CommitmentUnavailable | Self::ChainRead(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ProofError::CommitmentUnavailable.is_retryable());
        assert!(ProofError::ChainRead("timeout".into()).is_retryable());
        assert!(!ProofError::MalformedState("bad length".into()).is_retryable());
        assert!(!ProofError::Request("missing node".into()).is_retryable());
    }
}
