use proof::ProofError;
use thiserror::Error;

/// Errors surfaced by the resolution router.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Classified failure from the proof service.
    #[error(transparent)]
    Proof(#[from] ProofError),

    /// A required request field was absent. Fatal; rejected before any
    /// network call.
    #[error("invalid request: missing field `{0}`")]
    MissingField(&'static str),
}

impl ResolveError {
    /// Whether the caller may retry the request later.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Proof(e) => e.is_retryable(),
            Self::MissingField(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_delegates_to_proof_error() {
        assert!(ResolveError::Proof(ProofError::CommitmentUnavailable).is_retryable());
        assert!(!ResolveError::Proof(ProofError::Request("bad".into())).is_retryable());
        assert!(!ResolveError::MissingField("record").is_retryable());
    }
}
