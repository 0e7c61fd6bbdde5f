//! Dynamic-value storage word codec.
//!
//! The EVM stores a `bytes`/`string` value of up to 31 bytes inline in its
//! base slot, with `2 * length` in the low byte. Longer values keep
//! `2 * length + 1` in the base slot (odd low bit flags the spilled form)
//! and spread the data across follow-on slots, 32 bytes per word.

use crate::error::ProofError;
use alloy_primitives::{Bytes, B256, U256};

/// Word size of the storage scheme; the inline threshold is one byte less.
pub const WORD_SIZE: usize = 32;

/// Longest value that fits inline in the base slot.
pub const INLINE_THRESHOLD: usize = WORD_SIZE - 1;

/// Upper bound on a decoded dynamic value length. Anything above this is
/// treated as corrupt state and surfaced fatally, never truncated.
pub const MAX_VALUE_LENGTH: usize = 65_535;

/// Decoded form of a dynamic value's base slot word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicWord {
    /// Value fully contained in the base slot.
    Inline { length: usize },
    /// Value spans `slot_count` follow-on slots.
    Spilled { length: usize, slot_count: usize },
}

impl DynamicWord {
    /// Declared byte length of the value.
    pub const fn length(&self) -> usize {
        match self {
            Self::Inline { length } | Self::Spilled { length, .. } => *length,
        }
    }
}

/// Decode a base slot word into its inline-or-spilled form.
pub fn decode_dynamic_word(word: B256) -> Result<DynamicWord, ProofError> {
    let low = word.0[31];
    if low & 1 == 0 {
        let length = (low / 2) as usize;
        if length > INLINE_THRESHOLD {
            return Err(ProofError::MalformedState(format!(
                "inline length {length} exceeds the {INLINE_THRESHOLD}-byte threshold"
            )));
        }
        if word.0[length..INLINE_THRESHOLD].iter().any(|b| *b != 0) {
            return Err(ProofError::MalformedState(format!(
                "inline value has nonzero bytes past its declared length {length}"
            )));
        }
        return Ok(DynamicWord::Inline { length });
    }

    let encoded = U256::from_be_bytes(word.0);
    let length: U256 = (encoded - U256::from(1u8)) >> 1;
    if length > U256::from(MAX_VALUE_LENGTH as u64) {
        return Err(ProofError::MalformedState(format!(
            "declared length {length} exceeds the {MAX_VALUE_LENGTH}-byte bound"
        )));
    }
    let length = length.to::<usize>();
    if length <= INLINE_THRESHOLD {
        return Err(ProofError::MalformedState(format!(
            "spilled flag set for a {length}-byte value"
        )));
    }
    Ok(DynamicWord::Spilled {
        length,
        slot_count: length.div_ceil(WORD_SIZE),
    })
}

/// Reconstruct the value from its words, trimmed to the declared length.
///
/// `follow_on` must be in slot order (`base+1 … base+N`); the on-chain
/// verifier replays the same order.
pub fn reconstruct_value(
    base_word: B256,
    follow_on: &[B256],
    word: &DynamicWord,
) -> Result<Bytes, ProofError> {
    match word {
        DynamicWord::Inline { length } => {
            debug_assert!(follow_on.is_empty());
            Ok(Bytes::copy_from_slice(&base_word.0[..*length]))
        }
        DynamicWord::Spilled { length, slot_count } => {
            if follow_on.len() != *slot_count {
                return Err(ProofError::MalformedState(format!(
                    "value of length {length} needs {slot_count} follow-on words, got {}",
                    follow_on.len()
                )));
            }
            let mut out = Vec::with_capacity(slot_count * WORD_SIZE);
            for w in follow_on {
                out.extend_from_slice(w.as_slice());
            }
            out.truncate(*length);
            Ok(Bytes::from(out))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline_word(data: &[u8]) -> B256 {
        assert!(data.len() <= INLINE_THRESHOLD);
        let mut word = [0u8; 32];
        word[..data.len()].copy_from_slice(data);
        word[31] = (data.len() * 2) as u8;
        B256::from(word)
    }

    fn spilled_word(length: usize) -> B256 {
        B256::from(U256::from(length as u64 * 2 + 1))
    }

    #[test]
    fn test_decode_inline() {
        let word = decode_dynamic_word(inline_word(b"bar")).unwrap();
        assert_eq!(word, DynamicWord::Inline { length: 3 });
    }

    #[test]
    fn test_decode_empty_inline() {
        let word = decode_dynamic_word(B256::ZERO).unwrap();
        assert_eq!(word, DynamicWord::Inline { length: 0 });
    }

    #[test]
    fn test_decode_inline_rejects_dirty_tail() {
        let mut raw = inline_word(b"bar").0;
        raw[10] = 0xff;
        let err = decode_dynamic_word(B256::from(raw)).unwrap_err();
        assert!(matches!(err, ProofError::MalformedState(_)));
    }

    #[test]
    fn test_decode_spilled() {
        let word = decode_dynamic_word(spilled_word(47)).unwrap();
        assert_eq!(
            word,
            DynamicWord::Spilled {
                length: 47,
                slot_count: 2
            }
        );
    }

    #[test]
    fn test_decode_spilled_exact_word_multiple() {
        let word = decode_dynamic_word(spilled_word(64)).unwrap();
        assert_eq!(
            word,
            DynamicWord::Spilled {
                length: 64,
                slot_count: 2
            }
        );
    }

    #[test]
    fn test_decode_rejects_short_spilled() {
        let err = decode_dynamic_word(spilled_word(20)).unwrap_err();
        assert!(matches!(err, ProofError::MalformedState(_)));
    }

    #[test]
    fn test_decode_rejects_implausible_length() {
        let err = decode_dynamic_word(spilled_word(MAX_VALUE_LENGTH + 1)).unwrap_err();
        assert!(matches!(err, ProofError::MalformedState(_)));
    }

    #[test]
    fn test_reconstruct_inline_trims_to_length() {
        let base = inline_word(b"bar");
        let word = decode_dynamic_word(base).unwrap();
        let value = reconstruct_value(base, &[], &word).unwrap();
        assert_eq!(value.as_ref(), b"bar");
    }

    #[test]
    fn test_reconstruct_spilled_concatenates_and_trims() {
        let data: Vec<u8> = (0u8..47).collect();
        let mut w1 = [0u8; 32];
        w1.copy_from_slice(&data[..32]);
        let mut w2 = [0u8; 32];
        w2[..15].copy_from_slice(&data[32..]);

        let base = spilled_word(47);
        let word = decode_dynamic_word(base).unwrap();
        let value =
            reconstruct_value(base, &[B256::from(w1), B256::from(w2)], &word).unwrap();
        assert_eq!(value.as_ref(), &data[..]);
    }

    #[test]
    fn test_reconstruct_rejects_word_count_mismatch() {
        let base = spilled_word(47);
        let word = decode_dynamic_word(base).unwrap();
        let err = reconstruct_value(base, &[B256::ZERO], &word).unwrap_err();
        assert!(matches!(err, ProofError::MalformedState(_)));
    }
}
