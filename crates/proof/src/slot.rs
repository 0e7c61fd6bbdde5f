//! Storage slot derivation for the L2 public resolver.
//!
//! Replicates the resolver contract's declared storage layout. Every record
//! lives in a nested mapping keyed first by record version, then by node,
//! then by any record-specific key, so each slot is derived by iterated
//! Solidity mapping hashing: `keccak256(key ‖ parentSlot)` with value-typed
//! keys left-padded to 32 bytes, `bytesN` keys right-padded, and
//! string/bytes keys hashed unpadded.
//!
//! Derivation is a pure function of its inputs. The on-chain verifier
//! re-derives the same slots, so this must be byte-identical to the
//! contract's own layout, never inferred at runtime.

use alloy_primitives::{keccak256, FixedBytes, B256, U256};

/// Base slot indices of the resolver's declared storage layout.
///
/// Matches `L2PublicResolver.sol`. An unknown record type is a programming
/// error rejected during dispatch, so there is no fallible lookup here.
pub mod layout {
    use alloy_primitives::U256;

    /// slot 0: recordVersions (mapping(bytes32 => uint64))
    pub const RECORD_VERSIONS: U256 = U256::from_limbs([0, 0, 0, 0]);
    /// slot 1: versionable_abis (version => node => contentType => bytes)
    pub const ABIS: U256 = U256::from_limbs([1, 0, 0, 0]);
    /// slot 2: versionable_addresses (version => node => coinType => bytes)
    pub const ADDRESSES: U256 = U256::from_limbs([2, 0, 0, 0]);
    /// slot 3: versionable_hashes (version => node => bytes)
    pub const CONTENT_HASHES: U256 = U256::from_limbs([3, 0, 0, 0]);
    /// slot 4: versionable_zonehashes (version => node => bytes)
    pub const ZONEHASHES: U256 = U256::from_limbs([4, 0, 0, 0]);
    /// slot 5: versionable_records (version => node => nameHash => resource => bytes)
    pub const DNS_RECORDS: U256 = U256::from_limbs([5, 0, 0, 0]);
    /// slot 6: versionable_nameEntriesCount (version => node => nameHash => uint16)
    pub const DNS_RECORD_COUNTS: U256 = U256::from_limbs([6, 0, 0, 0]);
    /// slot 7: versionable_texts (version => node => key => string)
    pub const TEXTS: U256 = U256::from_limbs([7, 0, 0, 0]);
    /// slot 8: versionable_interfaces (version => node => interfaceID => address)
    pub const INTERFACES: U256 = U256::from_limbs([8, 0, 0, 0]);
    /// slot 9: versionable_names (version => node => string)
    pub const NAMES: U256 = U256::from_limbs([9, 0, 0, 0]);
    /// slot 10: versionable_pubkeys (version => node => {bytes32 x; bytes32 y})
    pub const PUBKEYS: U256 = U256::from_limbs([10, 0, 0, 0]);
}

/// A mapping key operand, padded the way the EVM pads it before hashing.
#[derive(Debug, Clone, Copy)]
pub enum SlotKey<'a> {
    /// Value-typed key, left-padded to 32 bytes.
    Uint(U256),
    /// bytes32 key, used as-is.
    Word(B256),
    /// bytes4 key, right-padded to 32 bytes.
    Selector(FixedBytes<4>),
    /// string key, hashed unpadded.
    Str(&'a str),
}

fn hash_key(key: &SlotKey<'_>, parent: B256) -> B256 {
    let mut data = Vec::with_capacity(64);
    match key {
        SlotKey::Uint(v) => data.extend_from_slice(&v.to_be_bytes::<32>()),
        SlotKey::Word(w) => data.extend_from_slice(w.as_slice()),
        SlotKey::Selector(s) => {
            data.extend_from_slice(s.as_slice());
            data.extend_from_slice(&[0u8; 28]);
        }
        SlotKey::Str(s) => data.extend_from_slice(s.as_bytes()),
    }
    data.extend_from_slice(parent.as_slice());
    keccak256(data)
}

/// Slot of `recordVersions[node]`.
pub fn record_version_slot(node: B256) -> B256 {
    hash_key(&SlotKey::Word(node), B256::from(layout::RECORD_VERSIONS))
}

/// Compute the slot holding a record's value.
///
/// Hashes `keccak256(pad32(version) ‖ pad32(baseSlot))`, mixes in the node,
/// then one further hash per remaining key operand.
pub fn compute_slot(base_slot: U256, version: u64, node: B256, keys: &[SlotKey<'_>]) -> B256 {
    let mut slot = hash_key(&SlotKey::Uint(U256::from(version)), B256::from(base_slot));
    slot = hash_key(&SlotKey::Word(node), slot);
    for key in keys {
        slot = hash_key(key, slot);
    }
    slot
}

/// Slot of `versionable_texts[version][node][key]`.
pub fn text_slot(version: u64, node: B256, key: &str) -> B256 {
    compute_slot(layout::TEXTS, version, node, &[SlotKey::Str(key)])
}

/// Slot of `versionable_addresses[version][node][coinType]`.
pub fn addr_slot(version: u64, node: B256, coin_type: U256) -> B256 {
    compute_slot(layout::ADDRESSES, version, node, &[SlotKey::Uint(coin_type)])
}

/// Slot of `versionable_abis[version][node][contentType]`.
pub fn abi_slot(version: u64, node: B256, content_type: U256) -> B256 {
    compute_slot(layout::ABIS, version, node, &[SlotKey::Uint(content_type)])
}

/// Slot of `versionable_hashes[version][node]`.
pub fn content_hash_slot(version: u64, node: B256) -> B256 {
    compute_slot(layout::CONTENT_HASHES, version, node, &[])
}

/// Slot of `versionable_interfaces[version][node][interfaceID]`.
pub fn interface_slot(version: u64, node: B256, interface_id: FixedBytes<4>) -> B256 {
    compute_slot(layout::INTERFACES, version, node, &[SlotKey::Selector(interface_id)])
}

/// Slot of `versionable_names[version][node]`.
pub fn name_slot(version: u64, node: B256) -> B256 {
    compute_slot(layout::NAMES, version, node, &[])
}

/// Slots of `versionable_pubkeys[version][node]`.
///
/// The public key struct occupies two consecutive slots: x, then y.
pub fn pubkey_slots(version: u64, node: B256) -> (B256, B256) {
    let x = compute_slot(layout::PUBKEYS, version, node, &[]);
    let y = B256::from(U256::from_be_bytes(x.0).wrapping_add(U256::from(1u8)));
    (x, y)
}

/// Slot of `versionable_records[version][node][nameHash][resource]`.
pub fn dns_record_slot(version: u64, node: B256, name_hash: B256, resource: u16) -> B256 {
    compute_slot(
        layout::DNS_RECORDS,
        version,
        node,
        &[SlotKey::Word(name_hash), SlotKey::Uint(U256::from(resource))],
    )
}

/// Slot of `versionable_nameEntriesCount[version][node][nameHash]`.
pub fn dns_record_count_slot(version: u64, node: B256, name_hash: B256) -> B256 {
    compute_slot(
        layout::DNS_RECORD_COUNTS,
        version,
        node,
        &[SlotKey::Word(name_hash)],
    )
}

/// The follow-on slot run `base+1 … base+count` holding a value too long for
/// inline storage.
pub fn follow_on_slots(base: B256, count: usize) -> Vec<B256> {
    let base = U256::from_be_bytes(base.0);
    (1..=count as u64)
        .map(|i| B256::from(base.wrapping_add(U256::from(i))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_node() -> B256 {
        B256::from([0x11; 32])
    }

    #[test]
    fn test_compute_slot_deterministic() {
        let node = test_node();
        let a = text_slot(0, node, "foo");
        let b = text_slot(0, node, "foo");
        assert_eq!(a, b);
        assert_ne!(a, B256::ZERO);
    }

    #[test]
    fn test_record_types_pairwise_distinct() {
        let node = test_node();
        let slots = [
            text_slot(0, node, "foo"),
            addr_slot(0, node, U256::from(60u8)),
            abi_slot(0, node, U256::from(1u8)),
            content_hash_slot(0, node),
            interface_slot(0, node, FixedBytes::from([0x01, 0x02, 0x03, 0x04])),
            name_slot(0, node),
            pubkey_slots(0, node).0,
            dns_record_slot(0, node, B256::from([0x22; 32]), 1),
            dns_record_count_slot(0, node, B256::from([0x22; 32])),
        ];
        let distinct: HashSet<_> = slots.iter().collect();
        assert_eq!(distinct.len(), slots.len());
    }

    #[test]
    fn test_version_changes_slot() {
        let node = test_node();
        assert_ne!(text_slot(0, node, "foo"), text_slot(1, node, "foo"));
    }

    #[test]
    fn test_text_slot_matches_manual_derivation() {
        let node = test_node();
        let version = 3u64;

        let mut inner = [0u8; 64];
        inner[0..32].copy_from_slice(&U256::from(version).to_be_bytes::<32>());
        inner[32..64].copy_from_slice(&layout::TEXTS.to_be_bytes::<32>());
        let inner = keccak256(inner);

        let mut middle = [0u8; 64];
        middle[0..32].copy_from_slice(node.as_slice());
        middle[32..64].copy_from_slice(inner.as_slice());
        let middle = keccak256(middle);

        let mut outer = Vec::new();
        outer.extend_from_slice(b"avatar");
        outer.extend_from_slice(middle.as_slice());
        let outer = keccak256(outer);

        assert_eq!(text_slot(version, node, "avatar"), outer);
    }

    #[test]
    fn test_record_version_slot_matches_manual_derivation() {
        let node = test_node();
        let mut data = [0u8; 64];
        data[0..32].copy_from_slice(node.as_slice());
        assert_eq!(record_version_slot(node), keccak256(data));
    }

    #[test]
    fn test_selector_key_right_padded() {
        let node = test_node();
        let id = FixedBytes::from([0xde, 0xad, 0xbe, 0xef]);
        let slot = interface_slot(0, node, id);

        let mut padded = [0u8; 32];
        padded[0..4].copy_from_slice(id.as_slice());
        let expected = compute_slot(
            layout::INTERFACES,
            0,
            node,
            &[SlotKey::Word(B256::from(padded))],
        );
        assert_eq!(slot, expected);
    }

    #[test]
    fn test_follow_on_slots_are_consecutive() {
        let base = text_slot(0, test_node(), "foo");
        let base_u256 = U256::from_be_bytes(base.0);
        let slots = follow_on_slots(base, 3);

        assert_eq!(slots.len(), 3);
        for (i, slot) in slots.iter().enumerate() {
            let expected = base_u256.wrapping_add(U256::from(i as u64 + 1));
            assert_eq!(U256::from_be_bytes(slot.0), expected);
        }
    }

    #[test]
    fn test_pubkey_slots_adjacent() {
        let (x, y) = pubkey_slots(0, test_node());
        assert_eq!(
            U256::from_be_bytes(y.0),
            U256::from_be_bytes(x.0).wrapping_add(U256::from(1u8))
        );
    }
}
