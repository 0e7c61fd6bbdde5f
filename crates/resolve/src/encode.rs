//! Record encoders.
//!
//! Pure functions mapping a decoded record value onto the ABI return type of
//! its resolution function. Absent address-like records encode as the zero
//! address, so absence is indistinguishable from a stored zero value by
//! construction of the sentinel; an absent ABI record encodes as `0x` with
//! content type 0.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

/// `text(bytes32,string)` returns `string`.
pub fn encode_text(value: &str) -> Bytes {
    Bytes::from(value.to_owned().abi_encode())
}

/// `addr(bytes32)` returns `address`.
pub fn encode_addr(value: Option<Address>) -> Bytes {
    Bytes::from(value.unwrap_or(Address::ZERO).abi_encode())
}

/// `ABI(bytes,bytes32,uint256)` returns `(uint256 contentType, bytes data)`.
pub fn encode_abi(content_type: U256, data: &Bytes) -> Bytes {
    Bytes::from((content_type, data.clone()).abi_encode_sequence())
}

/// `contenthash(bytes32)` returns `bytes`.
pub fn encode_content_hash(value: &Bytes) -> Bytes {
    Bytes::from(value.clone().abi_encode())
}

/// `interfaceImplementer(bytes,bytes32,bytes4)` returns `address`.
pub fn encode_interface(value: Option<Address>) -> Bytes {
    Bytes::from(value.unwrap_or(Address::ZERO).abi_encode())
}

/// `name(bytes,bytes32)` returns `string`.
pub fn encode_name(value: &str) -> Bytes {
    Bytes::from(value.to_owned().abi_encode())
}

/// `pubkey(bytes,bytes32)` returns `(bytes32 x, bytes32 y)`.
pub fn encode_pubkey(x: B256, y: B256) -> Bytes {
    Bytes::from((x, y).abi_encode_sequence())
}

/// `dnsRecord(bytes,bytes32,bytes32,uint16)` returns the stored wire-format
/// bytes unchanged.
pub fn encode_dns_record(value: &Bytes) -> Bytes {
    value.clone()
}

/// `hasDNSRecords(bytes,bytes32,bytes32)` returns `bool`.
pub fn encode_has_dns_records(value: bool) -> Bytes {
    Bytes::from(value.abi_encode())
}
