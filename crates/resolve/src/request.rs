//! Typed resolution requests.
//!
//! The transport layer decodes ABI calldata before this core sees anything;
//! what arrives here is a [`RecordCall`] of already-decoded fields. Field
//! presence is validated while mapping the function signature onto the
//! closed [`ResolveRequest`] enum, before any network call is issued.

use crate::error::ResolveError;
use alloy_primitives::{Address, FixedBytes, B256, U256};

/// Decoded calldata fields handed over by the transport layer.
///
/// `context` is the resolver contract address on L2 and `node` the namehash
/// of the name being resolved; the remaining fields are present only for the
/// operations that need them.
#[derive(Debug, Clone, Default)]
pub struct RecordCall {
    pub context: Address,
    pub node: B256,
    /// Text record key
    pub key: Option<String>,
    /// ABI content-type bitmask
    pub content_types: Option<U256>,
    /// Interface identifier
    pub interface_id: Option<FixedBytes<4>>,
    /// DNS name hash
    pub name: Option<B256>,
    /// DNS resource type
    pub resource: Option<u16>,
}

/// One supported resolution operation with its precisely typed payload.
///
/// Closed set: dispatch is an exhaustive match, and a signature outside the
/// set never constructs a request at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveRequest {
    Text {
        context: Address,
        node: B256,
        key: String,
    },
    Addr {
        context: Address,
        node: B256,
    },
    Abi {
        context: Address,
        node: B256,
        content_types: U256,
    },
    ContentHash {
        context: Address,
        node: B256,
    },
    Interface {
        context: Address,
        node: B256,
        interface_id: FixedBytes<4>,
    },
    Name {
        context: Address,
        node: B256,
    },
    Pubkey {
        context: Address,
        node: B256,
    },
    DnsRecord {
        context: Address,
        node: B256,
        name: B256,
        resource: u16,
    },
    HasDnsRecords {
        context: Address,
        node: B256,
        name: B256,
    },
}

fn require<T>(field: Option<T>, name: &'static str) -> Result<T, ResolveError> {
    field.ok_or(ResolveError::MissingField(name))
}

impl ResolveRequest {
    /// Map a resolution function signature onto a typed request.
    ///
    /// Returns `Ok(None)` for signatures this gateway does not resolve;
    /// that is a no-match the caller can fall back on, not an error.
    pub fn from_signature(
        signature: &str,
        call: &RecordCall,
    ) -> Result<Option<Self>, ResolveError> {
        let request = match signature {
            "text(bytes32,string)" => Self::Text {
                context: call.context,
                node: call.node,
                key: require(call.key.clone(), "record")?,
            },
            "addr(bytes32)" => Self::Addr {
                context: call.context,
                node: call.node,
            },
            "ABI(bytes,bytes32,uint256)" => Self::Abi {
                context: call.context,
                node: call.node,
                content_types: require(call.content_types, "contentTypes")?,
            },
            "contenthash(bytes32)" => Self::ContentHash {
                context: call.context,
                node: call.node,
            },
            "interfaceImplementer(bytes,bytes32,bytes4)" => Self::Interface {
                context: call.context,
                node: call.node,
                interface_id: require(call.interface_id, "interfaceID")?,
            },
            "name(bytes,bytes32)" => Self::Name {
                context: call.context,
                node: call.node,
            },
            "pubkey(bytes,bytes32)" => Self::Pubkey {
                context: call.context,
                node: call.node,
            },
            "dnsRecord(bytes,bytes32,bytes32,uint16)" => Self::DnsRecord {
                context: call.context,
                node: call.node,
                name: require(call.name, "name")?,
                resource: require(call.resource, "resource")?,
            },
            "hasDNSRecords(bytes,bytes32,bytes32)" => Self::HasDnsRecords {
                context: call.context,
                node: call.node,
                name: require(call.name, "name")?,
            },
            _ => return Ok(None),
        };

        // validated only for supported signatures; an unknown signature is a
        // no-match no matter what the call carries
        if call.context == Address::ZERO {
            return Err(ResolveError::MissingField("context"));
        }

        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call() -> RecordCall {
        RecordCall {
            context: Address::from([0xaa; 20]),
            node: B256::from([0x11; 32]),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_signature_is_no_match() {
        let result = ResolveRequest::from_signature("zonehash(bytes32)", &call()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_text_requires_record_key() {
        let err = ResolveRequest::from_signature("text(bytes32,string)", &call()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingField("record")));

        let mut with_key = call();
        with_key.key = Some("avatar".into());
        let request = ResolveRequest::from_signature("text(bytes32,string)", &with_key)
            .unwrap()
            .unwrap();
        assert!(matches!(request, ResolveRequest::Text { ref key, .. } if key == "avatar"));
    }

    #[test]
    fn test_addr_needs_no_extra_fields() {
        let request = ResolveRequest::from_signature("addr(bytes32)", &call())
            .unwrap()
            .unwrap();
        assert!(matches!(request, ResolveRequest::Addr { .. }));
    }

    #[test]
    fn test_dns_record_requires_name_and_resource() {
        let mut partial = call();
        partial.name = Some(B256::from([0x22; 32]));
        let err =
            ResolveRequest::from_signature("dnsRecord(bytes,bytes32,bytes32,uint16)", &partial)
                .unwrap_err();
        assert!(matches!(err, ResolveError::MissingField("resource")));
    }

    #[test]
    fn test_zero_context_rejected_for_supported_signature() {
        let mut no_context = call();
        no_context.context = Address::ZERO;
        let err = ResolveRequest::from_signature("addr(bytes32)", &no_context).unwrap_err();
        assert!(matches!(err, ResolveError::MissingField("context")));
    }

    #[test]
    fn test_unknown_signature_is_no_match_even_with_zero_context() {
        let mut no_context = call();
        no_context.context = Address::ZERO;
        let result = ResolveRequest::from_signature("zonehash(bytes32)", &no_context).unwrap();
        assert_eq!(result, None);
    }
}
