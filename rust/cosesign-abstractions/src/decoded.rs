// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structural view of a decoded COSE_Sign1 or COSE_Sign message.

use crate::{get_header, CborValue, CoseHeaderMap, HeaderKey, HeaderParameter};

pub const COSE_SIGN1_TAG: u64 = 18;
pub const COSE_SIGN_TAG: u64 = 98;
pub const SIG_STRUCTURE_CONTEXT_SIGNATURE1: &str = "Signature1";
pub const SIG_STRUCTURE_CONTEXT_SIGNATURE: &str = "Signature";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoseStructureKind {
    Sign1,
    Sign,
}

impl CoseStructureKind {
    pub fn tag(self) -> u64 {
        match self {
            CoseStructureKind::Sign1 => COSE_SIGN1_TAG,
            CoseStructureKind::Sign => COSE_SIGN_TAG,
        }
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            COSE_SIGN1_TAG => Some(CoseStructureKind::Sign1),
            COSE_SIGN_TAG => Some(CoseStructureKind::Sign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSign1 {
    pub tagged: bool,
    pub protected: CoseHeaderMap,
    pub unprotected: CoseHeaderMap,
    /// Payload as a CBOR value; raw bytes when the payload is not a single CBOR item.
    pub payload: CborValue,
    /// Payload bstr content exactly as it appeared on the wire.
    pub raw_payload: Vec<u8>,
    pub signature: Vec<u8>,
}

/// One COSE_Signature record of a COSE_Sign message.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSignature {
    pub protected: CoseHeaderMap,
    pub unprotected: CoseHeaderMap,
    pub signature: Vec<u8>,
}

impl DecodedSignature {
    pub fn header(&self, key: impl Into<HeaderKey>) -> Option<&CborValue> {
        get_header(&self.protected, &self.unprotected, key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSign {
    pub tagged: bool,
    pub protected: CoseHeaderMap,
    pub unprotected: CoseHeaderMap,
    pub payload: CborValue,
    pub raw_payload: Vec<u8>,
    pub signatures: Vec<DecodedSignature>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedCose {
    Sign1(DecodedSign1),
    Sign(DecodedSign),
}

impl DecodedCose {
    pub fn kind(&self) -> CoseStructureKind {
        match self {
            DecodedCose::Sign1(_) => CoseStructureKind::Sign1,
            DecodedCose::Sign(_) => CoseStructureKind::Sign,
        }
    }

    pub fn tagged(&self) -> bool {
        match self {
            DecodedCose::Sign1(m) => m.tagged,
            DecodedCose::Sign(m) => m.tagged,
        }
    }

    pub fn protected(&self) -> &CoseHeaderMap {
        match self {
            DecodedCose::Sign1(m) => &m.protected,
            DecodedCose::Sign(m) => &m.protected,
        }
    }

    pub fn unprotected(&self) -> &CoseHeaderMap {
        match self {
            DecodedCose::Sign1(m) => &m.unprotected,
            DecodedCose::Sign(m) => &m.unprotected,
        }
    }

    pub fn payload(&self) -> &CborValue {
        match self {
            DecodedCose::Sign1(m) => &m.payload,
            DecodedCose::Sign(m) => &m.payload,
        }
    }

    pub fn raw_payload(&self) -> &[u8] {
        match self {
            DecodedCose::Sign1(m) => &m.raw_payload,
            DecodedCose::Sign(m) => &m.raw_payload,
        }
    }

    /// Body header lookup by label or name; see [`get_header`].
    pub fn header(&self, key: impl Into<HeaderKey>) -> Option<&CborValue> {
        get_header(self.protected(), self.unprotected(), key)
    }

    /// Body `kid` header, when it is a byte string.
    pub fn kid(&self) -> Option<&[u8]> {
        self.header(HeaderParameter::Kid).and_then(CborValue::as_bytes)
    }
}
