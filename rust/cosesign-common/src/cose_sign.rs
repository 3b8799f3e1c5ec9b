// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 / COSE_Sign message structures and the structural decoder.

use cosesign_abstractions::{
    CborValue, CoseError, CoseStructureKind, DecodedCose, DecodedSign, DecodedSign1, DecodedSignature, HeaderMap,
    Result, COSE_SIGN1_TAG, COSE_SIGN_TAG,
};

use crate::cbor::{decode_value, encode_canonical};
use crate::header_map::{decode_protected_headers, decode_unprotected_headers, header_map_to_value};

/// `[protected, unprotected, payload, signature]`
#[derive(Debug, Clone, PartialEq)]
pub struct CoseSign1Structure {
    /// Encoded protected header map (bstr content).
    pub protected: Vec<u8>,
    pub unprotected: HeaderMap,
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

impl CoseSign1Structure {
    pub fn to_value(&self) -> CborValue {
        CborValue::Array(vec![
            CborValue::Bytes(self.protected.clone()),
            header_map_to_value(&self.unprotected),
            CborValue::Bytes(self.payload.clone()),
            CborValue::Bytes(self.signature.clone()),
        ])
    }

    /// Canonical encoding, wrapped in tag 18 when `tagged`.
    pub fn to_cbor(&self, tagged: bool) -> Result<Vec<u8>> {
        encode_canonical(&wrap(self.to_value(), COSE_SIGN1_TAG, tagged))
    }
}

/// One COSE_Signature: `[protected, unprotected, signature]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoseSignatureRecord {
    pub protected: Vec<u8>,
    pub unprotected: HeaderMap,
    pub signature: Vec<u8>,
}

impl CoseSignatureRecord {
    pub fn to_value(&self) -> CborValue {
        CborValue::Array(vec![
            CborValue::Bytes(self.protected.clone()),
            header_map_to_value(&self.unprotected),
            CborValue::Bytes(self.signature.clone()),
        ])
    }
}

/// `[protected, unprotected, payload, [signatures...]]`
#[derive(Debug, Clone, PartialEq)]
pub struct CoseSignStructure {
    pub protected: Vec<u8>,
    pub unprotected: HeaderMap,
    pub payload: Vec<u8>,
    pub signatures: Vec<CoseSignatureRecord>,
}

impl CoseSignStructure {
    pub fn to_value(&self) -> CborValue {
        CborValue::Array(vec![
            CborValue::Bytes(self.protected.clone()),
            header_map_to_value(&self.unprotected),
            CborValue::Bytes(self.payload.clone()),
            CborValue::Array(self.signatures.iter().map(CoseSignatureRecord::to_value).collect()),
        ])
    }

    /// Canonical encoding, wrapped in tag 98 when `tagged`.
    pub fn to_cbor(&self, tagged: bool) -> Result<Vec<u8>> {
        encode_canonical(&wrap(self.to_value(), COSE_SIGN_TAG, tagged))
    }
}

fn wrap(value: CborValue, tag: u64, tagged: bool) -> CborValue {
    if tagged {
        CborValue::Tag(tag, Box::new(value))
    } else {
        value
    }
}

/// Parse a COSE_Sign1 or COSE_Sign message, tagged or not.
///
/// Untagged input is classified by shape: a fourth element that is an array
/// makes it a COSE_Sign.
pub fn decode(input: &[u8]) -> Result<DecodedCose> {
    let top = decode_value(input).map_err(|e| CoseError::decode_with("Fail to decode payload as CBOR", e))?;

    let (tag_kind, body) = match top {
        CborValue::Tag(tag, inner) => {
            let kind = CoseStructureKind::from_tag(tag)
                .ok_or_else(|| CoseError::decode(format!("Unexpected CBOR tag, '{tag}'")))?;
            (Some(kind), *inner)
        }
        other => (None, other),
    };

    let CborValue::Array(items) = body else {
        return Err(CoseError::decode("Expecting decoded result to be an array"));
    };
    let Ok([protected, unprotected, payload, last]) = <[CborValue; 4]>::try_from(items) else {
        return Err(CoseError::decode("Expecting decoded result array length to be 4"));
    };

    let kind = tag_kind.unwrap_or(if matches!(last, CborValue::Array(_)) {
        CoseStructureKind::Sign
    } else {
        CoseStructureKind::Sign1
    });

    let CborValue::Bytes(raw_payload) = payload else {
        return Err(CoseError::decode("Expecting payload to be type binary"));
    };
    let payload = decode_value(&raw_payload).unwrap_or_else(|_| CborValue::Bytes(raw_payload.clone()));

    let protected = decode_protected_headers(expect_bytes(&protected, "protected headers")?)?;
    let unprotected = decode_unprotected_headers(&unprotected)?;
    let tagged = tag_kind.is_some();

    tracing::debug!(?kind, tagged, payload_len = raw_payload.len(), "decoded COSE structure");

    match kind {
        CoseStructureKind::Sign1 => {
            let signature = expect_bytes(&last, "signature")?.to_vec();
            Ok(DecodedCose::Sign1(DecodedSign1 {
                tagged,
                protected,
                unprotected,
                payload,
                raw_payload,
                signature,
            }))
        }
        CoseStructureKind::Sign => {
            let records = last
                .as_array()
                .ok_or_else(|| CoseError::decode("Expecting signatures to be an array"))?;
            let signatures = records.iter().map(decode_signature_record).collect::<Result<Vec<_>>>()?;
            Ok(DecodedCose::Sign(DecodedSign {
                tagged,
                protected,
                unprotected,
                payload,
                raw_payload,
                signatures,
            }))
        }
    }
}

fn decode_signature_record(record: &CborValue) -> Result<DecodedSignature> {
    let [protected, unprotected, signature] = record
        .as_array()
        .ok_or_else(|| CoseError::decode("Expecting COSE_Signature to be an array"))?
    else {
        return Err(CoseError::decode("Expecting COSE_Signature array length to be 3"));
    };

    Ok(DecodedSignature {
        protected: decode_protected_headers(expect_bytes(protected, "signer protected headers")?)?,
        unprotected: decode_unprotected_headers(unprotected)?,
        signature: expect_bytes(signature, "signature")?.to_vec(),
    })
}

fn expect_bytes<'a>(value: &'a CborValue, what: &str) -> Result<&'a [u8]> {
    value
        .as_bytes()
        .ok_or_else(|| CoseError::decode(format!("Expecting {what} to be type binary")))
}
