// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::CborValue;
use cosesign_common::{CoseSign1Structure, CoseSignStructure};

/// Output of [`crate::sign`].
///
/// `Encoded` unless the request asked to skip result encoding, in which case
/// the structure matching the request shape is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SignResult {
    Encoded(Vec<u8>),
    Sign1(CoseSign1Structure),
    Sign(CoseSignStructure),
}

impl SignResult {
    pub fn encoded(&self) -> Option<&[u8]> {
        match self {
            SignResult::Encoded(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn into_encoded(self) -> Option<Vec<u8>> {
        match self {
            SignResult::Encoded(bytes) => Some(bytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub verified: bool,
    /// Decoded payload of the verified message.
    pub payload: CborValue,
}
