// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::{DecodedCose, JsonWebKey, Result};
use cosesign_common::SigStructure;

use crate::{signing, verification, SignOptions, SignResult, VerificationResult, VerifyOptions};

/// Sign a payload as COSE_Sign1 (single signer) or COSE_Sign (multiple signers).
pub async fn sign(options: impl Into<SignOptions>) -> Result<SignResult> {
    signing::sign(options.into()).await
}

/// Verify a COSE_Sign1 message.
///
/// COSE_Sign input decodes but reports `NotImplemented`.
pub async fn verify(options: VerifyOptions) -> Result<VerificationResult> {
    verification::verify(options).await
}

/// Parse a COSE_Sign1 or COSE_Sign message without verifying it.
pub fn decode(input: &[u8]) -> Result<DecodedCose> {
    cosesign_common::decode(input)
}

/// Encode the COSE_Sign1 `Sig_structure` bytes, for signing out of band.
pub fn encode_signature1_sig_structure(
    protected: &[u8],
    external_aad: Option<&[u8]>,
    payload: &[u8],
) -> Result<Vec<u8>> {
    SigStructure::sign1(protected, external_aad, payload).encode()
}

/// Encode the COSE_Sign `Sig_structure` bytes for one signer.
pub fn encode_signature_sig_structure(
    body_protected: &[u8],
    sign_protected: &[u8],
    external_aad: Option<&[u8]>,
    payload: &[u8],
) -> Result<Vec<u8>> {
    SigStructure::signature(body_protected, sign_protected, external_aad, payload).encode()
}

pub fn to_cose_key(jwk: &JsonWebKey) -> Result<Vec<u8>> {
    cosesign_key::to_cose_key(jwk)
}

pub fn from_cose_key(bytes: &[u8]) -> Result<JsonWebKey> {
    cosesign_key::from_cose_key(bytes)
}
