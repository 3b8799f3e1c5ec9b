// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 and COSE_Sign construction.

use std::sync::Arc;

use cosesign_abstractions::{
    CborValue, CoseError, CryptoProvider, ExternalSigner as _, HeaderKey, HeaderMap, HeaderParameter, KeyUsage, Result,
};
use cosesign_common::{
    encode_canonical, encode_protected_headers, normalize_headers, CoseSign1Structure, CoseSignStructure,
    CoseSignatureRecord, SigStructure,
};
use cosesign_crypto::RustCryptoProvider;
use futures::future::try_join_all;

use crate::sign_options::{MultiSignOptions, Shaping, SignOptions, Signer, SingleSignOptions};
use crate::SignResult;

const MISSING_CREDENTIALS: &str = "Either signer or key argument must be supplied";

pub(crate) async fn sign(options: SignOptions) -> Result<SignResult> {
    match options {
        SignOptions::Single(options) => sign_single(options).await,
        SignOptions::Multi(options) => sign_multi(options).await,
    }
}

async fn sign_single(options: SingleSignOptions) -> Result<SignResult> {
    let SingleSignOptions {
        payload,
        signer,
        shaping,
    } = options;

    let payload = payload_bytes(&payload, &shaping)?;
    ensure_credentials(&signer)?;
    let provider = provider(&shaping);

    let (protected, unprotected) = signer_headers(&signer)?;
    let protected = encode_protected_headers(&protected)?;

    tracing::debug!(alg = signer.algorithm.name(), external = signer.external.is_some(), "signing COSE_Sign1");

    let to_be_signed = SigStructure::sign1(&protected, shaping.external_aad.as_deref(), &payload).encode()?;
    let signature = produce_signature(&signer, provider.as_ref(), &to_be_signed).await?;

    let structure = CoseSign1Structure {
        protected,
        unprotected,
        payload,
        signature,
    };

    if shaping.skip_encoding_result {
        return Ok(SignResult::Sign1(structure));
    }
    let encoded = structure.to_cbor(!shaping.skip_tag)?;
    tracing::debug!(len = encoded.len(), tagged = !shaping.skip_tag, "encoded COSE_Sign1");
    Ok(SignResult::Encoded(encoded))
}

async fn sign_multi(options: MultiSignOptions) -> Result<SignResult> {
    let MultiSignOptions {
        payload,
        protected,
        unprotected,
        signers,
        shaping,
    } = options;

    if signers.is_empty() {
        return Err(CoseError::validation("Expected SignOptions"));
    }

    let payload = payload_bytes(&payload, &shaping)?;
    for signer in &signers {
        ensure_credentials(signer)?;
    }
    let provider = provider(&shaping);

    let body_protected = encode_protected_headers(&normalize_headers(&protected)?)?;
    let body_unprotected = normalize_headers(&unprotected)?;

    tracing::debug!(signers = signers.len(), "signing COSE_Sign");

    let records = try_join_all(signers.iter().map(|signer| {
        sign_record(
            signer,
            provider.as_ref(),
            &body_protected,
            shaping.external_aad.as_deref(),
            &payload,
        )
    }))
    .await?;

    let structure = CoseSignStructure {
        protected: body_protected,
        unprotected: body_unprotected,
        payload,
        signatures: records,
    };

    if shaping.skip_encoding_result {
        return Ok(SignResult::Sign(structure));
    }
    let encoded = structure.to_cbor(!shaping.skip_tag)?;
    tracing::debug!(len = encoded.len(), tagged = !shaping.skip_tag, "encoded COSE_Sign");
    Ok(SignResult::Encoded(encoded))
}

/// One COSE_Signature (RFC 8152 §4.1): the signer's own headers, never the body's.
async fn sign_record(
    signer: &Signer,
    provider: &dyn CryptoProvider,
    body_protected: &[u8],
    external_aad: Option<&[u8]>,
    payload: &[u8],
) -> Result<CoseSignatureRecord> {
    let (protected, unprotected) = signer_headers(signer)?;
    let protected = encode_protected_headers(&protected)?;

    let to_be_signed = SigStructure::signature(body_protected, &protected, external_aad, payload).encode()?;
    let signature = produce_signature(signer, provider, &to_be_signed).await?;

    tracing::trace!(alg = signer.algorithm.name(), "signed COSE_Signature record");
    Ok(CoseSignatureRecord {
        protected,
        unprotected,
        signature,
    })
}

fn payload_bytes(payload: &CborValue, shaping: &Shaping) -> Result<Vec<u8>> {
    if !shaping.skip_encoding_payload {
        return encode_canonical(payload);
    }
    match payload {
        CborValue::Bytes(bytes) => Ok(bytes.clone()),
        _ => Err(CoseError::sign(
            "Expected options.payload type to be binary if skipEncodingPayload = true",
        )),
    }
}

fn ensure_credentials(signer: &Signer) -> Result<()> {
    if signer.external.is_none() && signer.key.is_none() {
        return Err(CoseError::sign(MISSING_CREDENTIALS));
    }
    Ok(())
}

fn provider(shaping: &Shaping) -> Arc<dyn CryptoProvider> {
    shaping
        .crypto_provider
        .clone()
        .unwrap_or_else(|| Arc::new(RustCryptoProvider::new()))
}

/// Normalized protected and unprotected headers, with `alg` added to the
/// protected ones when neither map carries it.
fn signer_headers(signer: &Signer) -> Result<(HeaderMap, HeaderMap)> {
    let mut protected = normalize_headers(&signer.protected)?;
    let unprotected = normalize_headers(&signer.unprotected)?;

    let alg = HeaderKey::from(HeaderParameter::Alg);
    if !protected.contains_key(&alg) && !unprotected.contains_key(&alg) {
        protected.insert(alg, signer.algorithm.id().into());
    }
    Ok((protected, unprotected))
}

async fn produce_signature(signer: &Signer, provider: &dyn CryptoProvider, to_be_signed: &[u8]) -> Result<Vec<u8>> {
    if let Some(external) = &signer.external {
        return external
            .sign(to_be_signed)
            .await
            .map_err(CoseError::external_signer);
    }

    let key = signer
        .key
        .as_ref()
        .ok_or_else(|| CoseError::sign(MISSING_CREDENTIALS))?;
    let params = signer.algorithm.params();
    let handle = provider.import_key(key, params, KeyUsage::Sign).await?;
    provider.sign(params, &handle, to_be_signed).await
}
