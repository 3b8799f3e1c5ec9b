// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use cosesign_abstractions::{
    get_header, CborValue, CoseAlgorithm, CoseError, CryptoProvider, DecodedCose, DecodedSign1, ExternalVerifier as _,
    HeaderParameter, KeyUsage, Result,
};
use cosesign_common::{decode, SigStructure};
use cosesign_crypto::RustCryptoProvider;

use crate::{VerificationResult, VerifyOptions};

pub(crate) async fn verify(options: VerifyOptions) -> Result<VerificationResult> {
    match decode(&options.data)? {
        DecodedCose::Sign1(message) => verify_sign1(message, &options).await,
        DecodedCose::Sign(_) => Err(CoseError::not_implemented(
            "Verifying COSE_Sign structures not supported",
        )),
    }
}

async fn verify_sign1(message: DecodedSign1, options: &VerifyOptions) -> Result<VerificationResult> {
    let to_be_signed = SigStructure::sign1(
        message.protected.encoded_map_cbor(),
        options.external_aad.as_deref(),
        &message.raw_payload,
    )
    .encode()?;

    let verifier = &options.verifier;
    let verified = if let Some(external) = &verifier.external {
        external
            .verify(&to_be_signed, &message.signature)
            .await
            .map_err(CoseError::external_verifier)?
    } else if let Some(key) = &verifier.key {
        let algorithm = message_algorithm(&message)?;
        let provider: Arc<dyn CryptoProvider> = options
            .crypto_provider
            .clone()
            .unwrap_or_else(|| Arc::new(RustCryptoProvider::new()));

        let params = algorithm.params();
        let handle = provider
            .import_key(&key.to_public(), params, KeyUsage::Verify)
            .await?;
        provider
            .verify(params, &handle, &message.signature, &to_be_signed)
            .await?
    } else {
        return Err(CoseError::verify("Either verifier or key argument must be supplied"));
    };

    tracing::debug!(verified, tagged = message.tagged, "verified COSE_Sign1");
    Ok(VerificationResult {
        verified,
        payload: message.payload,
    })
}

fn message_algorithm(message: &DecodedSign1) -> Result<CoseAlgorithm> {
    let value = get_header(&message.protected, &message.unprotected, HeaderParameter::Alg)
        .ok_or_else(|| CoseError::verify("Missing alg header"))?;

    let algorithm = match value {
        CborValue::Text(name) => CoseAlgorithm::from_name(name),
        other => other.as_i64().and_then(CoseAlgorithm::from_id),
    };
    algorithm.ok_or_else(|| CoseError::verify(format!("Unsupported algorithm, '{value:?}'")))
}
