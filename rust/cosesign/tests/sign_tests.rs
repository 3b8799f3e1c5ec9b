// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for single-signer `cosesign::sign`.

mod common;

use std::error::Error as _;

use common::*;
use cosesign::{
    decode, sign, verify, BoxError, CborValue, CoseAlgorithm, CoseErrorKind, DecodedCose, NamedHeaders, SignResult,
    Signer, SingleSignOptions, Verifier, VerifyOptions,
};
use hex_literal::hex;
use p256::ecdsa::signature::Signer as _;

async fn verify_with(data: Vec<u8>, key: &cosesign::JsonWebKey) -> cosesign::VerificationResult {
    verify(VerifyOptions::new(data, Verifier::with_key(key.to_public())))
        .await
        .unwrap()
}

#[tokio::test]
async fn es256_text_payload_signs_and_verifies() {
    let bytes = es256_sign1(PAYLOAD).await;

    // tag + array head + {1: -7} + {} + payload bstr + 64 byte signature
    assert_eq!(bytes.len(), 92);
    assert_eq!(bytes[0], 0xd2);

    let result = verify_with(bytes, &key_11()).await;
    assert!(result.verified);
    assert_eq!(result.payload, CborValue::from(PAYLOAD));
}

#[tokio::test]
async fn every_algorithm_round_trips() {
    for alg in CoseAlgorithm::ALL {
        let key = key_for(alg);
        let bytes = sign_encoded(SingleSignOptions::new(PAYLOAD, Signer::new(alg).with_key(key.clone()))).await;

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.protected().get_int(1), Some(alg.id()), "{alg}");

        let result = verify_with(bytes, &key).await;
        assert!(result.verified, "{alg}");
        assert_eq!(result.payload, CborValue::from(PAYLOAD));
    }
}

#[tokio::test]
async fn eddsa_signatures_are_deterministic() {
    let key = ed25519_jwk();
    let options = SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::EdDSA).with_key(key));

    let a = sign_encoded(options.clone()).await;
    let b = sign_encoded(options).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn payload_values_come_back_decoded() {
    let map = CborValue::Map(vec![
        (CborValue::from("test"), CborValue::from("attribute")),
        (CborValue::from("isTest"), CborValue::from(true)),
    ]);
    let array = CborValue::Array(vec![CborValue::from(1), CborValue::from("two")]);

    for payload in [CborValue::from(101), CborValue::from(false), map, array] {
        let result = verify_with(es256_sign1(payload.clone()).await, &key_11()).await;
        assert!(result.verified);
        assert_eq!(result.payload, payload);
    }
}

#[tokio::test]
async fn skip_tag_produces_an_untagged_array() {
    let options = SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::ES256).with_key(key_11())).skip_tag();
    let bytes = sign_encoded(options).await;
    assert_eq!(bytes[0], 0x84);

    let decoded = decode(&bytes).unwrap();
    assert!(!decoded.tagged());
    assert!(verify_with(bytes, &key_11()).await.verified);
}

#[tokio::test]
async fn skip_encoding_result_returns_the_structure() {
    let options =
        SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::ES256).with_key(key_11())).skip_encoding_result();

    let SignResult::Sign1(structure) = sign(options).await.unwrap() else {
        panic!("expected a COSE_Sign1 structure");
    };
    assert_eq!(structure.protected, hex!("a1 01 26"));
    assert!(structure.unprotected.is_empty());
    assert_eq!(structure.signature.len(), 64);

    let result = verify_with(structure.to_cbor(true).unwrap(), &key_11()).await;
    assert!(result.verified);
}

#[tokio::test]
async fn alg_in_unprotected_headers_is_not_duplicated() {
    let signer = Signer::new(CoseAlgorithm::ES256)
        .with_key(key_11())
        .with_unprotected_headers(NamedHeaders::new().with("alg", "ES256"));
    let bytes = sign_encoded(SingleSignOptions::new(PAYLOAD, signer)).await;

    let decoded = decode(&bytes).unwrap();
    assert!(decoded.protected().encoded_map_cbor().is_empty());
    assert_eq!(decoded.unprotected().get_int(1), Some(-7));

    assert!(verify_with(bytes, &key_11()).await.verified);
}

#[tokio::test]
async fn kid_text_is_carried_as_bytes() {
    let signer = Signer::new(CoseAlgorithm::ES256)
        .with_key(key_11())
        .with_protected_headers(NamedHeaders::new().with("kid", "11"));
    let bytes = sign_encoded(SingleSignOptions::new(PAYLOAD, signer)).await;

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.kid(), Some(&b"11"[..]));
    assert_eq!(decoded.protected().get_int(1), Some(-7));
}

#[tokio::test]
async fn unknown_header_name_is_rejected() {
    let signer = Signer::new(CoseAlgorithm::ES256)
        .with_key(key_11())
        .with_protected_headers(NamedHeaders::new().with("foo", 1));
    let err = sign(SingleSignOptions::new(PAYLOAD, signer)).await.unwrap_err();

    assert_eq!(err.kind(), CoseErrorKind::Validation);
    assert_eq!(err.message(), "Unknown parameter, 'foo'");
}

#[tokio::test]
async fn missing_credentials_is_a_sign_error() {
    let err = sign(SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::ES256)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), CoseErrorKind::Sign);
    assert_eq!(err.message(), "Either signer or key argument must be supplied");
}

#[tokio::test]
async fn skip_encoding_payload_requires_bytes() {
    let options = SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::ES256).with_key(key_11()))
        .skip_encoding_payload();
    let err = sign(options).await.unwrap_err();

    assert_eq!(err.kind(), CoseErrorKind::Sign);
    assert_eq!(
        err.message(),
        "Expected options.payload type to be binary if skipEncodingPayload = true"
    );
}

#[tokio::test]
async fn skip_encoding_payload_keeps_bytes_verbatim() {
    let options = SingleSignOptions::new(
        CborValue::Bytes(b"hello".to_vec()),
        Signer::new(CoseAlgorithm::ES256).with_key(key_11()),
    )
    .skip_encoding_payload();
    let bytes = sign_encoded(options).await;

    let DecodedCose::Sign1(message) = decode(&bytes).unwrap() else {
        panic!("expected COSE_Sign1");
    };
    assert_eq!(message.raw_payload, b"hello");
    // Not a single CBOR item, so the raw bytes are the payload value.
    assert_eq!(message.payload, CborValue::Bytes(b"hello".to_vec()));

    assert!(verify_with(bytes, &key_11()).await.verified);
}

#[tokio::test]
async fn external_signer_is_used_instead_of_a_key() {
    let sk = key_11_signing_key();
    let external = move |data: &[u8]| -> Result<Vec<u8>, BoxError> {
        let sig: p256::ecdsa::Signature = sk.sign(data);
        Ok(sig.to_bytes().to_vec())
    };

    let signer = Signer::new(CoseAlgorithm::ES256).with_external_signer(external);
    let bytes = sign_encoded(SingleSignOptions::new(PAYLOAD, signer)).await;

    assert!(verify_with(bytes, &key_11()).await.verified);
}

#[tokio::test]
async fn external_signer_failure_keeps_the_cause() {
    let external =
        |_: &[u8]| -> Result<Vec<u8>, BoxError> { Err("Whoa something un-expected happened".into()) };

    let signer = Signer::new(CoseAlgorithm::ES256)
        .with_key(key_11())
        .with_external_signer(external);
    let err = sign(SingleSignOptions::new(PAYLOAD, signer)).await.unwrap_err();

    assert_eq!(err.kind(), CoseErrorKind::ExternalSignerFunction);
    assert_eq!(err.message(), "Calling externally supplied signer function failed");
    assert_eq!(err.source().unwrap().to_string(), "Whoa something un-expected happened");
}

#[tokio::test]
async fn wrong_key_type_is_a_crypto_error() {
    let signer = Signer::new(CoseAlgorithm::EdDSA).with_key(key_11());
    let err = sign(SingleSignOptions::new(PAYLOAD, signer)).await.unwrap_err();
    assert_eq!(err.kind(), CoseErrorKind::Crypto);
}

#[tokio::test]
async fn external_aad_is_bound_into_the_signature() {
    let options = SingleSignOptions::new(PAYLOAD, Signer::new(CoseAlgorithm::ES256).with_key(key_11()))
        .with_external_aad(b"aad".to_vec());
    let bytes = sign_encoded(options).await;

    let public = Verifier::with_key(key_11().to_public());
    let without = verify(VerifyOptions::new(bytes.clone(), public.clone())).await.unwrap();
    assert!(!without.verified);

    let with = verify(VerifyOptions::new(bytes, public).with_external_aad(b"aad".to_vec()))
        .await
        .unwrap();
    assert!(with.verified);
}
