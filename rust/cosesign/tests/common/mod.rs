// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `cosesign` integration tests.
//!
//! Keys: the RFC 8152 Appendix C.7.2 P-256 key "11" is used wherever a fixed
//! key matters; the other curves and RSA are generated per run.

#![allow(dead_code)]

use std::sync::OnceLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cosesign::{
    sign, CborValue, CoseAlgorithm, EcCurve, JsonWebKey, JwkEc, JwkOkp, JwkRsa, OkpCurve, SignOptions, SignResult,
    Signer, SingleSignOptions,
};
use hex_literal::hex;
use minicbor::data::Tag;
use minicbor::Encoder;
use rand_core::OsRng;
use rsa::traits::{PrivateKeyParts as _, PublicKeyParts as _};

pub const PAYLOAD: &str = "This is a payload";

pub const KEY_11_D: [u8; 32] = hex!("57c92077664146e876760c9520d054aa93c3afb04e306705db6090308507b4d3");

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// RFC 8152 key "11", private.
pub fn key_11() -> JsonWebKey {
    JsonWebKey::Ec(JwkEc {
        crv: EcCurve::P256,
        x: "usWxHK2PmfnHKwXPS54m0kTcGJ90UiglWiGahtagnv8".into(),
        y: "IBOL-C3BttVivg-lSreASjpkttcsz-1rb7btKLv8EX4".into(),
        d: Some(b64(&KEY_11_D)),
        kid: Some("11".into()),
        alg: None,
        key_ops: None,
    })
}

pub fn key_11_signing_key() -> p256::ecdsa::SigningKey {
    p256::ecdsa::SigningKey::from_slice(&KEY_11_D).unwrap()
}

fn ec_jwk(crv: EcCurve, d: &[u8], point: &[u8]) -> JsonWebKey {
    let coords = &point[1..];
    let (x, y) = coords.split_at(coords.len() / 2);
    JsonWebKey::Ec(JwkEc {
        crv,
        x: b64(x),
        y: b64(y),
        d: Some(b64(d)),
        kid: None,
        alg: None,
        key_ops: None,
    })
}

pub fn p256_jwk() -> JsonWebKey {
    use p256::elliptic_curve::sec1::ToEncodedPoint as _;
    let sk = p256::SecretKey::random(&mut OsRng);
    ec_jwk(EcCurve::P256, &sk.to_bytes(), sk.public_key().to_encoded_point(false).as_bytes())
}

pub fn p384_jwk() -> JsonWebKey {
    use p384::elliptic_curve::sec1::ToEncodedPoint as _;
    let sk = p384::SecretKey::random(&mut OsRng);
    ec_jwk(EcCurve::P384, &sk.to_bytes(), sk.public_key().to_encoded_point(false).as_bytes())
}

pub fn p521_jwk() -> JsonWebKey {
    use p521::elliptic_curve::sec1::ToEncodedPoint as _;
    let sk = p521::SecretKey::random(&mut OsRng);
    ec_jwk(EcCurve::P521, &sk.to_bytes(), sk.public_key().to_encoded_point(false).as_bytes())
}

pub fn ed25519_jwk() -> JsonWebKey {
    let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
    JsonWebKey::Okp(JwkOkp {
        crv: OkpCurve::Ed25519,
        x: b64(sk.verifying_key().as_bytes()),
        y: None,
        d: Some(b64(&sk.to_bytes())),
        kid: None,
        alg: None,
        key_ops: None,
    })
}

/// 2048-bit RSA key, generated once per test binary.
pub fn rsa_jwk() -> JsonWebKey {
    static KEY: OnceLock<JsonWebKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let sk = rsa::RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
        let primes = sk.primes();
        JsonWebKey::Rsa(JwkRsa {
            n: b64(&sk.n().to_bytes_be()),
            e: b64(&sk.e().to_bytes_be()),
            d: Some(b64(&sk.d().to_bytes_be())),
            p: Some(b64(&primes[0].to_bytes_be())),
            q: Some(b64(&primes[1].to_bytes_be())),
            dp: None,
            dq: None,
            qi: None,
            kid: None,
            alg: None,
            key_ops: None,
        })
    })
    .clone()
}

/// A private key suited to each supported algorithm.
pub fn key_for(alg: CoseAlgorithm) -> JsonWebKey {
    match alg {
        CoseAlgorithm::ES256 => key_11(),
        CoseAlgorithm::ES384 => p384_jwk(),
        CoseAlgorithm::ES512 => p521_jwk(),
        CoseAlgorithm::EdDSA => ed25519_jwk(),
        CoseAlgorithm::PS256 | CoseAlgorithm::PS384 | CoseAlgorithm::PS512 => rsa_jwk(),
    }
}

/// Sign and return the encoded message.
pub async fn sign_encoded(options: impl Into<SignOptions>) -> Vec<u8> {
    match sign(options).await.unwrap() {
        SignResult::Encoded(bytes) => bytes,
        other => panic!("expected encoded output, got {other:?}"),
    }
}

/// ES256 COSE_Sign1 over `payload` with key "11".
pub async fn es256_sign1(payload: impl Into<CborValue>) -> Vec<u8> {
    sign_encoded(SingleSignOptions::new(
        payload,
        Signer::new(CoseAlgorithm::ES256).with_key(key_11()),
    ))
    .await
}

/// Hand-built four element COSE array, optionally tagged.
pub fn encode_cose_array(
    tag: Option<u64>,
    protected: &[u8],
    unprotected: &[(i64, i64)],
    payload: &[u8],
    signature: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    if let Some(tag) = tag {
        enc.tag(Tag::new(tag)).unwrap();
    }
    enc.array(4).unwrap();
    enc.bytes(protected).unwrap();
    enc.map(unprotected.len() as u64).unwrap();
    for (label, value) in unprotected {
        enc.i64(*label).unwrap();
        enc.i64(*value).unwrap();
    }
    enc.bytes(payload).unwrap();
    enc.bytes(signature).unwrap();
    out
}
