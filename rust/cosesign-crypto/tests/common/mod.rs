// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key generation helpers for `cosesign-crypto` integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cosesign_abstractions::{EcCurve, JsonWebKey, JwkEc, JwkOkp, JwkRsa, OkpCurve};
use p256::elliptic_curve::sec1::ToEncodedPoint as _;
use rand_core::OsRng;
use rsa::traits::{PrivateKeyParts as _, PublicKeyParts as _};

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn ec_jwk(crv: EcCurve, d: &[u8], point: &[u8]) -> JsonWebKey {
    // Uncompressed SEC1: 0x04 || x || y
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
    let sk = p256::SecretKey::random(&mut OsRng);
    ec_jwk(EcCurve::P256, &sk.to_bytes(), sk.public_key().to_encoded_point(false).as_bytes())
}

pub fn p384_jwk() -> JsonWebKey {
    let sk = p384::SecretKey::random(&mut OsRng);
    ec_jwk(EcCurve::P384, &sk.to_bytes(), sk.public_key().to_encoded_point(false).as_bytes())
}

pub fn p521_jwk() -> JsonWebKey {
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
