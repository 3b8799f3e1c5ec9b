// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JWK to RustCrypto key conversion.

use cosesign_abstractions::jwk::decode_b64url;
use cosesign_abstractions::{
    AlgorithmParams, CoseError, EcCurve, HashAlgorithm, JsonWebKey, JwkEc, JwkRsa, KeyUsage, OkpCurve, Result,
};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

/// Key material held inside a [`cosesign_abstractions::KeyHandle`].
pub(crate) enum KeyMaterial {
    P256Signing(p256::ecdsa::SigningKey),
    P256Verifying(p256::ecdsa::VerifyingKey),
    P384Signing(p384::ecdsa::SigningKey),
    P384Verifying(p384::ecdsa::VerifyingKey),
    P521Signing(p521::ecdsa::SigningKey),
    P521Verifying(p521::ecdsa::VerifyingKey),
    Ed25519Signing(ed25519_dalek::SigningKey),
    Ed25519Verifying(ed25519_dalek::VerifyingKey),
    RsaPrivate(RsaPrivateKey),
    RsaPublic(RsaPublicKey),
}

pub(crate) fn import(jwk: &JsonWebKey, params: AlgorithmParams, usage: KeyUsage) -> Result<KeyMaterial> {
    if usage == KeyUsage::Sign && !jwk.is_private() {
        return Err(CoseError::crypto("Signing requires a private key"));
    }

    match (jwk, params) {
        (JsonWebKey::Ec(k), AlgorithmParams::Ecdsa { hash }) => import_ec(k, hash, usage),
        (JsonWebKey::Okp(k), AlgorithmParams::EdDsa) => {
            if k.crv != OkpCurve::Ed25519 {
                return Err(CoseError::crypto(format!("Unsupported EdDSA curve {:?}", k.crv)));
            }
            match (usage, k.d.as_deref()) {
                (KeyUsage::Sign, Some(d)) => {
                    let d: [u8; 32] = fixed(&key_bytes(d)?, "Ed25519 private key")?;
                    Ok(KeyMaterial::Ed25519Signing(ed25519_dalek::SigningKey::from_bytes(&d)))
                }
                _ => {
                    let x: [u8; 32] = fixed(&key_bytes(&k.x)?, "Ed25519 public key")?;
                    let vk = ed25519_dalek::VerifyingKey::from_bytes(&x)
                        .map_err(|e| CoseError::crypto_with("bad Ed25519 public key", e))?;
                    Ok(KeyMaterial::Ed25519Verifying(vk))
                }
            }
        }
        (JsonWebKey::Rsa(k), AlgorithmParams::RsaPss { .. }) => import_rsa(k, usage),
        (jwk, params) => Err(CoseError::crypto(format!("Key type {} cannot be used with {params:?}", jwk.kty()))),
    }
}

fn import_ec(k: &JwkEc, hash: HashAlgorithm, usage: KeyUsage) -> Result<KeyMaterial> {
    let expected = match k.crv {
        EcCurve::P256 => HashAlgorithm::Sha256,
        EcCurve::P384 => HashAlgorithm::Sha384,
        EcCurve::P521 => HashAlgorithm::Sha512,
    };
    if hash != expected {
        return Err(CoseError::crypto(format!("Curve {:?} cannot be used with {hash:?}", k.crv)));
    }

    if let (KeyUsage::Sign, Some(d)) = (usage, k.d.as_deref()) {
        let d = left_pad(key_bytes(d)?, k.crv.field_len());
        let bad = |e: signature::Error| CoseError::crypto_with(format!("bad {:?} private key", k.crv), e);
        return Ok(match k.crv {
            EcCurve::P256 => KeyMaterial::P256Signing(p256::ecdsa::SigningKey::from_slice(&d).map_err(bad)?),
            EcCurve::P384 => KeyMaterial::P384Signing(p384::ecdsa::SigningKey::from_slice(&d).map_err(bad)?),
            EcCurve::P521 => KeyMaterial::P521Signing(p521::ecdsa::SigningKey::from_slice(&d).map_err(bad)?),
        });
    }

    // Uncompressed SEC1 point: 0x04 || x || y.
    let mut sec1 = vec![0x04];
    sec1.extend(left_pad(key_bytes(&k.x)?, k.crv.field_len()));
    sec1.extend(left_pad(key_bytes(&k.y)?, k.crv.field_len()));

    let bad = |e: signature::Error| CoseError::crypto_with(format!("bad {:?} public key", k.crv), e);
    Ok(match k.crv {
        EcCurve::P256 => KeyMaterial::P256Verifying(p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(bad)?),
        EcCurve::P384 => KeyMaterial::P384Verifying(p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(bad)?),
        EcCurve::P521 => KeyMaterial::P521Verifying(p521::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).map_err(bad)?),
    })
}

fn import_rsa(k: &JwkRsa, usage: KeyUsage) -> Result<KeyMaterial> {
    let n = big_uint(&k.n)?;
    let e = big_uint(&k.e)?;

    if let (KeyUsage::Sign, Some(d)) = (usage, k.d.as_deref()) {
        let primes = [&k.p, &k.q]
            .into_iter()
            .flatten()
            .map(|p| big_uint(p))
            .collect::<Result<Vec<_>>>()?;
        let key = RsaPrivateKey::from_components(n, e, big_uint(d)?, primes)
            .map_err(|e| CoseError::crypto_with("bad RSA private key", e))?;
        return Ok(KeyMaterial::RsaPrivate(key));
    }

    let key = RsaPublicKey::new(n, e).map_err(|e| CoseError::crypto_with("bad RSA public key", e))?;
    Ok(KeyMaterial::RsaPublic(key))
}

fn key_bytes(b64: &str) -> Result<Vec<u8>> {
    decode_b64url(b64).map_err(|e| CoseError::crypto_with("Key member is not valid base64url", e))
}

fn big_uint(b64: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&key_bytes(b64)?))
}

fn fixed<const N: usize>(bytes: &[u8], what: &str) -> Result<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| CoseError::crypto(format!("{what} must be {N} bytes")))
}

fn left_pad(bytes: Vec<u8>, len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes;
    }
    let mut out = vec![0u8; len - bytes.len()];
    out.extend(bytes);
    out
}
