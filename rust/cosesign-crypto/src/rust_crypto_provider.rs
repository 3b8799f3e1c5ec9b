// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Default [`CryptoProvider`] backed by the RustCrypto crates.
//!
//! Supported algorithms:
//! - ECDSA over P-256/P-384/P-521 with SHA-256/384/512. COSE carries ECDSA
//!   signatures as the raw `r || s` concatenation.
//! - EdDSA over Ed25519.
//! - RSASSA-PSS with SHA-256/384/512 and a caller-chosen salt length.

use async_trait::async_trait;
use cosesign_abstractions::{
    AlgorithmParams, CoseError, CryptoProvider, HashAlgorithm, JsonWebKey, KeyHandle, KeyUsage, Result,
};
use rand_core::OsRng;
use rsa::{pss, RsaPrivateKey, RsaPublicKey};
use sha2::digest::FixedOutputReset;
use sha2::{Digest, Sha256, Sha384, Sha512};
use signature::{RandomizedSigner as _, SignatureEncoding as _, Signer as _, Verifier as _};

use crate::key_material::{import, KeyMaterial};

#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CryptoProvider for RustCryptoProvider {
    fn name(&self) -> &'static str {
        "rustcrypto"
    }

    async fn import_key(&self, jwk: &JsonWebKey, params: AlgorithmParams, usage: KeyUsage) -> Result<KeyHandle> {
        let material = import(jwk, params, usage)?;
        tracing::trace!(kty = jwk.kty(), ?params, ?usage, "imported key");
        Ok(KeyHandle::new(params, usage, Box::new(material)))
    }

    async fn sign(&self, params: AlgorithmParams, key: &KeyHandle, data: &[u8]) -> Result<Vec<u8>> {
        check_params(params, key)?;
        let bad_sign = |e: signature::Error| CoseError::crypto_with("signing failed", e);

        match (material(key)?, params) {
            (KeyMaterial::P256Signing(sk), _) => {
                let sig: p256::ecdsa::Signature = sk.try_sign(data).map_err(bad_sign)?;
                Ok(sig.to_bytes().to_vec())
            }
            (KeyMaterial::P384Signing(sk), _) => {
                let sig: p384::ecdsa::Signature = sk.try_sign(data).map_err(bad_sign)?;
                Ok(sig.to_bytes().to_vec())
            }
            (KeyMaterial::P521Signing(sk), _) => {
                let sig: p521::ecdsa::Signature = sk.try_sign(data).map_err(bad_sign)?;
                Ok(sig.to_bytes().to_vec())
            }
            (KeyMaterial::Ed25519Signing(sk), _) => Ok(sk.sign(data).to_bytes().to_vec()),
            (KeyMaterial::RsaPrivate(sk), AlgorithmParams::RsaPss { hash, salt_length }) => match hash {
                HashAlgorithm::Sha256 => pss_sign::<Sha256>(sk, salt_length, data),
                HashAlgorithm::Sha384 => pss_sign::<Sha384>(sk, salt_length, data),
                HashAlgorithm::Sha512 => pss_sign::<Sha512>(sk, salt_length, data),
            },
            _ => Err(CoseError::crypto("Key handle was not imported for signing")),
        }
    }

    async fn verify(&self, params: AlgorithmParams, key: &KeyHandle, signature: &[u8], data: &[u8]) -> Result<bool> {
        check_params(params, key)?;

        let verified = match (material(key)?, params) {
            (KeyMaterial::P256Verifying(vk), _) => verify_ecdsa_p256(vk, data, signature),
            (KeyMaterial::P256Signing(sk), _) => verify_ecdsa_p256(sk.verifying_key(), data, signature),
            (KeyMaterial::P384Verifying(vk), _) => verify_ecdsa_p384(vk, data, signature),
            (KeyMaterial::P384Signing(sk), _) => verify_ecdsa_p384(sk.verifying_key(), data, signature),
            (KeyMaterial::P521Verifying(vk), _) => verify_ecdsa_p521(vk, data, signature),
            (KeyMaterial::P521Signing(sk), _) => verify_ecdsa_p521(&p521::ecdsa::VerifyingKey::from(sk), data, signature),
            (KeyMaterial::Ed25519Verifying(vk), _) => verify_ed25519(vk, data, signature),
            (KeyMaterial::Ed25519Signing(sk), _) => verify_ed25519(&sk.verifying_key(), data, signature),
            (KeyMaterial::RsaPublic(pk), AlgorithmParams::RsaPss { hash, salt_length }) => {
                verify_rsa_pss(pk, hash, salt_length, data, signature)
            }
            (KeyMaterial::RsaPrivate(sk), AlgorithmParams::RsaPss { hash, salt_length }) => {
                verify_rsa_pss(&sk.to_public_key(), hash, salt_length, data, signature)
            }
            _ => return Err(CoseError::crypto("Key handle does not match the algorithm")),
        };
        Ok(verified)
    }
}

fn check_params(params: AlgorithmParams, key: &KeyHandle) -> Result<()> {
    if key.params() != params {
        return Err(CoseError::crypto(format!(
            "Key was imported for {:?}, not {params:?}",
            key.params()
        )));
    }
    Ok(())
}

fn material(key: &KeyHandle) -> Result<&KeyMaterial> {
    key.material::<KeyMaterial>()
        .ok_or_else(|| CoseError::crypto("Key handle was not created by this provider"))
}

fn pss_sign<D>(key: &RsaPrivateKey, salt_length: usize, data: &[u8]) -> Result<Vec<u8>>
where
    D: Digest + FixedOutputReset,
{
    let sk = pss::SigningKey::<D>::new_with_salt_len(key.clone(), salt_length);
    let sig = sk
        .try_sign_with_rng(&mut OsRng, data)
        .map_err(|e| CoseError::crypto_with("RSA-PSS signing failed", e))?;
    Ok(sig.to_vec())
}

// Malformed signatures are a verification failure, not an error.

fn verify_ecdsa_p256(vk: &p256::ecdsa::VerifyingKey, msg: &[u8], sig: &[u8]) -> bool {
    p256::ecdsa::Signature::from_slice(sig).is_ok_and(|s| vk.verify(msg, &s).is_ok())
}

fn verify_ecdsa_p384(vk: &p384::ecdsa::VerifyingKey, msg: &[u8], sig: &[u8]) -> bool {
    p384::ecdsa::Signature::from_slice(sig).is_ok_and(|s| vk.verify(msg, &s).is_ok())
}

fn verify_ecdsa_p521(vk: &p521::ecdsa::VerifyingKey, msg: &[u8], sig: &[u8]) -> bool {
    p521::ecdsa::Signature::from_slice(sig).is_ok_and(|s| vk.verify(msg, &s).is_ok())
}

fn verify_ed25519(vk: &ed25519_dalek::VerifyingKey, msg: &[u8], sig: &[u8]) -> bool {
    ed25519_dalek::Signature::from_slice(sig).is_ok_and(|s| vk.verify(msg, &s).is_ok())
}

fn verify_rsa_pss(key: &RsaPublicKey, hash: HashAlgorithm, salt_length: usize, msg: &[u8], sig: &[u8]) -> bool {
    fn verify<D: Digest + FixedOutputReset>(key: &RsaPublicKey, salt_length: usize, msg: &[u8], sig: &[u8]) -> bool {
        let vk = pss::VerifyingKey::<D>::new_with_salt_len(key.clone(), salt_length);
        pss::Signature::try_from(sig).is_ok_and(|s| vk.verify(msg, &s).is_ok())
    }

    match hash {
        HashAlgorithm::Sha256 => verify::<Sha256>(key, salt_length, msg, sig),
        HashAlgorithm::Sha384 => verify::<Sha384>(key, salt_length, msg, sig),
        HashAlgorithm::Sha512 => verify::<Sha512>(key, salt_length, msg, sig),
    }
}
