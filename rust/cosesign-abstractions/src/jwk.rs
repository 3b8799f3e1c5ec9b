// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JSON Web Key (RFC 7517) shapes for the key types COSE signing uses.
//!
//! Key material is kept base64url (no padding) encoded, exactly as it appears
//! in JWK JSON. [`JsonWebKey::validate`] checks that every member decodes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::{CoseError, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcCurve {
    #[serde(rename = "P-256")]
    P256,
    #[serde(rename = "P-384")]
    P384,
    #[serde(rename = "P-521")]
    P521,
}

impl EcCurve {
    /// Length in bytes of a coordinate or scalar on this curve.
    pub fn field_len(self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OkpCurve {
    Ed25519,
    Ed448,
    X25519,
    X448,
}

/// EC key. `x` and `y` are required even on private keys (RFC 7518 §6.2.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkEc {
    pub crv: EcCurve,
    pub x: String,
    pub y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkOkp {
    pub crv: OkpCurve,
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkRsa {
    pub n: String,
    pub e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum JsonWebKey {
    #[serde(rename = "EC")]
    Ec(JwkEc),
    #[serde(rename = "OKP")]
    Okp(JwkOkp),
    #[serde(rename = "RSA")]
    Rsa(JwkRsa),
}

impl JsonWebKey {
    /// JOSE `kty` value.
    pub fn kty(&self) -> &'static str {
        match self {
            JsonWebKey::Ec(_) => "EC",
            JsonWebKey::Okp(_) => "OKP",
            JsonWebKey::Rsa(_) => "RSA",
        }
    }

    pub fn kid(&self) -> Option<&str> {
        match self {
            JsonWebKey::Ec(k) => k.kid.as_deref(),
            JsonWebKey::Okp(k) => k.kid.as_deref(),
            JsonWebKey::Rsa(k) => k.kid.as_deref(),
        }
    }

    pub fn alg(&self) -> Option<&str> {
        match self {
            JsonWebKey::Ec(k) => k.alg.as_deref(),
            JsonWebKey::Okp(k) => k.alg.as_deref(),
            JsonWebKey::Rsa(k) => k.alg.as_deref(),
        }
    }

    pub fn is_private(&self) -> bool {
        match self {
            JsonWebKey::Ec(k) => k.d.is_some(),
            JsonWebKey::Okp(k) => k.d.is_some(),
            JsonWebKey::Rsa(k) => k.d.is_some(),
        }
    }

    /// Copy of this key with all private members removed.
    pub fn to_public(&self) -> JsonWebKey {
        match self {
            JsonWebKey::Ec(k) => JsonWebKey::Ec(JwkEc { d: None, ..k.clone() }),
            JsonWebKey::Okp(k) => JsonWebKey::Okp(JwkOkp { d: None, ..k.clone() }),
            JsonWebKey::Rsa(k) => JsonWebKey::Rsa(JwkRsa {
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
                ..k.clone()
            }),
        }
    }

    /// Check that required members are present and every key member is valid base64url.
    pub fn validate(&self) -> Result<()> {
        match self {
            JsonWebKey::Ec(k) => {
                require_b64(&k.x)?;
                require_b64(&k.y)?;
                optional_b64(k.d.as_deref())?;
            }
            JsonWebKey::Okp(k) => {
                require_b64(&k.x)?;
                optional_b64(k.y.as_deref())?;
                optional_b64(k.d.as_deref())?;
            }
            JsonWebKey::Rsa(k) => {
                require_b64(&k.n)?;
                require_b64(&k.e)?;
                for member in [&k.d, &k.p, &k.q, &k.dp, &k.dq, &k.qi] {
                    optional_b64(member.as_deref())?;
                }
            }
        }
        Ok(())
    }
}

/// Decode a base64url (no padding) JWK member.
pub fn decode_b64url(value: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| CoseError::validation_with("Expected JsonWebKey", e))
}

pub fn encode_b64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn require_b64(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CoseError::validation("Expected JsonWebKey"));
    }
    decode_b64url(value).map(|_| ())
}

fn optional_b64(value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), require_b64)
}
