// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! IANA COSE Key registries: key types, curves, key operations and labels.

use cosesign_abstractions::{EcCurve, OkpCurve};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    Okp,
    Ec2,
    Rsa,
}

impl KeyType {
    pub fn id(self) -> i64 {
        match self {
            KeyType::Okp => 1,
            KeyType::Ec2 => 2,
            KeyType::Rsa => 3,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(KeyType::Okp),
            2 => Some(KeyType::Ec2),
            3 => Some(KeyType::Rsa),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoseCurve {
    Ec(EcCurve),
    Okp(OkpCurve),
}

impl CoseCurve {
    pub fn id(self) -> i64 {
        match self {
            CoseCurve::Ec(EcCurve::P256) => 1,
            CoseCurve::Ec(EcCurve::P384) => 2,
            CoseCurve::Ec(EcCurve::P521) => 3,
            CoseCurve::Okp(OkpCurve::X25519) => 4,
            CoseCurve::Okp(OkpCurve::X448) => 5,
            CoseCurve::Okp(OkpCurve::Ed25519) => 6,
            CoseCurve::Okp(OkpCurve::Ed448) => 7,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Some(match id {
            1 => CoseCurve::Ec(EcCurve::P256),
            2 => CoseCurve::Ec(EcCurve::P384),
            3 => CoseCurve::Ec(EcCurve::P521),
            4 => CoseCurve::Okp(OkpCurve::X25519),
            5 => CoseCurve::Okp(OkpCurve::X448),
            6 => CoseCurve::Okp(OkpCurve::Ed25519),
            7 => CoseCurve::Okp(OkpCurve::Ed448),
            _ => return None,
        })
    }
}

/// `key_ops` values. JWK names exist for 1..=8 only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyOperation {
    Sign,
    Verify,
    Encrypt,
    Decrypt,
    WrapKey,
    UnwrapKey,
    DeriveKey,
    DeriveBits,
}

impl KeyOperation {
    pub const ALL: [KeyOperation; 8] = [
        KeyOperation::Sign,
        KeyOperation::Verify,
        KeyOperation::Encrypt,
        KeyOperation::Decrypt,
        KeyOperation::WrapKey,
        KeyOperation::UnwrapKey,
        KeyOperation::DeriveKey,
        KeyOperation::DeriveBits,
    ];

    pub fn id(self) -> i64 {
        match self {
            KeyOperation::Sign => 1,
            KeyOperation::Verify => 2,
            KeyOperation::Encrypt => 3,
            KeyOperation::Decrypt => 4,
            KeyOperation::WrapKey => 5,
            KeyOperation::UnwrapKey => 6,
            KeyOperation::DeriveKey => 7,
            KeyOperation::DeriveBits => 8,
        }
    }

    pub fn jwk_name(self) -> &'static str {
        match self {
            KeyOperation::Sign => "sign",
            KeyOperation::Verify => "verify",
            KeyOperation::Encrypt => "encrypt",
            KeyOperation::Decrypt => "decrypt",
            KeyOperation::WrapKey => "wrapKey",
            KeyOperation::UnwrapKey => "unwrapKey",
            KeyOperation::DeriveKey => "deriveKey",
            KeyOperation::DeriveBits => "deriveBits",
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.id() == id)
    }

    pub fn from_jwk_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.jwk_name() == name)
    }
}

/// COSE_Key map labels, common and key-type specific.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoseKeyParameter {
    Kty,
    Kid,
    Alg,
    KeyOps,
    /// EC2 / OKP curve.
    Crv,
    X,
    Y,
    /// EC2 / OKP private scalar.
    D,
    N,
    E,
    /// RSA private exponent.
    RsaD,
    P,
    Q,
    Dp,
    Dq,
    Qi,
}

impl CoseKeyParameter {
    pub fn label(self) -> i64 {
        match self {
            CoseKeyParameter::Kty => 1,
            CoseKeyParameter::Kid => 2,
            CoseKeyParameter::Alg => 3,
            CoseKeyParameter::KeyOps => 4,
            CoseKeyParameter::Crv | CoseKeyParameter::N => -1,
            CoseKeyParameter::X | CoseKeyParameter::E => -2,
            CoseKeyParameter::Y | CoseKeyParameter::RsaD => -3,
            CoseKeyParameter::D | CoseKeyParameter::P => -4,
            CoseKeyParameter::Q => -5,
            CoseKeyParameter::Dp => -6,
            CoseKeyParameter::Dq => -7,
            CoseKeyParameter::Qi => -8,
        }
    }

    /// Resolve a label: key-type parameters first, then common ones.
    pub fn resolve(kty: KeyType, label: i64) -> Option<Self> {
        Self::key_type_specific(kty, label).or_else(|| Self::common(label))
    }

    fn common(label: i64) -> Option<Self> {
        Some(match label {
            1 => CoseKeyParameter::Kty,
            2 => CoseKeyParameter::Kid,
            3 => CoseKeyParameter::Alg,
            4 => CoseKeyParameter::KeyOps,
            _ => return None,
        })
    }

    fn key_type_specific(kty: KeyType, label: i64) -> Option<Self> {
        Some(match (kty, label) {
            (KeyType::Ec2 | KeyType::Okp, -1) => CoseKeyParameter::Crv,
            (KeyType::Ec2 | KeyType::Okp, -2) => CoseKeyParameter::X,
            (KeyType::Ec2 | KeyType::Okp, -3) => CoseKeyParameter::Y,
            (KeyType::Ec2 | KeyType::Okp, -4) => CoseKeyParameter::D,
            (KeyType::Rsa, -1) => CoseKeyParameter::N,
            (KeyType::Rsa, -2) => CoseKeyParameter::E,
            (KeyType::Rsa, -3) => CoseKeyParameter::RsaD,
            (KeyType::Rsa, -4) => CoseKeyParameter::P,
            (KeyType::Rsa, -5) => CoseKeyParameter::Q,
            (KeyType::Rsa, -6) => CoseKeyParameter::Dp,
            (KeyType::Rsa, -7) => CoseKeyParameter::Dq,
            (KeyType::Rsa, -8) => CoseKeyParameter::Qi,
            _ => return None,
        })
    }
}
