// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE signature algorithm registry.

use std::fmt;

/// COSE algorithm identifiers (IANA "COSE Algorithms" registry).
#[repr(i64)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoseAlgorithm {
    ES256 = -7,
    EdDSA = -8,
    ES384 = -35,
    ES512 = -36,
    PS256 = -37,
    PS384 = -38,
    PS512 = -39,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

/// Parameters handed to a [`crate::CryptoProvider`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AlgorithmParams {
    Ecdsa { hash: HashAlgorithm },
    EdDsa,
    RsaPss { hash: HashAlgorithm, salt_length: usize },
}

impl CoseAlgorithm {
    pub const ALL: [CoseAlgorithm; 7] = [
        CoseAlgorithm::ES256,
        CoseAlgorithm::EdDSA,
        CoseAlgorithm::ES384,
        CoseAlgorithm::ES512,
        CoseAlgorithm::PS256,
        CoseAlgorithm::PS384,
        CoseAlgorithm::PS512,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            CoseAlgorithm::ES256 => "ES256",
            CoseAlgorithm::EdDSA => "EdDSA",
            CoseAlgorithm::ES384 => "ES384",
            CoseAlgorithm::ES512 => "ES512",
            CoseAlgorithm::PS256 => "PS256",
            CoseAlgorithm::PS384 => "PS384",
            CoseAlgorithm::PS512 => "PS512",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// PSS salt length follows RFC 8230: equal to the digest length.
    pub fn params(self) -> AlgorithmParams {
        let pss = |hash: HashAlgorithm| AlgorithmParams::RsaPss {
            hash,
            salt_length: hash.output_len(),
        };
        match self {
            CoseAlgorithm::ES256 => AlgorithmParams::Ecdsa { hash: HashAlgorithm::Sha256 },
            CoseAlgorithm::ES384 => AlgorithmParams::Ecdsa { hash: HashAlgorithm::Sha384 },
            CoseAlgorithm::ES512 => AlgorithmParams::Ecdsa { hash: HashAlgorithm::Sha512 },
            CoseAlgorithm::EdDSA => AlgorithmParams::EdDsa,
            CoseAlgorithm::PS256 => pss(HashAlgorithm::Sha256),
            CoseAlgorithm::PS384 => pss(HashAlgorithm::Sha384),
            CoseAlgorithm::PS512 => pss(HashAlgorithm::Sha512),
        }
    }
}

impl fmt::Display for CoseAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
