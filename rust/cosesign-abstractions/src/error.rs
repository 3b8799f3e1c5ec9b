// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error taxonomy shared by every COSE crate.
//!
//! Every failure is reported as a [`CoseError`]. Callers branch on
//! [`CoseError::kind`]; the original failure (an external callback error, a
//! CBOR decode error, a crypto error) is preserved as the error `source`.

use std::fmt;

/// Boxed error type used for caller-supplied callbacks and wrapped failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = CoseError> = std::result::Result<T, E>;

/// Discriminant of [`CoseError`], stable for matching.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CoseErrorKind {
    Validation,
    Decode,
    Sign,
    Verify,
    ExternalSignerFunction,
    ExternalVerifierFunction,
    Crypto,
    NotImplemented,
}

impl fmt::Display for CoseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoseErrorKind::Validation => "ValidationError",
            CoseErrorKind::Decode => "DecodeError",
            CoseErrorKind::Sign => "SignError",
            CoseErrorKind::Verify => "VerifyError",
            CoseErrorKind::ExternalSignerFunction => "ExternalSignerFunctionError",
            CoseErrorKind::ExternalVerifierFunction => "ExternalVerifierFunctionError",
            CoseErrorKind::Crypto => "CryptoError",
            CoseErrorKind::NotImplemented => "NotImplementedError",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CoseError {
    /// Input shape violation (malformed options, malformed key, unknown header).
    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Malformed or structurally non-conforming CBOR input.
    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Signing precondition violated.
    #[error("{message}")]
    Sign { message: String },

    /// Verification precondition violated.
    #[error("{message}")]
    Verify { message: String },

    /// A caller-supplied signer callback failed.
    #[error("{message}")]
    ExternalSignerFunction {
        message: String,
        #[source]
        source: BoxError,
    },

    /// A caller-supplied verifier callback failed.
    #[error("{message}")]
    ExternalVerifierFunction {
        message: String,
        #[source]
        source: BoxError,
    },

    /// The crypto provider failed to import a key, sign or verify.
    #[error("{message}")]
    Crypto {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Deliberately unsupported feature.
    #[error("{message}")]
    NotImplemented { message: String },
}

impl CoseError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoseError::Validation {
            message: message.into(),
            source: None,
        }
    }

    pub fn validation_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CoseError::Validation {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        CoseError::Decode {
            message: message.into(),
            source: None,
        }
    }

    pub fn decode_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CoseError::Decode {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn sign(message: impl Into<String>) -> Self {
        CoseError::Sign {
            message: message.into(),
        }
    }

    pub fn verify(message: impl Into<String>) -> Self {
        CoseError::Verify {
            message: message.into(),
        }
    }

    pub fn external_signer(source: BoxError) -> Self {
        CoseError::ExternalSignerFunction {
            message: "Calling externally supplied signer function failed".to_string(),
            source,
        }
    }

    pub fn external_verifier(source: BoxError) -> Self {
        CoseError::ExternalVerifierFunction {
            message: "Calling externally supplied verifier function failed".to_string(),
            source,
        }
    }

    pub fn crypto(message: impl Into<String>) -> Self {
        CoseError::Crypto {
            message: message.into(),
            source: None,
        }
    }

    pub fn crypto_with(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CoseError::Crypto {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        CoseError::NotImplemented {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CoseErrorKind {
        match self {
            CoseError::Validation { .. } => CoseErrorKind::Validation,
            CoseError::Decode { .. } => CoseErrorKind::Decode,
            CoseError::Sign { .. } => CoseErrorKind::Sign,
            CoseError::Verify { .. } => CoseErrorKind::Verify,
            CoseError::ExternalSignerFunction { .. } => CoseErrorKind::ExternalSignerFunction,
            CoseError::ExternalVerifierFunction { .. } => CoseErrorKind::ExternalVerifierFunction,
            CoseError::Crypto { .. } => CoseErrorKind::Crypto,
            CoseError::NotImplemented { .. } => CoseErrorKind::NotImplemented,
        }
    }

    /// Human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            CoseError::Validation { message, .. }
            | CoseError::Decode { message, .. }
            | CoseError::Sign { message }
            | CoseError::Verify { message }
            | CoseError::ExternalSignerFunction { message, .. }
            | CoseError::ExternalVerifierFunction { message, .. }
            | CoseError::Crypto { message, .. }
            | CoseError::NotImplemented { message } => message,
        }
    }
}
