// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces and datatypes for the COSE signing crates.
//!
//! This crate exists to prevent circular dependencies across:
//! - the high-level facade (`cosesign`)
//! - the codec (`cosesign-common`), key converter (`cosesign-key`) and
//!   crypto provider (`cosesign-crypto`)
//!
//! It is intentionally kept small and stable.

pub mod algorithms;
pub mod cbor_value;
pub mod crypto_provider;
pub mod decoded;
pub mod error;
pub mod external;
pub mod header_map;
pub mod header_parameters;
pub mod jwk;

pub use algorithms::{AlgorithmParams, CoseAlgorithm, HashAlgorithm};
pub use cbor_value::CborValue;
pub use crypto_provider::{CryptoProvider, KeyHandle, KeyUsage};
pub use decoded::{
    CoseStructureKind, DecodedCose, DecodedSign, DecodedSign1, DecodedSignature, COSE_SIGN1_TAG, COSE_SIGN_TAG,
    SIG_STRUCTURE_CONTEXT_SIGNATURE, SIG_STRUCTURE_CONTEXT_SIGNATURE1,
};
pub use error::{BoxError, CoseError, CoseErrorKind, Result};
pub use external::{ExternalSigner, ExternalVerifier};
pub use header_map::{get_header, CoseHeaderMap, HeaderKey, HeaderMap};
pub use header_parameters::HeaderParameter;
pub use jwk::{EcCurve, JsonWebKey, JwkEc, JwkOkp, JwkRsa, OkpCurve};
