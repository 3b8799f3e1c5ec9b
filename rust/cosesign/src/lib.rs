// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! High-level COSE signing and verification facade.
//!
//! This crate is the primary Rust entry point: it signs payloads as
//! COSE_Sign1 or COSE_Sign, verifies COSE_Sign1 messages, decodes both
//! shapes and converts keys between COSE_Key and JWK.
//!
//! Design note: to keep the public API simple, everything is exposed at the
//! crate root; the codec, key and crypto crates stay implementation details.

// Internal implementation modules.
mod signing;
mod verification;

// Public API organization (lib.rs is a publisher).
mod api;
mod results;
mod sign_options;
mod verify_options;

pub use results::{SignResult, VerificationResult};
pub use sign_options::{MultiSignOptions, SignOptions, Signer, SingleSignOptions};
pub use verify_options::{Verifier, VerifyOptions};

pub use api::{
    decode,
    encode_signature1_sig_structure,
    encode_signature_sig_structure,
    from_cose_key,
    sign,
    to_cose_key,
    verify,
};

pub use cosesign_abstractions::{
    AlgorithmParams, BoxError, CborValue, CoseAlgorithm, CoseError, CoseErrorKind, CoseHeaderMap, CoseStructureKind,
    CryptoProvider, DecodedCose, DecodedSign, DecodedSign1, DecodedSignature, EcCurve, ExternalSigner, ExternalVerifier,
    HashAlgorithm, HeaderKey, HeaderParameter, JsonWebKey, JwkEc, JwkOkp, JwkRsa, KeyHandle, KeyUsage, OkpCurve, Result,
};
pub use cosesign_common::{CoseSign1Structure, CoseSignStructure, CoseSignatureRecord, NamedHeaders};
pub use cosesign_crypto::RustCryptoProvider;
