// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Caller-supplied signing and verification callbacks.
//!
//! Plain closures implement both traits, so callers with a synchronous HSM or
//! remote signer can pass `|data: &[u8]| -> Result<Vec<u8>, BoxError> { ... }`.

use async_trait::async_trait;

use crate::BoxError;

#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Sign the encoded Sig_structure and return the raw signature bytes.
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>, BoxError>;
}

#[async_trait]
pub trait ExternalVerifier: Send + Sync {
    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, BoxError>;
}

#[async_trait]
impl<F> ExternalSigner for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        self(data)
    }
}

#[async_trait]
impl<F> ExternalVerifier for F
where
    F: Fn(&[u8], &[u8]) -> Result<bool, BoxError> + Send + Sync,
{
    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, BoxError> {
        self(data, signature)
    }
}
