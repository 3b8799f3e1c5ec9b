// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable asymmetric crypto primitives.
//!
//! The signing and verification pipelines never touch key material directly:
//! they import a [`JsonWebKey`] through a [`CryptoProvider`] and pass the
//! returned [`KeyHandle`] back to it.

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::{AlgorithmParams, JsonWebKey, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    Sign,
    Verify,
}

/// An imported key, opaque to everything except the provider that created it.
pub struct KeyHandle {
    params: AlgorithmParams,
    usage: KeyUsage,
    material: Box<dyn Any + Send + Sync>,
}

impl KeyHandle {
    pub fn new(params: AlgorithmParams, usage: KeyUsage, material: Box<dyn Any + Send + Sync>) -> Self {
        Self { params, usage, material }
    }

    pub fn params(&self) -> AlgorithmParams {
        self.params
    }

    pub fn usage(&self) -> KeyUsage {
        self.usage
    }

    /// Provider-specific material, if it has the expected type.
    pub fn material<T: Any>(&self) -> Option<&T> {
        self.material.downcast_ref::<T>()
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("params", &self.params)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait CryptoProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Import a JWK for one algorithm and one usage.
    ///
    /// A key whose type or curve does not fit `params`, or a `Sign` import of a
    /// public key, is a `Crypto` error.
    async fn import_key(&self, jwk: &JsonWebKey, params: AlgorithmParams, usage: KeyUsage) -> Result<KeyHandle>;

    async fn sign(&self, params: AlgorithmParams, key: &KeyHandle, data: &[u8]) -> Result<Vec<u8>>;

    /// `Ok(false)` for a well-formed call whose signature does not check out,
    /// including signatures of the wrong length.
    async fn verify(&self, params: AlgorithmParams, key: &KeyHandle, signature: &[u8], data: &[u8]) -> Result<bool>;
}
