// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use cosesign_abstractions::{CryptoProvider, ExternalVerifier, JsonWebKey};

/// Credentials for checking one signature.
///
/// An external verifier takes precedence over a key. Private key members are
/// ignored; only the public part is imported.
#[derive(Default, Clone)]
pub struct Verifier {
    pub key: Option<JsonWebKey>,
    pub external: Option<Arc<dyn ExternalVerifier>>,
}

impl Verifier {
    pub fn with_key(key: JsonWebKey) -> Self {
        Self {
            key: Some(key),
            external: None,
        }
    }

    pub fn with_external_verifier(verifier: impl ExternalVerifier + 'static) -> Self {
        Self {
            key: None,
            external: Some(Arc::new(verifier)),
        }
    }
}

#[derive(Default, Clone)]
pub struct VerifyOptions {
    /// Encoded COSE message.
    pub data: Vec<u8>,
    pub verifier: Verifier,
    /// Externally supplied data bound into the signature.
    pub external_aad: Option<Vec<u8>>,
    /// Defaults to the RustCrypto provider.
    pub crypto_provider: Option<Arc<dyn CryptoProvider>>,
}

impl VerifyOptions {
    pub fn new(data: impl Into<Vec<u8>>, verifier: Verifier) -> Self {
        Self {
            data: data.into(),
            verifier,
            ..Default::default()
        }
    }

    pub fn with_external_aad(mut self, aad: impl Into<Vec<u8>>) -> Self {
        self.external_aad = Some(aad.into());
        self
    }

    pub fn with_crypto_provider(mut self, provider: Arc<dyn CryptoProvider>) -> Self {
        self.crypto_provider = Some(provider);
        self
    }
}
