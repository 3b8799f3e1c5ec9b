// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use cosesign_abstractions::{CborValue, CoseAlgorithm, CryptoProvider, ExternalSigner, JsonWebKey};
use cosesign_common::NamedHeaders;

/// One signing identity: an algorithm, its credentials and its own headers.
///
/// For COSE_Sign1 the headers are the message headers. For COSE_Sign they
/// are the headers of this signer's COSE_Signature record.
#[derive(Clone)]
pub struct Signer {
    pub(crate) algorithm: CoseAlgorithm,
    pub(crate) key: Option<JsonWebKey>,
    pub(crate) external: Option<Arc<dyn ExternalSigner>>,
    pub(crate) protected: NamedHeaders,
    pub(crate) unprotected: NamedHeaders,
}

impl Signer {
    /// A signer with no credentials yet; add a key or an external signer.
    pub fn new(algorithm: CoseAlgorithm) -> Self {
        Self {
            algorithm,
            key: None,
            external: None,
            protected: NamedHeaders::new(),
            unprotected: NamedHeaders::new(),
        }
    }

    /// Sign with a private JWK through the crypto provider.
    pub fn with_key(mut self, key: JsonWebKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Sign through a caller-supplied callback. Takes precedence over a key.
    pub fn with_external_signer(mut self, signer: impl ExternalSigner + 'static) -> Self {
        self.external = Some(Arc::new(signer));
        self
    }

    pub fn with_protected_headers(mut self, headers: NamedHeaders) -> Self {
        self.protected = headers;
        self
    }

    pub fn with_unprotected_headers(mut self, headers: NamedHeaders) -> Self {
        self.unprotected = headers;
        self
    }

    pub fn algorithm(&self) -> CoseAlgorithm {
        self.algorithm
    }
}

/// Output shaping shared by single- and multi-signer requests.
#[derive(Clone, Default)]
pub(crate) struct Shaping {
    pub(crate) external_aad: Option<Vec<u8>>,
    pub(crate) skip_encoding_payload: bool,
    pub(crate) skip_encoding_result: bool,
    pub(crate) skip_tag: bool,
    pub(crate) crypto_provider: Option<Arc<dyn CryptoProvider>>,
}

macro_rules! shaping_builders {
    ($ty:ty) => {
        impl $ty {
            /// Externally supplied data bound into the signature but not carried in the message.
            pub fn with_external_aad(mut self, aad: impl Into<Vec<u8>>) -> Self {
                self.shaping.external_aad = Some(aad.into());
                self
            }

            /// Use the payload bytes as-is instead of CBOR-encoding the payload value.
            ///
            /// The payload must then be [`CborValue::Bytes`].
            pub fn skip_encoding_payload(mut self) -> Self {
                self.shaping.skip_encoding_payload = true;
                self
            }

            /// Return the message structure instead of its encoding.
            pub fn skip_encoding_result(mut self) -> Self {
                self.shaping.skip_encoding_result = true;
                self
            }

            /// Encode without the COSE CBOR tag.
            pub fn skip_tag(mut self) -> Self {
                self.shaping.skip_tag = true;
                self
            }

            /// Replace the default RustCrypto provider.
            pub fn with_crypto_provider(mut self, provider: Arc<dyn CryptoProvider>) -> Self {
                self.shaping.crypto_provider = Some(provider);
                self
            }
        }
    };
}

/// Request for a COSE_Sign1 message.
#[derive(Clone)]
pub struct SingleSignOptions {
    pub(crate) payload: CborValue,
    pub(crate) signer: Signer,
    pub(crate) shaping: Shaping,
}

impl SingleSignOptions {
    pub fn new(payload: impl Into<CborValue>, signer: Signer) -> Self {
        Self {
            payload: payload.into(),
            signer,
            shaping: Shaping::default(),
        }
    }
}

shaping_builders!(SingleSignOptions);

/// Request for a COSE_Sign message with one record per signer.
#[derive(Clone)]
pub struct MultiSignOptions {
    pub(crate) payload: CborValue,
    pub(crate) protected: NamedHeaders,
    pub(crate) unprotected: NamedHeaders,
    pub(crate) signers: Vec<Signer>,
    pub(crate) shaping: Shaping,
}

impl MultiSignOptions {
    pub fn new(payload: impl Into<CborValue>) -> Self {
        Self {
            payload: payload.into(),
            protected: NamedHeaders::new(),
            unprotected: NamedHeaders::new(),
            signers: Vec::new(),
            shaping: Shaping::default(),
        }
    }

    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signers.push(signer);
        self
    }

    /// Body protected headers.
    pub fn with_protected_headers(mut self, headers: NamedHeaders) -> Self {
        self.protected = headers;
        self
    }

    /// Body unprotected headers.
    pub fn with_unprotected_headers(mut self, headers: NamedHeaders) -> Self {
        self.unprotected = headers;
        self
    }
}

shaping_builders!(MultiSignOptions);

/// Everything [`crate::sign`] accepts.
#[derive(Clone)]
pub enum SignOptions {
    Single(SingleSignOptions),
    Multi(MultiSignOptions),
}

impl From<SingleSignOptions> for SignOptions {
    fn from(options: SingleSignOptions) -> Self {
        SignOptions::Single(options)
    }
}

impl From<MultiSignOptions> for SignOptions {
    fn from(options: MultiSignOptions) -> Self {
        SignOptions::Multi(options)
    }
}
