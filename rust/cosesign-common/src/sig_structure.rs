// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The to-be-signed `Sig_structure` (RFC 8152 §4.4).

use minicbor::Encoder;

use cosesign_abstractions::{CoseError, Result, SIG_STRUCTURE_CONTEXT_SIGNATURE, SIG_STRUCTURE_CONTEXT_SIGNATURE1};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SigStructure<'a> {
    pub context: &'static str,
    pub body_protected: &'a [u8],
    /// Present only for the multi-signer `"Signature"` context.
    pub sign_protected: Option<&'a [u8]>,
    pub external_aad: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> SigStructure<'a> {
    /// `["Signature1", body_protected, external_aad, payload]`
    pub fn sign1(body_protected: &'a [u8], external_aad: Option<&'a [u8]>, payload: &'a [u8]) -> Self {
        Self {
            context: SIG_STRUCTURE_CONTEXT_SIGNATURE1,
            body_protected,
            sign_protected: None,
            external_aad: external_aad.unwrap_or(&[]),
            payload,
        }
    }

    /// `["Signature", body_protected, sign_protected, external_aad, payload]`
    pub fn signature(
        body_protected: &'a [u8],
        sign_protected: &'a [u8],
        external_aad: Option<&'a [u8]>,
        payload: &'a [u8],
    ) -> Self {
        Self {
            context: SIG_STRUCTURE_CONTEXT_SIGNATURE,
            body_protected,
            sign_protected: Some(sign_protected),
            external_aad: external_aad.unwrap_or(&[]),
            payload,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let fields = if self.sign_protected.is_some() { 5 } else { 4 };
        let mut out = Vec::with_capacity(
            32 + self.body_protected.len()
                + self.sign_protected.map_or(0, <[u8]>::len)
                + self.external_aad.len()
                + self.payload.len(),
        );

        let mut enc = Encoder::new(&mut out);
        enc.array(fields).map_err(encode_error)?;
        enc.str(self.context).map_err(encode_error)?;
        enc.bytes(self.body_protected).map_err(encode_error)?;
        if let Some(sign_protected) = self.sign_protected {
            enc.bytes(sign_protected).map_err(encode_error)?;
        }
        enc.bytes(self.external_aad).map_err(encode_error)?;
        enc.bytes(self.payload).map_err(encode_error)?;

        tracing::trace!(context = self.context, len = out.len(), "encoded Sig_structure");
        Ok(out)
    }
}

fn encode_error(e: minicbor::encode::Error<std::convert::Infallible>) -> CoseError {
    CoseError::validation_with("Fail to encode Sig_structure", e)
}
