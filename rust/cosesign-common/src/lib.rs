// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE wire codec: canonical CBOR, header maps, Sig_structure and message
//! structures.

pub mod cbor;
pub mod cose_sign;
pub mod header_map;
pub mod sig_structure;

pub use cbor::{decode_value, encode_canonical};
pub use cose_sign::{decode, CoseSign1Structure, CoseSignStructure, CoseSignatureRecord};
pub use header_map::{
    decode_protected_headers, decode_unprotected_headers, encode_protected_headers, header_map_to_value,
    normalize_headers, NamedHeaders,
};
pub use sig_structure::SigStructure;
