// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Key (RFC 8152 §7) to JSON Web Key (RFC 7517) conversion, both ways.

pub mod cose_key;
pub mod parameters;

pub use cose_key::{from_cose_key, to_cose_key};
pub use parameters::{CoseCurve, CoseKeyParameter, KeyOperation, KeyType};
