// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod key_material;
pub mod rust_crypto_provider;

pub use rust_crypto_provider::RustCryptoProvider;
