// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE header map types.

use std::collections::BTreeMap;

use crate::{CborValue, HeaderParameter};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderKey {
    /// Integer label (the most common COSE header key form).
    Int(i64),
    /// Text label.
    Text(String),
}

impl From<i64> for HeaderKey {
    fn from(v: i64) -> Self {
        HeaderKey::Int(v)
    }
}

impl From<&str> for HeaderKey {
    fn from(v: &str) -> Self {
        HeaderKey::Text(v.to_string())
    }
}

impl From<String> for HeaderKey {
    fn from(v: String) -> Self {
        HeaderKey::Text(v)
    }
}

impl From<HeaderParameter> for HeaderKey {
    fn from(v: HeaderParameter) -> Self {
        HeaderKey::Int(v.label())
    }
}

impl From<HeaderKey> for CborValue {
    fn from(v: HeaderKey) -> Self {
        match v {
            HeaderKey::Int(i) => CborValue::Integer(i as i128),
            HeaderKey::Text(s) => CborValue::Text(s),
        }
    }
}

/// Label-keyed header map.
pub type HeaderMap = BTreeMap<HeaderKey, CborValue>;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoseHeaderMap {
    /// For protected headers, COSE requires the original CBOR bytes (bstr content)
    /// to be included in Sig_structure. We retain those bytes to avoid re-encoding.
    encoded_map_cbor: Vec<u8>,

    /// Decoded map used for lookups.
    map: HeaderMap,
}

impl CoseHeaderMap {
    /// Construct a header map from its original CBOR bytes and decoded entries.
    ///
    /// Unprotected headers are not part of Sig_structure; pass empty bytes.
    pub fn new(encoded_map_cbor: Vec<u8>, map: HeaderMap) -> Self {
        Self { encoded_map_cbor, map }
    }

    pub fn encoded_map_cbor(&self) -> &[u8] {
        &self.encoded_map_cbor
    }

    pub fn map(&self) -> &HeaderMap {
        &self.map
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, key: &HeaderKey) -> Option<&CborValue> {
        self.map.get(key)
    }

    pub fn get_int(&self, label: i64) -> Option<i64> {
        self.map.get(&HeaderKey::Int(label)).and_then(CborValue::as_i64)
    }

    pub fn get_bytes(&self, label: i64) -> Option<&[u8]> {
        self.map.get(&HeaderKey::Int(label)).and_then(CborValue::as_bytes)
    }

    pub fn get_text(&self, label: i64) -> Option<&str> {
        self.map.get(&HeaderKey::Int(label)).and_then(CborValue::as_text)
    }

    pub fn get_array(&self, label: i64) -> Option<&[CborValue]> {
        self.map.get(&HeaderKey::Int(label)).and_then(CborValue::as_array)
    }
}

/// Look up a header by label or by registered name.
///
/// Probes, in order: protected by label, protected by name, unprotected by
/// label, unprotected by name. The first entry that is present wins, whatever
/// its value.
pub fn get_header<'a>(
    protected: &'a CoseHeaderMap,
    unprotected: &'a CoseHeaderMap,
    key: impl Into<HeaderKey>,
) -> Option<&'a CborValue> {
    let key = key.into();
    let (label, name) = match &key {
        HeaderKey::Int(label) => (
            Some(HeaderKey::Int(*label)),
            HeaderParameter::from_label(*label).map(|p| HeaderKey::from(p.name())),
        ),
        HeaderKey::Text(name) => (
            HeaderParameter::from_name(name).map(HeaderKey::from),
            Some(HeaderKey::Text(name.clone())),
        ),
    };

    let probes = [label, name];
    for headers in [protected, unprotected] {
        for k in probes.iter().flatten() {
            if let Some(v) = headers.get(k) {
                return Some(v);
            }
        }
    }
    None
}
