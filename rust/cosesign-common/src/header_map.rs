// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Header normalization and header map (de)serialization.

use std::collections::BTreeMap;

use cosesign_abstractions::{
    CborValue, CoseAlgorithm, CoseError, CoseHeaderMap, HeaderKey, HeaderMap, HeaderParameter, Result,
};

use crate::cbor::{decode_value, encode_canonical};

/// Caller-facing headers keyed by parameter name (`"alg"`, `"kid"`, ...).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NamedHeaders(BTreeMap<String, CborValue>);

impl NamedHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<CborValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CborValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&CborValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CborValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CborValue>> FromIterator<(K, V)> for NamedHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Map parameter names to integer labels, converting values where COSE needs it.
///
/// `Null`/`Undefined` values are dropped.
pub fn normalize_headers(headers: &NamedHeaders) -> Result<HeaderMap> {
    let mut out = HeaderMap::new();
    for (name, value) in headers.iter() {
        let param = HeaderParameter::from_name(name)
            .ok_or_else(|| CoseError::validation(format!("Unknown parameter, '{name}'")))?;
        if value.is_null() {
            continue;
        }
        out.insert(HeaderKey::Int(param.label()), convert_value(param, value)?);
    }
    Ok(out)
}

fn convert_value(param: HeaderParameter, value: &CborValue) -> Result<CborValue> {
    match (param, value) {
        (HeaderParameter::Kid, CborValue::Text(kid)) => Ok(CborValue::Bytes(kid.as_bytes().to_vec())),
        (HeaderParameter::Alg, CborValue::Text(name)) => CoseAlgorithm::from_name(name)
            .map(|alg| CborValue::from(alg.id()))
            .ok_or_else(|| CoseError::validation(format!("Unknown algorithm, '{name}'"))),
        (
            HeaderParameter::Alg
            | HeaderParameter::Crit
            | HeaderParameter::ContentType
            | HeaderParameter::Kid
            | HeaderParameter::Iv
            | HeaderParameter::PartialIv
            | HeaderParameter::CounterSignature
            | HeaderParameter::CounterSignature0
            | HeaderParameter::KidContext
            | HeaderParameter::X5Bag
            | HeaderParameter::X5Chain
            | HeaderParameter::X5T
            | HeaderParameter::X5U,
            _,
        ) => Ok(value.clone()),
    }
}

/// Header map as a CBOR map value.
pub fn header_map_to_value(map: &HeaderMap) -> CborValue {
    CborValue::Map(map.iter().map(|(k, v)| (CborValue::from(k.clone()), v.clone())).collect())
}

/// Encode protected headers as bstr content; an empty map is a zero-length string.
pub fn encode_protected_headers(map: &HeaderMap) -> Result<Vec<u8>> {
    if map.is_empty() {
        return Ok(Vec::new());
    }
    encode_canonical(&header_map_to_value(map))
}

/// Decode the content of a protected header bstr, keeping the raw bytes.
pub fn decode_protected_headers(bytes: &[u8]) -> Result<CoseHeaderMap> {
    // Empty bstr means empty map for protected headers.
    if bytes.is_empty() || bytes == [0xa0] {
        return Ok(CoseHeaderMap::new(bytes.to_vec(), HeaderMap::new()));
    }
    let value = decode_value(bytes)?;
    let map = header_map_from_value(&value)
        .map_err(|_| CoseError::decode("Expecting protected headers to be a map"))?;
    Ok(CoseHeaderMap::new(bytes.to_vec(), map))
}

/// Decode an unprotected header map item.
pub fn decode_unprotected_headers(value: &CborValue) -> Result<CoseHeaderMap> {
    let map = header_map_from_value(value)?;
    Ok(CoseHeaderMap::new(Vec::new(), map))
}

fn header_map_from_value(value: &CborValue) -> Result<HeaderMap> {
    let entries = value
        .as_map()
        .ok_or_else(|| CoseError::decode("Expecting unprotected headers to be a map"))?;

    let mut map = HeaderMap::new();
    for (k, v) in entries {
        map.insert(header_key(k)?, v.clone());
    }
    Ok(map)
}

fn header_key(key: &CborValue) -> Result<HeaderKey> {
    match key {
        CborValue::Integer(_) => key
            .as_i64()
            .map(HeaderKey::Int)
            .ok_or_else(|| CoseError::decode("Header label is out of range")),
        CborValue::Text(s) => Ok(HeaderKey::Text(s.clone())),
        other => Err(CoseError::decode(format!("Unsupported header label: {other:?}"))),
    }
}
