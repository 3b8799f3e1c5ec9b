// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CBOR data model used for payloads, header values and COSE_Key entries.

/// A CBOR data item.
///
/// Maps keep their entries in insertion order; canonical ordering is applied
/// by the encoder, not by this type.
#[derive(Debug, Clone, PartialEq)]
pub enum CborValue {
    Null,
    Undefined,
    Bool(bool),
    /// Any CBOR integer (major types 0 and 1: -2^64 ..= 2^64-1).
    Integer(i128),
    Float(f64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<CborValue>),
    Map(Vec<(CborValue, CborValue)>),
    Tag(u64, Box<CborValue>),
}

impl CborValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CborValue::Null | CborValue::Undefined)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            CborValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|i| i64::try_from(i).ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CborValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CborValue]> {
        match self {
            CborValue::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(CborValue, CborValue)]> {
        match self {
            CborValue::Map(m) => Some(m.as_slice()),
            _ => None,
        }
    }

    /// Look up a map entry by key. Returns `None` for non-map values.
    pub fn get(&self, key: &CborValue) -> Option<&CborValue> {
        self.as_map()
            .and_then(|entries| entries.iter().find(|(k, _)| k == key).map(|(_, v)| v))
    }
}

impl From<bool> for CborValue {
    fn from(v: bool) -> Self {
        CborValue::Bool(v)
    }
}

impl From<i64> for CborValue {
    fn from(v: i64) -> Self {
        CborValue::Integer(v as i128)
    }
}

impl From<i32> for CborValue {
    fn from(v: i32) -> Self {
        CborValue::Integer(v as i128)
    }
}

impl From<u64> for CborValue {
    fn from(v: u64) -> Self {
        CborValue::Integer(v as i128)
    }
}

impl From<f64> for CborValue {
    fn from(v: f64) -> Self {
        CborValue::Float(v)
    }
}

impl From<&str> for CborValue {
    fn from(v: &str) -> Self {
        CborValue::Text(v.to_string())
    }
}

impl From<String> for CborValue {
    fn from(v: String) -> Self {
        CborValue::Text(v)
    }
}

impl From<&[u8]> for CborValue {
    fn from(v: &[u8]) -> Self {
        CborValue::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for CborValue {
    fn from(v: Vec<u8>) -> Self {
        CborValue::Bytes(v)
    }
}

impl From<Vec<CborValue>> for CborValue {
    fn from(v: Vec<CborValue>) -> Self {
        CborValue::Array(v)
    }
}
