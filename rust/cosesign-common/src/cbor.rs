// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Canonical CBOR encoding and strict decoding of [`CborValue`].
//!
//! Encoding follows the RFC 7049 §3.9 canonical rules: definite lengths,
//! minimal integer heads, map keys ordered shortest-encoding first and then
//! bytewise, and floats in the smallest width that preserves the value.

use minicbor::data::{Int, Tag, Type};
use minicbor::{Decoder, Encoder};

use cosesign_abstractions::{CborValue, CoseError, Result};

const MAX_DEPTH: usize = 128;

/// Canonically encode a single CBOR value.
pub fn encode_canonical(value: &CborValue) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// Append the canonical encoding of `value` to `out`.
pub fn encode_into(value: &CborValue, out: &mut Vec<u8>) -> Result<()> {
    let mut enc = Encoder::new(&mut *out);
    match value {
        CborValue::Null => {
            enc.null().map_err(encode_error)?;
        }
        CborValue::Undefined => {
            enc.undefined().map_err(encode_error)?;
        }
        CborValue::Bool(b) => {
            enc.bool(*b).map_err(encode_error)?;
        }
        CborValue::Integer(i) => {
            let int =
                Int::try_from(*i).map_err(|_| CoseError::validation(format!("Integer {i} is outside the CBOR range")))?;
            enc.int(int).map_err(encode_error)?;
        }
        CborValue::Float(f) => encode_float(&mut enc, *f)?,
        CborValue::Bytes(b) => {
            enc.bytes(b).map_err(encode_error)?;
        }
        CborValue::Text(s) => {
            enc.str(s).map_err(encode_error)?;
        }
        CborValue::Array(items) => {
            enc.array(items.len() as u64).map_err(encode_error)?;
            for item in items {
                encode_into(item, out)?;
            }
        }
        CborValue::Map(entries) => {
            let mut encoded = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                encoded.push((encode_canonical(k)?, encode_canonical(v)?));
            }
            encoded.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

            enc.map(encoded.len() as u64).map_err(encode_error)?;
            for (k, v) in encoded {
                out.extend_from_slice(&k);
                out.extend_from_slice(&v);
            }
        }
        CborValue::Tag(tag, inner) => {
            enc.tag(Tag::new(*tag)).map_err(encode_error)?;
            encode_into(inner, out)?;
        }
    }
    Ok(())
}

fn encode_float<W>(enc: &mut Encoder<W>, f: f64) -> Result<()>
where
    W: minicbor::encode::Write,
    W::Error: std::error::Error + Send + Sync + 'static,
{
    let narrow = f as f32;
    if f.is_nan() || (narrow as f64) == f {
        if fits_f16(narrow) {
            enc.f16(narrow).map_err(encode_error)?;
        } else {
            enc.f32(narrow).map_err(encode_error)?;
        }
    } else {
        enc.f64(f).map_err(encode_error)?;
    }
    Ok(())
}

/// Whether `f` survives a round trip through IEEE 754 binary16.
fn fits_f16(f: f32) -> bool {
    if f.is_nan() || f.is_infinite() || f == 0.0 {
        return true;
    }
    let bits = f.to_bits();
    let exponent = ((bits >> 23) & 0xff) as i32 - 127;
    let mantissa = bits & 0x007f_ffff;
    match exponent {
        -14..=15 => mantissa & 0x1fff == 0,
        -24..=-15 => {
            let shift = 13 + (-14 - exponent) as u32;
            (mantissa | 0x0080_0000) & ((1u32 << shift) - 1) == 0
        }
        _ => false,
    }
}

fn encode_error<E>(e: minicbor::encode::Error<E>) -> CoseError
where
    E: std::error::Error + Send + Sync + 'static,
{
    CoseError::validation_with("Fail to encode CBOR", e)
}

/// Decode exactly one CBOR item; trailing bytes are an error.
pub fn decode_value(bytes: &[u8]) -> Result<CborValue> {
    let mut dec = Decoder::new(bytes);
    let value = decode_item(&mut dec, 0)?;
    if dec.position() != bytes.len() {
        return Err(CoseError::decode("Trailing bytes after CBOR item"));
    }
    Ok(value)
}

/// Decode one item from a decoder positioned at its start.
pub fn decode_item(dec: &mut Decoder<'_>, depth: usize) -> Result<CborValue> {
    if depth > MAX_DEPTH {
        return Err(CoseError::decode("CBOR nesting is too deep"));
    }

    let value = match dec.datatype().map_err(decode_error)? {
        Type::Null => {
            dec.null().map_err(decode_error)?;
            CborValue::Null
        }
        Type::Undefined => {
            dec.undefined().map_err(decode_error)?;
            CborValue::Undefined
        }
        Type::Bool => CborValue::Bool(dec.bool().map_err(decode_error)?),
        Type::U8 | Type::U16 | Type::U32 | Type::U64 => CborValue::Integer(dec.u64().map_err(decode_error)? as i128),
        Type::I8 | Type::I16 | Type::I32 | Type::I64 => CborValue::Integer(dec.i64().map_err(decode_error)? as i128),
        Type::Int => CborValue::Integer(i128::from(dec.int().map_err(decode_error)?)),
        Type::F16 => CborValue::Float(dec.f16().map_err(decode_error)? as f64),
        Type::F32 => CborValue::Float(dec.f32().map_err(decode_error)? as f64),
        Type::F64 => CborValue::Float(dec.f64().map_err(decode_error)?),
        Type::Bytes => CborValue::Bytes(dec.bytes().map_err(decode_error)?.to_vec()),
        Type::String => CborValue::Text(dec.str().map_err(decode_error)?.to_string()),
        Type::Array => {
            let len = dec.array().map_err(decode_error)?.unwrap_or_default();
            let mut items = Vec::with_capacity(len.min(1024) as usize);
            for _ in 0..len {
                items.push(decode_item(dec, depth + 1)?);
            }
            CborValue::Array(items)
        }
        Type::Map => {
            let len = dec.map().map_err(decode_error)?.unwrap_or_default();
            let mut entries = Vec::with_capacity(len.min(1024) as usize);
            for _ in 0..len {
                let k = decode_item(dec, depth + 1)?;
                let v = decode_item(dec, depth + 1)?;
                entries.push((k, v));
            }
            CborValue::Map(entries)
        }
        Type::Tag => {
            let tag = dec.tag().map_err(decode_error)?;
            CborValue::Tag(tag.as_u64(), Box::new(decode_item(dec, depth + 1)?))
        }
        Type::ArrayIndef | Type::MapIndef | Type::BytesIndef | Type::StringIndef => {
            return Err(CoseError::decode("Indefinite-length CBOR items are not supported"))
        }
        other => return Err(CoseError::decode(format!("Unsupported CBOR item type: {other:?}"))),
    };
    Ok(value)
}

fn decode_error(e: minicbor::decode::Error) -> CoseError {
    CoseError::decode_with("Fail to decode CBOR", e)
}
