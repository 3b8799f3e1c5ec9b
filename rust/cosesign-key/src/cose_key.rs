// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Key encoding and decoding.
//!
//! JWK key members (base64url) become byte strings, `kid` becomes UTF-8
//! bytes, and `kty`/`crv`/`alg`/`key_ops` names become their COSE integer ids.

use std::collections::BTreeMap;

use cosesign_abstractions::jwk::{decode_b64url, encode_b64url};
use cosesign_abstractions::{CborValue, CoseAlgorithm, CoseError, JsonWebKey, JwkEc, JwkOkp, JwkRsa, Result};
use cosesign_common::{decode_value, encode_canonical};

use crate::parameters::{CoseCurve, CoseKeyParameter as P, KeyOperation, KeyType};

/// CBOR tag some encoders put on byte strings (RFC 8746 uint8 typed array).
const TYPED_ARRAY_U8_TAG: u64 = 64;

/// Encode a JWK as a canonical COSE_Key map.
pub fn to_cose_key(jwk: &JsonWebKey) -> Result<Vec<u8>> {
    jwk.validate()?;

    let mut entries: Vec<(P, CborValue)> = Vec::new();

    let (kid, alg, key_ops) = match jwk {
        JsonWebKey::Ec(k) => {
            entries.push((P::Kty, KeyType::Ec2.id().into()));
            entries.push((P::Crv, CoseCurve::Ec(k.crv).id().into()));
            push_bytes(&mut entries, P::X, Some(k.x.as_str()))?;
            push_bytes(&mut entries, P::Y, Some(k.y.as_str()))?;
            push_bytes(&mut entries, P::D, k.d.as_deref())?;
            (&k.kid, &k.alg, &k.key_ops)
        }
        JsonWebKey::Okp(k) => {
            entries.push((P::Kty, KeyType::Okp.id().into()));
            entries.push((P::Crv, CoseCurve::Okp(k.crv).id().into()));
            push_bytes(&mut entries, P::X, Some(k.x.as_str()))?;
            push_bytes(&mut entries, P::Y, k.y.as_deref())?;
            push_bytes(&mut entries, P::D, k.d.as_deref())?;
            (&k.kid, &k.alg, &k.key_ops)
        }
        JsonWebKey::Rsa(k) => {
            entries.push((P::Kty, KeyType::Rsa.id().into()));
            push_bytes(&mut entries, P::N, Some(k.n.as_str()))?;
            push_bytes(&mut entries, P::E, Some(k.e.as_str()))?;
            push_bytes(&mut entries, P::RsaD, k.d.as_deref())?;
            push_bytes(&mut entries, P::P, k.p.as_deref())?;
            push_bytes(&mut entries, P::Q, k.q.as_deref())?;
            push_bytes(&mut entries, P::Dp, k.dp.as_deref())?;
            push_bytes(&mut entries, P::Dq, k.dq.as_deref())?;
            push_bytes(&mut entries, P::Qi, k.qi.as_deref())?;
            (&k.kid, &k.alg, &k.key_ops)
        }
    };

    if let Some(kid) = kid {
        entries.push((P::Kid, CborValue::Bytes(kid.as_bytes().to_vec())));
    }
    if let Some(alg) = alg {
        let value = match CoseAlgorithm::from_name(alg) {
            Some(a) => a.id().into(),
            None => CborValue::from(alg.as_str()),
        };
        entries.push((P::Alg, value));
    }
    if let Some(ops) = key_ops {
        let ops = ops
            .iter()
            .map(|op| match KeyOperation::from_jwk_name(op) {
                Some(known) => known.id().into(),
                None => CborValue::from(op.as_str()),
            })
            .collect();
        entries.push((P::KeyOps, CborValue::Array(ops)));
    }

    let map = CborValue::Map(
        entries
            .into_iter()
            .map(|(param, value)| (CborValue::from(param.label()), value))
            .collect(),
    );
    encode_canonical(&map)
}

/// Decode a COSE_Key map into a JWK.
///
/// Labels this crate does not know are dropped.
pub fn from_cose_key(bytes: &[u8]) -> Result<JsonWebKey> {
    if bytes.is_empty() {
        return Err(CoseError::validation("Expected CoseKey"));
    }

    let decoded = decode_value(bytes)?;
    let entries = decoded
        .as_map()
        .ok_or_else(|| CoseError::decode("Expecting COSE_Key to be a map"))?;

    let kty = entries
        .iter()
        .find(|(k, _)| k.as_i64() == Some(P::Kty.label()))
        .and_then(|(_, v)| v.as_i64())
        .and_then(KeyType::from_id)
        .ok_or_else(expected_jwk)?;

    let mut fields: BTreeMap<P, &CborValue> = BTreeMap::new();
    for (label, value) in entries {
        let Some(param) = label.as_i64().and_then(|l| P::resolve(kty, l)) else {
            tracing::trace!(?label, "dropping unknown COSE_Key label");
            continue;
        };
        fields.insert(param, untag(value));
    }

    let kid = fields
        .get(&P::Kid)
        .map(|v| {
            v.as_bytes()
                .and_then(|b| String::from_utf8(b.to_vec()).ok())
                .ok_or_else(expected_jwk)
        })
        .transpose()?;
    let alg = fields.get(&P::Alg).map(|v| alg_name(v)).transpose()?;
    let key_ops = fields.get(&P::KeyOps).map(|v| key_op_names(v)).transpose()?;

    let member = |param: P| -> Result<Option<String>> {
        fields
            .get(&param)
            .map(|v| v.as_bytes().map(encode_b64url).ok_or_else(expected_jwk))
            .transpose()
    };
    let required = |param: P| -> Result<String> { member(param)?.ok_or_else(expected_jwk) };

    let jwk = match kty {
        KeyType::Ec2 => {
            let Some(CoseCurve::Ec(crv)) = curve(&fields)? else {
                return Err(expected_jwk());
            };
            JsonWebKey::Ec(JwkEc {
                crv,
                x: required(P::X)?,
                y: required(P::Y)?,
                d: member(P::D)?,
                kid,
                alg,
                key_ops,
            })
        }
        KeyType::Okp => {
            let Some(CoseCurve::Okp(crv)) = curve(&fields)? else {
                return Err(expected_jwk());
            };
            JsonWebKey::Okp(JwkOkp {
                crv,
                x: required(P::X)?,
                y: member(P::Y)?,
                d: member(P::D)?,
                kid,
                alg,
                key_ops,
            })
        }
        KeyType::Rsa => JsonWebKey::Rsa(JwkRsa {
            n: required(P::N)?,
            e: required(P::E)?,
            d: member(P::RsaD)?,
            p: member(P::P)?,
            q: member(P::Q)?,
            dp: member(P::Dp)?,
            dq: member(P::Dq)?,
            qi: member(P::Qi)?,
            kid,
            alg,
            key_ops,
        }),
    };

    jwk.validate()?;
    Ok(jwk)
}

fn push_bytes(entries: &mut Vec<(P, CborValue)>, param: P, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        entries.push((param, CborValue::Bytes(decode_b64url(v)?)));
    }
    Ok(())
}

fn expected_jwk() -> CoseError {
    CoseError::validation("Expected JsonWebKey")
}

fn untag(value: &CborValue) -> &CborValue {
    match value {
        CborValue::Tag(TYPED_ARRAY_U8_TAG, inner) if matches!(**inner, CborValue::Bytes(_)) => &**inner,
        other => other,
    }
}

fn curve(fields: &BTreeMap<P, &CborValue>) -> Result<Option<CoseCurve>> {
    fields
        .get(&P::Crv)
        .map(|v| v.as_i64().and_then(CoseCurve::from_id).ok_or_else(expected_jwk))
        .transpose()
}

fn alg_name(value: &CborValue) -> Result<String> {
    match value {
        CborValue::Text(s) => Ok(s.clone()),
        CborValue::Integer(_) => value
            .as_i64()
            .and_then(CoseAlgorithm::from_id)
            .map(|a| a.name().to_string())
            .ok_or_else(expected_jwk),
        _ => Err(expected_jwk()),
    }
}

fn key_op_names(value: &CborValue) -> Result<Vec<String>> {
    value
        .as_array()
        .ok_or_else(expected_jwk)?
        .iter()
        .map(|op| match op {
            CborValue::Text(s) => Ok(s.clone()),
            _ => op
                .as_i64()
                .and_then(KeyOperation::from_id)
                .map(|known| known.jwk_name().to_string())
                .ok_or_else(expected_jwk),
        })
        .collect()
}

