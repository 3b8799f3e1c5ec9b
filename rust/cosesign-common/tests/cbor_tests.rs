// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::{CborValue, CoseErrorKind};
use cosesign_common::{decode_value, encode_canonical};
use hex_literal::hex;

#[test]
fn map_keys_are_sorted_by_encoded_length_then_bytes() {
    let value = CborValue::Map(vec![
        (CborValue::from("a"), CborValue::from(1i64)),
        (CborValue::from(100i64), CborValue::from(4i64)),
        (CborValue::from(-1i64), CborValue::from(3i64)),
        (CborValue::from(10i64), CborValue::from(2i64)),
    ]);

    assert_eq!(encode_canonical(&value).unwrap(), hex!("a4 0a 02 20 03 18 64 04 61 61 01"));
}

#[test]
fn nested_maps_are_canonical_too() {
    let value = CborValue::Array(vec![CborValue::Map(vec![
        (CborValue::from(2i64), CborValue::Null),
        (CborValue::from(1i64), CborValue::Bool(true)),
    ])]);

    assert_eq!(encode_canonical(&value).unwrap(), hex!("81 a2 01 f5 02 f6"));
}

#[test]
fn integers_use_minimal_heads_across_the_full_range() {
    assert_eq!(encode_canonical(&CborValue::from(23i64)).unwrap(), hex!("17"));
    assert_eq!(encode_canonical(&CborValue::from(24i64)).unwrap(), hex!("18 18"));
    assert_eq!(encode_canonical(&CborValue::from(-7i64)).unwrap(), hex!("26"));
    assert_eq!(
        encode_canonical(&CborValue::from(u64::MAX)).unwrap(),
        hex!("1b ff ff ff ff ff ff ff ff")
    );
    assert_eq!(
        encode_canonical(&CborValue::Integer(-(1i128 << 64))).unwrap(),
        hex!("3b ff ff ff ff ff ff ff ff")
    );

    let err = encode_canonical(&CborValue::Integer(1i128 << 64)).unwrap_err();
    assert_eq!(err.kind(), CoseErrorKind::Validation);
}

#[test]
fn floats_use_the_smallest_lossless_width() {
    assert_eq!(encode_canonical(&CborValue::Float(0.0)).unwrap(), hex!("f9 00 00"));
    assert_eq!(encode_canonical(&CborValue::Float(1.5)).unwrap(), hex!("f9 3e 00"));
    assert_eq!(encode_canonical(&CborValue::Float(5.960464477539063e-8)).unwrap(), hex!("f9 00 01"));
    assert_eq!(encode_canonical(&CborValue::Float(f64::INFINITY)).unwrap(), hex!("f9 7c 00"));
    assert_eq!(encode_canonical(&CborValue::Float(100000.0)).unwrap(), hex!("fa 47 c3 50 00"));
    assert_eq!(
        encode_canonical(&CborValue::Float(1.1)).unwrap(),
        hex!("fb 3f f1 99 99 99 99 99 9a")
    );
}

#[test]
fn decodes_nested_items() {
    let value = decode_value(&hex!("83 01 20 d8 40 42 31 31")).unwrap();
    assert_eq!(
        value,
        CborValue::Array(vec![
            CborValue::Integer(1),
            CborValue::Integer(-1),
            CborValue::Tag(64, Box::new(CborValue::Bytes(b"11".to_vec()))),
        ])
    );

    assert_eq!(decode_value(&hex!("f9 3e 00")).unwrap(), CborValue::Float(1.5));
    assert_eq!(
        decode_value(&hex!("3b ff ff ff ff ff ff ff ff")).unwrap(),
        CborValue::Integer(-(1i128 << 64))
    );
}

#[test]
fn decode_rejects_trailing_bytes_and_truncation() {
    assert_eq!(decode_value(&hex!("01 02")).unwrap_err().kind(), CoseErrorKind::Decode);
    assert_eq!(decode_value(&hex!("82 01")).unwrap_err().kind(), CoseErrorKind::Decode);
    assert_eq!(decode_value(&[]).unwrap_err().kind(), CoseErrorKind::Decode);
}

#[test]
fn decode_rejects_indefinite_lengths() {
    for input in [&hex!("9f 01 ff")[..], &hex!("bf ff"), &hex!("5f ff"), &hex!("7f ff"), &hex!("81 9f ff")] {
        let err = decode_value(input).unwrap_err();
        assert_eq!(err.kind(), CoseErrorKind::Decode);
        assert_eq!(err.message(), "Indefinite-length CBOR items are not supported");
    }
}
