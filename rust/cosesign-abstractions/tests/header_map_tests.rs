// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_abstractions::{get_header, CborValue, CoseHeaderMap, HeaderKey, HeaderMap, HeaderParameter};

fn headers(entries: Vec<(HeaderKey, CborValue)>) -> CoseHeaderMap {
    CoseHeaderMap::new(Vec::new(), entries.into_iter().collect::<HeaderMap>())
}

#[test]
fn typed_getters_only_match_their_type() {
    let map = headers(vec![
        (HeaderKey::Int(1), CborValue::from(-7i64)),
        (HeaderKey::Int(4), CborValue::from(b"kid-1".to_vec())),
        (HeaderKey::Int(3), CborValue::from("application/json")),
        (HeaderKey::Int(33), CborValue::Array(vec![CborValue::Bytes(vec![1, 2])])),
    ]);

    assert_eq!(map.get_int(1), Some(-7));
    assert_eq!(map.get_bytes(4), Some(&b"kid-1"[..]));
    assert_eq!(map.get_text(3), Some("application/json"));
    assert_eq!(map.get_array(33).map(|a| a.len()), Some(1));

    assert_eq!(map.get_int(4), None);
    assert_eq!(map.get_bytes(1), None);
    assert_eq!(map.get_text(99), None);
    assert!(!map.is_empty());
    assert!(CoseHeaderMap::default().is_empty());
}

#[test]
fn get_header_prefers_protected_label_then_name() {
    let protected = headers(vec![
        (HeaderKey::Int(4), CborValue::from(b"by-label".to_vec())),
        (HeaderKey::from("kid"), CborValue::from(b"by-name".to_vec())),
    ]);
    let unprotected = headers(vec![(HeaderKey::Int(4), CborValue::from(b"unprotected".to_vec()))]);

    assert_eq!(
        get_header(&protected, &unprotected, "kid"),
        Some(&CborValue::Bytes(b"by-label".to_vec()))
    );
    assert_eq!(
        get_header(&protected, &unprotected, 4i64),
        Some(&CborValue::Bytes(b"by-label".to_vec()))
    );
}

#[test]
fn get_header_falls_back_to_unprotected() {
    let protected = headers(vec![(HeaderKey::Int(1), CborValue::from(-7i64))]);
    let unprotected = headers(vec![(HeaderKey::from("kid"), CborValue::from(b"11".to_vec()))]);

    assert_eq!(
        get_header(&protected, &unprotected, HeaderParameter::Kid),
        Some(&CborValue::Bytes(b"11".to_vec()))
    );
    assert_eq!(get_header(&protected, &unprotected, "x5chain"), None);
}

#[test]
fn get_header_returns_present_falsy_values() {
    let protected = headers(vec![(HeaderKey::Int(3), CborValue::from(0i64))]);
    let unprotected = headers(vec![(HeaderKey::Int(3), CborValue::from(50i64))]);

    assert_eq!(get_header(&protected, &unprotected, "ctyp"), Some(&CborValue::Integer(0)));

    let protected = headers(vec![(HeaderKey::from("custom"), CborValue::Bool(false))]);
    assert_eq!(
        get_header(&protected, &CoseHeaderMap::default(), "custom"),
        Some(&CborValue::Bool(false))
    );
}

#[test]
fn header_parameter_registry_round_trips() {
    for p in HeaderParameter::ALL {
        assert_eq!(HeaderParameter::from_label(p.label()), Some(p));
        assert_eq!(HeaderParameter::from_name(p.name()), Some(p));
    }
    assert_eq!(HeaderParameter::from_name("ctyp").map(|p| p.label()), Some(3));
    assert_eq!(HeaderParameter::from_label(8), None);
    assert_eq!(HeaderParameter::from_name("nope"), None);
}
