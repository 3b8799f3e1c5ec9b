// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign_common::SigStructure;
use hex_literal::hex;

#[test]
fn signature1_layout() {
    let protected = hex!("a1 01 26");
    let encoded = SigStructure::sign1(&protected, None, b"payload").encode().unwrap();

    let mut expected = vec![0x84, 0x6a];
    expected.extend_from_slice(b"Signature1");
    expected.extend_from_slice(&hex!("43 a1 01 26 40 47"));
    expected.extend_from_slice(b"payload");
    assert_eq!(encoded, expected);
}

#[test]
fn signature_layout_includes_signer_protected_and_aad() {
    let sign_protected = hex!("a1 01 26");
    let encoded = SigStructure::signature(&[], &sign_protected, Some(&[0xaa]), b"p")
        .encode()
        .unwrap();

    let mut expected = vec![0x85, 0x69];
    expected.extend_from_slice(b"Signature");
    expected.extend_from_slice(&hex!("40 43 a1 01 26 41 aa 41"));
    expected.extend_from_slice(b"p");
    assert_eq!(encoded, expected);
}

#[test]
fn missing_aad_is_empty_bstr() {
    let a = SigStructure::sign1(&[], None, b"x").encode().unwrap();
    let b = SigStructure::sign1(&[], Some(&[]), b"x").encode().unwrap();
    assert_eq!(a, b);
    assert_eq!(SigStructure::sign1(&[], None, b"x").external_aad, b"");
}
