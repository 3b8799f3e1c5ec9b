// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Consumer example for the `cosesign` crate.
//!
//! Signs a file as a tagged COSE_Sign1 with a private JWK, and verifies a
//! COSE_Sign1 file with a (public or private) JWK.

use cosesign::{
    decode, sign, verify, CborValue, CoseAlgorithm, CoseError, JsonWebKey, NamedHeaders, Signer, SingleSignOptions,
    VerificationResult, Verifier, VerifyOptions,
};

/// Read a file to bytes or exit with a clear error.
fn read(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap_or_else(|e| {
        eprintln!("failed to read {path}: {e}");
        std::process::exit(2);
    })
}

fn read_jwk(path: &str) -> JsonWebKey {
    serde_json::from_slice(&read(path)).unwrap_or_else(|e| {
        eprintln!("failed to parse JWK {path}: {e}");
        std::process::exit(2);
    })
}

fn fail(what: &str, e: CoseError) -> ! {
    eprintln!("{what} failed ({}): {e}", e.kind());
    std::process::exit(1);
}

fn print_result(r: &VerificationResult) {
    println!("verified: {}", r.verified);
    match &r.payload {
        CborValue::Text(text) => println!("payload: {text}"),
        CborValue::Bytes(bytes) => println!("payload: {} bytes", bytes.len()),
        other => println!("payload: {other:?}"),
    }
}

fn get_arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1).cloned())
}

fn usage_and_exit(exe: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {exe} sign --key <jwk.json> --payload <file> --out <file> [--alg <name>]");
    eprintln!("    <name>: ES256 (default), ES384, ES512, EdDSA, PS256, PS384, PS512");
    eprintln!("  {exe} verify --key <jwk.json> --cose <file>");
    std::process::exit(2);
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let exe = args.first().map(|s| s.as_str()).unwrap_or("cosesign_hello_world");
    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("");

    match mode {
        "sign" => {
            let (Some(key_path), Some(payload_path), Some(out_path)) = (
                get_arg_value(&args, "--key"),
                get_arg_value(&args, "--payload"),
                get_arg_value(&args, "--out"),
            ) else {
                usage_and_exit(exe);
            };

            let alg_name = get_arg_value(&args, "--alg").unwrap_or_else(|| "ES256".to_string());
            let Some(alg) = CoseAlgorithm::from_name(&alg_name) else {
                eprintln!("unknown --alg value: {alg_name}");
                std::process::exit(2);
            };

            let jwk = read_jwk(&key_path);
            let mut protected = NamedHeaders::new();
            if let Some(kid) = jwk.kid() {
                protected.insert("kid", kid);
            }

            // Text files are signed as CBOR text, anything else as a byte string.
            let payload = match String::from_utf8(read(&payload_path)) {
                Ok(text) => CborValue::Text(text),
                Err(e) => CborValue::Bytes(e.into_bytes()),
            };

            let signer = Signer::new(alg).with_key(jwk).with_protected_headers(protected);
            let result = sign(SingleSignOptions::new(payload, signer))
                .await
                .unwrap_or_else(|e| fail("sign", e));
            let Some(bytes) = result.into_encoded() else {
                eprintln!("sign returned an unencoded structure");
                std::process::exit(1);
            };

            if let Err(e) = std::fs::write(&out_path, &bytes) {
                eprintln!("failed to write {out_path}: {e}");
                std::process::exit(2);
            }
            println!("wrote {} bytes to {out_path}", bytes.len());
        }
        "verify" => {
            let (Some(key_path), Some(cose_path)) = (get_arg_value(&args, "--key"), get_arg_value(&args, "--cose"))
            else {
                usage_and_exit(exe);
            };

            let cose = read(&cose_path);
            let decoded = decode(&cose).unwrap_or_else(|e| fail("decode", e));
            println!("structure: {:?} (tagged: {})", decoded.kind(), decoded.tagged());
            if let Some(kid) = decoded.kid() {
                println!("kid: {}", String::from_utf8_lossy(kid));
            }

            let r = verify(VerifyOptions::new(cose, Verifier::with_key(read_jwk(&key_path))))
                .await
                .unwrap_or_else(|e| fail("verify", e));
            print_result(&r);
            std::process::exit(if r.verified { 0 } else { 3 });
        }
        _ => usage_and_exit(exe),
    }
}
