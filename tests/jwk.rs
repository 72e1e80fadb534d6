//! Black-box integration tests exercising the public API the way a
//! consumer of this crate would: parse/emit JSON, sign/verify, generate,
//! thumbprint.

use jsonwebkey::{sign, verify, JsonWebKey, JwkAlg, JwsAlg, JwkSet, KeyGenParam, KeyMaterial, KeyUse};
use rand::rngs::OsRng;

#[test]
fn round_trip_preserves_semantic_content() {
    let json = r#"{"kty":"oct","use":"sig","kid":"k1","k":"Wpj30SfkzM_m0Sa_B2NqNw","alg":"HS256"}"#;
    let jwk: JsonWebKey = json.parse().unwrap();
    let re = serde_json::to_string(&jwk).unwrap();
    let jwk2: JsonWebKey = re.parse().unwrap();
    assert_eq!(jwk, jwk2);
}

#[test]
fn es256_signature_is_exactly_64_bytes_and_verifies() {
    let jwk = JsonWebKey::generate(KeyGenParam::Ec(jsonwebkey::Crv::P256), &mut OsRng).unwrap();
    let sig = jwk.sign(JwsAlg::ES256, b"a message").unwrap();
    assert_eq!(sig.len(), 64);
    let public = jwk.to_public().unwrap();
    assert!(public.verify(JwsAlg::ES256, b"a message", &sig).unwrap());
}

#[test]
fn es384_and_es512_signature_widths() {
    let jwk384 = JsonWebKey::generate(KeyGenParam::Ec(jsonwebkey::Crv::P384), &mut OsRng).unwrap();
    let sig384 = jwk384.sign(JwsAlg::ES384, b"msg").unwrap();
    assert_eq!(sig384.len(), 96);

    let jwk521 = JsonWebKey::generate(KeyGenParam::Ec(jsonwebkey::Crv::P521), &mut OsRng).unwrap();
    let sig521 = jwk521.sign(JwsAlg::ES512, b"msg").unwrap();
    assert_eq!(sig521.len(), 132);
}

#[test]
fn flipping_a_signature_bit_fails_verification_not_an_error() {
    let jwk = JsonWebKey::generate(KeyGenParam::Ec(jsonwebkey::Crv::P256), &mut OsRng).unwrap();
    let mut sig = jwk.sign(JwsAlg::ES256, b"a message").unwrap();
    sig[0] ^= 0x01;
    let public = jwk.to_public().unwrap();
    assert!(!public.verify(JwsAlg::ES256, b"a message", &sig).unwrap());
}

#[test]
fn undersized_rsa_key_is_rejected_for_signing_and_best_alg() {
    let material = KeyMaterial::generate(KeyGenParam::Rsa { size_bytes: 128 }, &mut OsRng).unwrap();
    let err = sign(JwsAlg::RS256, &material, b"msg").unwrap_err();
    assert!(matches!(err, jsonwebkey::Error::KeySizeTooSmall));
    let err = jsonwebkey::best_jws_alg(&material).unwrap_err();
    assert!(matches!(err, jsonwebkey::Error::KeySizeTooSmall));
}

#[test]
fn generated_oct_key_round_trips_hmac_through_best_jws_alg() {
    let material = KeyMaterial::generate(KeyGenParam::Oct { size_bytes: 64 }, &mut OsRng).unwrap();
    let alg = jsonwebkey::best_jws_alg(&material).unwrap();
    assert_eq!(alg, JwsAlg::HS512);
    let sig = sign(alg, &material, b"payload").unwrap();
    assert!(verify(alg, &material, b"payload", &sig).unwrap());
}

#[test]
fn ed25519_key_admits_only_eddsa() {
    let material = KeyMaterial::generate(KeyGenParam::Okp(jsonwebkey::OkpCrv::Ed25519), &mut OsRng).unwrap();
    let alg = jsonwebkey::best_jws_alg(&material).unwrap();
    assert_eq!(alg, JwsAlg::EdDSA);
    let sig = sign(JwsAlg::EdDSA, &material, b"m").unwrap();
    assert_eq!(sig.len(), 64);
    assert!(verify(JwsAlg::EdDSA, &material, b"m", &sig).unwrap());
}

#[test]
fn x25519_key_cannot_sign() {
    let material = KeyMaterial::generate(KeyGenParam::Okp(jsonwebkey::OkpCrv::X25519), &mut OsRng).unwrap();
    let err = jsonwebkey::best_jws_alg(&material).unwrap_err();
    assert!(matches!(err, jsonwebkey::Error::KeyMismatch(_)));
}

#[test]
fn public_view_removes_all_secret_fields_from_emitted_json() {
    let jwk = JsonWebKey::generate(KeyGenParam::Ec(jsonwebkey::Crv::P256), &mut OsRng).unwrap();
    let public = jwk.to_public().unwrap();
    let json = serde_json::to_string(&public).unwrap();
    for field in ["\"d\"", "\"p\"", "\"q\"", "\"dp\"", "\"dq\"", "\"qi\"", "\"oth\"", "\"k\""] {
        assert!(!json.contains(field), "public JSON unexpectedly contains {field}: {json}");
    }
}

#[test]
fn oct_key_has_no_public_view() {
    let jwk: JsonWebKey = r#"{"kty":"oct","k":"AQID"}"#.parse().unwrap();
    assert!(jwk.to_public().is_none());
}

#[test]
fn thumbprint_is_stable_across_unrelated_metadata() {
    let a: JsonWebKey = r#"{"kty":"oct","k":"AQID","kid":"first"}"#.parse().unwrap();
    let b: JsonWebKey = r#"{"kty":"oct","k":"AQID","kid":"second","use":"sig"}"#.parse().unwrap();
    let tp_a = a.thumbprint::<sha2::Sha256>().unwrap();
    let tp_b = b.thumbprint::<sha2::Sha256>().unwrap();
    assert_eq!(tp_a, tp_b);
}

#[test]
fn jwk_set_parses_multiple_keys_and_preserves_use() {
    let json = r#"{"keys":[
        {"kty":"oct","k":"AQID","use":"sig","kid":"a"},
        {"kty":"oct","k":"BAUG","use":"enc","kid":"b"}
    ]}"#;
    let set: JwkSet = json.parse().unwrap();
    assert_eq!(set.keys.len(), 2);
    assert_eq!(set.find("a").unwrap().key_use, Some(KeyUse::Signing));
    assert_eq!(set.find("b").unwrap().key_use, Some(KeyUse::Encryption));
}

#[test]
fn jwe_alg_value_round_trips_opaquely() {
    let json = r#"{"kty":"RSA","n":"AQID","e":"AQAB","alg":"RSA-OAEP-256"}"#;
    let jwk: JsonWebKey = json.parse().unwrap();
    assert_eq!(jwk.algorithm, Some(JwkAlg::Opaque("RSA-OAEP-256".to_string())));
}

#[test]
fn none_algorithm_only_verifies_an_empty_signature() {
    let material = KeyMaterial::generate(KeyGenParam::Oct { size_bytes: 32 }, &mut OsRng).unwrap();
    assert!(verify(JwsAlg::None, &material, b"anything", b"").unwrap());
    assert!(!verify(JwsAlg::None, &material, b"anything", b"x").unwrap());
}
