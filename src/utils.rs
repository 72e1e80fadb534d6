//! Base64url-no-pad helpers shared by the byte container types.
//!
//! RFC 7515 §2 mandates base64url encoding with no padding for every JOSE
//! byte/integer field. We use `base64ct`, the same constant-time-decode
//! implementation the RustCrypto `elliptic-curve` crate uses for its own
//! JWK support, rather than hand-rolling padding/alphabet handling.

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{de, ser};

pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

pub fn decode(s: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64UrlUnpadded::decode_vec(s)
}

pub fn serialize_base64<S: ser::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&encode(bytes))
}

pub fn deserialize_base64<'de, D: de::Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
    let encoded = <&str>::deserialize(d)?;
    decode(encoded).map_err(|e| de::Error::custom(format!("invalid base64url: {}", e)))
}

use serde::Deserialize;

/// Strips leading zero bytes from a big-endian unsigned integer, per the
/// `Base64Integer` minimal-encoding rule. An all-zero input collapses to a
/// single zero byte rather than the empty string.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first_nonzero = bytes.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(i) => &bytes[i..],
        None if bytes.is_empty() => bytes,
        None => &bytes[bytes.len() - 1..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_leading_zeros() {
        assert_eq!(trim_leading_zeros(&[0, 0, 1, 2]), &[1, 2]);
        assert_eq!(trim_leading_zeros(&[1, 2]), &[1, 2]);
        assert_eq!(trim_leading_zeros(&[0, 0, 0]), &[0]);
        assert_eq!(trim_leading_zeros(&[]), &[] as &[u8]);
    }

    #[test]
    fn roundtrips_through_base64url_no_pad() {
        let bytes = b"hello, jwk";
        let encoded = encode(bytes);
        assert!(!encoded.contains('='));
        assert_eq!(decode(&encoded).unwrap(), bytes);
    }
}
