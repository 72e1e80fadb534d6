//! The `x5c` JWK member (RFC 7517 §4.7): a chain of DER-encoded X.509
//! certificates. Unlike every other byte field in a JWK, RFC 7517 §4.7
//! mandates plain base64 (RFC 4648 §4, with padding) rather than
//! base64url-no-pad -- DER certificates routinely contain bytes that encode
//! to `+`/`/`, and the `=` padding is part of the wire format here, not
//! dropped the way RFC 7515 §2 drops it elsewhere in a JWK.

use std::fmt;

use base64ct::{Base64, Encoding};
use derive_more::{AsRef, Deref, From};
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};

/// One entry of an `x5c` chain: a DER-encoded certificate, standard-base64
/// encoded on the wire. Not secret material, so unlike `ByteVec` this does
/// not zeroize on drop.
#[derive(Clone, Deref, AsRef, From, Default)]
pub struct DerCertificate(pub Vec<u8>);

impl DerCertificate {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerCertificate({} bytes)", self.0.len())
    }
}

impl PartialEq for DerCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for DerCertificate {}

impl Serialize for DerCertificate {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&Base64::encode_string(&self.0))
    }
}

impl<'de> Deserialize<'de> for DerCertificate {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let encoded = <&str>::deserialize(d)?;
        let bytes = Base64::decode_vec(encoded)
            .map_err(|e| serde::de::Error::custom(format!("invalid base64: {}", e)))?;
        Ok(DerCertificate(bytes))
    }
}
