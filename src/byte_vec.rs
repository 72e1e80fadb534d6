use std::fmt;

use derive_more::{AsRef, Deref, From};
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};
use zeroize::{Zeroize, Zeroizing};

use crate::utils::{deserialize_base64, serialize_base64};

/// A zeroizing-on-drop, variable-length byte buffer that (de)serializes
/// from/to base64url-no-pad.
///
/// Used both for `Base64Octets` fields (the `oct` key's `k`, an `OKP` key's
/// `x`/`d`) and for the `SizedBase64Integer` fields whose width is not
/// statically known but whose transmitted length is semantically meaningful
/// (the RSA modulus `n`): on decode, whatever length arrived on the wire is
/// preserved exactly, and `len()` reports it.
#[derive(Clone, Zeroize, Deref, AsRef, From, Default)]
pub struct ByteVec(pub Vec<u8>);

impl ByteVec {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Fails with `Error::InvalidSize` if this value's length doesn't match
    /// `expected`, per the `checkSize` helper in §4.A of the specification.
    pub fn check_size(&self, expected: usize) -> Result<(), crate::error::Error> {
        if self.0.len() != expected {
            Err(crate::error::Error::InvalidSize {
                expected,
                actual: self.0.len(),
            })
        } else {
            Ok(())
        }
    }

    /// The integer magnitude's bit length, ignoring any leading zero bytes
    /// that padded the transmitted width (used for RSA key-strength checks).
    pub fn bit_length(&self) -> usize {
        let trimmed = crate::utils::trim_leading_zeros(&self.0);
        if trimmed == [0] {
            return 0;
        }
        let leading_byte_bits = 8 - trimmed[0].leading_zeros() as usize;
        (trimmed.len() - 1) * 8 + leading_byte_bits
    }
}

impl fmt::Debug for ByteVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(debug_assertions) {
            write!(f, "{}", crate::utils::encode(&self.0))
        } else {
            write!(f, "ByteVec({} bytes)", self.0.len())
        }
    }
}

impl PartialEq for ByteVec {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ByteVec {}

impl Serialize for ByteVec {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_base64(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for ByteVec {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let bytes = Zeroizing::new(deserialize_base64(d)?);
        Ok(ByteVec(bytes.to_vec()))
    }
}
