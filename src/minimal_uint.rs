use std::fmt;

use derive_more::{AsRef, Deref, From};
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};
use zeroize::{Zeroize, Zeroizing};

use crate::utils::{deserialize_base64, serialize_base64, trim_leading_zeros};

/// A zeroizing-on-drop unsigned big integer with no declared width
/// (`Base64Integer` in the specification): it tolerates any length on
/// decode and always emits the minimal unsigned big-endian representation
/// (no leading zero byte) on encode. Used for the RSA public exponent `e`
/// and every RSA private-key component (`d`, `p`, `q`, `dp`, `dq`, `qi`,
/// and the `oth` triples), none of which have a curve- or modulus-fixed
/// width the way EC coordinates or the RSA modulus itself do.
#[derive(Clone, Zeroize, Deref, AsRef, From, Default)]
pub struct MinimalUInt(Vec<u8>);

impl MinimalUInt {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        MinimalUInt(trim_leading_zeros(bytes).to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0] || self.0.is_empty()
    }

    pub fn is_odd(&self) -> bool {
        matches!(self.0.last(), Some(b) if b & 1 == 1)
    }
}

impl fmt::Debug for MinimalUInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(debug_assertions) {
            write!(f, "{}", crate::utils::encode(&self.0))
        } else {
            write!(f, "MinimalUInt({} bytes)", self.0.len())
        }
    }
}

impl PartialEq for MinimalUInt {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for MinimalUInt {}

impl Serialize for MinimalUInt {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        serialize_base64(&self.0, s)
    }
}

impl<'de> Deserialize<'de> for MinimalUInt {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let bytes = Zeroizing::new(deserialize_base64(d)?);
        Ok(MinimalUInt::from_bytes(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_zeros_on_construction() {
        let v = MinimalUInt::from_bytes(&[0, 0, 0x01, 0x00, 0x01]);
        assert_eq!(v.as_slice(), &[0x01, 0x00, 0x01]);
    }

    #[test]
    fn roundtrips_through_json() {
        let v = MinimalUInt::from_bytes(&[0x01, 0x00, 0x01]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"AQAB\"");
        let back: MinimalUInt = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }

    #[test]
    fn odd_and_zero_checks() {
        assert!(MinimalUInt::from_bytes(&[0x03]).is_odd());
        assert!(!MinimalUInt::from_bytes(&[0x02]).is_odd());
        assert!(MinimalUInt::from_bytes(&[0x00]).is_zero());
        assert!(!MinimalUInt::from_bytes(&[0x01]).is_zero());
    }
}
