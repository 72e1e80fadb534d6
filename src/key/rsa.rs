//! RSA key parameters, RFC 7518 §6.3 / RFC 3447.

use serde::{Deserialize, Serialize};

use crate::byte_vec::ByteVec;
use crate::error::Error;
use crate::minimal_uint::MinimalUInt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublic {
    /// The modulus `p*q`. Transmitted (and re-emitted) at whatever width
    /// arrived on the wire -- this is the one RSA field the specification
    /// treats as a `SizedBase64Integer`, hence `ByteVec` rather than
    /// `MinimalUInt`.
    pub n: ByteVec,
    /// The public exponent. Almost always 65537, but unlike the teacher
    /// (which hard-codes `e` to a single constant value and rejects
    /// anything else), this crate accepts any odd `e > 1` so that parsing
    /// never rejects a well-formed key the signer/verifier will reject
    /// later, if at all, with a more specific error.
    pub e: MinimalUInt,
}

impl RsaPublic {
    /// Bit length of the modulus, ignoring the leading zero byte some
    /// encoders add to keep the high bit from being read as a sign bit.
    pub fn modulus_bits(&self) -> usize {
        self.n.bit_length()
    }
}

/// A single element of the `oth` (additional primes) array, RFC 7518 §6.3.2.7.
/// Never used for signing -- its mere presence makes a private key
/// ineligible (`Error::OtherPrimesNotSupported`) -- but it is still parsed
/// so the JWK round-trips losslessly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaOthElem {
    pub r: MinimalUInt,
    pub d: MinimalUInt,
    pub t: MinimalUInt,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPrivate {
    /// Private exponent.
    pub d: MinimalUInt,
    /// First prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<MinimalUInt>,
    /// Second prime factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<MinimalUInt>,
    /// First factor CRT exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp: Option<MinimalUInt>,
    /// Second factor CRT exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<MinimalUInt>,
    /// First CRT coefficient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qi: Option<MinimalUInt>,
    /// Additional (multi-prime) factors. Rejected at sign/verify time, not
    /// at parse time, so a JWK carrying one can still be inspected,
    /// thumbprinted, and re-emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oth: Option<Vec<RsaOthElem>>,
}

impl RsaPrivate {
    /// Enforces the "all of {p,q,dp,dq,qi} or none" invariant and the
    /// "`oth`, if present, is non-empty" invariant. Called once a JWK has
    /// been fully parsed (not from `Deserialize` itself, so a caller that
    /// only wants structural access isn't forced through this check).
    pub fn validate(&self) -> Result<(), Error> {
        let crt_fields = [&self.p, &self.q, &self.dp, &self.dq, &self.qi];
        let present = crt_fields.iter().filter(|f| f.is_some()).count();
        if present != 0 && present != crt_fields.len() {
            return Err(Error::KeyMismatch(
                "RSA private key must specify all of p, q, dp, dq, qi or none of them".into(),
            ));
        }
        if let Some(oth) = &self.oth {
            if oth.is_empty() {
                return Err(Error::EmptyList("oth"));
            }
        }
        Ok(())
    }

    pub fn has_oth(&self) -> bool {
        self.oth.as_ref().is_some_and(|oth| !oth.is_empty())
    }

    pub fn has_crt_params(&self) -> bool {
        self.p.is_some() && self.q.is_some() && self.dp.is_some() && self.dq.is_some() && self.qi.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_partial_crt_params() {
        let rp = RsaPrivate {
            d: MinimalUInt::from_bytes(&[1]),
            p: Some(MinimalUInt::from_bytes(&[1])),
            q: None,
            dp: None,
            dq: None,
            qi: None,
            oth: None,
        };
        assert!(rp.validate().is_err());
    }

    #[test]
    fn validate_accepts_d_only() {
        let rp = RsaPrivate {
            d: MinimalUInt::from_bytes(&[1]),
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            oth: None,
        };
        assert!(rp.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_oth() {
        let rp = RsaPrivate {
            d: MinimalUInt::from_bytes(&[1]),
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
            oth: Some(vec![]),
        };
        assert!(rp.validate().is_err());
    }
}
