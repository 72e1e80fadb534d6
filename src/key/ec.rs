//! EC key parameters, RFC 7518 §6.2.

use serde::{Deserialize, Serialize};

use crate::byte_vec::ByteVec;
use crate::error::Error;

/// The three NIST curves this crate signs/verifies with. P-521's field
/// width is `ceil(521 / 8) = 66` bytes; its group order needs no more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crv {
    P256,
    P384,
    P521,
}

impl Crv {
    pub fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Byte width of `x`, `y`, and (for this crate's purposes) `d`.
    pub fn coord_bytes(self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }
}

/// An EC key's curve-specific coordinates, tagged on `crv` exactly as the
/// teacher's `Curve` enum tags on a single `P256` variant.
///
/// `x`/`y`/`d` are stored as variable-length `ByteVec`s rather than
/// curve-width-sized arrays: parsing a `SizedBase64Integer` never fails on
/// width alone (per §4.A, the *declared* length is whatever arrived on the
/// wire), so a wrong-width coordinate is a semantic error to be reported as
/// `Error::InvalidSize` by `validate()`, not a parse failure swallowed into
/// an opaque `serde_json::Error`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "crv")]
pub enum Curve {
    #[serde(rename = "P-256")]
    P256 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d: Option<ByteVec>,
        x: ByteVec,
        y: ByteVec,
    },
    #[serde(rename = "P-384")]
    P384 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d: Option<ByteVec>,
        x: ByteVec,
        y: ByteVec,
    },
    #[serde(rename = "P-521")]
    P521 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        d: Option<ByteVec>,
        x: ByteVec,
        y: ByteVec,
    },
}

impl Curve {
    pub fn crv(&self) -> Crv {
        match self {
            Self::P256 { .. } => Crv::P256,
            Self::P384 { .. } => Crv::P384,
            Self::P521 { .. } => Crv::P521,
        }
    }

    pub fn x(&self) -> &[u8] {
        match self {
            Self::P256 { x, .. } => x.as_slice(),
            Self::P384 { x, .. } => x.as_slice(),
            Self::P521 { x, .. } => x.as_slice(),
        }
    }

    pub fn y(&self) -> &[u8] {
        match self {
            Self::P256 { y, .. } => y.as_slice(),
            Self::P384 { y, .. } => y.as_slice(),
            Self::P521 { y, .. } => y.as_slice(),
        }
    }

    pub fn d(&self) -> Option<&[u8]> {
        match self {
            Self::P256 { d, .. } => d.as_ref().map(|d| d.as_slice()),
            Self::P384 { d, .. } => d.as_ref().map(|d| d.as_slice()),
            Self::P521 { d, .. } => d.as_ref().map(|d| d.as_slice()),
        }
    }

    pub fn is_private(&self) -> bool {
        self.d().is_some()
    }

    /// Enforces the "widths conform to `crv`" invariant (§3): `x`/`y` must
    /// be exactly `coord_bytes(crv)` long, and `d`, if present, the same.
    pub fn validate(&self) -> Result<(), Error> {
        let (x, y, d) = match self {
            Self::P256 { x, y, d } => (x, y, d),
            Self::P384 { x, y, d } => (x, y, d),
            Self::P521 { x, y, d } => (x, y, d),
        };
        let expected = self.crv().coord_bytes();
        x.check_size(expected)?;
        y.check_size(expected)?;
        if let Some(d) = d {
            d.check_size(expected)?;
        }
        Ok(())
    }

    pub fn to_public(&self) -> Curve {
        match self {
            Self::P256 { x, y, .. } => Self::P256 {
                d: None,
                x: x.clone(),
                y: y.clone(),
            },
            Self::P384 { x, y, .. } => Self::P384 {
                d: None,
                x: x.clone(),
                y: y.clone(),
            },
            Self::P521 { x, y, .. } => Self::P521 {
                d: None,
                x: x.clone(),
                y: y.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_widths_match_rfc7518() {
        assert_eq!(Crv::P256.coord_bytes(), 32);
        assert_eq!(Crv::P384.coord_bytes(), 48);
        assert_eq!(Crv::P521.coord_bytes(), 66);
    }

    #[test]
    fn parses_wrong_width_coordinate_but_validate_rejects_it() {
        // Parsing a `SizedBase64Integer` never fails on width alone (§4.A);
        // the mismatch is only caught by `validate()`, as a typed
        // `Error::InvalidSize` rather than an opaque JSON error.
        let json = r#"{"crv":"P-256","x":"AQ","y":"AQ"}"#;
        let curve: Curve = serde_json::from_str(json).unwrap();
        let err = curve.validate().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InvalidSize { expected: 32, actual: 1 }
        ));
    }

    #[test]
    fn validate_accepts_correctly_sized_coordinates() {
        let json = format!(
            r#"{{"crv":"P-256","x":"{0}","y":"{0}"}}"#,
            crate::utils::encode(&[0u8; 32])
        );
        let curve: Curve = serde_json::from_str(&json).unwrap();
        assert!(curve.validate().is_ok());
    }
}
