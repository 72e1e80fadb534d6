//! The `KeyMaterial` discriminated union and its `kty`-tagged JSON codec.

use serde::{Deserialize, Serialize};

use super::ec::Curve;
use super::oct::OctParams;
use super::okp::OkpParams;
use super::rsa::{RsaPrivate, RsaPublic};
use crate::error::Error;

/// The sum type at the heart of this crate: every JWK wraps exactly one of
/// these. Parsing dispatches on `kty` directly (serde's internally tagged
/// enum support), rather than trying each variant's parser in turn the way
/// an alternative-parse chain would -- see DESIGN.md.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum KeyMaterial {
    #[serde(rename = "EC")]
    Ec {
        #[serde(flatten)]
        curve: Curve,
    },
    #[serde(rename = "RSA")]
    Rsa {
        #[serde(flatten)]
        public: RsaPublic,
        #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
        private: Option<RsaPrivate>,
    },
    #[serde(rename = "oct")]
    Oct {
        #[serde(flatten)]
        params: OctParams,
    },
    #[serde(rename = "OKP")]
    Okp {
        #[serde(flatten)]
        params: OkpParams,
    },
}

impl KeyMaterial {
    pub fn kty(&self) -> &'static str {
        match self {
            Self::Ec { .. } => "EC",
            Self::Rsa { .. } => "RSA",
            Self::Oct { .. } => "oct",
            Self::Okp { .. } => "OKP",
        }
    }

    /// Enforces invariants that serde's per-field validation cannot express
    /// on its own: the EC coordinate/scalar width invariant, the RSA
    /// CRT-parameter all-or-none rule, and the non-empty-`oth` rule. Called
    /// once, right after a `KeyMaterial` has been fully parsed from JSON.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Ec { curve } => curve.validate()?,
            Self::Rsa { private: Some(private), .. } => private.validate()?,
            Self::Rsa { private: None, .. } | Self::Oct { .. } | Self::Okp { .. } => {}
        }
        Ok(())
    }

    /// True iff this value carries the secret half of a keypair (or, for
    /// `oct`, is a key at all -- symmetric keys are always "private").
    pub fn is_private(&self) -> bool {
        match self {
            Self::Ec { curve } => curve.is_private(),
            Self::Rsa { private, .. } => private.is_some(),
            Self::Oct { .. } => true,
            Self::Okp { params } => params.is_private(),
        }
    }

    /// The public-view projection (§4.H). `oct` keys have no public half at
    /// all and so return `None`; every other variant returns `Some`,
    /// possibly itself unchanged if it was already public-only.
    pub fn to_public(&self) -> Option<KeyMaterial> {
        match self {
            Self::Ec { curve } => Some(Self::Ec {
                curve: curve.to_public(),
            }),
            Self::Rsa { public, .. } => Some(Self::Rsa {
                public: public.clone(),
                private: None,
            }),
            Self::Oct { .. } => None,
            Self::Okp { params } => Some(Self::Okp {
                params: params.to_public(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_kty() {
        let json = r#"{"kty":"oct","k":"AQID"}"#;
        let km: KeyMaterial = serde_json::from_str(json).unwrap();
        assert!(matches!(km, KeyMaterial::Oct { .. }));
    }

    #[test]
    fn unknown_kty_fails() {
        assert!(serde_json::from_str::<KeyMaterial>(r#"{"kty":"bogus"}"#).is_err());
    }

    #[test]
    fn oct_has_no_public_view() {
        let json = r#"{"kty":"oct","k":"AQID"}"#;
        let km: KeyMaterial = serde_json::from_str(json).unwrap();
        assert!(km.to_public().is_none());
    }

    #[test]
    fn rsa_private_round_trips_and_strips_on_public_view() {
        let json = r#"{"kty":"RSA","n":"AQID","e":"AQAB","d":"BAUG"}"#;
        let km: KeyMaterial = serde_json::from_str(json).unwrap();
        km.validate().unwrap();
        assert!(km.is_private());
        let public = km.to_public().unwrap();
        assert!(!public.is_private());
        let re = serde_json::to_string(&public).unwrap();
        assert!(!re.contains("\"d\""));
    }

    #[test]
    fn ec_with_wrong_width_coordinate_fails_validate_with_invalid_size() {
        let json = r#"{"kty":"EC","crv":"P-256","x":"AQ","y":"AQ"}"#;
        let km: KeyMaterial = serde_json::from_str(json).unwrap();
        assert!(matches!(km.validate(), Err(Error::InvalidSize { expected: 32, actual: 1 })));
    }
}
