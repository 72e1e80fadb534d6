//! *[JSON Web Key (JWK)](https://tools.ietf.org/html/rfc7517) (de)serialization,
//! generation, signing, verification, and thumbprinting.*
//!
//! This crate implements the key-related core of RFC 7517 (JWK), the
//! key-related portions of RFC 7518 (JWA), and RFC 7638 (JWK Thumbprint). It
//! does not implement the JWS/JWE envelope formats themselves, X.509 chain
//! validation, or `x5u` retrieval -- those are left to higher-level
//! collaborators.
//!
//! ## Examples
//!
//! ### Parsing a JWK and computing its thumbprint
//!
//! ```
//! use jsonwebkey::JsonWebKey;
//!
//! let json = r#"{
//!     "kty": "oct",
//!     "use": "sig",
//!     "kid": "my signing key",
//!     "k": "Wpj30SfkzM_m0Sa_B2NqNw",
//!     "alg": "HS256"
//! }"#;
//! let jwk: JsonWebKey = json.parse().unwrap();
//! assert_eq!(jwk.key_id.as_deref(), Some("my signing key"));
//! ```
//!
//! ### Signing and verifying
//!
//! ```
//! use jsonwebkey::{sign, verify, JwsAlg, KeyMaterial};
//!
//! let material = KeyMaterial::Oct {
//!     params: jsonwebkey::key::OctParams {
//!         k: b"0123456789abcdef0123456789abcdef".to_vec().into(),
//!     },
//! };
//! let sig = sign(JwsAlg::HS256, &material, b"hello").unwrap();
//! assert!(verify(JwsAlg::HS256, &material, b"hello", &sig).unwrap());
//! ```

mod byte_vec;
mod der_cert;
mod error;
#[cfg(feature = "generate")]
mod generate;
pub mod key;
mod key_ops;
mod minimal_uint;
pub mod sign;
mod thumbprint;
mod utils;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use byte_vec::ByteVec;
pub use der_cert::DerCertificate;
pub use error::Error;
#[cfg(feature = "generate")]
pub use generate::KeyGenParam;
pub use key::{Crv, KeyMaterial, OkpCrv};
pub use key_ops::KeyOps;
pub use minimal_uint::MinimalUInt;
pub use sign::{best_jws_alg, check_jwk, sign, verify, JwsAlg};
pub use thumbprint::{canonical_json as thumbprint_canonical_json, thumbprint, thumbprint_base64url};

/// Whether a JWK is intended for signature or encryption use (RFC 7517 §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyUse {
    #[serde(rename = "sig")]
    Signing,
    #[serde(rename = "enc")]
    Encryption,
}

/// The JWK `alg` member (RFC 7517 §4.4). This crate's signing path only
/// understands JWS algorithm identifiers, but a JWK naming a JWE algorithm
/// (e.g. `"RSA-OAEP"`) is still valid JSON and must round-trip; such values
/// are carried opaquely rather than rejected on parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JwkAlg {
    Jws(JwsAlg),
    /// An algorithm identifier this crate does not interpret -- most often a
    /// JWE `alg`/`enc` value, but also covers any future JWS identifier this
    /// crate doesn't yet know about.
    Opaque(String),
}

impl Serialize for JwkAlg {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Jws(alg) => alg.serialize(s),
            Self::Opaque(name) => name.serialize(s),
        }
    }
}

impl<'de> Deserialize<'de> for JwkAlg {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        match serde_json::from_value::<JwsAlg>(serde_json::Value::String(raw.clone())) {
            Ok(alg) => Ok(Self::Jws(alg)),
            Err(_) => Ok(Self::Opaque(raw)),
        }
    }
}

/// A JWK, RFC 7517 §4: `KeyMaterial` plus optional metadata. Unrecognised
/// JSON fields are ignored on parse and never re-emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    #[serde(flatten)]
    pub material: KeyMaterial,

    #[serde(default, rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<KeyUse>,

    #[serde(default, skip_serializing_if = "KeyOps::is_empty")]
    pub key_ops: KeyOps,

    #[serde(default, rename = "alg", skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<JwkAlg>,

    #[serde(default, rename = "kid", skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5u: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5c: Option<Vec<DerCertificate>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5t: Option<ByteVec>,

    #[serde(default, rename = "x5t#S256", skip_serializing_if = "Option::is_none")]
    pub x5t_s256: Option<ByteVec>,
}

impl JsonWebKey {
    /// Wraps `material` with every metadata field absent.
    pub fn new(material: KeyMaterial) -> Self {
        Self {
            material,
            key_use: None,
            key_ops: KeyOps::empty(),
            algorithm: None,
            key_id: None,
            x5u: None,
            x5c: None,
            x5t: None,
            x5t_s256: None,
        }
    }

    pub fn from_slice(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let jwk: Self = serde_json::from_slice(bytes.as_ref())?;
        jwk.validate()?;
        Ok(jwk)
    }

    fn validate(&self) -> Result<(), Error> {
        self.material.validate()?;
        if let Some(x5c) = &self.x5c {
            if x5c.is_empty() {
                return Err(Error::EmptyList("x5c"));
            }
        }
        Ok(())
    }

    /// Generates fresh key material per `param`, wrapped in a `JsonWebKey`
    /// with every metadata field absent. Requires the `generate` feature.
    #[cfg(feature = "generate")]
    pub fn generate<R: rand_core::CryptoRngCore>(
        param: KeyGenParam,
        rng: &mut R,
    ) -> Result<Self, Error> {
        Ok(Self::new(KeyMaterial::generate(param, rng)?))
    }

    /// The public-view projection (§4.H), lifted to the full JWK: the
    /// wrapped material is stripped of secrets and all metadata is
    /// preserved. Returns `None` exactly when `self.material` has no public
    /// projection (an `oct` key).
    pub fn to_public(&self) -> Option<Self> {
        Some(Self {
            material: self.material.to_public()?,
            key_use: self.key_use,
            key_ops: self.key_ops,
            algorithm: self.algorithm.clone(),
            key_id: self.key_id.clone(),
            x5u: self.x5u.clone(),
            x5c: self.x5c.clone(),
            x5t: self.x5t.clone(),
            x5t_s256: self.x5t_s256.clone(),
        })
    }

    /// Computes `thumbprint_base64url::<D>` over `self.material`, ignoring
    /// all JWK metadata (RFC 7638 testable property: the thumbprint depends
    /// only on the key-type-specific subset).
    pub fn thumbprint<D: sha2::Digest>(&self) -> Result<String, Error> {
        thumbprint_base64url::<D>(&self.material)
    }

    /// Signs `msg` with `self.material` under `alg`.
    pub fn sign(&self, alg: JwsAlg, msg: &[u8]) -> Result<Vec<u8>, Error> {
        sign(alg, &self.material, msg)
    }

    /// Verifies `sig` over `msg` with `self.material` under `alg`.
    pub fn verify(&self, alg: JwsAlg, msg: &[u8], sig: &[u8]) -> Result<bool, Error> {
        verify(alg, &self.material, msg, sig)
    }
}

impl FromStr for JsonWebKey {
    type Err = Error;
    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_slice(json.as_bytes())
    }
}

impl fmt::Display for JsonWebKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(
                f,
                "{}",
                serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?
            )
        } else {
            write!(f, "{}", serde_json::to_string(self).map_err(|_| fmt::Error)?)
        }
    }
}

/// A JWK Set, RFC 7517 §5: a JSON object whose only member is `"keys"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<JsonWebKey>,
}

impl JwkSet {
    pub fn from_slice(bytes: impl AsRef<[u8]>) -> Result<Self, Error> {
        let set: Self = serde_json::from_slice(bytes.as_ref())?;
        for key in &set.keys {
            key.validate()?;
        }
        Ok(set)
    }

    /// Finds the first key whose `kid` matches `key_id`, if any.
    pub fn find(&self, key_id: &str) -> Option<&JsonWebKey> {
        self.keys.iter().find(|k| k.key_id.as_deref() == Some(key_id))
    }
}

impl FromStr for JwkSet {
    type Err = Error;
    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_slice(json.as_bytes())
    }
}
