//! Octet Key Pair ("OKP") parameters, RFC 8037.

use serde::{Deserialize, Serialize};

use crate::byte_vec::ByteVec;

/// The two CFRG curves this crate's signing path understands. RFC 8037
/// also names `Ed448`/`X448`, but neither is implemented here; a JWK
/// naming either fails to parse with `Error::AlgorithmMismatch` rather than
/// being silently accepted and later failing at sign time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OkpCrv {
    Ed25519,
    X25519,
}

impl OkpCrv {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::X25519 => "X25519",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkpParams {
    pub crv: OkpCrv,
    /// The public point (Ed25519 verifying key bytes, or X25519 Montgomery
    /// u-coordinate).
    pub x: ByteVec,
    /// The secret scalar/seed, absent for a public-only key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<ByteVec>,
}

impl OkpParams {
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }

    pub fn to_public(&self) -> OkpParams {
        OkpParams {
            crv: self.crv,
            x: self.x.clone(),
            d: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_curve() {
        let err = serde_json::from_str::<OkpParams>(r#"{"crv":"Ed448","x":"AQ"}"#).unwrap_err();
        assert!(err.to_string().contains("Ed448") || err.is_data());
    }
}
