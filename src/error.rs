/// The closed error taxonomy surfaced by parsing, signing, verification,
/// generation and thumbprinting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid base64url: {0}")]
    Base64(#[from] base64ct::Error),

    /// The algorithm/key-type combination is impossible, or a private
    /// operation was requested of a public-only key.
    #[error("key mismatch: {0}")]
    KeyMismatch(String),

    /// The requested JWS algorithm is not supported for this material at all.
    #[error("algorithm mismatch: {0}")]
    AlgorithmMismatch(String),

    /// RSA `n < 2^2040`, an Oct key below the minimum for the chosen HMAC,
    /// or the general floor enforced by `check_jwk`.
    #[error("key is smaller than the minimum acceptable strength")]
    KeySizeTooSmall,

    /// An RSA private key carries the `oth` (multi-prime) array.
    #[error("RSA keys with additional (multi-prime) factors are not supported")]
    OtherPrimesNotSupported,

    /// A `SizedBase64Integer` field did not match the width its curve
    /// requires.
    #[error("expected {expected} bytes but got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    /// A list-valued field that the specification requires to be non-empty
    /// when present (`x5c`, RSA `oth`) was given as an empty array.
    #[error("{0} must not be empty when present")]
    EmptyList(&'static str),

    /// Propagated, as text, from the underlying cryptographic primitive
    /// provider. Several RustCrypto primitive crates expose opaque,
    /// intentionally uninformative error types; this variant renders them
    /// at the boundary the same way the `elliptic-curve` crate's own JWK
    /// support collapses `p256::elliptic_curve::Error` into a unit error.
    #[error("cryptographic backend error: {0}")]
    CryptoBackend(String),
}
