//! The JWS algorithm × key-material sign/verify dispatcher (component F).
//!
//! `sign`/`verify` are the only two entry points; everything else in this
//! module is plumbing that maps a `(JwsAlg, &KeyMaterial)` pair onto a
//! concrete RustCrypto primitive, or rejects the pair outright.

use generic_array::GenericArray;
use hmac::{Hmac, Mac};
use rsa::signature::{RandomizedSigner, Signer, Verifier};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::Error;
use crate::key::{Crv, Curve, KeyMaterial, OkpCrv};

/// The minimum RSA modulus this crate accepts for any signing algorithm:
/// `n >= 2^2040`, i.e. a 2041-bit-or-wider modulus (RFC 7518's de facto
/// floor, echoed by every major JOSE implementation).
const MIN_RSA_MODULUS_BITS: usize = 2041;
/// The general 256-bit-symmetric floor `check_jwk` applies to `oct` keys,
/// independent of which HMAC variant is eventually chosen.
const MIN_OCT_KEY_BYTES: usize = 32;

/// RFC 7518 §3.2: "a key of the same size as the hash output (for instance,
/// 256 bits for HS256) or larger MUST be used". Enforced per-variant in
/// `sign`/`verify`, not just at the `check_jwk` floor, since an HS384/HS512
/// key can be well above 32 bytes and still be too short for the hash it's
/// paired with.
const MIN_HMAC_KEY_BYTES_SHA256: usize = 32;
const MIN_HMAC_KEY_BYTES_SHA384: usize = 48;
const MIN_HMAC_KEY_BYTES_SHA512: usize = 64;

/// A JWS algorithm identifier, RFC 7518 §3.1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JwsAlg {
    #[serde(rename = "none")]
    None,
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    PS256,
    PS384,
    PS512,
    ES256,
    ES384,
    ES512,
    EdDSA,
}

impl JwsAlg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::PS256 => "PS256",
            Self::PS384 => "PS384",
            Self::PS512 => "PS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
            Self::EdDSA => "EdDSA",
        }
    }
}

impl std::fmt::Display for JwsAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------
// HMAC
// ---------------------------------------------------------------------

macro_rules! hmac_ops {
    ($digest:ty, $sign_fn:ident, $verify_fn:ident) => {
        fn $sign_fn(key: &[u8], msg: &[u8]) -> Vec<u8> {
            // HMAC places no restriction on key length (RFC 2104 §2):
            // shorter keys are zero-padded, longer ones hashed down.
            // `new_from_slice` therefore never fails.
            let mut mac = <Hmac<$digest>>::new_from_slice(key).expect("HMAC accepts any key length");
            mac.update(msg);
            mac.finalize().into_bytes().to_vec()
        }

        fn $verify_fn(key: &[u8], msg: &[u8], sig: &[u8]) -> bool {
            let mut mac = match <Hmac<$digest>>::new_from_slice(key) {
                Ok(m) => m,
                Err(_) => return false,
            };
            mac.update(msg);
            // `verify_slice` compares in constant time (backed by `subtle`).
            mac.verify_slice(sig).is_ok()
        }
    };
}

hmac_ops!(Sha256, hmac_sign_sha256, hmac_verify_sha256);
hmac_ops!(Sha384, hmac_sign_sha384, hmac_verify_sha384);
hmac_ops!(Sha512, hmac_sign_sha512, hmac_verify_sha512);

/// Enforces the §4.F "Accepted material" HMAC key-size floor before calling
/// through to the unconditional `hmac_sign_*` helper above.
fn hmac_sign_checked(
    min_key_bytes: usize,
    sign_fn: fn(&[u8], &[u8]) -> Vec<u8>,
    key: &[u8],
    msg: &[u8],
) -> Result<Vec<u8>, Error> {
    if key.len() < min_key_bytes {
        return Err(Error::KeySizeTooSmall);
    }
    Ok(sign_fn(key, msg))
}

fn hmac_verify_checked(
    min_key_bytes: usize,
    verify_fn: fn(&[u8], &[u8], &[u8]) -> bool,
    key: &[u8],
    msg: &[u8],
    sig: &[u8],
) -> Result<bool, Error> {
    if key.len() < min_key_bytes {
        return Err(Error::KeySizeTooSmall);
    }
    Ok(verify_fn(key, msg, sig))
}

// ---------------------------------------------------------------------
// RSA (RSASSA-PKCS1-v1_5 and RSASSA-PSS)
// ---------------------------------------------------------------------

#[derive(Clone, Copy)]
enum RsaDigest {
    Sha256,
    Sha384,
    Sha512,
}

macro_rules! rsa_ops {
    ($digest:ty, $pkcs1_sign:ident, $pkcs1_verify:ident, $pss_sign:ident, $pss_verify:ident) => {
        fn $pkcs1_sign(key: RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>, Error> {
            let signing_key = rsa::pkcs1v15::SigningKey::<$digest>::new(key);
            let sig = signing_key
                .try_sign(msg)
                .map_err(|e| Error::CryptoBackend(e.to_string()))?;
            Ok(sig.to_vec())
        }

        fn $pkcs1_verify(public_key: RsaPublicKey, msg: &[u8], sig: &[u8]) -> bool {
            let verifying_key = rsa::pkcs1v15::VerifyingKey::<$digest>::new(public_key);
            match rsa::pkcs1v15::Signature::try_from(sig) {
                Ok(sig) => verifying_key.verify(msg, &sig).is_ok(),
                Err(_) => false,
            }
        }

        fn $pss_sign(key: RsaPrivateKey, msg: &[u8]) -> Result<Vec<u8>, Error> {
            let signing_key = rsa::pss::SigningKey::<$digest>::new(key);
            let sig = signing_key
                .try_sign_with_rng(&mut rand_core::OsRng, msg)
                .map_err(|e| Error::CryptoBackend(e.to_string()))?;
            Ok(sig.to_vec())
        }

        fn $pss_verify(public_key: RsaPublicKey, msg: &[u8], sig: &[u8]) -> bool {
            let verifying_key = rsa::pss::VerifyingKey::<$digest>::new(public_key);
            match rsa::pss::Signature::try_from(sig) {
                Ok(sig) => verifying_key.verify(msg, &sig).is_ok(),
                Err(_) => false,
            }
        }
    };
}

rsa_ops!(
    Sha256,
    rsa_pkcs1_sign_sha256,
    rsa_pkcs1_verify_sha256,
    rsa_pss_sign_sha256,
    rsa_pss_verify_sha256
);
rsa_ops!(
    Sha384,
    rsa_pkcs1_sign_sha384,
    rsa_pkcs1_verify_sha384,
    rsa_pss_sign_sha384,
    rsa_pss_verify_sha384
);
rsa_ops!(
    Sha512,
    rsa_pkcs1_sign_sha512,
    rsa_pkcs1_verify_sha512,
    rsa_pss_sign_sha512,
    rsa_pss_verify_sha512
);

fn rsa_sign(
    digest: RsaDigest,
    pss: bool,
    public: &crate::key::RsaPublic,
    private: &crate::key::RsaPrivate,
    msg: &[u8],
) -> Result<Vec<u8>, Error> {
    if private.has_oth() {
        return Err(Error::OtherPrimesNotSupported);
    }
    if public.modulus_bits() < MIN_RSA_MODULUS_BITS {
        return Err(Error::KeySizeTooSmall);
    }
    let key = to_rsa_private_key(public, private)?;
    match (digest, pss) {
        (RsaDigest::Sha256, false) => rsa_pkcs1_sign_sha256(key, msg),
        (RsaDigest::Sha384, false) => rsa_pkcs1_sign_sha384(key, msg),
        (RsaDigest::Sha512, false) => rsa_pkcs1_sign_sha512(key, msg),
        (RsaDigest::Sha256, true) => rsa_pss_sign_sha256(key, msg),
        (RsaDigest::Sha384, true) => rsa_pss_sign_sha384(key, msg),
        (RsaDigest::Sha512, true) => rsa_pss_sign_sha512(key, msg),
    }
}

fn rsa_verify(
    digest: RsaDigest,
    pss: bool,
    public: &crate::key::RsaPublic,
    msg: &[u8],
    sig: &[u8],
) -> Result<bool, Error> {
    if public.modulus_bits() < MIN_RSA_MODULUS_BITS {
        return Err(Error::KeySizeTooSmall);
    }
    let n = BigUint::from_bytes_be(public.n.as_slice());
    let e = BigUint::from_bytes_be(public.e.as_slice());
    let public_key = match RsaPublicKey::new(n, e) {
        Ok(k) => k,
        Err(_) => return Ok(false),
    };
    Ok(match (digest, pss) {
        (RsaDigest::Sha256, false) => rsa_pkcs1_verify_sha256(public_key, msg, sig),
        (RsaDigest::Sha384, false) => rsa_pkcs1_verify_sha384(public_key, msg, sig),
        (RsaDigest::Sha512, false) => rsa_pkcs1_verify_sha512(public_key, msg, sig),
        (RsaDigest::Sha256, true) => rsa_pss_verify_sha256(public_key, msg, sig),
        (RsaDigest::Sha384, true) => rsa_pss_verify_sha384(public_key, msg, sig),
        (RsaDigest::Sha512, true) => rsa_pss_verify_sha512(public_key, msg, sig),
    })
}

fn to_rsa_private_key(
    public: &crate::key::RsaPublic,
    private: &crate::key::RsaPrivate,
) -> Result<RsaPrivateKey, Error> {
    let n = BigUint::from_bytes_be(public.n.as_slice());
    let e = BigUint::from_bytes_be(public.e.as_slice());
    let d = BigUint::from_bytes_be(private.d.as_slice());
    let primes = if private.has_crt_params() {
        vec![
            BigUint::from_bytes_be(private.p.as_ref().unwrap().as_slice()),
            BigUint::from_bytes_be(private.q.as_ref().unwrap().as_slice()),
        ]
    } else {
        let (p, q) = recover_primes(&n, &e, &d).ok_or_else(|| {
            Error::CryptoBackend("could not recover RSA primes from (n, e, d) alone".to_string())
        })?;
        vec![p, q]
    };
    let mut key =
        RsaPrivateKey::from_components(n, e, d, primes).map_err(|e| Error::CryptoBackend(e.to_string()))?;
    key.precompute().map_err(|e| Error::CryptoBackend(e.to_string()))?;
    Ok(key)
}

/// Recovers the two prime factors of an RSA modulus from `(n, e, d)` alone,
/// for the private-key form the specification's Open Question allows (`d`
/// present, no CRT parameters). This is the standard "factor `n` given the
/// private exponent" method: `k = e*d - 1` is a multiple of `phi(n)`, so for
/// `k = 2^s * t` with `t` odd, repeatedly squaring `a^t mod n` for a small
/// base `a` finds a nontrivial square root of 1 mod n with overwhelming
/// probability, and `gcd(root - 1, n)` is then a nontrivial factor.
fn recover_primes(n: &BigUint, e: &BigUint, d: &BigUint) -> Option<(BigUint, BigUint)> {
    let zero = BigUint::from(0u32);
    let one = BigUint::from(1u32);
    let two = BigUint::from(2u32);

    let k = e * d - &one;
    if k == zero {
        return None;
    }
    let mut t = k;
    let mut s = 0u32;
    while &t % &two == zero {
        t = &t / &two;
        s += 1;
    }

    for base in [2u32, 3, 5, 7, 11, 13, 17, 19, 23, 29] {
        let a = BigUint::from(base);
        if a >= *n {
            continue;
        }
        let mut x = a.modpow(&t, n);
        if x == one || x == n - &one {
            continue;
        }
        for _ in 0..s {
            let y = (&x * &x) % n;
            if y == one {
                let candidate = gcd(&(&x - &one), n);
                if candidate > one && candidate < *n {
                    let q = n / &candidate;
                    return Some((candidate, q));
                }
                break;
            }
            if y == n - &one {
                break;
            }
            x = y;
        }
    }
    None
}

fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let zero = BigUint::from(0u32);
    let (mut a, mut b) = (a.clone(), b.clone());
    while b != zero {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

// ---------------------------------------------------------------------
// ECDSA (P-256 / P-384 / P-521)
// ---------------------------------------------------------------------

macro_rules! ecdsa_curve_ops {
    ($mod_name:ident, $sign_fn:ident, $verify_fn:ident, $point_ok_fn:ident) => {
        fn $sign_fn(d: &[u8], msg: &[u8]) -> Result<Vec<u8>, Error> {
            use $mod_name::ecdsa::{signature::Signer, Signature, SigningKey};
            let sk = SigningKey::from_bytes(GenericArray::from_slice(d))
                .map_err(|e| Error::CryptoBackend(e.to_string()))?;
            let sig: Signature = sk.try_sign(msg).map_err(|e| Error::CryptoBackend(e.to_string()))?;
            Ok(sig.to_bytes().to_vec())
        }

        fn $verify_fn(x: &[u8], y: &[u8], msg: &[u8], sig_bytes: &[u8]) -> bool {
            use $mod_name::ecdsa::{signature::Verifier, Signature, VerifyingKey};
            (|| -> Option<bool> {
                let mut point = Vec::with_capacity(1 + x.len() + y.len());
                point.push(0x04);
                point.extend_from_slice(x);
                point.extend_from_slice(y);
                let vk = VerifyingKey::from_sec1_bytes(&point).ok()?;
                let sig = Signature::from_slice(sig_bytes).ok()?;
                Some(vk.verify(msg, &sig).is_ok())
            })()
            .unwrap_or(false)
        }

        fn $point_ok_fn(x: &[u8], y: &[u8]) -> bool {
            use $mod_name::ecdsa::VerifyingKey;
            let mut point = Vec::with_capacity(1 + x.len() + y.len());
            point.push(0x04);
            point.extend_from_slice(x);
            point.extend_from_slice(y);
            VerifyingKey::from_sec1_bytes(&point).is_ok()
        }
    };
}

ecdsa_curve_ops!(p256, ecdsa_sign_p256, ecdsa_verify_p256, ec_point_ok_p256);
ecdsa_curve_ops!(p384, ecdsa_sign_p384, ecdsa_verify_p384, ec_point_ok_p384);
ecdsa_curve_ops!(p521, ecdsa_sign_p521, ecdsa_verify_p521, ec_point_ok_p521);

// ---------------------------------------------------------------------
// EdDSA (Ed25519)
// ---------------------------------------------------------------------

fn eddsa_sign(d: &[u8], msg: &[u8]) -> Result<Vec<u8>, Error> {
    use ed25519_dalek::{Signer, SigningKey};
    let seed: [u8; 32] = d
        .try_into()
        .map_err(|_| Error::InvalidSize { expected: 32, actual: d.len() })?;
    let sk = SigningKey::from_bytes(&seed);
    Ok(sk.sign(msg).to_bytes().to_vec())
}

fn eddsa_verify(x: &[u8], msg: &[u8], sig_bytes: &[u8]) -> bool {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};
    (|| -> Option<bool> {
        let x_arr: [u8; 32] = x.try_into().ok()?;
        let vk = VerifyingKey::from_bytes(&x_arr).ok()?;
        let sig_arr: [u8; 64] = sig_bytes.try_into().ok()?;
        let sig = Signature::from_bytes(&sig_arr);
        Some(vk.verify(msg, &sig).is_ok())
    })()
    .unwrap_or(false)
}

// ---------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------

/// Computes the JWS signature bytes for `msg` using `material` under `alg`.
/// Fails with `Error::AlgorithmMismatch` if the pairing is outside the
/// table in RFC 7518 §3.1, or `Error::KeyMismatch` if `material` lacks the
/// private component `alg` needs.
pub fn sign(alg: JwsAlg, material: &KeyMaterial, msg: &[u8]) -> Result<Vec<u8>, Error> {
    use KeyMaterial::*;
    match (alg, material) {
        (JwsAlg::None, _) => Ok(Vec::new()),

        (JwsAlg::HS256, Oct { params }) => {
            hmac_sign_checked(MIN_HMAC_KEY_BYTES_SHA256, hmac_sign_sha256, params.k.as_slice(), msg)
        }
        (JwsAlg::HS384, Oct { params }) => {
            hmac_sign_checked(MIN_HMAC_KEY_BYTES_SHA384, hmac_sign_sha384, params.k.as_slice(), msg)
        }
        (JwsAlg::HS512, Oct { params }) => {
            hmac_sign_checked(MIN_HMAC_KEY_BYTES_SHA512, hmac_sign_sha512, params.k.as_slice(), msg)
        }

        (JwsAlg::RS256, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha256, false, public, p, msg),
        (JwsAlg::RS384, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha384, false, public, p, msg),
        (JwsAlg::RS512, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha512, false, public, p, msg),
        (JwsAlg::PS256, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha256, true, public, p, msg),
        (JwsAlg::PS384, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha384, true, public, p, msg),
        (JwsAlg::PS512, Rsa { public, private: Some(p) }) => rsa_sign(RsaDigest::Sha512, true, public, p, msg),
        (
            JwsAlg::RS256 | JwsAlg::RS384 | JwsAlg::RS512 | JwsAlg::PS256 | JwsAlg::PS384 | JwsAlg::PS512,
            Rsa { private: None, .. },
        ) => Err(Error::KeyMismatch("RSA signing requires a private key".into())),

        (JwsAlg::ES256, Ec { curve: Curve::P256 { d, .. } }) => match d {
            Some(d) => ecdsa_sign_p256(d.as_ref(), msg),
            None => Err(Error::KeyMismatch("ECDSA signing requires a private key".into())),
        },
        (JwsAlg::ES384, Ec { curve: Curve::P384 { d, .. } }) => match d {
            Some(d) => ecdsa_sign_p384(d.as_ref(), msg),
            None => Err(Error::KeyMismatch("ECDSA signing requires a private key".into())),
        },
        (JwsAlg::ES512, Ec { curve: Curve::P521 { d, .. } }) => match d {
            Some(d) => ecdsa_sign_p521(d.as_ref(), msg),
            None => Err(Error::KeyMismatch("ECDSA signing requires a private key".into())),
        },

        (JwsAlg::EdDSA, Okp { params }) if params.crv == OkpCrv::Ed25519 => match &params.d {
            Some(d) => eddsa_sign(d.as_slice(), msg),
            None => Err(Error::KeyMismatch("EdDSA signing requires a private key".into())),
        },

        _ => Err(Error::AlgorithmMismatch(format!(
            "{} is not supported for a {} key",
            alg,
            material.kty()
        ))),
    }
}

/// Verifies `sig` over `msg` using the public component of `material` under
/// `alg`. Never fails on a bad signature -- only on an impossible pairing.
pub fn verify(alg: JwsAlg, material: &KeyMaterial, msg: &[u8], sig: &[u8]) -> Result<bool, Error> {
    use KeyMaterial::*;
    match (alg, material) {
        (JwsAlg::None, _) => Ok(sig.is_empty()),

        (JwsAlg::HS256, Oct { params }) => {
            hmac_verify_checked(MIN_HMAC_KEY_BYTES_SHA256, hmac_verify_sha256, params.k.as_slice(), msg, sig)
        }
        (JwsAlg::HS384, Oct { params }) => {
            hmac_verify_checked(MIN_HMAC_KEY_BYTES_SHA384, hmac_verify_sha384, params.k.as_slice(), msg, sig)
        }
        (JwsAlg::HS512, Oct { params }) => {
            hmac_verify_checked(MIN_HMAC_KEY_BYTES_SHA512, hmac_verify_sha512, params.k.as_slice(), msg, sig)
        }

        (JwsAlg::RS256, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha256, false, public, msg, sig),
        (JwsAlg::RS384, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha384, false, public, msg, sig),
        (JwsAlg::RS512, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha512, false, public, msg, sig),
        (JwsAlg::PS256, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha256, true, public, msg, sig),
        (JwsAlg::PS384, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha384, true, public, msg, sig),
        (JwsAlg::PS512, Rsa { public, .. }) => rsa_verify(RsaDigest::Sha512, true, public, msg, sig),

        (JwsAlg::ES256, Ec { curve: Curve::P256 { x, y, .. } }) => Ok(ecdsa_verify_p256(x.as_ref(), y.as_ref(), msg, sig)),
        (JwsAlg::ES384, Ec { curve: Curve::P384 { x, y, .. } }) => Ok(ecdsa_verify_p384(x.as_ref(), y.as_ref(), msg, sig)),
        (JwsAlg::ES512, Ec { curve: Curve::P521 { x, y, .. } }) => Ok(ecdsa_verify_p521(x.as_ref(), y.as_ref(), msg, sig)),

        (JwsAlg::EdDSA, Okp { params }) if params.crv == OkpCrv::Ed25519 => {
            Ok(eddsa_verify(params.x.as_slice(), msg, sig))
        }

        _ => Err(Error::AlgorithmMismatch(format!(
            "{} is not supported for a {} key",
            alg,
            material.kty()
        ))),
    }
}

/// The weakest acceptable-key rules usable across *any* JOSE algorithm:
/// RSA `n >= 2^2040`; `oct` `|k| >= 32` bytes; EC and OKP are always
/// accepted at this level (algorithm-specific strength is enforced by
/// `sign`/`verify`/`best_jws_alg` instead). Also validates that an EC
/// public point actually lies on its declared curve (free: the RustCrypto
/// SEC1 point decoders already reject off-curve points) and that an RSA
/// public exponent is odd and greater than one.
pub fn check_jwk(material: &KeyMaterial) -> Result<(), Error> {
    use KeyMaterial::*;
    match material {
        Rsa { public, .. } => {
            if public.modulus_bits() < MIN_RSA_MODULUS_BITS {
                return Err(Error::KeySizeTooSmall);
            }
            let e = public.e.as_slice();
            let is_odd = matches!(e.last(), Some(b) if b & 1 == 1);
            let is_one = e == [1];
            if e.is_empty() || !is_odd || is_one {
                return Err(Error::KeyMismatch(
                    "RSA public exponent must be odd and greater than one".into(),
                ));
            }
            Ok(())
        }
        Oct { params } => {
            if params.len() < MIN_OCT_KEY_BYTES {
                Err(Error::KeySizeTooSmall)
            } else {
                Ok(())
            }
        }
        Ec { curve } => check_ec_point_on_curve(curve),
        Okp { .. } => Ok(()),
    }
}

fn check_ec_point_on_curve(curve: &Curve) -> Result<(), Error> {
    let ok = match curve {
        Curve::P256 { x, y, .. } => ec_point_ok_p256(x.as_ref(), y.as_ref()),
        Curve::P384 { x, y, .. } => ec_point_ok_p384(x.as_ref(), y.as_ref()),
        Curve::P521 { x, y, .. } => ec_point_ok_p521(x.as_ref(), y.as_ref()),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::KeyMismatch(format!("EC point does not lie on {}", curve.crv().name())))
    }
}

/// Picks the strongest algorithm `material` admits, ignoring its own `alg`
/// metadata field.
pub fn best_jws_alg(material: &KeyMaterial) -> Result<JwsAlg, Error> {
    use KeyMaterial::*;
    match material {
        Ec { curve } => Ok(match curve.crv() {
            Crv::P256 => JwsAlg::ES256,
            Crv::P384 => JwsAlg::ES384,
            Crv::P521 => JwsAlg::ES512,
        }),
        Rsa { public, .. } => {
            if public.modulus_bits() < MIN_RSA_MODULUS_BITS {
                Err(Error::KeySizeTooSmall)
            } else {
                Ok(JwsAlg::PS512)
            }
        }
        Oct { params } => {
            let len = params.len();
            if len >= 64 {
                Ok(JwsAlg::HS512)
            } else if len >= 48 {
                Ok(JwsAlg::HS384)
            } else if len >= MIN_OCT_KEY_BYTES {
                Ok(JwsAlg::HS256)
            } else {
                Err(Error::KeySizeTooSmall)
            }
        }
        Okp { params } => match params.crv {
            OkpCrv::Ed25519 => Ok(JwsAlg::EdDSA),
            OkpCrv::X25519 => Err(Error::KeyMismatch("cannot sign with an ECDH key".into())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_vec::ByteVec;
    use crate::key::{OctParams, RsaPublic};
    use crate::minimal_uint::MinimalUInt;

    #[test]
    fn hs256_known_mac_vector() {
        let key = b"jdoe-secret-key-that-is-at-least-32-bytes!";
        let material = KeyMaterial::Oct {
            params: OctParams { k: ByteVec(key.to_vec()) },
        };
        let sig = sign(JwsAlg::HS256, &material, b"hello").unwrap();
        let expected = hmac_sign_sha256(key, b"hello");
        assert_eq!(sig, expected);
        assert!(verify(JwsAlg::HS256, &material, b"hello", &sig).unwrap());
    }

    #[test]
    fn recovers_textbook_rsa_primes() {
        // The classic small-scale example from the RSA paper: p=61, q=53.
        let n = BigUint::from(3233u32);
        let e = BigUint::from(17u32);
        let d = BigUint::from(2753u32);
        let (p, q) = recover_primes(&n, &e, &d).expect("should recover primes");
        let mut factors = [p, q];
        factors.sort();
        assert_eq!(factors, [BigUint::from(53u32), BigUint::from(61u32)]);
    }

    #[test]
    fn undersized_rsa_is_rejected() {
        let public = RsaPublic {
            n: ByteVec(vec![0xff; 128]), // 1024 bits
            e: MinimalUInt::from_bytes(&[0x01, 0x00, 0x01]),
        };
        let material = KeyMaterial::Rsa { public, private: None };
        assert!(matches!(best_jws_alg(&material), Err(Error::KeySizeTooSmall)));
    }

    #[test]
    fn algorithm_confusion_is_rejected() {
        let public = RsaPublic {
            n: ByteVec(vec![0xff; 256]),
            e: MinimalUInt::from_bytes(&[0x01, 0x00, 0x01]),
        };
        let material = KeyMaterial::Rsa { public, private: None };
        let err = verify(JwsAlg::HS256, &material, b"hello", b"mac").unwrap_err();
        assert!(matches!(err, Error::AlgorithmMismatch(_)));
    }

    #[test]
    fn undersized_hmac_key_is_rejected_per_variant() {
        let short = KeyMaterial::Oct {
            params: OctParams { k: ByteVec(vec![0u8; 3]) },
        };
        assert!(matches!(sign(JwsAlg::HS256, &short, b"m"), Err(Error::KeySizeTooSmall)));
        assert!(matches!(
            verify(JwsAlg::HS256, &short, b"m", b"sig"),
            Err(Error::KeySizeTooSmall)
        ));

        // 32 bytes is enough for HS256 but not HS384/HS512.
        let key32 = KeyMaterial::Oct {
            params: OctParams { k: ByteVec(vec![0u8; 32]) },
        };
        assert!(sign(JwsAlg::HS256, &key32, b"m").is_ok());
        assert!(matches!(sign(JwsAlg::HS384, &key32, b"m"), Err(Error::KeySizeTooSmall)));
        assert!(matches!(sign(JwsAlg::HS512, &key32, b"m"), Err(Error::KeySizeTooSmall)));
    }

    #[test]
    fn none_alg_requires_empty_signature() {
        let material = KeyMaterial::Oct {
            params: OctParams { k: ByteVec(vec![0; 32]) },
        };
        assert!(verify(JwsAlg::None, &material, b"msg", b"").unwrap());
        assert!(!verify(JwsAlg::None, &material, b"msg", b"x").unwrap());
        assert_eq!(sign(JwsAlg::None, &material, b"msg").unwrap(), Vec::<u8>::new());
    }
}
