//! Key generation (component E), gated behind the `generate` feature exactly
//! as the teacher gates its own `Key::generate_p256`/`generate_symmetric`.

use rand_core::CryptoRngCore;

use crate::byte_vec::ByteVec;
use crate::error::Error;
use crate::key::ec::{Crv, Curve};
use crate::key::okp::{OkpCrv, OkpParams};
use crate::key::rsa::{RsaPrivate, RsaPublic};
use crate::key::KeyMaterial;
use crate::minimal_uint::MinimalUInt;

/// How many times EC keygen is retried if the underlying crate reports a
/// secret key at the point at infinity before giving up with
/// `Error::CryptoBackend`. The RustCrypto crates' own rejection sampling
/// makes this practically unreachable, but the specification requires
/// handling it deterministically rather than assuming it away.
const MAX_INFINITY_RETRIES: u32 = 8;

/// Parameters selecting what kind of key `KeyMaterial::generate` produces.
pub enum KeyGenParam {
    /// Generate an ECDSA keypair on the given curve.
    Ec(Crv),
    /// Generate an RSA keypair with public exponent 65537 and a modulus of
    /// `size_bytes * 8` bits.
    Rsa { size_bytes: usize },
    /// Draw `size_bytes` random bytes for a symmetric key.
    Oct { size_bytes: usize },
    /// Generate an Ed25519 or X25519 keypair.
    Okp(OkpCrv),
}

macro_rules! generate_ec {
    ($crate_mod:ident, $rng:expr) => {{
        use $crate_mod::ecdsa::SigningKey;
        for _ in 0..MAX_INFINITY_RETRIES {
            let sk = SigningKey::random(&mut *$rng);
            let point = sk.verifying_key().to_encoded_point(false);
            if let (Some(x), Some(y)) = (point.x(), point.y()) {
                return Ok((sk.to_bytes().to_vec(), x.to_vec(), y.to_vec()));
            }
        }
        return Err(Error::CryptoBackend(
            "exhausted retries generating a non-identity EC keypair".into(),
        ))
    }};
}

fn generate_ec_bytes<R: CryptoRngCore>(
    crv: Crv,
    rng: &mut R,
) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>), Error> {
    match crv {
        Crv::P256 => generate_ec!(p256, rng),
        Crv::P384 => generate_ec!(p384, rng),
        Crv::P521 => generate_ec!(p521, rng),
    }
}

impl KeyMaterial {
    /// Generates fresh key material per `param`, drawing randomness from
    /// `rng`. Requires the crate's `generate` feature.
    pub fn generate<R: CryptoRngCore>(param: KeyGenParam, rng: &mut R) -> Result<Self, Error> {
        match param {
            KeyGenParam::Ec(crv) => {
                let (d, x, y) = generate_ec_bytes(crv, rng)?;
                let curve = match crv {
                    Crv::P256 => Curve::P256 { d: Some(ByteVec(d)), x: ByteVec(x), y: ByteVec(y) },
                    Crv::P384 => Curve::P384 { d: Some(ByteVec(d)), x: ByteVec(x), y: ByteVec(y) },
                    Crv::P521 => Curve::P521 { d: Some(ByteVec(d)), x: ByteVec(x), y: ByteVec(y) },
                };
                curve.validate()?;
                Ok(KeyMaterial::Ec { curve })
            }

            KeyGenParam::Rsa { size_bytes } => {
                let key = rsa::RsaPrivateKey::new(rng, size_bytes * 8)
                    .map_err(|e| Error::CryptoBackend(e.to_string()))?;
                let n = key.n().to_bytes_be();
                let e = key.e().to_bytes_be();
                let d = key.d().to_bytes_be();
                let primes = key.primes();
                let (p, q) = (primes[0].to_bytes_be(), primes[1].to_bytes_be());
                let dp = key
                    .dp()
                    .map(|v| v.to_bytes_be())
                    .ok_or_else(|| Error::CryptoBackend("RSA key missing dp".into()))?;
                let dq = key
                    .dq()
                    .map(|v| v.to_bytes_be())
                    .ok_or_else(|| Error::CryptoBackend("RSA key missing dq".into()))?;
                let qi = key
                    .crt_coefficient()
                    .ok_or_else(|| Error::CryptoBackend("RSA key missing qinv".into()))?
                    .to_bytes_be();
                Ok(KeyMaterial::Rsa {
                    public: RsaPublic {
                        n: ByteVec(n),
                        e: MinimalUInt::from_bytes(&e),
                    },
                    private: Some(RsaPrivate {
                        d: MinimalUInt::from_bytes(&d),
                        p: Some(MinimalUInt::from_bytes(&p)),
                        q: Some(MinimalUInt::from_bytes(&q)),
                        dp: Some(MinimalUInt::from_bytes(&dp)),
                        dq: Some(MinimalUInt::from_bytes(&dq)),
                        qi: Some(MinimalUInt::from_bytes(&qi)),
                        oth: None,
                    }),
                })
            }

            KeyGenParam::Oct { size_bytes } => {
                let mut bytes = vec![0u8; size_bytes];
                rng.fill_bytes(&mut bytes);
                Ok(KeyMaterial::Oct {
                    params: crate::key::oct::OctParams { k: ByteVec(bytes) },
                })
            }

            KeyGenParam::Okp(OkpCrv::Ed25519) => {
                let signing_key = ed25519_dalek::SigningKey::generate(rng);
                Ok(KeyMaterial::Okp {
                    params: OkpParams {
                        crv: OkpCrv::Ed25519,
                        x: ByteVec(signing_key.verifying_key().to_bytes().to_vec()),
                        d: Some(ByteVec(signing_key.to_bytes().to_vec())),
                    },
                })
            }

            KeyGenParam::Okp(OkpCrv::X25519) => {
                let secret = x25519_dalek::StaticSecret::random_from_rng(rng);
                let public = x25519_dalek::PublicKey::from(&secret);
                Ok(KeyMaterial::Okp {
                    params: OkpParams {
                        crv: OkpCrv::X25519,
                        x: ByteVec(public.to_bytes().to_vec()),
                        d: Some(ByteVec(secret.to_bytes().to_vec())),
                    },
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn generates_es256_capable_p256_key() {
        let material = KeyMaterial::generate(KeyGenParam::Ec(Crv::P256), &mut OsRng).unwrap();
        assert!(material.is_private());
        let sig = crate::sign::sign(crate::sign::JwsAlg::ES256, &material, b"hello").unwrap();
        assert_eq!(sig.len(), 64);
        let public = material.to_public().unwrap();
        assert!(crate::sign::verify(crate::sign::JwsAlg::ES256, &public, b"hello", &sig).unwrap());
    }

    #[test]
    fn generates_oct_key_of_requested_length() {
        let material = KeyMaterial::generate(KeyGenParam::Oct { size_bytes: 32 }, &mut OsRng).unwrap();
        match material {
            KeyMaterial::Oct { params } => assert_eq!(params.len(), 32),
            _ => panic!("expected oct key"),
        }
    }

    #[test]
    fn generates_ed25519_keypair_that_round_trips_signatures() {
        let material = KeyMaterial::generate(KeyGenParam::Okp(OkpCrv::Ed25519), &mut OsRng).unwrap();
        let sig = crate::sign::sign(crate::sign::JwsAlg::EdDSA, &material, b"hi").unwrap();
        let public = material.to_public().unwrap();
        assert!(crate::sign::verify(crate::sign::JwsAlg::EdDSA, &public, b"hi", &sig).unwrap());
    }

    #[test]
    #[ignore = "RSA keygen at full 2048-bit size is slow under debug builds; run with --release"]
    fn generates_rsa_key_strong_enough_to_sign() {
        let material = KeyMaterial::generate(KeyGenParam::Rsa { size_bytes: 256 }, &mut OsRng).unwrap();
        let sig = crate::sign::sign(crate::sign::JwsAlg::RS256, &material, b"hello").unwrap();
        let public = material.to_public().unwrap();
        assert!(crate::sign::verify(crate::sign::JwsAlg::RS256, &public, b"hello", &sig).unwrap());
    }
}
