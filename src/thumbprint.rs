//! The RFC 7638 JWK Thumbprint (component G).
//!
//! Rather than a bespoke canonical-JSON builder, each `kty`'s required
//! subset is modeled as a plain `struct` whose fields are *declared* in
//! lexicographic order; `serde_json::to_string` emits object fields in
//! declaration order and never inserts whitespace, so the ordinary
//! serializer already produces exactly the byte sequence RFC 7638 §3.2
//! requires. This mirrors the pack's `elliptic-curve` crate, which computes
//! its own EC thumbprint the same way rather than hand-rolling a writer.

use serde::Serialize;
use sha2::Digest;

use crate::error::Error;
use crate::key::KeyMaterial;
use crate::utils::encode;

#[derive(Serialize)]
struct EcThumbprint<'a> {
    crv: &'a str,
    kty: &'static str,
    x: String,
    y: String,
}

#[derive(Serialize)]
struct RsaThumbprint {
    e: String,
    kty: &'static str,
    n: String,
}

#[derive(Serialize)]
struct OctThumbprint {
    k: String,
    kty: &'static str,
}

#[derive(Serialize)]
struct OkpThumbprint<'a> {
    crv: &'a str,
    kty: &'static str,
    x: String,
}

/// The canonical JSON rendering of `material`'s thumbprint subset (RFC 7638
/// §3.2), as UTF-8 bytes, with no insignificant whitespace. Exposed so a
/// caller can hash it with any digest rather than only the ones this crate
/// provides a convenience wrapper for.
pub fn canonical_json(material: &KeyMaterial) -> Result<Vec<u8>, Error> {
    use KeyMaterial::*;
    let json = match material {
        Ec { curve } => serde_json::to_string(&EcThumbprint {
            crv: curve.crv().name(),
            kty: "EC",
            x: encode(curve.x()),
            y: encode(curve.y()),
        })?,
        Rsa { public, .. } => serde_json::to_string(&RsaThumbprint {
            e: encode(public.e.as_slice()),
            kty: "RSA",
            n: encode(public.n.as_slice()),
        })?,
        Oct { params } => serde_json::to_string(&OctThumbprint {
            k: encode(params.k.as_slice()),
            kty: "oct",
        })?,
        Okp { params } => serde_json::to_string(&OkpThumbprint {
            crv: params.crv.name(),
            kty: "OKP",
            x: encode(params.x.as_slice()),
        })?,
    };
    Ok(json.into_bytes())
}

/// `H(utf8(canonical_json(material)))` for any `sha2`-family digest (or
/// `sha1::Sha1`, which implements the same `digest::Digest` trait). Returns
/// the raw digest bytes; encode with `thumbprint_base64url` for use as a
/// `kid`.
pub fn thumbprint<D: Digest>(material: &KeyMaterial) -> Result<Vec<u8>, Error> {
    let json = canonical_json(material)?;
    let mut hasher = D::new();
    hasher.update(&json);
    Ok(hasher.finalize().to_vec())
}

/// `thumbprint` encoded as base64url-no-pad, ready to use directly as `kid`.
pub fn thumbprint_base64url<D: Digest>(material: &KeyMaterial) -> Result<String, Error> {
    Ok(encode(&thumbprint::<D>(material)?))
}
