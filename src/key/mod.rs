//! Per-`kty` key-parameter records (component B) and the `KeyMaterial` sum
//! type that discriminates over them (component C).

pub mod ec;
pub mod material;
pub mod oct;
pub mod okp;
pub mod rsa;

pub use ec::{Crv, Curve};
pub use material::KeyMaterial;
pub use oct::OctParams;
pub use okp::{OkpCrv, OkpParams};
pub use rsa::{RsaOthElem, RsaPrivate, RsaPublic};
