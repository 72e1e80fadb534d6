//! Symmetric ("oct") key parameters, RFC 7518 §6.4.

use serde::{Deserialize, Serialize};

use crate::byte_vec::ByteVec;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctParams {
    #[serde(rename = "k")]
    pub k: ByteVec,
}

impl OctParams {
    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }
}
