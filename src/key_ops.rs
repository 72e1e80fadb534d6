//! The `key_ops` JWK member (RFC 7517 §4.3) as a compact flag set rather
//! than a `Vec<String>`, so that membership tests don't allocate and
//! duplicate/unknown members can't silently round-trip as distinct states.

use bitflags::bitflags;
use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    #[derive(Default)]
    pub struct KeyOps: u16 {
        const SIGN         = 0b0000_0001;
        const VERIFY       = 0b0000_0010;
        const ENCRYPT      = 0b0000_0100;
        const DECRYPT      = 0b0000_1000;
        const WRAP_KEY     = 0b0001_0000;
        const UNWRAP_KEY   = 0b0010_0000;
        const DERIVE_KEY   = 0b0100_0000;
        const DERIVE_BITS  = 0b1000_0000;
    }
}

const MEMBERS: &[(KeyOps, &str)] = &[
    (KeyOps::SIGN, "sign"),
    (KeyOps::VERIFY, "verify"),
    (KeyOps::ENCRYPT, "encrypt"),
    (KeyOps::DECRYPT, "decrypt"),
    (KeyOps::WRAP_KEY, "wrapKey"),
    (KeyOps::UNWRAP_KEY, "unwrapKey"),
    (KeyOps::DERIVE_KEY, "deriveKey"),
    (KeyOps::DERIVE_BITS, "deriveBits"),
];

impl Serialize for KeyOps {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let names: Vec<&str> = MEMBERS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        let mut seq = s.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for KeyOps {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(d)?;
        let mut ops = KeyOps::empty();
        for name in names {
            match MEMBERS.iter().find(|(_, member)| *member == name) {
                Some((flag, _)) => ops.insert(*flag),
                // Unrecognized operation names are preserved by neither this
                // crate nor RFC 7517 §4.3's registry requirement; they are
                // silently dropped, matching this crate's general policy of
                // ignoring unknown JSON content on parse.
                None => continue,
            }
        }
        Ok(ops)
    }
}

impl KeyOps {
    pub fn is_empty_set(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_members() {
        let ops = KeyOps::SIGN | KeyOps::VERIFY;
        let json = serde_json::to_string(&ops).unwrap();
        assert_eq!(json, r#"["sign","verify"]"#);
        let back: KeyOps = serde_json::from_str(&json).unwrap();
        assert_eq!(ops, back);
    }

    #[test]
    fn ignores_unknown_members() {
        let ops: KeyOps = serde_json::from_str(r#"["sign","frobnicate"]"#).unwrap();
        assert_eq!(ops, KeyOps::SIGN);
    }

    #[test]
    fn empty_set_serializes_to_empty_array() {
        let ops = KeyOps::empty();
        assert_eq!(serde_json::to_string(&ops).unwrap(), "[]");
    }
}
