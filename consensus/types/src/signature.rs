//! Opaque, unverified cryptographic byte-blobs.
//!
//! Block/attestation signature *verification* belongs to the validator-client and gossip
//! validation pipelines, both out of scope here (see `spec.md` §1). We still need to carry
//! signatures and public keys through SSZ encode/decode and to use public keys as map keys when
//! resolving a sync committee's pubkeys to validator indices, so both are modeled as fixed-size
//! byte wrappers rather than pulling in a BLS pairing crate this subsystem never calls into.

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz_derive::{Decode, Encode};
use std::fmt;
use tree_hash_derive::TreeHash;

macro_rules! impl_fixed_bytes {
    ($name:ident, $len:expr) => {
        #[derive(Clone, Copy, Encode, Decode, TreeHash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const fn zero() -> Self {
                Self([0; $len])
            }

            pub const fn from_fixed_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0[..] == other.0[..]
            }
        }
        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex::encode(&self.0[..]))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&format!("0x{}", hex::encode(&self.0[..])))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                let bytes = hex::decode(s.trim_start_matches("0x")).map_err(D::Error::custom)?;
                if bytes.len() != $len {
                    return Err(D::Error::custom(format!(
                        "expected {} bytes, got {}",
                        $len,
                        bytes.len()
                    )));
                }
                let mut buf = [0u8; $len];
                buf.copy_from_slice(&bytes);
                Ok(Self(buf))
            }
        }
    };
}

impl_fixed_bytes!(PublicKeyBytes, 48);
impl_fixed_bytes!(Signature, 96);
