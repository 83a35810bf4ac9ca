//! Defines `Slot` and `Epoch` newtypes that wrap a `u64`, to avoid accidentally mixing slot and
//! epoch arithmetic (a recurring source of bugs in naive beacon-chain implementations).

use crate::EthSpec;
use serde_derive::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use std::fmt;
use std::ops::{Add, Sub};
use tree_hash_derive::TreeHash;

macro_rules! impl_newtype_u64 {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            Encode,
            Decode,
            TreeHash,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(n: u64) -> Self {
                Self(n)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }

            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Add<u64> for $name {
            type Output = Self;
            fn add(self, rhs: u64) -> Self {
                Self(self.0 + rhs)
            }
        }

        impl Sub<u64> for $name {
            type Output = Self;
            fn sub(self, rhs: u64) -> Self {
                Self(self.0 - rhs)
            }
        }
    };
}

impl_newtype_u64!(Slot);
impl_newtype_u64!(Epoch);

impl Slot {
    /// The epoch that this slot falls within.
    pub fn epoch(&self, slots_per_epoch: u64) -> Epoch {
        Epoch::new(self.0 / slots_per_epoch)
    }

    /// Returns `true` if this slot is the first slot of its epoch.
    pub fn is_epoch_start(&self, slots_per_epoch: u64) -> bool {
        self.0 % slots_per_epoch == 0
    }
}

impl Epoch {
    pub fn start_slot(&self, slots_per_epoch: u64) -> Slot {
        Slot::new(self.0 * slots_per_epoch)
    }

    pub fn end_slot(&self, slots_per_epoch: u64) -> Slot {
        Slot::new((self.0 + 1) * slots_per_epoch - 1)
    }
}

/// Convenience conversion for code generic over an `EthSpec`.
pub fn epoch_of<E: EthSpec>(slot: Slot) -> Epoch {
    slot.epoch(E::slots_per_epoch())
}
