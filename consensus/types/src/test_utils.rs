//! Deterministic fixtures for tests, shared across this crate and its downstream dependents.
//!
//! Producing real BLS keypairs is out of scope (see [`crate::signature`]), so we deterministically
//! derive pubkey-shaped bytes from an index instead. They have no cryptographic meaning, but they
//! are distinct and stable across test runs, which is all a registry-index fixture needs.

use crate::{Epoch, Hash256, PublicKeyBytes, Validator, FAR_FUTURE_EPOCH};

/// Builds `count` validators with deterministic, distinct pubkeys and the given effective balance,
/// all active from genesis.
pub fn generate_deterministic_validators(count: usize, effective_balance: u64) -> Vec<Validator> {
    (0..count)
        .map(|i| Validator {
            pubkey: deterministic_pubkey(i),
            withdrawal_credentials: Hash256::zero(),
            effective_balance,
            slashed: false,
            activation_eligibility_epoch: Epoch::new(0),
            activation_epoch: Epoch::new(0),
            exit_epoch: FAR_FUTURE_EPOCH,
            withdrawable_epoch: FAR_FUTURE_EPOCH,
        })
        .collect()
}

/// A pubkey-shaped byte string derived from `index`, unique per index but otherwise meaningless.
pub fn deterministic_pubkey(index: usize) -> PublicKeyBytes {
    let mut bytes = [0u8; 48];
    bytes[0..8].copy_from_slice(&(index as u64).to_le_bytes());
    PublicKeyBytes::from_fixed_bytes(bytes)
}
