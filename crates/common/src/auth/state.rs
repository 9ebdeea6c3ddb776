//! Anti-forgery state for the authorization redirect
//!
//! A state token is 32 random bytes, standard-base64 encoded. It is sent on
//! the authorize URL and must come back unchanged on the callback.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use harvest_domain::constants::STATE_BYTES;
use rand::rngs::OsRng;
use rand::RngCore;

use super::traits::RandomSource;

/// [`RandomSource`] backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Generate a fresh state token from `random`.
pub fn generate_state(random: &dyn RandomSource) -> String {
    let mut bytes = [0u8; STATE_BYTES];
    random.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// `true` only when both states are present and equal.
pub fn validate_state(expected: Option<&str>, actual: Option<&str>) -> bool {
    match (expected, actual) {
        (Some(expected), Some(actual)) => !expected.is_empty() && expected == actual,
        _ => false,
    }
}
