//! Traits for injectable OAuth dependencies
//!
//! The state generator draws from a [`RandomSource`] handed to the flow
//! instead of a process-wide generator, so tests can pin the state value.

/// Source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}
