//! Secure random byte sources.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::RandomUnavailable;

/// A source of cryptographically secure random bytes.
pub trait SecureRandomSource: Send + Sync {
    /// Fill `buf` entirely, or fail without partial output being used.
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomUnavailable>;
}

/// Operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl SecureRandomSource for OsRandomSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), RandomUnavailable> {
        OsRng.try_fill_bytes(buf).map_err(|e| RandomUnavailable(e.to_string()))
    }
}
