//! Authorization code generation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::random::SecureRandomSource;
use crate::config::auth::CODE_BYTES;
use crate::error::RandomUnavailable;

/// Mints URL-safe authorization codes from a secure random source.
///
/// One draw of [`CODE_BYTES`] bytes per code, encoded as unpadded base64url,
/// so codes only contain `[A-Za-z0-9_-]`.
#[derive(Clone)]
pub struct CodeIssuer {
    source: Arc<dyn SecureRandomSource>,
}

impl CodeIssuer {
    #[must_use]
    pub fn new(source: Arc<dyn SecureRandomSource>) -> Self {
        Self { source }
    }

    /// Generate a fresh code. No retry on failure.
    pub fn issue(&self) -> Result<String, RandomUnavailable> {
        let mut bytes = [0u8; CODE_BYTES];
        self.source.fill(&mut bytes)?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl std::fmt::Debug for CodeIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeIssuer").finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::server::oauth::random::OsRandomSource;

    struct BrokenSource;

    impl SecureRandomSource for BrokenSource {
        fn fill(&self, _buf: &mut [u8]) -> Result<(), RandomUnavailable> {
            Err(RandomUnavailable("entropy pool closed".into()))
        }
    }

    struct FixedSource(u8);

    impl SecureRandomSource for FixedSource {
        fn fill(&self, buf: &mut [u8]) -> Result<(), RandomUnavailable> {
            buf.fill(self.0);
            Ok(())
        }
    }

    fn is_url_safe(code: &str) -> bool {
        code.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    #[test]
    fn test_code_shape() {
        let code = CodeIssuer::new(Arc::new(OsRandomSource)).issue().unwrap();
        assert_eq!(code.len(), 43);
        assert!(is_url_safe(&code));
    }

    #[test]
    fn test_codes_are_unique() {
        let issuer = CodeIssuer::new(Arc::new(OsRandomSource));
        let codes: HashSet<String> = (0..1000).map(|_| issuer.issue().unwrap()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_code_encodes_source_bytes() {
        let code = CodeIssuer::new(Arc::new(FixedSource(0xff))).issue().unwrap();
        assert_eq!(code, URL_SAFE_NO_PAD.encode([0xff; CODE_BYTES]));
        assert!(is_url_safe(&code));
    }

    #[test]
    fn test_unavailable_source() {
        let err = CodeIssuer::new(Arc::new(BrokenSource)).issue().unwrap_err();
        assert!(err.to_string().contains("entropy pool closed"));
    }
}
