//! HMAC-SHA256 signing and verification for webhook bodies.
//!
//! The identity provider signs the raw request body with a shared secret and
//! sends the hex-encoded digest in a header. Verification recomputes the
//! digest over the exact bytes received and compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors produced by signature verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// No shared secret is configured. Verification fails closed.
    #[error("webhook signing secret is not configured")]
    MissingSecret,

    /// The supplied signature does not match the request body.
    ///
    /// Deliberately carries no detail: the caller must not learn whether the
    /// body was tampered with or the secret was wrong.
    #[error("signature mismatch")]
    Mismatch,
}

/// Compute the hex-encoded HMAC-SHA256 signature of `body` under `secret`.
#[must_use]
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies that inbound request bodies were produced by a holder of the
/// shared secret.
///
/// Built once at startup from configuration and shared across requests. A
/// verifier constructed without a secret rejects every request rather than
/// skipping verification.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Option<String>,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SignatureVerifier {
    /// Create a verifier with the given shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(secret.into()),
        }
    }

    /// Create a verifier with no secret configured.
    ///
    /// All verification attempts return [`SignatureError::MissingSecret`].
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { secret: None }
    }

    /// Whether a secret is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify `provided` (an ASCII-hex HMAC-SHA256 digest) against the raw
    /// `body` bytes.
    ///
    /// The comparison is performed over the decoded digest bytes with a
    /// single constant-time primitive, so its duration does not depend on
    /// where the first mismatching byte occurs. A value that is not valid
    /// hex, or decodes to the wrong length, is a mismatch.
    pub fn verify(&self, body: &[u8], provided: &str) -> Result<(), SignatureError> {
        let secret = self.secret.as_deref().ok_or(SignatureError::MissingSecret)?;

        let Ok(provided_bytes) = hex::decode(provided.trim()) else {
            return Err(SignatureError::Mismatch);
        };

        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
        mac.update(body);
        let expected = mac.finalize().into_bytes();

        if expected.len() == provided_bytes.len()
            && bool::from(expected.ct_eq(&provided_bytes))
        {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_produces_hex_digest() {
        let sig = sign("secret", b"hello world");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sign_deterministic() {
        assert_eq!(sign("secret", b"data"), sign("secret", b"data"));
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let body = br#"{"time":1,"type":"access.REGISTER"}"#;
        let verifier = SignatureVerifier::new("s3cret");
        let sig = sign("s3cret", body);
        assert_eq!(verifier.verify(body, &sig), Ok(()));
    }

    #[test]
    fn verify_accepts_uppercase_hex() {
        let body = b"payload";
        let verifier = SignatureVerifier::new("s3cret");
        let sig = sign("s3cret", body).to_uppercase();
        assert_eq!(verifier.verify(body, &sig), Ok(()));
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let verifier = SignatureVerifier::new("s3cret");
        let body = b"the quick brown fox".to_vec();
        let sig = sign("s3cret", &body);

        // Flip a single bit at every position; each mutation must be caught.
        for i in 0..body.len() {
            let mut tampered = body.clone();
            tampered[i] ^= 0x01;
            assert_eq!(
                verifier.verify(&tampered, &sig),
                Err(SignatureError::Mismatch),
                "bit flip at byte {i} went undetected"
            );
        }
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let body = b"payload";
        let verifier = SignatureVerifier::new("right-secret");
        let sig = sign("wrong-secret", body);
        assert_eq!(verifier.verify(body, &sig), Err(SignatureError::Mismatch));
    }

    #[test]
    fn verify_rejects_invalid_hex() {
        let verifier = SignatureVerifier::new("s3cret");
        assert_eq!(
            verifier.verify(b"payload", "not-hex-at-all"),
            Err(SignatureError::Mismatch)
        );
        // Odd-length hex cannot decode.
        assert_eq!(
            verifier.verify(b"payload", "abc"),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let body = b"payload";
        let verifier = SignatureVerifier::new("s3cret");
        let sig = sign("s3cret", body);
        assert_eq!(
            verifier.verify(body, &sig[..32]),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn unconfigured_verifier_fails_closed() {
        let body = b"payload";
        let verifier = SignatureVerifier::unconfigured();
        assert!(!verifier.is_configured());

        // Even a digest that would match under some secret is rejected.
        let sig = sign("any-secret", body);
        assert_eq!(
            verifier.verify(body, &sig),
            Err(SignatureError::MissingSecret)
        );
        assert_eq!(
            verifier.verify(body, ""),
            Err(SignatureError::MissingSecret)
        );
    }

    #[test]
    fn mismatch_position_uses_same_primitive() {
        // Early and late mismatches travel the same code path: both decode
        // to full-length digests and go through the single ct_eq comparison.
        let body = b"payload";
        let verifier = SignatureVerifier::new("s3cret");
        let good = sign("s3cret", body);

        let mut early = good.clone().into_bytes();
        early[0] = if early[0] == b'0' { b'1' } else { b'0' };
        let early = String::from_utf8(early).unwrap();

        let mut late = good.clone().into_bytes();
        let last = late.len() - 1;
        late[last] = if late[last] == b'0' { b'1' } else { b'0' };
        let late = String::from_utf8(late).unwrap();

        assert_eq!(verifier.verify(body, &early), Err(SignatureError::Mismatch));
        assert_eq!(verifier.verify(body, &late), Err(SignatureError::Mismatch));
    }

    #[test]
    fn debug_redacts_secret() {
        let verifier = SignatureVerifier::new("super-secret-value");
        let debug = format!("{verifier:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret-value"));
    }
}
