use sha2::{Digest, Sha256};

/// Credential digest service.
///
/// Digests are deterministic, unsalted SHA-256 rendered as lowercase hex:
/// the stored value is a pure function of the plaintext, and equal
/// plaintexts always produce equal digests. There is no decode operation.
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    pub fn digest(&self, plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(&self, plaintext: &str, stored_digest: &str) -> bool {
        constant_time_eq(self.digest(plaintext).as_bytes(), stored_digest.as_bytes())
    }
}

/// Constant-time comparison to avoid timing side-channels.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let service = PasswordService::new();
        assert_eq!(service.digest("super-secret"), service.digest("super-secret"));
        assert_ne!(service.digest("super-secret"), service.digest("super-secreT"));
    }

    #[test]
    fn digest_is_sha256_hex() {
        let service = PasswordService::new();
        let digest = service.digest("secret");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn verifies_against_stored_digest() {
        let service = PasswordService::new();
        let stored = service.digest("pw123456");
        assert!(service.verify("pw123456", &stored));
        assert!(!service.verify("pw1234567", &stored));
        assert!(!service.verify("pw123456", "not-a-digest"));
    }
}
