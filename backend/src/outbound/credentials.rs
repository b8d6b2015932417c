//! Credential adapters: argon2id password hashing and OS-random session
//! tokens.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use rand::RngCore;

use crate::domain::ports::{CredentialError, PasswordHasher, SessionTokenSource};
use crate::domain::{PasswordDigest, SessionToken};

/// Random bytes drawn per session token.
pub const SESSION_TOKEN_BYTES: usize = 16;

/// argon2id hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| CredentialError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| CredentialError::malformed_digest(err.to_string()))?;
        // Parameters embedded in the digest win over `self.params`.
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Session tokens of [`SESSION_TOKEN_BYTES`] OS-random bytes, URL-safe
/// base64 encoded without padding.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSessionTokens;

impl SessionTokenSource for RandomSessionTokens {
    fn generate(&self) -> SessionToken {
        let mut bytes = [0_u8; SESSION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let encoded = URL_SAFE_NO_PAD.encode(bytes);
        // Encoding 16 bytes never yields an empty string.
        SessionToken::new(encoded).unwrap_or_else(|| unreachable!("encoded token is non-empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::HashSet;

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::with_params(Params::new(8, 1, 1, None).expect("params"))
    }

    #[rstest]
    fn hash_then_verify(hasher: Argon2PasswordHasher) {
        let digest = hasher.hash("hunter22").expect("hash");
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("hunter22", &digest).expect("verify"));
        assert!(!hasher.verify("hunter23", &digest).expect("verify"));
    }

    #[rstest]
    fn same_password_gets_distinct_salts(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("secret").expect("hash");
        let second = hasher.hash("secret").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_digest_is_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("secret", &PasswordDigest::new("plaintext"))
            .expect_err("malformed");
        assert!(matches!(err, CredentialError::MalformedDigest { .. }));
    }

    #[rstest]
    fn tokens_are_url_safe_and_distinct() {
        let tokens: HashSet<String> = (0..64)
            .map(|_| String::from(RandomSessionTokens.generate()))
            .collect();
        assert_eq!(tokens.len(), 64);
        for token in &tokens {
            assert_eq!(token.len(), 22);
            assert!(
                token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
        }
    }
}
