//! CSRF tokens for HTML forms.
//!
//! Each session holds a random secret. Forms carry
//! `hex(HMAC-SHA256(SECRET_KEY, secret))`, checked in constant time on submit.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tower_sessions::Session;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const CSRF_SECRET_KEY: &str = "_csrf_secret";
const SECRET_LEN: usize = 32;

/// Issues and verifies CSRF tokens bound to the current session.
pub struct CsrfGuard {
    key: Vec<u8>,
}

impl CsrfGuard {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    fn mac(&self, secret: &str) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(secret.as_bytes());
        mac
    }

    fn generate_secret() -> String {
        let mut buf = [0u8; SECRET_LEN];
        rand::rng().fill_bytes(&mut buf);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
    }

    /// Returns the form token, creating the session secret on first use.
    pub async fn issue(&self, session: &Session) -> Result<String, AppError> {
        let secret = match session.get::<String>(CSRF_SECRET_KEY).await? {
            Some(secret) => secret,
            None => {
                let secret = Self::generate_secret();
                session.insert(CSRF_SECRET_KEY, &secret).await?;
                secret
            }
        };

        Ok(hex::encode(self.mac(&secret).finalize().into_bytes()))
    }

    /// Checks a submitted token against the session secret.
    pub async fn verify(&self, session: &Session, token: &str) -> Result<bool, AppError> {
        let Some(secret) = session.get::<String>(CSRF_SECRET_KEY).await? else {
            return Ok(false);
        };
        let Ok(submitted) = hex::decode(token.trim()) else {
            return Ok(false);
        };

        Ok(self.mac(&secret).verify_slice(&submitted).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_issued_token_verifies() {
        let guard = CsrfGuard::new("k".repeat(32));
        let session = session();

        let token = guard.issue(&session).await.unwrap();

        assert_eq!(token.len(), 64);
        assert!(guard.verify(&session, &token).await.unwrap());
    }

    #[tokio::test]
    async fn test_token_is_stable_within_session() {
        let guard = CsrfGuard::new("k".repeat(32));
        let session = session();

        let first = guard.issue(&session).await.unwrap();
        let second = guard.issue(&session).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_rejects_tampered_and_foreign_tokens() {
        let guard = CsrfGuard::new("k".repeat(32));
        let session = session();
        let other = self::session();

        let token = guard.issue(&session).await.unwrap();
        let foreign = guard.issue(&other).await.unwrap();

        assert!(!guard.verify(&session, &foreign).await.unwrap());
        assert!(!guard.verify(&session, "not-hex").await.unwrap());
        assert!(!guard.verify(&session, "").await.unwrap());

        let mut tampered = token.into_bytes();
        tampered[0] = if tampered[0] == b'a' { b'b' } else { b'a' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(!guard.verify(&session, &tampered).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_secret_means_invalid() {
        let guard = CsrfGuard::new("k".repeat(32));

        assert!(!guard.verify(&session(), "00").await.unwrap());
    }

    #[tokio::test]
    async fn test_key_matters() {
        let session = session();
        let token = CsrfGuard::new("a".repeat(32)).issue(&session).await.unwrap();

        assert!(!CsrfGuard::new("b".repeat(32)).verify(&session, &token).await.unwrap());
    }
}
