use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

use shared_models::auth::{JwtClaims, Session, User};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("no signing secret configured")]
    MissingSecret,

    #[error("access token is not a three-part JWT")]
    Shape,

    #[error("access token segment is not base64url: {0}")]
    Encoding(&'static str),

    #[error("access token was not signed with the project secret")]
    Signature,

    #[error("access token claims are unreadable")]
    Claims,

    #[error("access token expired at {0}")]
    Expired(u64),
}

/// Checks an HS256 access token issued by Supabase Auth and opens a session
/// for its subject. The token itself is kept on the session so backend calls
/// run under the caller's row-level security.
pub fn open_session(token: &str, jwt_secret: &str) -> Result<Session, TokenError> {
    let claims = verified_claims(token, jwt_secret)?;

    if let Some(exp) = claims.exp {
        if exp < Utc::now().timestamp() as u64 {
            return Err(TokenError::Expired(exp));
        }
    }

    let user = User {
        created_at: claims.iat.and_then(|iat| Utc.timestamp_opt(iat as i64, 0).single()),
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        metadata: claims.user_metadata,
    };
    debug!("Opened session for {}", user.id);

    Ok(Session::new(user, token))
}

fn verified_claims(token: &str, jwt_secret: &str) -> Result<JwtClaims, TokenError> {
    if jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let (signed, signature) = token.rsplit_once('.').ok_or(TokenError::Shape)?;
    let (_, payload) = signed.split_once('.').ok_or(TokenError::Shape)?;
    if payload.contains('.') {
        return Err(TokenError::Shape);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Encoding("signature"))?;

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes()).map_err(|_| TokenError::MissingSecret)?;
    mac.update(signed.as_bytes());
    mac.verify_slice(&signature).map_err(|_| TokenError::Signature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Encoding("payload"))?;

    serde_json::from_slice(&payload).map_err(|e| {
        debug!("Unreadable token claims: {}", e);
        TokenError::Claims
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};

    const SECRET: &str = "test-secret-key-for-jwt-validation-must-be-long-enough";

    #[test]
    fn valid_token_opens_session() {
        let test_user = TestUser::patient("patient@example.com");
        let token = JwtTestUtils::create_test_token(&test_user, SECRET, Some(1));

        let session = open_session(&token, SECRET).unwrap();
        assert_eq!(session.user_id(), test_user.id);
        assert_eq!(session.user.email.as_deref(), Some("patient@example.com"));
        assert!(session.user.created_at.is_some());
        assert_eq!(session.access_token, token);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = JwtTestUtils::create_expired_token(&TestUser::default(), SECRET);
        assert!(matches!(open_session(&token, SECRET), Err(TokenError::Expired(_))));
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let token = JwtTestUtils::create_invalid_signature_token(&TestUser::default());
        assert_eq!(open_session(&token, SECRET).unwrap_err(), TokenError::Signature);
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert_eq!(open_session("not-a-jwt", SECRET).unwrap_err(), TokenError::Shape);
        assert_eq!(open_session("a.b.c.d", SECRET).unwrap_err(), TokenError::Shape);
        assert!(open_session(&JwtTestUtils::create_malformed_token(), SECRET).is_err());
    }

    #[test]
    fn missing_secret_is_rejected() {
        let token = JwtTestUtils::create_test_token(&TestUser::default(), SECRET, None);
        assert_eq!(open_session(&token, "").unwrap_err(), TokenError::MissingSecret);
    }
}
