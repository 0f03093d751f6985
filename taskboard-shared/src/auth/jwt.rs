/// JWT token generation and validation
///
/// Tokens are signed with HS256 (HMAC-SHA256). Two token types are issued:
///
/// - **Access token**: short-lived (default 15 minutes), carries the user's
///   email, authenticates individual API requests.
/// - **Refresh token**: long-lived (default 7 days), carries no email, minted
///   alongside the access token at login. Redemption/rotation is an
///   unimplemented extension point; no endpoint consumes refresh tokens yet.
///
/// The signing secret and both TTLs live in [`TokenManager`], which is built
/// once at startup and shared read-only across all requests.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::TokenManager;
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let manager = TokenManager::new(
///     "secret-key-at-least-32-bytes-long!!".to_string(),
///     Duration::minutes(15),
///     Duration::days(7),
/// );
///
/// let user_id = Uuid::new_v4();
/// let token = manager.generate_access_token(user_id, "user@example.com")?;
/// let claims = manager.validate_access_token(&token)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim, checked during validation
const ISSUER: &str = "taskboard";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to sign a token
    #[error("failed to create token: {0}")]
    Create(String),

    /// Token has expired
    #[error("token has expired")]
    Expired,

    /// Any other verification failure: bad signature, malformed token,
    /// wrong algorithm, wrong issuer, wrong token type
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Token type claim, distinguishing access from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived, authenticates API requests
    Access,

    /// Long-lived, intended to mint new access tokens
    Refresh,
}

/// JWT claims
///
/// Standard claims (`sub`, `iss`, `iat`, `exp`) plus the token type and, for
/// access tokens only, the user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID
    pub sub: Uuid,

    /// User email; present on access tokens, omitted on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issuer, always "taskboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// Access or refresh
    pub token_type: TokenType,
}

/// Issues and validates signed tokens
///
/// Holds no mutable state; safe to share behind an `Arc` across all request
/// handlers.
#[derive(Debug, Clone)]
pub struct TokenManager {
    secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenManager {
    /// Creates a token manager from the signing secret and per-type TTLs.
    pub fn new(secret: String, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            secret,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issues an access token for a user.
    ///
    /// Claim set: `{sub, email, iss, iat, exp, token_type: access}`.
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: Some(email.to_string()),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
            token_type: TokenType::Access,
        };

        self.sign(&claims)
    }

    /// Issues a refresh token for a user.
    ///
    /// Same mechanism as the access token, longer TTL, no email claim.
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: None,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
            token_type: TokenType::Refresh,
        };

        self.sign(&claims)
    }

    /// Verifies signature, expiry, and issuer; returns the claims.
    ///
    /// # Errors
    ///
    /// - [`JwtError::Expired`] when `exp` has passed
    /// - [`JwtError::Invalid`] for every other verification failure
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::Invalid(e.to_string()),
        })?;

        Ok(token_data.claims)
    }

    /// Validates a token and requires it to be an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(JwtError::Invalid(
                "expected access token, got refresh token".to_string(),
            ));
        }

        Ok(claims)
    }

    /// Validates a token and requires it to be a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(JwtError::Invalid(
                "expected refresh token, got access token".to_string(),
            ));
        }

        Ok(claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, claims, &key).map_err(|e| JwtError::Create(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new(
            "test-secret-key-at-least-32-bytes-long".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let m = manager();
        let user_id = Uuid::new_v4();

        let token = m.generate_access_token(user_id, "user@example.com").unwrap();
        let claims = m.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
        assert_eq!(claims.iss, "taskboard");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_omits_email() {
        let m = manager();
        let user_id = Uuid::new_v4();

        let token = m.generate_refresh_token(user_id).unwrap();
        let claims = m.validate_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.email.is_none());
        assert_eq!(claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_access_and_refresh_tokens_differ() {
        let m = manager();
        let user_id = Uuid::new_v4();

        let access = m.generate_access_token(user_id, "user@example.com").unwrap();
        let refresh = m.generate_refresh_token(user_id).unwrap();

        assert!(!access.is_empty());
        assert!(!refresh.is_empty());
        assert_ne!(access, refresh);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let m = manager();
        let other = TokenManager::new(
            "a-completely-different-secret-key-here".to_string(),
            Duration::minutes(15),
            Duration::days(7),
        );

        let token = m
            .generate_access_token(Uuid::new_v4(), "user@example.com")
            .unwrap();

        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        // Negative TTL produces a token that expired in the past
        let m = TokenManager::new(
            "test-secret-key-at-least-32-bytes-long".to_string(),
            Duration::seconds(-120),
            Duration::days(7),
        );

        let token = m
            .generate_access_token(Uuid::new_v4(), "user@example.com")
            .unwrap();

        assert!(matches!(
            manager().validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(matches!(
            manager().validate_token("not.a.jwt"),
            Err(JwtError::Invalid(_))
        ));
    }

    #[test]
    fn test_token_type_confusion_rejected() {
        let m = manager();
        let user_id = Uuid::new_v4();

        let access = m.generate_access_token(user_id, "user@example.com").unwrap();
        let refresh = m.generate_refresh_token(user_id).unwrap();

        // A refresh token must not pass as an access token, and vice versa
        assert!(m.validate_access_token(&refresh).is_err());
        assert!(m.validate_refresh_token(&access).is_err());
    }
}
