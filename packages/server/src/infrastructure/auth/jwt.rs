//! HS512 JWT validation.
//!
//! Tokens signed with any other algorithm are rejected. `exp` is optional,
//! but when present it is enforced.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Claims {
    /// User id of the token holder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing token")]
    MissingToken,
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid(e.to_string()),
        }
    }
}

/// Validates bearer tokens against a shared secret.
#[derive(Clone)]
pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }

    pub fn validate(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }
}

impl std::fmt::Debug for JwtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

/// Sign an HS512 token for `sub`, valid for `ttl_secs` seconds.
pub fn issue_token(
    secret: &[u8],
    sub: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Some(sub.to_string()),
        iat: Some(now),
        exp: Some(now + ttl_secs),
    };
    encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn test_verify_accepts_hs512_token() {
        // テスト項目: 正しい秘密鍵で署名された HS512 トークンは受理され、sub が取り出せる
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);
        let token = issue_token(SECRET, "alice", 3600).unwrap();

        // when (操作):
        let claims = validator.verify(&token).unwrap();

        // then (期待する結果):
        assert_eq!(claims.sub.as_deref(), Some("alice"));
    }

    #[test]
    fn test_verify_rejects_other_algorithms() {
        // テスト項目: HS256 で署名されたトークンは拒否される
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);
        let claims = Claims {
            sub: Some("alice".to_string()),
            ..Claims::default()
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        // when (操作):
        let result = validator.verify(&token);

        // then (期待する結果):
        assert!(matches!(result, Err(AuthError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        // テスト項目: 別の秘密鍵で署名されたトークンは拒否される
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);
        let token = issue_token(b"other-secret", "alice", 3600).unwrap();

        // when (操作) / then (期待する結果):
        assert!(!validator.validate(&token));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // テスト項目: 有効期限切れのトークンは Expired になる
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);
        let token = issue_token(SECRET, "alice", -3600).unwrap();

        // when (操作):
        let result = validator.verify(&token);

        // then (期待する結果):
        assert_eq!(result, Err(AuthError::Expired));
    }

    #[test]
    fn test_verify_accepts_token_without_exp() {
        // テスト項目: exp を持たないトークンも署名が正しければ受理される
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &Claims::default(),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        // when (操作):
        let claims = validator.verify(&token).unwrap();

        // then (期待する結果):
        assert!(claims.sub.is_none());
    }

    #[test]
    fn test_verify_rejects_garbage_and_empty() {
        // テスト項目: 形式不正・空のトークンは拒否される
        // given (前提条件):
        let validator = JwtValidator::new(SECRET);

        // when (操作) / then (期待する結果):
        assert_eq!(validator.verify(""), Err(AuthError::MissingToken));
        assert!(matches!(
            validator.verify("not.a.jwt"),
            Err(AuthError::Invalid(_))
        ));
    }
}
