//! HS256 access tokens: issuing, validation, and identity resolution

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (member ID)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}

/// Identity resolved from a verified bearer token.
///
/// Framework-agnostic: carried through request extensions and the GraphQL
/// context, never read from any global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub member_id: Uuid,
}

/// Issues and verifies member access tokens
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiry_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, expiry_seconds: i64) -> Self {
        Self {
            secret,
            expiry_seconds,
        }
    }

    /// Sign an access token with the member id as subject
    pub fn issue(&self, member_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: member_id.to_string(),
            exp: (now + self.expiry_seconds) as usize,
            iat: now as usize,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Check signature and expiry; no side effects
    pub fn validate(&self, token: &str) -> bool {
        self.decode(token).is_ok()
    }

    /// Extract the subject claim from a token.
    ///
    /// Callers are expected to run `validate` first; an invalid token fails
    /// here with the underlying JWT error.
    pub fn parse_subject(&self, token: &str) -> Result<String> {
        let data = self.decode(token)?;
        Ok(data.claims.sub)
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_seconds
    }

    fn decode(&self, token: &str) -> jsonwebtoken::errors::Result<TokenData<Claims>> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
    }
}

/// Build the request identity from a token subject.
///
/// Subjects are member UUIDs in string form; anything else resolves to no
/// identity rather than an error.
pub fn build_identity(subject: &str) -> Option<AuthenticatedMember> {
    Uuid::parse_str(subject)
        .ok()
        .map(|member_id| AuthenticatedMember { member_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tokens() -> TokenService {
        TokenService::new("test-secret".to_string(), 3600)
    }

    #[test]
    fn test_issue_validate_parse_round_trip() {
        let tokens = test_tokens();
        let member_id = Uuid::new_v4();

        let token = tokens.issue(member_id).expect("should issue token");
        assert!(tokens.validate(&token));

        let subject = tokens.parse_subject(&token).expect("should parse subject");
        assert_eq!(subject, member_id.to_string());

        let identity = build_identity(&subject).expect("subject should be a member id");
        assert_eq!(identity.member_id, member_id);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let tokens = TokenService::new("test-secret".to_string(), -3600);
        let token = tokens.issue(Uuid::new_v4()).expect("should issue token");
        assert!(!tokens.validate(&token));
        assert!(tokens.parse_subject(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let tokens = test_tokens();
        assert!(!tokens.validate("not.a.jwt"));
        assert!(!tokens.validate(""));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = test_tokens().issue(Uuid::new_v4()).expect("should issue token");
        let other = TokenService::new("other-secret".to_string(), 3600);
        assert!(!other.validate(&token));
    }

    #[test]
    fn test_build_identity_rejects_non_uuid_subject() {
        assert!(build_identity("not-a-uuid").is_none());
        assert!(build_identity("").is_none());
    }
}
