use async_graphql::ErrorExtensions;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Business and infrastructure errors for all service operations.
///
/// Every domain variant carries a stable machine-readable code consumed by
/// API clients; infrastructure variants collapse to `INTERNAL_SERVER_ERROR`
/// at the boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Member does not exist")]
    MemberNotFound,

    #[error("Post does not exist")]
    PostNotFound,

    #[error("Hashtag does not exist")]
    HashtagNotFound,

    #[error("Member name already exists")]
    DuplicateMemberName,

    #[error("Post content is required")]
    ContentRequired,

    #[error("Post content must be 100 characters or less")]
    ContentTooLong,

    #[error("Password is incorrect")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code exposed in API error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::MemberNotFound => "MEMBER_DOES_NOT_EXISTS",
            ServiceError::PostNotFound => "POST_DOES_NOT_EXISTS",
            ServiceError::HashtagNotFound => "HASHTAG_DOES_NOT_EXISTS",
            ServiceError::DuplicateMemberName => "ID_IS_DUPLICATE",
            ServiceError::ContentRequired => "POST_CONTENT_IS_REQUIRED",
            ServiceError::ContentTooLong => "CONTENT_MUST_BE_100_LENGTH_OR_LESS",
            ServiceError::InvalidCredentials => "PASSWORD_IS_INCORRECT",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::Database(_) | ServiceError::Jwt(_) | ServiceError::Internal(_) => {
                "INTERNAL_SERVER_ERROR"
            }
        }
    }
}

impl ErrorExtensions for ServiceError {
    fn extend(&self) -> async_graphql::Error {
        let message = match self {
            // Don't leak internal details to API clients
            ServiceError::Database(_) | ServiceError::Jwt(_) | ServiceError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", self.code()))
    }
}

// Conversions from external error types
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);
        ServiceError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ServiceError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("JWT error: {}", err);
        ServiceError::Jwt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_codes_are_stable() {
        assert_eq!(ServiceError::MemberNotFound.code(), "MEMBER_DOES_NOT_EXISTS");
        assert_eq!(ServiceError::PostNotFound.code(), "POST_DOES_NOT_EXISTS");
        assert_eq!(ServiceError::HashtagNotFound.code(), "HASHTAG_DOES_NOT_EXISTS");
        assert_eq!(ServiceError::DuplicateMemberName.code(), "ID_IS_DUPLICATE");
        assert_eq!(
            ServiceError::ContentRequired.code(),
            "POST_CONTENT_IS_REQUIRED"
        );
        assert_eq!(
            ServiceError::ContentTooLong.code(),
            "CONTENT_MUST_BE_100_LENGTH_OR_LESS"
        );
        assert_eq!(ServiceError::InvalidCredentials.code(), "PASSWORD_IS_INCORRECT");
    }

    #[test]
    fn test_infrastructure_errors_share_internal_code() {
        assert_eq!(
            ServiceError::Database("connection refused".into()).code(),
            "INTERNAL_SERVER_ERROR"
        );
        assert_eq!(ServiceError::Jwt("bad key".into()).code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(
            ServiceError::Internal("boom".into()).code(),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn test_extend_attaches_code_extension() {
        let err = ServiceError::PostNotFound.extend();
        let rendered = format!("{:?}", err);
        assert!(rendered.contains("POST_DOES_NOT_EXISTS"));
        assert_eq!(err.message, "Post does not exist");
    }

    #[test]
    fn test_extend_hides_internal_details() {
        let err = ServiceError::Database("password=hunter2 connection refused".into()).extend();
        assert_eq!(err.message, "Internal server error");
        assert!(!format!("{:?}", err).contains("hunter2"));
    }
}
