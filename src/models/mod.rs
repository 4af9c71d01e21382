use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member entity - an account that owns posts and likes
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    // Never serialized; the hash stays between the database and argon2.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity - text content owned by exactly one member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub member_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Hashtag entity - shared tag rows, deduplicated by exact name
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hashtag {
    pub id: Uuid,
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
}

/// Like entity - a member liking a post; row existence means "liked"
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub member_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Post with its author and ordered hashtags attached, for read projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: Post,
    pub author: Member,
    pub hashtags: Vec<Hashtag>,
}

/// Access token issued on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub member_id: Uuid,
    pub token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_serialization_omits_password_hash() {
        let member = Member {
            id: Uuid::new_v4(),
            name: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&member).expect("member serializes");

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "alice");
    }
}
