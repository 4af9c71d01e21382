/// Member registration, login and profile lookups
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{Result, ServiceError};
use crate::models::{IssuedToken, Member};
use crate::security::jwt::TokenService;
use crate::security::password;

#[derive(Clone)]
pub struct MemberService {
    db: PgPool,
    tokens: TokenService,
}

impl MemberService {
    pub fn new(db: PgPool, tokens: TokenService) -> Self {
        Self { db, tokens }
    }

    /// Register a new member under a unique name.
    ///
    /// The password is stored as an Argon2 hash; the plaintext never leaves
    /// this function.
    pub async fn register(&self, name: &str, password: &str) -> Result<Member> {
        if db::members::name_exists(&self.db, name).await? {
            return Err(ServiceError::DuplicateMemberName);
        }

        let password_hash = password::hash_password(password)?;
        let member = db::members::create_member(&self.db, name, &password_hash).await?;

        tracing::info!(member_id = %member.id, name = %member.name, "member registered");
        Ok(member)
    }

    /// Exchange a member name and password for a bearer token.
    ///
    /// Unknown names and wrong passwords fail with distinct errors; the
    /// original service reported them separately and clients rely on the
    /// codes.
    pub async fn login(&self, name: &str, password: &str) -> Result<IssuedToken> {
        let member = db::members::find_by_name(&self.db, name)
            .await?
            .ok_or(ServiceError::MemberNotFound)?;

        if !password::verify_password(password, &member.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(member.id)?;

        tracing::info!(member_id = %member.id, "member logged in");
        Ok(IssuedToken {
            member_id: member.id,
            token,
            expires_in: self.tokens.expiry_seconds(),
        })
    }

    /// Profile of the calling member.
    pub async fn find_my_info(&self, member_id: Uuid) -> Result<Member> {
        db::members::find_by_id(&self.db, member_id)
            .await?
            .ok_or(ServiceError::MemberNotFound)
    }

    /// Members who liked the given post, most recent like first.
    pub async fn find_all_liked_members(&self, post_id: Uuid) -> Result<Vec<Member>> {
        if !db::posts::post_exists(&self.db, post_id).await? {
            return Err(ServiceError::PostNotFound);
        }

        db::members::find_likers_of_post(&self.db, post_id).await
    }
}
