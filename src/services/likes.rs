/// Idempotent post likes
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{Result, ServiceError};

#[derive(Clone)]
pub struct PostLikeService {
    db: PgPool,
}

impl PostLikeService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record that a member likes a post.
    ///
    /// Liking the same post twice is a no-op success; there is no unlike.
    pub async fn add_like(&self, member_id: Uuid, post_id: Uuid) -> Result<()> {
        if !db::posts::post_exists(&self.db, post_id).await? {
            return Err(ServiceError::PostNotFound);
        }
        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let created = db::likes::create_like(&self.db, member_id, post_id).await?;
        if created {
            tracing::info!(member_id = %member_id, post_id = %post_id, "post liked");
        } else {
            tracing::debug!(member_id = %member_id, post_id = %post_id, "duplicate like ignored");
        }

        Ok(())
    }
}
