/// Like row operations
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Idempotent like insert; returns true if a new row was inserted.
pub async fn create_like(pool: &PgPool, member_id: Uuid, post_id: Uuid) -> Result<bool> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO likes (id, member_id, post_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (member_id, post_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(member_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

/// Check if a member has liked a post
pub async fn member_liked(pool: &PgPool, member_id: Uuid, post_id: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM likes
            WHERE member_id = $1 AND post_id = $2
        )
        "#,
    )
    .bind(member_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
