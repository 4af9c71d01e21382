/// Post row operations
use crate::error::Result;
use crate::models::Post;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Insert a new post inside an open transaction
pub async fn create_post(
    tx: &mut Transaction<'_, Postgres>,
    member_id: Uuid,
    content: &str,
) -> Result<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, member_id, content, created_at, updated_at)
        VALUES (uuid_generate_v4(), $1, $2, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(member_id)
    .bind(content)
    .fetch_one(tx.as_mut())
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Find a post by ID scoped to its owner.
///
/// Returns `None` both for unknown ids and for posts owned by someone else,
/// so ownership is never leaked to the caller.
pub async fn find_by_owner_and_id(
    pool: &PgPool,
    member_id: Uuid,
    post_id: Uuid,
) -> Result<Option<Post>> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 AND member_id = $2")
        .bind(post_id)
        .bind(member_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// Check if a post with this ID exists
pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// All posts, newest first
pub async fn find_all(pool: &PgPool) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// All posts owned by a member, newest first
pub async fn find_by_owner(pool: &PgPool, member_id: Uuid) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT *
        FROM posts
        WHERE member_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Posts a member has liked, most recent like first
pub async fn find_liked_by_member(pool: &PgPool, member_id: Uuid) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.member_id, p.content, p.created_at, p.updated_at
        FROM posts p
        JOIN likes l ON l.post_id = p.id
        WHERE l.member_id = $1
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Paginated posts associated with a hashtag, newest first
pub async fn find_by_hashtag(
    pool: &PgPool,
    hashtag_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.member_id, p.content, p.created_at, p.updated_at
        FROM posts p
        JOIN post_hashtags ph ON ph.post_id = p.id
        WHERE ph.hashtag_id = $1
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(hashtag_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Replace a post's content in place
pub async fn update_content(pool: &PgPool, post_id: Uuid, content: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE posts
        SET content = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(content)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a post; hashtag associations and likes cascade at the schema level
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(())
}
