/// Hashtag rows and the post_hashtags association table
use crate::error::Result;
use crate::models::Hashtag;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

/// Find a hashtag by exact tag name
pub async fn find_by_name(pool: &PgPool, tag_name: &str) -> Result<Option<Hashtag>> {
    let hashtag = sqlx::query_as::<_, Hashtag>("SELECT * FROM hashtags WHERE tag_name = $1")
        .bind(tag_name)
        .fetch_optional(pool)
        .await?;

    Ok(hashtag)
}

/// Batch find hashtags by exact tag names
pub async fn find_by_names(pool: &PgPool, tag_names: &[String]) -> Result<Vec<Hashtag>> {
    if tag_names.is_empty() {
        return Ok(Vec::new());
    }

    let hashtags = sqlx::query_as::<_, Hashtag>("SELECT * FROM hashtags WHERE tag_name = ANY($1)")
        .bind(tag_names)
        .fetch_all(pool)
        .await?;

    Ok(hashtags)
}

/// Insert a hashtag, reusing the existing row on a name collision.
///
/// The no-op DO UPDATE makes RETURNING yield the surviving row either way,
/// so concurrent creates of the same tag name converge on one row.
pub async fn upsert_by_name(tx: &mut Transaction<'_, Postgres>, tag_name: &str) -> Result<Hashtag> {
    let hashtag = sqlx::query_as::<_, Hashtag>(
        r#"
        INSERT INTO hashtags (id, tag_name, created_at)
        VALUES (uuid_generate_v4(), $1, NOW())
        ON CONFLICT (tag_name) DO UPDATE
        SET tag_name = EXCLUDED.tag_name
        RETURNING id, tag_name, created_at
        "#,
    )
    .bind(tag_name)
    .fetch_one(tx.as_mut())
    .await?;

    Ok(hashtag)
}

/// Associate a hashtag with a post at the given position
pub async fn link_to_post(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    hashtag_id: Uuid,
    position: i32,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO post_hashtags (post_id, hashtag_id, position)
        VALUES ($1, $2, $3)
        ON CONFLICT (post_id, hashtag_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(hashtag_id)
    .bind(position)
    .execute(tx.as_mut())
    .await?;

    Ok(())
}

/// Hashtags of a post in the order given at creation
pub async fn find_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Hashtag>> {
    let hashtags = sqlx::query_as::<_, Hashtag>(
        r#"
        SELECT h.id, h.tag_name, h.created_at
        FROM hashtags h
        JOIN post_hashtags ph ON ph.hashtag_id = h.id
        WHERE ph.post_id = $1
        ORDER BY ph.position ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(hashtags)
}

#[derive(sqlx::FromRow)]
struct PostHashtagRow {
    post_id: Uuid,
    id: Uuid,
    tag_name: String,
    created_at: DateTime<Utc>,
}

/// Batch load ordered hashtags for many posts.
///
/// Returns a map of post_id -> hashtags; posts without tags are absent.
pub async fn find_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Hashtag>>> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, PostHashtagRow>(
        r#"
        SELECT ph.post_id, h.id, h.tag_name, h.created_at
        FROM hashtags h
        JOIN post_hashtags ph ON ph.hashtag_id = h.id
        WHERE ph.post_id = ANY($1)
        ORDER BY ph.post_id, ph.position ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let mut by_post: HashMap<Uuid, Vec<Hashtag>> = HashMap::new();
    for row in rows {
        by_post.entry(row.post_id).or_default().push(Hashtag {
            id: row.id,
            tag_name: row.tag_name,
            created_at: row.created_at,
        });
    }

    Ok(by_post)
}
