/// Member row operations
use crate::error::Result;
use crate::models::Member;
use sqlx::PgPool;
use uuid::Uuid;

/// Find member by ID
pub async fn find_by_id(pool: &PgPool, member_id: Uuid) -> Result<Option<Member>> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
        .bind(member_id)
        .fetch_optional(pool)
        .await?;

    Ok(member)
}

/// Find member by unique name
pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Member>> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(member)
}

/// Batch find members by IDs
pub async fn find_by_ids(pool: &PgPool, member_ids: &[Uuid]) -> Result<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ANY($1)")
        .bind(member_ids)
        .fetch_all(pool)
        .await?;

    Ok(members)
}

/// Check if a member with this ID exists
pub async fn member_exists(pool: &PgPool, member_id: Uuid) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
            .bind(member_id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Check if a member name is already taken
pub async fn name_exists(pool: &PgPool, name: &str) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM members WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

/// Create a new member
pub async fn create_member(pool: &PgPool, name: &str, password_hash: &str) -> Result<Member> {
    let member = sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (id, name, password_hash, created_at)
        VALUES (uuid_generate_v4(), $1, $2, NOW())
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

/// Members who liked the given post, most recent like first
pub async fn find_likers_of_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>(
        r#"
        SELECT m.id, m.name, m.password_hash, m.created_at
        FROM members m
        JOIN likes l ON l.member_id = m.id
        WHERE l.post_id = $1
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}
