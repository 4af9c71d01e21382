/// Post authoring, feeds and hashtag search
use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::{Result, ServiceError};
use crate::models::{Member, Post, PostDetail};

/// Upper bound on post content, counted in Unicode characters.
pub const MAX_CONTENT_CHARS: usize = 100;

#[derive(Clone)]
pub struct PostService {
    db: PgPool,
}

impl PostService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a post and associate its hashtags.
    ///
    /// ## Workflow
    ///
    /// 1. Validate content (non-blank, at most 100 characters)
    /// 2. Verify the author exists
    /// 3. Resolve hashtags by exact name, creating the missing ones
    /// 4. Insert the post and its associations in one transaction
    pub async fn create_post(&self, member_id: Uuid, content: &str, tags: &[String]) -> Result<()> {
        validate_content(content)?;

        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let tag_names = unique_tag_names(tags);
        let mut existing: HashMap<String, _> = db::hashtags::find_by_names(&self.db, &tag_names)
            .await?
            .into_iter()
            .map(|hashtag| (hashtag.tag_name.clone(), hashtag))
            .collect();

        let mut tx = self.db.begin().await?;

        let post = db::posts::create_post(&mut tx, member_id, content).await?;

        for (position, name) in tag_names.iter().enumerate() {
            let hashtag = match existing.remove(name) {
                Some(hashtag) => hashtag,
                // Missed the pre-fetch: either brand new or created by a
                // concurrent request since; the upsert covers both.
                None => db::hashtags::upsert_by_name(&mut tx, name).await?,
            };
            db::hashtags::link_to_post(&mut tx, post.id, hashtag.id, position as i32).await?;
        }

        tx.commit().await?;

        tracing::info!(post_id = %post.id, member_id = %member_id, "post created");
        Ok(())
    }

    /// Single post with its author and ordered hashtags.
    pub async fn get_post(&self, post_id: Uuid) -> Result<PostDetail> {
        let post = db::posts::find_by_id(&self.db, post_id)
            .await?
            .ok_or(ServiceError::PostNotFound)?;

        self.hydrate(post).await
    }

    /// Every post, newest first.
    pub async fn get_all(&self) -> Result<Vec<PostDetail>> {
        let posts = db::posts::find_all(&self.db).await?;
        self.hydrate_all(posts).await
    }

    /// Posts owned by the member, newest first.
    pub async fn get_my_posts(&self, member_id: Uuid) -> Result<Vec<PostDetail>> {
        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let posts = db::posts::find_by_owner(&self.db, member_id).await?;
        self.hydrate_all(posts).await
    }

    /// Posts the member has liked, most recently liked first.
    pub async fn get_all_liked_by_member(&self, member_id: Uuid) -> Result<Vec<PostDetail>> {
        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let posts = db::posts::find_liked_by_member(&self.db, member_id).await?;
        self.hydrate_all(posts).await
    }

    /// Replace the content of a post the member owns.
    ///
    /// A post owned by someone else is reported as absent rather than
    /// forbidden, so post ownership is never leaked.
    pub async fn update_post(&self, member_id: Uuid, post_id: Uuid, content: &str) -> Result<()> {
        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let post = db::posts::find_by_owner_and_id(&self.db, member_id, post_id)
            .await?
            .ok_or(ServiceError::PostNotFound)?;

        validate_content(content)?;

        db::posts::update_content(&self.db, post.id, content).await?;

        tracing::info!(post_id = %post.id, member_id = %member_id, "post updated");
        Ok(())
    }

    /// Delete a post the member owns.
    ///
    /// Hashtag associations and likes go with the post; hashtag rows stay
    /// for reuse by other posts.
    pub async fn delete_post(&self, member_id: Uuid, post_id: Uuid) -> Result<()> {
        if !db::members::member_exists(&self.db, member_id).await? {
            return Err(ServiceError::MemberNotFound);
        }

        let post = db::posts::find_by_owner_and_id(&self.db, member_id, post_id)
            .await?
            .ok_or(ServiceError::PostNotFound)?;

        db::posts::delete_post(&self.db, post.id).await?;

        tracing::info!(post_id = %post.id, member_id = %member_id, "post deleted");
        Ok(())
    }

    /// Page through the posts carrying a hashtag, newest first.
    ///
    /// Pages are 0-based; a non-positive size yields an empty page.
    pub async fn find_all_by_hashtag(
        &self,
        tag_name: &str,
        page: i32,
        size: i32,
    ) -> Result<Vec<PostDetail>> {
        let hashtag = db::hashtags::find_by_name(&self.db, tag_name)
            .await?
            .ok_or(ServiceError::HashtagNotFound)?;

        let limit = i64::from(size.max(0));
        let offset = i64::from(page.max(0)) * limit;

        let posts = db::posts::find_by_hashtag(&self.db, hashtag.id, limit, offset).await?;
        self.hydrate_all(posts).await
    }

    async fn hydrate(&self, post: Post) -> Result<PostDetail> {
        let author = db::members::find_by_id(&self.db, post.member_id)
            .await?
            .ok_or_else(|| ServiceError::Internal(format!("post {} has no author row", post.id)))?;
        let hashtags = db::hashtags::find_for_post(&self.db, post.id).await?;

        Ok(PostDetail {
            post,
            author,
            hashtags,
        })
    }

    async fn hydrate_all(&self, posts: Vec<Post>) -> Result<Vec<PostDetail>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|post| post.id).collect();
        let member_ids: Vec<Uuid> = posts.iter().map(|post| post.member_id).collect();

        let authors: HashMap<Uuid, Member> = db::members::find_by_ids(&self.db, &member_ids)
            .await?
            .into_iter()
            .map(|member| (member.id, member))
            .collect();
        let mut hashtags = db::hashtags::find_for_posts(&self.db, &post_ids).await?;

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.member_id).cloned().ok_or_else(|| {
                    ServiceError::Internal(format!("post {} has no author row", post.id))
                })?;
                let tags = hashtags.remove(&post.id).unwrap_or_default();
                Ok(PostDetail {
                    post,
                    author,
                    hashtags: tags,
                })
            })
            .collect()
    }
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(ServiceError::ContentRequired);
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ServiceError::ContentTooLong);
    }
    Ok(())
}

// Hashtag names are matched exactly; duplicates collapse to the first
// occurrence so association positions follow the input order.
fn unique_tag_names(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_is_rejected() {
        assert!(matches!(
            validate_content(""),
            Err(ServiceError::ContentRequired)
        ));
    }

    #[test]
    fn test_whitespace_only_content_is_rejected() {
        assert!(matches!(
            validate_content("  \n\t "),
            Err(ServiceError::ContentRequired)
        ));
    }

    #[test]
    fn test_single_character_content_is_accepted() {
        assert!(validate_content("x").is_ok());
    }

    #[test]
    fn test_content_at_limit_is_accepted() {
        let content = "a".repeat(MAX_CONTENT_CHARS);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn test_content_over_limit_is_rejected() {
        let content = "a".repeat(MAX_CONTENT_CHARS + 1);
        assert!(matches!(
            validate_content(&content),
            Err(ServiceError::ContentTooLong)
        ));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let content = "é".repeat(MAX_CONTENT_CHARS);
        assert!(content.len() > MAX_CONTENT_CHARS);
        assert!(validate_content(&content).is_ok());
    }

    #[test]
    fn test_duplicate_tags_collapse_to_first_occurrence() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(unique_tag_names(&tags), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_unique_tags_keep_input_order() {
        let tags = vec!["travel".to_string(), "food".to_string()];
        assert_eq!(unique_tag_names(&tags), tags);
    }
}
