//! Post schema and resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::require_auth;
use crate::models::PostDetail;
use crate::services::Services;

use super::member::MemberView;
use super::parse_id;

const DEFAULT_PAGE_SIZE: i32 = 20;

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub content: String,
    pub created_by: MemberView,
    pub hashtags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostDetail> for PostView {
    fn from(detail: PostDetail) -> Self {
        PostView {
            id: detail.post.id.to_string(),
            content: detail.post.content,
            created_by: detail.author.into(),
            hashtags: detail
                .hashtags
                .into_iter()
                .map(|hashtag| hashtag.tag_name)
                .collect(),
            created_at: detail.post.created_at.to_rfc3339(),
            updated_at: detail.post.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn post(&self, ctx: &Context<'_>, post_id: String) -> GraphQLResult<PostView> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let post_id = parse_id(&post_id)?;

        let detail = services.posts.get_post(post_id).await.map_err(|e| e.extend())?;

        Ok(detail.into())
    }

    /// Every post, newest first.
    async fn posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<PostView>> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;

        let details = services.posts.get_all().await.map_err(|e| e.extend())?;

        Ok(details.into_iter().map(PostView::from).collect())
    }

    /// Posts owned by the authenticated caller.
    async fn my_posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<PostView>> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;

        let details = services
            .posts
            .get_my_posts(member_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(details.into_iter().map(PostView::from).collect())
    }

    /// Posts the authenticated caller has liked.
    async fn my_liked_posts(&self, ctx: &Context<'_>) -> GraphQLResult<Vec<PostView>> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;

        let details = services
            .posts
            .get_all_liked_by_member(member_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(details.into_iter().map(PostView::from).collect())
    }

    /// Page through the posts carrying a hashtag (0-based pages).
    async fn posts_by_hashtag(
        &self,
        ctx: &Context<'_>,
        tag_name: String,
        page: Option<i32>,
        size: Option<i32>,
    ) -> GraphQLResult<Vec<PostView>> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;

        let details = services
            .posts
            .find_all_by_hashtag(
                &tag_name,
                page.unwrap_or(0),
                size.unwrap_or(DEFAULT_PAGE_SIZE),
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(details.into_iter().map(PostView::from).collect())
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(
        &self,
        ctx: &Context<'_>,
        content: String,
        hashtags: Option<Vec<String>>,
    ) -> GraphQLResult<bool> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;

        services
            .posts
            .create_post(member_id, &content, &hashtags.unwrap_or_default())
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        content: String,
    ) -> GraphQLResult<bool> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;
        let post_id = parse_id(&post_id)?;

        services
            .posts
            .update_post(member_id, post_id, &content)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }

    async fn delete_post(&self, ctx: &Context<'_>, post_id: String) -> GraphQLResult<bool> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;
        let post_id = parse_id(&post_id)?;

        services
            .posts
            .delete_post(member_id, post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }
}
