//! Like schema and resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult};

use crate::services::Services;

use super::parse_id;

#[derive(Default)]
pub struct LikeMutation;

#[Object]
impl LikeMutation {
    /// Record that a member likes a post. Liking twice is a no-op success.
    async fn post_like(
        &self,
        ctx: &Context<'_>,
        post_id: String,
        member_id: String,
    ) -> GraphQLResult<bool> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let post_id = parse_id(&post_id)?;
        let member_id = parse_id(&member_id)?;

        services
            .likes
            .add_like(member_id, post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }
}
