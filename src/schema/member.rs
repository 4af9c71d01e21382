//! Member schema and resolvers

use async_graphql::{Context, ErrorExtensions, Object, Result as GraphQLResult, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::middleware::auth::require_auth;
use crate::models::Member;
use crate::services::Services;

use super::parse_id;

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct MemberView {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<Member> for MemberView {
    fn from(member: Member) -> Self {
        MemberView {
            id: member.id.to_string(),
            name: member.name,
            created_at: member.created_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject, Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub member_id: String,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Default)]
pub struct MemberQuery;

#[Object]
impl MemberQuery {
    async fn health(&self) -> &str {
        "ok"
    }

    /// Profile of the authenticated caller.
    async fn my_info(&self, ctx: &Context<'_>) -> GraphQLResult<MemberView> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let member_id = require_auth(ctx).map_err(|e| e.extend())?;

        let member = services
            .members
            .find_my_info(member_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(member.into())
    }

    /// Members who liked the given post, most recent like first.
    async fn liked_members(
        &self,
        ctx: &Context<'_>,
        post_id: String,
    ) -> GraphQLResult<Vec<MemberView>> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;
        let post_id = parse_id(&post_id)?;

        let members = services
            .members
            .find_all_liked_members(post_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(members.into_iter().map(MemberView::from).collect())
    }
}

#[derive(Default)]
pub struct MemberMutation;

#[Object]
impl MemberMutation {
    async fn register(
        &self,
        ctx: &Context<'_>,
        name: String,
        password: String,
    ) -> GraphQLResult<bool> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;

        services
            .members
            .register(&name, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(true)
    }

    async fn login(
        &self,
        ctx: &Context<'_>,
        name: String,
        password: String,
    ) -> GraphQLResult<LoginResponse> {
        let services = ctx
            .data::<Services>()
            .map_err(|_| "Services not available")?;

        let issued = services
            .members
            .login(&name, &password)
            .await
            .map_err(|e| e.extend())?;

        Ok(LoginResponse {
            member_id: issued.member_id.to_string(),
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}
