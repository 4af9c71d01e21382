//! Authorization helpers for GraphQL resolvers
//!
//! The JWT middleware never rejects a request; it only attaches an
//! [`AuthenticatedMember`] when the bearer token checks out. Resolvers that
//! need a caller identity go through [`require_auth`], which turns an absent
//! identity into the stable `UNAUTHORIZED` error.

use async_graphql::Context;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::security::jwt::AuthenticatedMember;

/// Verify the caller is authenticated and return the member id.
pub fn require_auth(ctx: &Context<'_>) -> Result<Uuid, ServiceError> {
    ctx.data::<AuthenticatedMember>()
        .ok()
        .map(|identity| identity.member_id)
        .ok_or(ServiceError::Unauthorized)
}
