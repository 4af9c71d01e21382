/// Service layer for gram-service
///
/// Business rules live here so the GraphQL resolvers stay thin:
/// - Member service (registration, login, profiles, likers of a post)
/// - Post service (authoring, feeds, hashtag search, ownership checks)
/// - Post like service (idempotent likes)
pub mod likes;
pub mod member;
pub mod post;

pub use likes::PostLikeService;
pub use member::MemberService;
pub use post::PostService;

use sqlx::PgPool;

use crate::security::jwt::TokenService;

/// Everything the GraphQL resolvers need, injected as schema data.
#[derive(Clone)]
pub struct Services {
    pub members: MemberService,
    pub posts: PostService,
    pub likes: PostLikeService,
}

impl Services {
    pub fn new(db: PgPool, tokens: TokenService) -> Self {
        Self {
            members: MemberService::new(db.clone(), tokens),
            posts: PostService::new(db.clone()),
            likes: PostLikeService::new(db),
        }
    }
}
