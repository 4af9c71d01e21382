/// HTTP and GraphQL request middleware
pub mod auth;
pub mod jwt;

pub use jwt::JwtMiddleware;
