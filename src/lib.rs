/// gram-service Library
///
/// A small Instagram-style social backend: members, posts, hashtags and
/// likes behind a GraphQL API backed by PostgreSQL.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: Database queries (members, posts, hashtags, likes)
/// - `error`: Error types with stable machine-readable codes
/// - `middleware`: JWT extraction middleware and GraphQL auth guard
/// - `models`: Data models
/// - `schema`: GraphQL schema and resolvers
/// - `security`: JWT issuing/validation and password hashing
/// - `services`: Business logic
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod security;
pub mod services;

// Re-export commonly used types
pub use error::{Result, ServiceError};
