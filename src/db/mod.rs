/// Database query layer: free functions over `PgPool` / transactions
pub mod hashtags;
pub mod likes;
pub mod members;
pub mod posts;
