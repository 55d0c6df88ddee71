// Service exports
pub mod auth;
pub mod cache;
pub mod postgres;

pub use auth::{hash_password, verify_password, AuthError, Claims, TokenKind, TokenService};
pub use cache::{CacheError, RankingCache, RankingGeneration, RankingScope};
pub use postgres::{PostgresClient, PostgresError};
