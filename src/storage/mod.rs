//! Storage implementations for different backends

pub mod fixtures;
pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use fixtures::seed_articles;
pub use in_memory::InMemoryArticleService;
#[cfg(feature = "postgres")]
pub use postgres::PostgresArticleService;
