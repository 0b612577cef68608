//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] / [`PgClickRepository`] - PostgreSQL via SQLx
//! - [`InMemoryShortUrlRepository`] / [`InMemoryClickRepository`] - process-local
//!   storage used when `DATABASE_URL` is not set

pub mod memory;
pub mod pg_click_repository;
pub mod pg_short_url_repository;

pub use memory::{InMemoryClickRepository, InMemoryShortUrlRepository};
pub use pg_click_repository::PgClickRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
