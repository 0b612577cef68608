//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Redirection, ShortUrl, ShortUrlProperties};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for short URL records.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    hash: String,
    target: String,
    mode: i16,
    created_at: DateTime<Utc>,
    ip: Option<String>,
    sponsor: Option<String>,
    safe: bool,
    qr: bool,
    rate_limit: i32,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl {
            hash: row.hash,
            redirection: Redirection {
                target: row.target,
                mode: row.mode as u16,
            },
            created: row.created_at,
            properties: ShortUrlProperties {
                ip: row.ip,
                sponsor: row.sponsor,
                safe: row.safe,
                qr: row.qr,
                limit: row.rate_limit.max(0) as u32,
            },
        }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn save(&self, short_url: ShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (hash, target, mode, created_at, ip, sponsor, safe, qr, rate_limit)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (hash) DO UPDATE SET
                target = EXCLUDED.target,
                mode = EXCLUDED.mode,
                ip = EXCLUDED.ip,
                sponsor = EXCLUDED.sponsor,
                safe = EXCLUDED.safe,
                qr = EXCLUDED.qr
            RETURNING hash, target, mode, created_at, ip, sponsor, safe, qr, rate_limit
            "#,
        )
        .bind(&short_url.hash)
        .bind(&short_url.redirection.target)
        .bind(short_url.redirection.mode as i16)
        .bind(short_url.created)
        .bind(&short_url.properties.ip)
        .bind(&short_url.properties.sponsor)
        .bind(short_url.properties.safe)
        .bind(short_url.properties.qr)
        .bind(short_url.properties.limit.min(i32::MAX as u32) as i32)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_key(&self, hash: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT hash, target, mode, created_at, ip, sponsor, safe, qr, rate_limit
            FROM short_urls
            WHERE hash = $1
            "#,
        )
        .bind(hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn counter(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
