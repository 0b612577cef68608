//! In-memory repositories used when no database is configured.
//!
//! State lives for the lifetime of the process only.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Click, NewClick, ShortUrl};
use crate::domain::repositories::{ClickRepository, ShortUrlRepository};
use crate::error::AppError;

/// Short URLs keyed by hash in a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryShortUrlRepository {
    urls: DashMap<String, ShortUrl>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn save(&self, mut short_url: ShortUrl) -> Result<ShortUrl, AppError> {
        match self.urls.entry(short_url.hash.clone()) {
            Entry::Occupied(mut entry) => {
                let stored = entry.get();
                short_url.created = stored.created;
                short_url.properties.limit = stored.properties.limit;
                entry.insert(short_url.clone());
            }
            Entry::Vacant(entry) => {
                entry.insert(short_url.clone());
            }
        }
        Ok(short_url)
    }

    async fn find_by_key(&self, hash: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.urls.get(hash).map(|u| u.value().clone()))
    }

    async fn counter(&self) -> Result<i64, AppError> {
        Ok(self.urls.len() as i64)
    }
}

/// Append-only click log.
#[derive(Debug, Default)]
pub struct InMemoryClickRepository {
    clicks: DashMap<i64, Click>,
    next_id: AtomicI64,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicks recorded for `hash`.
    pub fn count_for(&self, hash: &str) -> usize {
        self.clicks.iter().filter(|c| c.hash == hash).count()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn save(&self, new_click: NewClick) -> Result<Click, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let click = Click::new(
            id,
            new_click.hash,
            Utc::now(),
            new_click.user_agent,
            new_click.referer,
            new_click.ip,
        );
        self.clicks.insert(id, click.clone());
        Ok(click)
    }

    async fn counter(&self) -> Result<i64, AppError> {
        Ok(self.clicks.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrlProperties;

    #[tokio::test]
    async fn test_short_url_save_and_find() {
        let repo = InMemoryShortUrlRepository::new();
        let short_url = ShortUrl::new(
            "abc123".to_string(),
            "https://example.com/".to_string(),
            ShortUrlProperties::default(),
        );

        repo.save(short_url).await.unwrap();

        let found = repo.find_by_key("abc123").await.unwrap().unwrap();
        assert_eq!(found.target(), "https://example.com/");
        assert!(repo.find_by_key("missing").await.unwrap().is_none());
        assert_eq!(repo.counter().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_short_url_save_replaces() {
        let repo = InMemoryShortUrlRepository::new();
        for target in ["https://a.example/", "https://b.example/"] {
            repo.save(ShortUrl::new(
                "same".to_string(),
                target.to_string(),
                ShortUrlProperties::default(),
            ))
            .await
            .unwrap();
        }

        assert_eq!(repo.counter().await.unwrap(), 1);
        assert_eq!(
            repo.find_by_key("same").await.unwrap().unwrap().target(),
            "https://b.example/"
        );
    }

    #[tokio::test]
    async fn test_short_url_update_keeps_created_and_limit() {
        let repo = InMemoryShortUrlRepository::new();
        let mut first = ShortUrl::new(
            "same".to_string(),
            "https://example.com/".to_string(),
            ShortUrlProperties {
                limit: 2,
                ..Default::default()
            },
        );
        first.created = first.created - chrono::Duration::hours(1);
        let first = repo.save(first).await.unwrap();

        let second = repo
            .save(ShortUrl::new(
                "same".to_string(),
                "https://example.com/".to_string(),
                ShortUrlProperties {
                    sponsor: Some("acme".to_string()),
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(second.created, first.created);
        assert_eq!(second.properties.limit, 2);
        assert_eq!(second.properties.sponsor.as_deref(), Some("acme"));

        let stored = repo.find_by_key("same").await.unwrap().unwrap();
        assert_eq!(stored.created, first.created);
        assert_eq!(stored.properties.limit, 2);
    }

    #[tokio::test]
    async fn test_click_ids_and_counter() {
        let repo = InMemoryClickRepository::new();
        let new_click = NewClick {
            hash: "abc123".to_string(),
            user_agent: None,
            referer: None,
            ip: Some("127.0.0.1".to_string()),
        };

        let first = repo.save(new_click.clone()).await.unwrap();
        let second = repo.save(new_click).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.counter().await.unwrap(), 2);
        assert_eq!(repo.count_for("abc123"), 2);
        assert_eq!(repo.count_for("other"), 0);
    }
}
