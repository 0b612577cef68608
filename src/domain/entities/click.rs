//! Click entity representing a single redirect event.

use crate::domain::click_event::ClickEvent;
use chrono::{DateTime, Utc};

/// A click recorded when a short URL is followed.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub hash: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(
        id: i64,
        hash: String,
        clicked_at: DateTime<Utc>,
        user_agent: Option<String>,
        referer: Option<String>,
        ip: Option<String>,
    ) -> Self {
        Self {
            id,
            hash,
            clicked_at,
            user_agent,
            referer,
            ip,
        }
    }
}

/// Input data for recording a new click.
///
/// The timestamp and identifier are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub hash: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub ip: Option<String>,
}

impl From<ClickEvent> for NewClick {
    fn from(ev: ClickEvent) -> Self {
        Self {
            hash: ev.hash,
            user_agent: ev.user_agent,
            referer: ev.referer,
            ip: ev.ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_creation() {
        let now = Utc::now();
        let click = Click::new(
            1,
            "abc123".to_string(),
            now,
            Some("Mozilla/5.0".to_string()),
            None,
            Some("10.0.0.1".to_string()),
        );

        assert_eq!(click.id, 1);
        assert_eq!(click.hash, "abc123");
        assert_eq!(click.clicked_at, now);
        assert!(click.referer.is_none());
    }
}
