//! Reachability verdicts recorded by the probe worker.

use chrono::{DateTime, Utc};

/// Last completed probe cycle for a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityRecord {
    pub uri: String,
    pub reachable: bool,
    pub checked_at: DateTime<Utc>,
}

impl ReachabilityRecord {
    /// Creates a record stamped with the current time.
    pub fn new(uri: impl Into<String>, reachable: bool) -> Self {
        Self {
            uri: uri.into(),
            reachable,
            checked_at: Utc::now(),
        }
    }
}

/// What readers know about a URI.
///
/// `Unknown` (never probed, or first probe still running) is deliberately a
/// separate state from `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Unknown,
    Reachable,
    Unreachable,
}

impl Reachability {
    /// `Some(true | false)` for a known verdict, `None` when unknown.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Reachability::Unknown => None,
            Reachability::Reachable => Some(true),
            Reachability::Unreachable => Some(false),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Reachability::Unknown => "unknown",
            Reachability::Reachable => "reachable",
            Reachability::Unreachable => "unreachable",
        }
    }
}

impl From<Option<&ReachabilityRecord>> for Reachability {
    fn from(record: Option<&ReachabilityRecord>) -> Self {
        match record {
            None => Reachability::Unknown,
            Some(r) if r.reachable => Reachability::Reachable,
            Some(_) => Reachability::Unreachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_record_is_unknown() {
        assert_eq!(Reachability::from(None), Reachability::Unknown);
        assert_eq!(Reachability::Unknown.as_bool(), None);
    }

    #[test]
    fn test_record_verdicts() {
        let up = ReachabilityRecord::new("http://example.com/", true);
        let down = ReachabilityRecord::new("http://example.com/", false);

        assert_eq!(Reachability::from(Some(&up)), Reachability::Reachable);
        assert_eq!(Reachability::from(Some(&down)), Reachability::Unreachable);
        assert_eq!(Reachability::Unreachable.as_bool(), Some(false));
    }
}
