//! Click event model for asynchronous click tracking.

/// An in-memory representation of a redirect for async persistence.
///
/// Sent by the redirect handler through a bounded queue so the response does
/// not wait for the click to be stored. When the queue is full the event is
/// dropped; the redirect itself is never delayed.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub hash: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = ClickEvent::new(
    ///     "abc123".to_string(),
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(
        hash: String,
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
    ) -> Self {
        Self {
            hash,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}
