use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::queue::JobReceiver;
use crate::domain::repositories::ClickRepository;

/// Persists click events sent by the redirect path.
///
/// Storage errors are logged and the event is dropped; redirects never wait
/// on click persistence.
pub async fn run_click_worker(mut rx: JobReceiver<ClickEvent>, clicks: Arc<dyn ClickRepository>) {
    info!("Click worker started");
    while let Some(ev) = rx.dequeue().await {
        let hash = ev.hash.clone();
        match clicks.save(NewClick::from(ev)).await {
            Ok(click) => debug!("Recorded click {} for {}", click.id, hash),
            Err(e) => error!("Failed to record click for {}: {}", hash, e),
        }
    }
    info!("Click worker stopped: queue closed");
}
