//! Background fetch-then-add job.
//!
//! The HTTP layer answers the client first and stores the shortcut afterwards.
//! Nobody awaits the task; a job still running at shutdown is lost.

use std::sync::Arc;

use shortlink_core::{Shortcut, ShortcutIndex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::fetcher::DescriptionFetcher;

/// A shortcut waiting to be stored.
#[derive(Debug, Clone)]
pub struct AddShortcutJob {
    pub shortcut: Shortcut,
    /// Fetch a description from the target page when none was given
    pub fetch_description: bool,
}

/// Spawn the job on the runtime and return immediately.
///
/// The handle is only useful to tests; request handlers drop it.
pub fn spawn_add_shortcut(
    index: ShortcutIndex,
    fetcher: Arc<DescriptionFetcher>,
    job: AddShortcutJob,
) -> JoinHandle<()> {
    tokio::spawn(run_add_shortcut(index, fetcher, job))
}

async fn run_add_shortcut(
    index: ShortcutIndex,
    fetcher: Arc<DescriptionFetcher>,
    job: AddShortcutJob,
) {
    let mut shortcut = job.shortcut;
    if shortcut.description.is_empty() && job.fetch_description {
        shortcut.description = fetcher.fetch_description(&shortcut.url).await;
    }

    info!(
        short_form = %shortcut.short_form,
        url = %shortcut.url,
        description = %shortcut.description,
        "Setting shortcut"
    );

    let short_form = shortcut.short_form.clone();
    // Commit does disk I/O
    match tokio::task::spawn_blocking(move || index.add_shortcut(shortcut)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => warn!(short_form = %short_form, error = %e, "Failed to store shortcut"),
        Err(e) => warn!(short_form = %short_form, error = %e, "Store task panicked"),
    }
}
