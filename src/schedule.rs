use core::pin::pin;

use crate::{
    cleaner::{Cleaner, RunSummary},
    notify::Notify,
    proxy::Transport,
};

/// One announced pass; a failed pass is reported, never propagated.
pub async fn pass<T: Transport, N: Notify>(cleaner: &Cleaner<T, N>) -> Option<RunSummary> {
    cleaner.report("Starting HnR torrent cleanup...").await;
    match cleaner.run().await {
        Ok(summary) => Some(summary),
        Err(e) => {
            cleaner.report_error("Cleanup failed", &e).await;
            None
        }
    }
}

/// Runs a pass every `interval` until `shutdown` resolves. Shutdown is only
/// observed between passes. Returns how many passes ran.
pub async fn run<T, N>(cleaner: &Cleaner<T, N>, shutdown: impl Future<Output = ()>) -> usize
where
    T: Transport,
    N: Notify,
{
    let interval = cleaner.config().interval;
    let waiting = format!(
        "HnR torrent cleanup completed. Waiting {}...",
        cleaner.config().interval_text()
    );
    let mut shutdown = pin!(shutdown);
    let mut passes = 0;

    loop {
        if let Some(summary) = pass(cleaner).await {
            tracing::debug!(target: "schedule", "pass #{passes}: {summary:?}");
        }
        passes += 1;
        cleaner.report(&waiting).await;

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = &mut shutdown => {
                tracing::info!(target: "schedule", "shutting down after {passes} passes");
                break passes;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;
    use crate::{
        cleaner::tests::{FakeProxy, Recorder, config, list_url, snatchlist},
        proxy::Envelope,
    };

    #[tokio::test(start_paused = true)]
    async fn passes_until_shutdown() {
        let proxy = FakeProxy::default().page(&list_url(), Envelope::ok(snatchlist(&[])));
        let notes = Recorder::default();
        let cleaner = Cleaner::new(config(), &proxy, &notes);

        let interval = cleaner.config().interval;
        let shutdown = tokio::time::sleep(interval * 2 + Duration::from_secs(1));
        let passes = run(&cleaner, shutdown).await;

        assert_eq!(passes, 3);
        assert_eq!(proxy.calls.borrow().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn announces_each_pass() {
        let proxy = FakeProxy::default().page(&list_url(), Envelope::ok(snatchlist(&[])));
        let notes = Recorder::default();
        let cleaner = Cleaner::new(config(), &proxy, &notes);

        assert_eq!(run(&cleaner, async {}).await, 1);
        assert_eq!(
            *notes.0.borrow(),
            [
                "Starting HnR torrent cleanup...",
                "No HnR torrents found.",
                "HnR torrent cleanup completed. Waiting 8 hours...",
            ]
        );
    }

    #[tokio::test]
    async fn failed_pass_is_reported() {
        let proxy = FakeProxy::default();
        let notes = Recorder::default();
        let cleaner = Cleaner::new(config(), &proxy, &notes);

        assert_eq!(pass(&cleaner).await, None);
        let notes = notes.0.borrow();
        assert_eq!(notes.len(), 3);
        assert!(notes[1].starts_with("Error fetching snatchlist: "));
        assert!(notes[2].starts_with("Cleanup failed: proxy returned 404"));
    }
}
