use crate::{
    config::Config,
    error::{Error, Result},
    extract::{self, FormFields},
    notify::Notify,
    proxy::{Transport, fetch_page},
};

/// Outcome of one pass over the snatch list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub deleted: usize,
}

impl RunSummary {
    pub const fn failed(&self) -> usize {
        self.candidates - self.deleted
    }
}

pub struct Cleaner<T, N> {
    config: Config,
    transport: T,
    notifier: N,
}

impl<T: Transport, N: Notify> Cleaner<T, N> {
    pub const fn new(config: Config, transport: T, notifier: N) -> Self {
        Self {
            config,
            transport,
            notifier,
        }
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Logs `message` locally and pushes it to the notifier.
    pub async fn report(&self, message: &str) {
        tracing::info!(target: "cleaner", "{message}");
        self.notifier.notify(message).await;
    }

    /// Logs and pushes `"{message}: {e}"`.
    pub async fn report_error(&self, message: &str, e: &Error) {
        let message = format!("{message}: {e}");
        if e.is_remote() {
            tracing::warn!(target: "cleaner", "\x1b[33m{message}\x1b[0m");
        } else {
            tracing::error!(target: "cleaner", "\x1b[31m{message}\x1b[0m");
        }
        self.notifier.notify(&message).await;
    }

    /// Detail-page URLs of every flagged torrent on the snatch list.
    pub async fn find_candidates(&self) -> Result<Vec<String>> {
        let page = fetch_page(&self.transport, &self.config.snatchlist_url()).await?;
        Ok(extract::candidates(&page, &self.config.base_url))
    }

    pub async fn find_delete_link(&self, candidate: &str) -> Result<String> {
        let page = fetch_page(&self.transport, candidate).await?;
        extract::delete_link(&page, &self.config.base_url)
    }

    pub async fn find_form(&self, delete_link: &str) -> Result<FormFields> {
        let page = fetch_page(&self.transport, delete_link).await?;
        extract::form_fields(&page)
    }

    /// Posts the hidden fields to the delete endpoint, JSON-encoded.
    pub async fn submit(&self, fields: &FormFields) -> Result<()> {
        let body = serde_json::to_string(fields).map_err(Error::Encode)?;
        self.transport
            .post_json(&self.config.delete_endpoint(), body)
            .await?
            .into_content()
            .map(drop)
    }

    /// Runs one candidate through the whole chain. `false` if any step failed;
    /// the failure has already been reported.
    async fn clean_one(&self, candidate: &str) -> bool {
        let link = match self.find_delete_link(candidate).await {
            Ok(l) => l,
            Err(e) if e.is_remote() => {
                self.report_error(&format!("Error fetching page {candidate}"), &e).await;
                return false;
            }
            Err(e) => {
                self.report_error(&format!("Error extracting delete link from {candidate}"), &e)
                    .await;
                return false;
            }
        };

        let fields = match self.find_form(&link).await {
            Ok(f) => f,
            Err(e) if e.is_remote() => {
                self.report_error(&format!("Error fetching delete page {link}"), &e).await;
                return false;
            }
            Err(e) => {
                self.report_error(&format!("Error extracting form details from {link}"), &e)
                    .await;
                return false;
            }
        };

        if let Err(e) = self.submit(&fields).await {
            self.report_error(&format!("Error sending delete request for {link}"), &e).await;
            return false;
        }

        tracing::info!(target: "cleaner", "\x1b[36mdeleted\x1b[0m {candidate}");
        true
    }

    /// One full pass. Only a failure to read the snatch list itself is returned.
    pub async fn run(&self) -> Result<RunSummary> {
        let candidates = match self.find_candidates().await {
            Ok(c) => c,
            Err(e) => {
                self.report_error("Error fetching snatchlist", &e).await;
                return Err(e);
            }
        };

        if candidates.is_empty() {
            self.report("No HnR torrents found.").await;
            return Ok(RunSummary::default());
        }

        tracing::info!(target: "cleaner", "found {} HnR torrents", candidates.len());

        let mut summary = RunSummary {
            candidates: candidates.len(),
            deleted: 0,
        };
        for candidate in &candidates {
            if self.clean_one(candidate).await {
                summary.deleted += 1;
            }
        }

        self.report(&format!(
            "HnR cleanup completed. Deleted {} warnings.",
            summary.deleted
        ))
        .await;

        Ok(summary)
    }
}
