//! Polling loop for the issue watcher.

use reqwest::Client;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::WatcherConfig;
use crate::watcher::cache::IssueCache;
use crate::watcher::inspector::inspect;
use crate::watcher::labeler::IssueLabeler;
use crate::watcher::types::{IssueChange, WatchResult};

/// Periodically pulls a puller endpoint and logs issue changes.
pub struct IssueWatcher {
    client: Client,
    source_url: String,
    period: Duration,
    cache: IssueCache,
    labeler: Option<IssueLabeler>,
}

impl IssueWatcher {
    /// Create a watcher from `config`.
    ///
    /// `token` is only used when `config.label_issues` is set.
    pub fn new(config: &WatcherConfig, token: &str) -> WatchResult<Self> {
        let mut builder = Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        let labeler = config
            .label_issues
            .then(|| IssueLabeler::new(client.clone(), token));

        Ok(Self {
            client,
            source_url: config.source_url.clone(),
            period: Duration::from_millis(config.period_ms.max(1)),
            cache: IssueCache::new(),
            labeler,
        })
    }

    /// Issues tracked so far.
    pub fn cache(&self) -> &IssueCache {
        &self.cache
    }

    /// Poll once and return the changes since the previous poll.
    pub async fn poll_once(&mut self) -> WatchResult<Vec<IssueChange>> {
        let response = self.client.get(&self.source_url).send().await?;
        let payload = response.bytes().await?;
        self.cache.observe(&payload)
    }

    /// Label every change whose body asks for it. Returns the number of
    /// labels GitHub accepted. A no-op unless labeling is enabled.
    pub async fn label_changes(&self, changes: &[IssueChange]) -> usize {
        let Some(labeler) = &self.labeler else {
            return 0;
        };

        let mut added = 0;
        for request in changes.iter().filter_map(|c| inspect(c.issue())) {
            match labeler.add_label(&request).await {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(e) => tracing::error!(
                    number = request.number,
                    label = %request.label,
                    error = %e,
                    "Error adding label"
                ),
            }
        }
        added
    }

    async fn cycle(&mut self) -> WatchResult<()> {
        let changes = self.poll_once().await?;
        for change in &changes {
            log_change(change);
        }
        self.label_changes(&changes).await;
        Ok(())
    }

    /// Run the polling loop until `shutdown` fires, abandoning a poll that
    /// is still in flight.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            source = %self.source_url,
            period_ms = self.period.as_millis() as u64,
            labeling = self.labeler.is_some(),
            "Starting issue watcher"
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                _ = shutdown.recv() => break,
                outcome = self.cycle() => outcome,
            };

            if let Err(e) = outcome {
                tracing::error!(source = %self.source_url, error = %e, "Error polling issues");
            }
        }

        tracing::info!(tracked = self.cache.len(), "Issue watcher stopped");
    }
}

fn log_change(change: &IssueChange) {
    let issue = change.issue();
    let kind = match change {
        IssueChange::New(_) => "new",
        IssueChange::Modified(_) => "modified",
    };
    tracing::info!(
        number = issue.number,
        updated_at = %issue.updated_at,
        title = issue.title.as_deref().unwrap_or(""),
        change = kind,
        ">> new or modified issue found"
    );
}
