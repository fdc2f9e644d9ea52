//! Debounced search session for interactive input.
//!
//! Every [`SearchSession::submit`] supersedes the pending one; a search only
//! runs once its query has been left alone for the debounce delay. Results
//! are published on a `tokio::sync::watch` channel so a consumer always sees
//! the latest state.

use crate::config::DEFAULT_DEBOUNCE_MS;
use crate::model::TocItem;
use crate::services::search::{search_with_config, SearchConfig, SearchHit};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The latest published search.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Debounced search over a shared tree.
///
/// Must be driven from within a tokio runtime.
pub struct SearchSession {
    tree: Arc<Vec<TocItem>>,
    config: SearchConfig,
    delay: Duration,
    state: Arc<watch::Sender<SearchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    /// Creates a session with the default delay and search configuration.
    pub fn new(tree: Arc<Vec<TocItem>>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            tree,
            config: SearchConfig::default(),
            delay: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Subscribes to published states.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Returns the last published state.
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Schedules a search, cancelling any search still waiting out its delay.
    pub fn submit(&self, query: impl Into<String>) {
        let query = query.into();
        let tree = Arc::clone(&self.tree);
        let config = self.config.clone();
        let state = Arc::clone(&self.state);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let results = search_with_config(&query, &tree, &config);
            state.send_replace(SearchState { query, results });
        });

        self.replace_pending(Some(handle));
    }

    /// Cancels any pending search and publishes an empty state.
    pub fn clear(&self) {
        self.replace_pending(None);
        self.state.send_replace(SearchState::default());
    }

    fn replace_pending(&self, next: Option<JoinHandle<()>>) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *pending, next) {
            previous.abort();
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TocNode;
    use crate::types::NodeType;

    fn tree() -> Arc<Vec<TocItem>> {
        let leaf = |title: &str| {
            TocItem::Node(TocNode {
                id: format!("/{title}"),
                slug: format!("/{title}"),
                title: title.to_string(),
                node_type: NodeType::HttpOperation,
                meta: "get".into(),
                description: String::new(),
            })
        };
        Arc::new(vec![
            TocItem::Overview,
            TocItem::divider("Endpoints"),
            leaf("pets"),
            leaf("stores"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_publishes_only_latest() {
        let session = SearchSession::new(tree());
        let mut rx = session.subscribe();

        session.submit("pet");
        session.submit("sto");
        session.submit("store");

        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.query, "store");
        // "pets" survives on the operation bonus alone
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.results[0].slug, "/stores");
        assert!(state.results[0].score > state.results[1].score);

        tokio::time::sleep(session.delay() * 4).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_submits_each_publish() {
        let session = SearchSession::new(tree()).with_delay(Duration::from_millis(50));

        session.submit("pets");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.current().query, "pets");

        session.submit("stores");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(session.current().query, "stores");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending() {
        let session = SearchSession::new(tree());
        session.submit("pets");
        session.clear();

        tokio::time::sleep(session.delay() * 2).await;
        assert_eq!(session.current(), SearchState::default());
    }
}
