//! Periodic re-invocation of a keyed fetch with observable state.
//!
//! A poller fires on a fixed interval and whenever its key changes. Each
//! firing spawns an independent fetch task; in-flight fetches are never
//! cancelled, so when two overlap the one that resolves last wins. Results
//! that resolve after the key has changed are discarded.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Observable status of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    /// No result yet for the current key.
    Loading,
    /// The last attempt failed. Previous data, if any, is retained.
    Error,
    /// The last attempt succeeded.
    Success,
}

/// Latest state of a query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySnapshot<T> {
    /// Current status.
    pub status: QueryStatus,
    /// Last successful result.
    pub data: Option<T>,
    /// Message of the last failure, cleared on success.
    pub error: Option<String>,
    /// When the last attempt resolved.
    pub updated_at: Option<DateTime<Utc>>,
    /// Number of resolved attempts for the current key.
    pub fetch_count: u64,
}

impl<T> QuerySnapshot<T> {
    /// Snapshot for a key that has not resolved yet.
    pub fn loading() -> Self {
        Self {
            status: QueryStatus::Loading,
            data: None,
            error: None,
            updated_at: None,
            fetch_count: 0,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    fn record<E: Display>(&mut self, outcome: Result<T, E>) {
        self.fetch_count += 1;
        self.updated_at = Some(Utc::now());
        match outcome {
            Ok(data) => {
                self.status = QueryStatus::Success;
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.status = QueryStatus::Error;
                self.error = Some(e.to_string());
            }
        }
    }
}

type EnabledFn<K> = Box<dyn Fn(&K) -> bool + Send + Sync>;

/// Builder for a polling query.
pub struct Poller<K> {
    name: String,
    period: Duration,
    key: K,
    enabled: EnabledFn<K>,
}

impl<K> Poller<K>
where
    K: Clone + Debug + Send + Sync + 'static,
{
    /// Creates a poller that fetches `key` every `period`.
    pub fn new(name: impl Into<String>, period: Duration, key: K) -> Self {
        Self {
            name: name.into(),
            period,
            key,
            enabled: Box::new(|_| true),
        }
    }

    /// Only fetch while `predicate` holds for the current key.
    #[must_use]
    pub fn enabled_when<G>(mut self, predicate: G) -> Self
    where
        G: Fn(&K) -> bool + Send + Sync + 'static,
    {
        self.enabled = Box::new(predicate);
        self
    }

    /// Starts polling on the current Tokio runtime.
    pub fn spawn<T, E, F, Fut>(self, fetch: F) -> QueryHandle<K, T>
    where
        T: Send + Sync + 'static,
        E: Display + Send + 'static,
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let Self {
            name,
            period,
            key,
            enabled,
        } = self;

        let (key_tx, mut key_rx) = watch::channel(key);
        let (state_tx, state_rx) = watch::channel(QuerySnapshot::loading());
        let state_tx = Arc::new(state_tx);
        let generation = Arc::new(AtomicU64::new(0));

        info!(query = %name, period_secs = period.as_secs_f64(), "Starting poller");

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = key_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        // Bumped under the state lock so no stale result can
                        // land between the bump and the reset.
                        state_tx.send_modify(|s| {
                            generation.fetch_add(1, Ordering::SeqCst);
                            *s = QuerySnapshot::loading();
                        });
                        ticker.reset();
                        debug!(query = %name, key = ?*key_rx.borrow(), "Key changed");
                    }
                }

                let key = key_rx.borrow().clone();
                if !enabled(&key) {
                    continue;
                }

                let issued_for = generation.load(Ordering::SeqCst);
                let pending = fetch(key);
                let state_tx = Arc::clone(&state_tx);
                let generation = Arc::clone(&generation);
                let name = name.clone();

                tokio::spawn(async move {
                    let outcome = pending.await;
                    let recorded = state_tx.send_if_modified(|s| {
                        if generation.load(Ordering::SeqCst) != issued_for {
                            return false;
                        }
                        if let Err(e) = &outcome {
                            warn!(query = %name, error = %e, "Poll failed");
                        }
                        s.record(outcome);
                        true
                    });
                    if !recorded {
                        debug!(query = %name, "Discarding result for superseded key");
                    }
                });
            }

            info!(query = %name, "Poller stopped");
        });

        QueryHandle {
            key_tx,
            state_rx,
            task,
        }
    }
}

/// Handle to a running poller. Dropping it stops polling.
pub struct QueryHandle<K, T> {
    key_tx: watch::Sender<K>,
    state_rx: watch::Receiver<QuerySnapshot<T>>,
    task: JoinHandle<()>,
}

impl<K: Clone, T: Clone> QueryHandle<K, T> {
    /// Copy of the latest state.
    pub fn snapshot(&self) -> QuerySnapshot<T> {
        self.state_rx.borrow().clone()
    }

    /// Current key.
    pub fn key(&self) -> K {
        self.key_tx.borrow().clone()
    }
}

impl<K, T> QueryHandle<K, T> {
    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot<T>> {
        self.state_rx.clone()
    }

    /// Replaces the key, resetting state to loading and fetching immediately.
    pub fn set_key(&self, key: K) {
        self.key_tx.send_replace(key);
    }

    /// Stops polling. In-flight fetches still resolve but are not observed
    /// by the loop.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl<K, T> Drop for QueryHandle<K, T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::sleep;

    async fn next<T: Clone>(rx: &mut watch::Receiver<QuerySnapshot<T>>) -> QuerySnapshot<T> {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = Poller::new("counter", Duration::from_secs(30), ()).spawn(move |()| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok::<_, Infallible>(n) }
        });
        let mut rx = handle.subscribe();
        assert!(handle.snapshot().is_loading());

        let first = next(&mut rx).await;
        assert_eq!(first.status, QueryStatus::Success);
        assert_eq!(first.data, Some(1));

        sleep(Duration::from_secs(30)).await;
        let second = next(&mut rx).await;
        assert_eq!(second.data, Some(2));
        assert_eq!(second.fetch_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_keeps_previous_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = Poller::new("flaky", Duration::from_secs(10), ()).spawn(move |()| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Ok(vec![1, 2, 3])
                } else {
                    Err("upstream unavailable")
                }
            }
        });
        let mut rx = handle.subscribe();

        assert_eq!(next(&mut rx).await.data, Some(vec![1, 2, 3]));

        sleep(Duration::from_secs(10)).await;
        let failed = next(&mut rx).await;
        assert_eq!(failed.status, QueryStatus::Error);
        assert_eq!(failed.error.as_deref(), Some("upstream unavailable"));
        assert_eq!(failed.data, Some(vec![1, 2, 3]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_key_does_not_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = Poller::new("gated", Duration::from_secs(10), String::new())
            .enabled_when(|k: &String| !k.is_empty())
            .spawn(move |k: String| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, Infallible>(k.len()) }
            });
        let mut rx = handle.subscribe();

        sleep(Duration::from_secs(35)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(handle.snapshot().is_loading());

        handle.set_key("BTC".to_string());
        let snap = loop {
            let s = next(&mut rx).await;
            if s.status == QueryStatus::Success {
                break s;
            }
        };
        assert_eq!(snap.data, Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_key_result_discarded() {
        let handle = Poller::new("keyed", Duration::from_secs(60), "slow")
            .spawn(|k: &'static str| async move {
                if k == "slow" {
                    sleep(Duration::from_secs(5)).await;
                }
                Ok::<_, Infallible>(k)
            });
        let mut rx = handle.subscribe();

        sleep(Duration::from_secs(1)).await;
        handle.set_key("fast");

        let snap = loop {
            let s = next(&mut rx).await;
            if s.status == QueryStatus::Success {
                break s;
            }
        };
        assert_eq!(snap.data, Some("fast"));

        sleep(Duration::from_secs(10)).await;
        let snap = handle.snapshot();
        assert_eq!(snap.data, Some("fast"));
        assert_eq!(snap.fetch_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_fetch_not_cancelled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        // The first fetch outlives the next tick and resolves last.
        let handle = Poller::new("overlap", Duration::from_secs(10), ()).spawn(move |()| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                let delay = if n == 1 { 15 } else { 1 };
                sleep(Duration::from_secs(delay)).await;
                Ok::<_, Infallible>(n)
            }
        });

        sleep(Duration::from_secs(12)).await;
        assert_eq!(handle.snapshot().data, Some(2));

        sleep(Duration::from_secs(4)).await;
        let snap = handle.snapshot();
        assert_eq!(snap.data, Some(1));
        assert_eq!(snap.fetch_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let handle = Poller::new("stoppable", Duration::from_secs(10), ()).spawn(move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Infallible>(()) }
        });
        let mut rx = handle.subscribe();
        next(&mut rx).await;

        handle.stop();
        sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(handle.snapshot().fetch_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rapid_key_changes_never_show_stale_data() {
        let handle = Poller::new("churn", Duration::from_secs(600), 0u64).spawn(|k: u64| async move {
            for _ in 0..(k % 4) {
                tokio::task::yield_now().await;
            }
            Ok::<_, Infallible>(k)
        });
        let mut rx = handle.subscribe();

        for key in 1..=300u64 {
            handle.set_key(key);
            let mut reset_seen = false;
            let settled = tokio::time::timeout(Duration::from_secs(5), async {
                loop {
                    let s = next(&mut rx).await;
                    if s.is_loading() || s.data == Some(key) {
                        reset_seen = true;
                    }
                    if reset_seen && s.status == QueryStatus::Success {
                        break s;
                    }
                }
            })
            .await
            .unwrap();
            assert_eq!(settled.data, Some(key));
            assert_eq!(settled.fetch_count, 1);
        }
    }
}
