use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::ApiError;
use crate::models::FundId;

use super::QueryState;

/// Input a query is keyed by. A fetch only runs for keys that are set.
pub trait QueryKey: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn is_set(&self) -> bool {
        true
    }
}

impl QueryKey for () {}

/// Fund id zero means the id is not known yet.
impl QueryKey for FundId {
    fn is_set(&self) -> bool {
        *self != 0
    }
}

/// Key of the performance query: fund and window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceKey {
    pub fund_id: FundId,
    pub days: u32,
}

impl PerformanceKey {
    pub fn new(fund_id: FundId, days: u32) -> Self {
        Self { fund_id, days }
    }
}

impl QueryKey for PerformanceKey {
    fn is_set(&self) -> bool {
        self.fund_id != 0
    }
}

pub type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// A single backend resource bound to a key.
///
/// Changing the key starts exactly one fetch on the tokio runtime. Results are
/// tagged with a generation number; a result that arrives after a newer fetch
/// was started is dropped instead of overwriting the newer state. Observers
/// follow state changes through [`Query::subscribe`].
///
/// `set_key` and `refetch` spawn tasks and must be called from within a
/// tokio runtime.
pub struct Query<K, T> {
    name: &'static str,
    key: Option<K>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<QueryState<T>>>,
    fetch: Fetcher<K, T>,
}

impl<K, T> Query<K, T>
where
    K: QueryKey,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, initial: T, fetch: Fetcher<K, T>) -> Self {
        let (state, _) = watch::channel(QueryState::new(initial));
        Self {
            name,
            key: None,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
            fetch,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Current state.
    pub fn snapshot(&self) -> QueryState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.state.subscribe()
    }

    /// Bind the query to `key`.
    ///
    /// Returns the handle of the fetch it started, or `None` when the key is
    /// unchanged or unset. An unset key starts nothing and does not supersede
    /// a fetch already in flight; that fetch still settles the state.
    pub fn set_key(&mut self, key: K) -> Option<JoinHandle<()>> {
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key.clone());

        if !key.is_set() {
            tracing::debug!(query = self.name, ?key, "key not set; skipping fetch");
            return None;
        }

        // Whatever is in flight now belongs to a previous key.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Some(self.start(key, generation))
    }

    /// Fetch again for the current key.
    pub fn refetch(&self) -> Option<JoinHandle<()>> {
        let key = self.key.clone().filter(K::is_set)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Some(self.start(key, generation))
    }

    fn start(&self, key: K, generation: u64) -> JoinHandle<()> {
        self.state.send_if_modified(|state| {
            let changed = !state.loading;
            state.loading = true;
            changed
        });

        let fut = (self.fetch)(key.clone());
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let name = self.name;

        tokio::spawn(async move {
            let result = fut.await;
            state.send_if_modified(|state| {
                if current.load(Ordering::SeqCst) != generation {
                    tracing::debug!(query = name, ?key, generation, "discarding stale result");
                    return false;
                }
                match result {
                    Ok(data) => {
                        state.data = data;
                        state.error = None;
                    }
                    Err(err) => {
                        tracing::warn!(query = name, ?key, error = %err, "fetch failed");
                        state.error = Some(err.to_string());
                    }
                }
                state.loading = false;
                true
            });
        })
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Query<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
