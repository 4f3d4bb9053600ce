//! Read-through caches in front of the employee backend.
//!
//! Two named caches exist:
//!
//! - the whole-collection slot ([`CacheSlot`]), populated lazily and shared by
//!   every aggregate;
//! - the search cache ([`SearchCache`]), keyed by the normalised search term
//!   and only ever filled from the whole-collection contents.
//!
//! A slot moves `Empty -> Populating -> Populated` and back to `Empty` on
//! invalidation. While populating, the in-flight load is stored as a shared
//! future: concurrent misses await the same future, so the backend sees one
//! call and every caller observes the same outcome. Failures are never
//! cached.
//!
//! Each state change bumps an epoch. A load that finishes after the slot was
//! invalidated (or restarted) leaves the slot untouched, so a stale collection
//! fetched before a mutation can never be written back afterwards.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use tracing::{debug, info};

use crate::domain::{Employee, Error};

type SharedLoad<V> = Shared<BoxFuture<'static, Result<Arc<V>, Error>>>;

enum SlotState<V> {
    Empty,
    Populating { epoch: u64, load: SharedLoad<V> },
    Populated(Arc<V>),
}

struct SlotInner<V> {
    state: SlotState<V>,
    epoch: u64,
}

/// Single-value read-through cache with at most one population in flight.
pub struct CacheSlot<V> {
    name: &'static str,
    inner: Mutex<SlotInner<V>>,
}

impl<V> CacheSlot<V>
where
    V: Send + Sync + 'static,
{
    /// Create an empty slot. `name` appears in log events.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(SlotInner {
                state: SlotState::Empty,
                epoch: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotInner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value, if the slot is populated.
    pub fn peek(&self) -> Option<Arc<V>> {
        match &self.lock().state {
            SlotState::Populated(value) => Some(Arc::clone(value)),
            SlotState::Empty | SlotState::Populating { .. } => None,
        }
    }

    /// Whether a value is currently cached.
    pub fn is_populated(&self) -> bool {
        self.peek().is_some()
    }

    /// Return the cached value, or run `populate` exactly once across all
    /// concurrent callers and cache its success.
    ///
    /// `populate` is only invoked by the caller that finds the slot empty.
    pub async fn get_or_populate<F, Fut>(&self, populate: F) -> Result<Arc<V>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>> + Send + 'static,
    {
        let (epoch, load) = {
            let mut inner = self.lock();
            match &inner.state {
                SlotState::Populated(value) => return Ok(Arc::clone(value)),
                SlotState::Populating { epoch, load } => (*epoch, load.clone()),
                SlotState::Empty => {
                    info!(cache = self.name, "cache missed; populating from backend");
                    inner.epoch += 1;
                    let epoch = inner.epoch;
                    let load = populate().map_ok(Arc::new).boxed().shared();
                    inner.state = SlotState::Populating {
                        epoch,
                        load: load.clone(),
                    };
                    (epoch, load)
                }
            }
        };

        let outcome = load.await;
        self.settle(epoch, &outcome);
        outcome.map_err(Error::with_current_trace_id)
    }

    fn settle(&self, epoch: u64, outcome: &Result<Arc<V>, Error>) {
        let mut inner = self.lock();
        let current = matches!(
            inner.state,
            SlotState::Populating { epoch: in_flight, .. } if in_flight == epoch
        );
        if !current {
            return;
        }
        inner.state = match outcome {
            Ok(value) => SlotState::Populated(Arc::clone(value)),
            Err(error) => {
                debug!(cache = self.name, error = %error, "population failed; slot left empty");
                SlotState::Empty
            }
        };
    }

    /// Drop the cached value and detach any in-flight population.
    pub fn invalidate(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.state = SlotState::Empty;
        debug!(cache = self.name, "cache invalidated");
    }
}

/// Normalise a search term into its cache key.
///
/// Returns `None` for blank terms.
///
/// # Examples
/// ```
/// use employee_api::domain::normalise_search_term;
///
/// assert_eq!(normalise_search_term("  MiKe "), Some("mike".to_owned()));
/// assert_eq!(normalise_search_term("   "), None);
/// ```
pub fn normalise_search_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

struct SearchInner {
    entries: HashMap<String, Arc<Vec<Employee>>>,
    epoch: u64,
}

/// Search results keyed by normalised term.
pub struct SearchCache {
    inner: Mutex<SearchInner>,
}

impl Default for SearchCache {
    fn default() -> Self {
        Self {
            inner: Mutex::new(SearchInner {
                entries: HashMap::new(),
                epoch: 0,
            }),
        }
    }
}

impl SearchCache {
    fn lock(&self) -> MutexGuard<'_, SearchInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached results for `key`.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<Employee>>> {
        self.lock().entries.get(key).cloned()
    }

    /// Epoch to pass back to [`SearchCache::store`].
    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    /// Store non-empty results computed while `epoch` was current.
    ///
    /// Empty result sets are never stored. Results computed before an
    /// invalidation are dropped.
    pub fn store(&self, epoch: u64, key: String, results: Arc<Vec<Employee>>) {
        if results.is_empty() {
            return;
        }
        let mut inner = self.lock();
        if inner.epoch == epoch {
            inner.entries.insert(key, results);
        }
    }

    /// Number of cached terms.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no terms are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached term.
    pub fn invalidate(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.entries.clear();
        debug!(cache = "employeesBySearch", "cache invalidated");
    }
}

/// The two named employee caches, injected into the service.
pub struct EmployeeCaches {
    all: CacheSlot<Vec<Employee>>,
    search: SearchCache,
}

impl Default for EmployeeCaches {
    fn default() -> Self {
        Self {
            all: CacheSlot::new("employees"),
            search: SearchCache::default(),
        }
    }
}

impl EmployeeCaches {
    /// Create both caches empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-collection slot.
    pub fn all(&self) -> &CacheSlot<Vec<Employee>> {
        &self.all
    }

    /// Search-by-substring cache.
    pub fn search(&self) -> &SearchCache {
        &self.search
    }

    /// Invalidate both caches.
    pub fn invalidate_all(&self) {
        self.all.invalidate();
        self.search.invalidate();
    }
}
