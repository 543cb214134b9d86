//! # Query Cache
//!
//! One cache per application, constructed in `main` and handed to the
//! [`ContentService`](crate::api::ContentService). Keys are request paths.
//!
//! ```text
//! get_or_fetch(key)
//!   ├── Ready(value)     → return value
//!   ├── Pending(shared)  → await the same future as the first caller
//!   └── absent           → start fetch, store Pending, await
//!                             ├── Ok  → store Ready (if still ours)
//!                             └── Err → drop the slot (failures are not cached)
//! ```
//!
//! The lock is never held across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use log::debug;
use serde_json::Value;

use crate::api::fetcher::ApiError;

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<Value>, ApiError>>>;

enum Slot {
    Ready(Arc<Value>),
    Pending(SharedFetch),
}

#[derive(Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `key`, joins an in-flight request for it,
    /// or starts `fetch`.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> Result<Arc<Value>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>> + Send + 'static,
    {
        let pending = {
            let mut slots = self.slots();
            match slots.get(key) {
                Some(Slot::Ready(value)) => {
                    debug!("cache hit: {}", key);
                    return Ok(value.clone());
                }
                Some(Slot::Pending(shared)) => {
                    debug!("joining in-flight request: {}", key);
                    shared.clone()
                }
                None => {
                    debug!("cache miss: {}", key);
                    let shared = fetch().map(|r| r.map(Arc::new)).boxed().shared();
                    slots.insert(key.to_string(), Slot::Pending(shared.clone()));
                    shared
                }
            }
        };

        let result = pending.clone().await;

        let mut slots = self.slots();
        // Only settle the slot if it still holds this request; an invalidation
        // (and possibly a newer request) may have replaced it meanwhile.
        let still_ours = matches!(slots.get(key), Some(Slot::Pending(current)) if current.ptr_eq(&pending));
        if still_ours {
            match &result {
                Ok(value) => {
                    slots.insert(key.to_string(), Slot::Ready(value.clone()));
                }
                Err(e) => {
                    debug!("not caching failed request {}: {}", key, e);
                    slots.remove(key);
                }
            }
        }
        result
    }

    pub fn invalidate(&self, key: &str) {
        if self.slots().remove(key).is_some() {
            debug!("invalidated {}", key);
        }
    }

    /// Drops every key starting with `prefix` (e.g. `/content/story`).
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut slots = self.slots();
        let before = slots.len();
        slots.retain(|key, _| !key.starts_with(prefix));
        debug!("invalidated {} entries under {}", before - slots.len(), prefix);
    }

    pub fn clear(&self) {
        self.slots().clear();
    }

    /// Number of settled entries.
    pub fn len(&self) -> usize {
        self.slots()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
