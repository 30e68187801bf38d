//! Per-application icon cache with at-most-one outstanding fetch per app id.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use futures::{executor::LocalSpawner, task::LocalSpawnExt};
use wm_host::IconService;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolution state of one application icon.
pub enum IconEntry {
    /// Never requested.
    Unresolved,
    /// A fetch is in flight; further requests are suppressed.
    Pending,
    /// Icon data (a `data:` URI) ready to render.
    Resolved(String),
    /// The lookup failed. Permanent for the lifetime of the cache.
    Negative,
}

impl IconEntry {
    pub fn data(&self) -> Option<&str> {
        match self {
            Self::Resolved(data) => Some(data),
            _ => None,
        }
    }
}

/// Callback invoked once per app id when its fetch settles.
pub type IconListener = Rc<dyn Fn(&str, &IconEntry)>;

#[derive(Clone)]
/// Memoizing icon resolver backed by an [`IconService`].
///
/// Clones share the same entries, so a cache handed to the view layer and the one held by the
/// switcher never issue duplicate fetches.
pub struct IconCache {
    entries: Rc<RefCell<HashMap<String, IconEntry>>>,
    listener: Rc<RefCell<Option<IconListener>>>,
    service: Rc<dyn IconService>,
    spawner: LocalSpawner,
}

impl IconCache {
    pub fn new(service: Rc<dyn IconService>, spawner: LocalSpawner) -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            listener: Rc::new(RefCell::new(None)),
            service,
            spawner,
        }
    }

    /// Registers the completion callback, replacing any previous one.
    pub fn set_listener(&self, listener: impl Fn(&str, &IconEntry) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Current entry for `app_id` without triggering a fetch.
    pub fn entry(&self, app_id: &str) -> IconEntry {
        self.entries
            .borrow()
            .get(app_id)
            .cloned()
            .unwrap_or(IconEntry::Unresolved)
    }

    /// Returns the cached entry, starting a background fetch on first request.
    ///
    /// The first call for an id marks it [`IconEntry::Pending`] and spawns exactly one lookup;
    /// calls made while that lookup is in flight return `Pending` without another request.
    pub fn resolve(&self, app_id: &str) -> IconEntry {
        if let Some(entry) = self.entries.borrow().get(app_id) {
            return entry.clone();
        }
        self.entries
            .borrow_mut()
            .insert(app_id.to_string(), IconEntry::Pending);

        let entries = Rc::clone(&self.entries);
        let listener = Rc::clone(&self.listener);
        let service = Rc::clone(&self.service);
        let id = app_id.to_string();
        let fetch = async move {
            let entry = match service.get_app_icon(&id).await {
                Ok(data) => IconEntry::Resolved(data),
                Err(err) => {
                    tracing::warn!(app_id = %id, error = %err, "icon lookup failed");
                    IconEntry::Negative
                }
            };
            entries.borrow_mut().insert(id.clone(), entry.clone());
            let listener = listener.borrow().clone();
            if let Some(listener) = listener {
                listener(&id, &entry);
            }
        };

        if let Err(err) = self.spawner.spawn_local(fetch) {
            tracing::warn!(app_id, error = %err, "icon lookup could not be scheduled");
            self.entries
                .borrow_mut()
                .insert(app_id.to_string(), IconEntry::Negative);
            return IconEntry::Negative;
        }
        IconEntry::Pending
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::LocalPool;
    use pretty_assertions::assert_eq;
    use wm_host::{MemoryIconService, NoopIconService};

    use super::*;

    #[test]
    fn rapid_duplicate_requests_issue_a_single_fetch() {
        let mut pool = LocalPool::new();
        let service = MemoryIconService::default();
        service.insert("kitty", "data:image/png;base64,AAAA");
        let cache = IconCache::new(Rc::new(service.clone()), pool.spawner());

        assert_eq!(cache.resolve("kitty"), IconEntry::Pending);
        assert_eq!(cache.resolve("kitty"), IconEntry::Pending);
        pool.run_until_stalled();

        assert_eq!(service.request_count("kitty"), 1);
        assert_eq!(
            cache.resolve("kitty"),
            IconEntry::Resolved("data:image/png;base64,AAAA".to_string())
        );
        assert_eq!(service.request_count("kitty"), 1);
    }

    #[test]
    fn failed_lookups_are_negative_and_never_retried() {
        let mut pool = LocalPool::new();
        let service = MemoryIconService::default();
        let cache = IconCache::new(Rc::new(service.clone()), pool.spawner());

        cache.resolve("mystery");
        pool.run_until_stalled();
        assert_eq!(cache.entry("mystery"), IconEntry::Negative);

        service.insert("mystery", "data:late");
        assert_eq!(cache.resolve("mystery"), IconEntry::Negative);
        pool.run_until_stalled();
        assert_eq!(service.request_count("mystery"), 1);
    }

    #[test]
    fn entry_does_not_start_a_fetch() {
        let pool = LocalPool::new();
        let service = MemoryIconService::default();
        let cache = IconCache::new(Rc::new(service.clone()), pool.spawner());
        assert_eq!(cache.entry("kitty"), IconEntry::Unresolved);
        assert!(service.requests().is_empty());
    }

    #[test]
    fn listener_fires_once_per_settled_fetch() {
        let mut pool = LocalPool::new();
        let cache = IconCache::new(Rc::new(NoopIconService), pool.spawner());
        let settled = Rc::new(Cell::new(0));
        let seen = Rc::clone(&settled);
        cache.set_listener(move |app_id, entry| {
            assert_eq!(app_id, "foot");
            assert_eq!(entry, &IconEntry::Negative);
            seen.set(seen.get() + 1);
        });

        cache.resolve("foot");
        cache.resolve("foot");
        pool.run_until_stalled();
        assert_eq!(settled.get(), 1);
    }
}
