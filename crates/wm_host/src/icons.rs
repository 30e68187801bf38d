//! Application icon lookup contracts and adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`IconService`].
pub type IconFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service resolving an application id to displayable icon data (a `data:` URI).
pub trait IconService {
    /// Looks up the icon for `app_id`.
    fn get_app_icon<'a>(&'a self, app_id: &'a str) -> IconFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Icon service for hosts without icon lookup; every request fails.
pub struct NoopIconService;

impl IconService for NoopIconService {
    fn get_app_icon<'a>(&'a self, app_id: &'a str) -> IconFuture<'a, Result<String, String>> {
        Box::pin(async move { Err(format!("no icon found for {app_id}")) })
    }
}

#[derive(Debug, Default)]
struct MemoryIconTable {
    icons: HashMap<String, String>,
    requests: Vec<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory icon service keyed by app id that records every request it receives.
pub struct MemoryIconService {
    inner: Rc<RefCell<MemoryIconTable>>,
}

impl MemoryIconService {
    /// Registers icon `data` for `app_id`.
    pub fn insert(&self, app_id: impl Into<String>, data: impl Into<String>) {
        self.inner
            .borrow_mut()
            .icons
            .insert(app_id.into(), data.into());
    }

    /// Number of lookups received for `app_id`.
    pub fn request_count(&self, app_id: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|requested| requested.as_str() == app_id)
            .count()
    }

    /// Every requested app id, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.inner.borrow().requests.clone()
    }
}

impl IconService for MemoryIconService {
    fn get_app_icon<'a>(&'a self, app_id: &'a str) -> IconFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            inner.requests.push(app_id.to_string());
            inner
                .icons
                .get(app_id)
                .cloned()
                .ok_or_else(|| format!("no icon found for {app_id}"))
        })
    }
}
