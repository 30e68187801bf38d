//! Single-writer owner of the switcher snapshot.
//!
//! Every mutation goes through [`ReconciliationEngine`], which applies it and then calls each
//! subscriber synchronously with the new [`SwitcherSnapshot`] before returning. The server-truth
//! state is swapped copy-on-write, so snapshots handed out earlier are never mutated under their
//! holders.

use std::rc::Rc;

use serde_json::Value;
use wm_host::{decode_event, EventDecodeError, StatePatch, WmEvent, WorkspaceId};

use crate::{
    model::{SwitcherSnapshot, ViewState, WmState},
    reducer::{merge_state_patch, reduce_wm_state},
    selection::step_selection,
};

/// Handle returned by [`ReconciliationEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Snapshot observer callback.
pub type Subscriber = Rc<dyn Fn(&SwitcherSnapshot)>;

#[derive(Default)]
/// Authoritative state container and change-notification hub.
pub struct ReconciliationEngine {
    state: Rc<WmState>,
    view: ViewState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl ReconciliationEngine {
    /// Engine with an empty snapshot and no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and notifies subscribers.
    pub fn apply_event(&mut self, event: WmEvent) {
        tracing::trace!(event = event.variant_name(), "applying window manager event");
        reduce_wm_state(Rc::make_mut(&mut self.state), event);
        self.notify();
    }

    /// Decodes and applies a raw event payload.
    ///
    /// Unknown variants are skipped without notifying.
    ///
    /// # Errors
    ///
    /// Returns [`EventDecodeError`] when the payload is not a well-formed event object; the
    /// snapshot is left untouched.
    pub fn apply_raw_event(&mut self, raw: &Value) -> Result<(), EventDecodeError> {
        if let Some(event) = decode_event(raw)? {
            self.apply_event(event);
        }
        Ok(())
    }

    /// Merges a bootstrap payload; see [`merge_state_patch`].
    pub fn set_state(&mut self, patch: StatePatch) {
        merge_state_patch(Rc::make_mut(&mut self.state), &mut self.view, patch);
        self.notify();
    }

    /// Replaces the search query with its trimmed form.
    pub fn set_query(&mut self, query: &str) {
        self.view.query = query.trim().to_string();
        self.notify();
    }

    /// Sets the explicit workspace selection.
    pub fn select_workspace(&mut self, id: Option<WorkspaceId>) {
        self.view.selected_workspace_id = id;
        self.notify();
    }

    /// Moves the selection `delta` workspaces away without wrapping. Returns whether it moved.
    pub fn step_workspace_selection(&mut self, delta: isize) -> bool {
        match step_selection(&self.state, &self.view, delta) {
            Some(target) => {
                self.select_workspace(Some(target));
                true
            }
            None => false,
        }
    }

    /// Clears the query when the overlay becomes visible again.
    pub fn reset_for_overlay_shown(&mut self) {
        self.view.query.clear();
        self.notify();
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&SwitcherSnapshot) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Rc::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` for an unknown or already removed id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn snapshot(&self) -> SwitcherSnapshot {
        SwitcherSnapshot {
            state: Rc::clone(&self.state),
            view: self.view.clone(),
        }
    }

    pub fn state(&self) -> &WmState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    fn notify(&self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, subscriber) in &self.subscribers {
            subscriber(&snapshot);
        }
    }
}
