use std::{collections::BTreeMap, rc::Rc};

use serde::{Deserialize, Serialize};
use wm_host::{Window, WindowId, Workspace, WorkspaceId};

/// Windows grouped by the workspace bucket they report.
pub type WindowBuckets = BTreeMap<WorkspaceId, Vec<Window>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Server-truth mirror of the window manager, owned and mutated only by the engine.
pub struct WmState {
    pub workspaces: Vec<Workspace>,
    pub windows_by_workspace: WindowBuckets,
    pub focused_window_id: Option<WindowId>,
    pub focused_workspace_id: Option<WorkspaceId>,
}

impl WmState {
    pub fn total_windows(&self) -> usize {
        self.windows_by_workspace.values().map(Vec::len).sum()
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.id == id)
    }

    /// Windows in bucket `id`; empty for unknown or dangling buckets.
    pub fn windows_in(&self, id: WorkspaceId) -> &[Window] {
        self.windows_by_workspace
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows_by_workspace
            .values()
            .flat_map(|bucket| bucket.iter())
            .find(|w| w.id == id)
    }

    /// 1-based list position of the flagged focused workspace.
    pub fn focused_workspace_position(&self) -> Option<usize> {
        self.workspaces
            .iter()
            .position(|ws| ws.is_focused)
            .map(|pos| pos + 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Client-local view state driven by user input, never by the event stream.
pub struct ViewState {
    pub selected_workspace_id: Option<WorkspaceId>,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Immutable logical copy of the engine state handed to subscribers and derivations.
///
/// `state` is shared by reference count; the engine replaces it copy-on-write, so a holder of an
/// older snapshot keeps seeing that version unchanged.
pub struct SwitcherSnapshot {
    pub state: Rc<WmState>,
    pub view: ViewState,
}
