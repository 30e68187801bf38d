//! Effective-workspace resolution shared by every consumer of the snapshot.
//!
//! The fallback chain is explicit selection, then focused workspace, then the first workspace in
//! list order. It is evaluated fresh on every derivation instead of being cached, so the view stays
//! consistent when workspaces vanish or focus moves without a user selection.

use wm_host::{Workspace, WorkspaceId};

use crate::model::{SwitcherSnapshot, ViewState, WmState};

/// Label shown for a workspace id that has no matching workspace entry.
pub const UNKNOWN_WORKSPACE_LABEL: &str = "unknown";

/// Resolves the workspace currently being viewed.
///
/// Returns `None` only when there is no selection, no focus, and no workspace at all.
pub fn effective_workspace(state: &WmState, view: &ViewState) -> Option<WorkspaceId> {
    view.selected_workspace_id
        .or(state.focused_workspace_id)
        .or_else(|| state.workspaces.first().map(|ws| ws.id))
}

/// [`effective_workspace`] over a snapshot.
pub fn effective_workspace_of(snapshot: &SwitcherSnapshot) -> Option<WorkspaceId> {
    effective_workspace(&snapshot.state, &snapshot.view)
}

/// Workspace the keyboard selection steps from: selection, else focus. No first-workspace fallback.
pub fn selection_anchor(state: &WmState, view: &ViewState) -> Option<WorkspaceId> {
    view.selected_workspace_id.or(state.focused_workspace_id)
}

/// Neighbour of the selection anchor `delta` positions away, without wrapping.
///
/// An anchor that is missing from the list counts as position `-1`, so stepping forward lands on
/// the first workspace and stepping backward goes nowhere.
pub fn step_selection(state: &WmState, view: &ViewState, delta: isize) -> Option<WorkspaceId> {
    let anchor = selection_anchor(state, view);
    let position = anchor
        .and_then(|id| state.workspaces.iter().position(|ws| ws.id == id))
        .map(|pos| pos as isize)
        .unwrap_or(-1);
    if delta > 0 && position >= state.workspaces.len() as isize - 1 {
        return None;
    }
    if delta < 0 && position <= 0 {
        return None;
    }
    let target = (position + delta).clamp(0, state.workspaces.len() as isize - 1);
    state
        .workspaces
        .get(target as usize)
        .map(|ws: &Workspace| ws.id)
}

/// Label for workspace `id`, or [`UNKNOWN_WORKSPACE_LABEL`] for a dangling id.
pub fn workspace_label(state: &WmState, id: Option<WorkspaceId>) -> String {
    id.and_then(|id| state.workspace(id))
        .map(Workspace::label)
        .unwrap_or_else(|| UNKNOWN_WORKSPACE_LABEL.to_string())
}
