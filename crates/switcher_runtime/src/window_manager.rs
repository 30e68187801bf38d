//! Shared bucket and focus transition helpers used by the snapshot reducer.

use std::collections::HashSet;

use wm_host::{Window, WindowId, Workspace, WorkspaceId};

use crate::model::{WindowBuckets, WmState};

/// Groups `windows` by bucket, preserving input order inside each bucket.
///
/// A repeated window id keeps its first occurrence.
pub fn group_by_workspace(windows: Vec<Window>) -> WindowBuckets {
    let mut seen = HashSet::new();
    let mut buckets = WindowBuckets::new();
    for window in windows {
        if seen.insert(window.id) {
            buckets.entry(window.bucket()).or_default().push(window);
        }
    }
    buckets
}

/// Removes `window_id` from every bucket. Returns `true` when something was removed.
///
/// Emptied buckets are kept so consumers still see the workspace key with zero windows.
pub fn remove_window(buckets: &mut WindowBuckets, window_id: WindowId) -> bool {
    let mut removed = false;
    for bucket in buckets.values_mut() {
        let before = bucket.len();
        bucket.retain(|w| w.id != window_id);
        removed |= bucket.len() != before;
    }
    removed
}

/// Removes any prior copy of `window` and appends it to the bucket it now reports.
pub fn upsert_window(buckets: &mut WindowBuckets, window: Window) {
    remove_window(buckets, window.id);
    buckets.entry(window.bucket()).or_default().push(window);
}

/// Drops repeated window ids so each id lives in a single bucket; the first occurrence wins.
pub fn dedupe_windows(buckets: &mut WindowBuckets) {
    let mut seen = HashSet::new();
    for bucket in buckets.values_mut() {
        bucket.retain(|w| seen.insert(w.id));
    }
}

/// Flags exactly the window matching `focused` and clears every other window.
pub fn set_window_focus(buckets: &mut WindowBuckets, focused: Option<WindowId>) {
    for window in buckets.values_mut().flat_map(|bucket| bucket.iter_mut()) {
        window.is_focused = Some(window.id) == focused;
    }
}

/// Id of the first flagged workspace, in list order.
pub fn first_focused_workspace(workspaces: &[Workspace]) -> Option<WorkspaceId> {
    workspaces.iter().find(|ws| ws.is_focused).map(|ws| ws.id)
}

/// Id of the first flagged window, in list order.
pub fn first_focused_window(windows: &[Window]) -> Option<WindowId> {
    windows.iter().find(|w| w.is_focused).map(|w| w.id)
}

/// Enforces the single-focus invariants for workspaces and windows.
///
/// Input from the backend is not trusted to carry at most one flag. When several entries are
/// flagged, the one matching the focus pointer wins; otherwise the first one in order does.
pub fn normalize_focus_flags(state: &mut WmState) {
    let keep_ws = state
        .focused_workspace_id
        .filter(|id| state.workspaces.iter().any(|ws| ws.id == *id && ws.is_focused))
        .or_else(|| first_focused_workspace(&state.workspaces));
    let mut kept = false;
    for ws in &mut state.workspaces {
        if !ws.is_focused {
            continue;
        }
        if !kept && Some(ws.id) == keep_ws {
            kept = true;
        } else {
            ws.is_focused = false;
        }
    }

    let flagged: Vec<WindowId> = state
        .windows_by_workspace
        .values()
        .flat_map(|bucket| bucket.iter())
        .filter(|w| w.is_focused)
        .map(|w| w.id)
        .collect();
    if flagged.len() <= 1 {
        return;
    }
    let keep_window = state
        .focused_window_id
        .filter(|id| flagged.contains(id))
        .or_else(|| flagged.first().copied());
    let mut kept = false;
    for window in state
        .windows_by_workspace
        .values_mut()
        .flat_map(|bucket| bucket.iter_mut())
    {
        if !window.is_focused {
            continue;
        }
        if !kept && Some(window.id) == keep_window {
            kept = true;
        } else {
            window.is_focused = false;
        }
    }
}
