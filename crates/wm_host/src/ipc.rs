//! Wire models shared between the window-manager backend and the switcher runtime.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Bucket key for windows that report no workspace. Reserved; never a real workspace id.
pub const UNASSIGNED_WORKSPACE: WorkspaceId = WorkspaceId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Stable, server-assigned workspace identifier.
pub struct WorkspaceId(pub u64);

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Stable, server-assigned window identifier.
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One workspace as reported by the window manager.
///
/// Backend fields this model does not name (output, active window, ...) are dropped on decode.
pub struct Workspace {
    /// Stable workspace id.
    pub id: WorkspaceId,
    /// 1-based display position on its output.
    pub idx: u8,
    /// Optional user-assigned name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether this workspace currently holds keyboard focus.
    #[serde(default)]
    pub is_focused: bool,
    /// Whether this workspace is the visible one on its output.
    #[serde(default)]
    pub is_active: bool,
}

impl Workspace {
    /// Creates an unnamed, unfocused, inactive workspace.
    pub fn new(id: u64, idx: u8) -> Self {
        Self {
            id: WorkspaceId(id),
            idx,
            name: None,
            is_focused: false,
            is_active: false,
        }
    }

    /// Display label: the name when set and non-empty, otherwise `ws {idx}`.
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("ws {}", self.idx),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One toplevel window as reported by the window manager.
pub struct Window {
    /// Stable window id.
    pub id: WindowId,
    /// Workspace holding the window, if any.
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
    /// Opaque application identifier (Wayland app id).
    #[serde(default)]
    pub app_id: Option<String>,
    /// Window title.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether this window holds keyboard focus.
    #[serde(default)]
    pub is_focused: bool,
    /// Whether the window floats above the tiled layout.
    #[serde(default)]
    pub is_floating: bool,
    /// Whether the window requested attention.
    #[serde(default)]
    pub is_urgent: bool,
}

impl Window {
    /// Creates an unfocused tiled window on `workspace_id`.
    pub fn new(id: u64, workspace_id: Option<u64>) -> Self {
        Self {
            id: WindowId(id),
            workspace_id: workspace_id.map(WorkspaceId),
            app_id: None,
            title: None,
            is_focused: false,
            is_floating: false,
            is_urgent: false,
        }
    }

    /// Bucket this window is grouped under; [`UNASSIGNED_WORKSPACE`] when it has no workspace.
    pub fn bucket(&self) -> WorkspaceId {
        self.workspace_id.unwrap_or(UNASSIGNED_WORKSPACE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Full-state payload returned by `get_state`, merged once over the initial snapshot at startup.
///
/// Absent (or `null`) fields leave the corresponding snapshot field untouched.
pub struct StatePatch {
    /// Complete workspace list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<Workspace>>,
    /// Windows grouped by workspace bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_by_workspace: Option<BTreeMap<WorkspaceId, Vec<Window>>>,
    /// Currently focused window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_window_id: Option<WindowId>,
    /// Currently focused workspace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focused_workspace_id: Option<WorkspaceId>,
    /// Explicit user selection carried over by the host, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_workspace_id: Option<WorkspaceId>,
}

impl StatePatch {
    /// Total number of windows across every bucket in the payload.
    pub fn total_windows(&self) -> usize {
        self.windows_by_workspace
            .as_ref()
            .map(|buckets| buckets.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}
