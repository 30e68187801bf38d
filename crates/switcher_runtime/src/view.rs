//! Render-ready derivations over a [`SwitcherSnapshot`].
//!
//! Everything here is a pure function of the snapshot plus the catalog and navigation cursor,
//! except [`window_grid`], which asks the icon cache to start lazy lookups for the cards it
//! returns.

use wm_host::{Window, WindowId, WorkspaceId};

use crate::{
    app_catalog::{app_slug, AppCatalog},
    icon_cache::{IconCache, IconEntry},
    model::SwitcherSnapshot,
    navigation::NavigationIndex,
    search::{normalize_query, visible_windows, workspace_matches},
    selection::{effective_workspace_of, workspace_label},
};

/// Ellipsis appended to truncated titles.
pub const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Counters shown in the overlay header.
pub struct HeaderMeta {
    /// 1-based position of the focused workspace in the list.
    pub focused_position: Option<usize>,
    pub workspace_count: usize,
    pub window_count: usize,
}

impl HeaderMeta {
    /// `ws 2 / 5`, or `ws - / 5` with no focused workspace.
    pub fn workspace_label(&self) -> String {
        match self.focused_position {
            Some(position) => format!("ws {position} / {}", self.workspace_count),
            None => format!("ws - / {}", self.workspace_count),
        }
    }

    pub fn windows_label(&self) -> String {
        window_count_label(self.window_count)
    }
}

pub fn header_meta(snapshot: &SwitcherSnapshot) -> HeaderMeta {
    HeaderMeta {
        focused_position: snapshot.state.focused_workspace_position(),
        workspace_count: snapshot.state.workspaces.len(),
        window_count: snapshot.state.total_windows(),
    }
}

/// `1 window`, `3 windows`.
pub fn window_count_label(count: usize) -> String {
    if count == 1 {
        "1 window".to_string()
    } else {
        format!("{count} windows")
    }
}

/// Cuts `text` to `max_chars` characters and appends [`ELLIPSIS`] when anything was cut.
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push(ELLIPSIS);
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the workspace sidebar.
pub struct WorkspaceRow {
    pub id: WorkspaceId,
    pub idx: u8,
    pub label: String,
    /// Row is the effective workspace.
    pub selected: bool,
    pub focused: bool,
    pub window_count: usize,
    pub urgent_count: usize,
}

/// Sidebar rows whose label matches the current query.
pub fn workspace_rows(snapshot: &SwitcherSnapshot) -> Vec<WorkspaceRow> {
    let effective = effective_workspace_of(snapshot);
    let query = normalize_query(&snapshot.view.query);
    snapshot
        .state
        .workspaces
        .iter()
        .filter(|ws| workspace_matches(ws, &query))
        .map(|ws| {
            let windows = snapshot.state.windows_in(ws.id);
            WorkspaceRow {
                id: ws.id,
                idx: ws.idx,
                label: ws.label(),
                selected: Some(ws.id) == effective,
                focused: ws.is_focused,
                window_count: windows.len(),
                urgent_count: windows.iter().filter(|w| w.is_urgent).count(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One window card in the grid.
pub struct WindowCard {
    pub id: WindowId,
    pub app_id: Option<String>,
    pub app_name: String,
    pub glyph: String,
    /// Lowercase last app id segment, used as a styling hook.
    pub slug: String,
    /// Truncated title, or the app name for untitled windows.
    pub title: String,
    pub full_title: String,
    /// The window manager's focused window.
    pub focused: bool,
    /// Under the keyboard cursor.
    pub nav_focused: bool,
    pub floating: bool,
    pub urgent: bool,
    /// `None` when the window has no app id to look up.
    pub icon: Option<IconEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Window area for the effective workspace.
pub struct WindowGrid {
    pub workspace_label: String,
    pub cards: Vec<WindowCard>,
    /// Placeholder text when `cards` is empty.
    pub empty_text: Option<&'static str>,
}

impl WindowGrid {
    /// Workspace label followed by the card count.
    pub fn heading(&self) -> String {
        format!(
            "{} — {}",
            self.workspace_label,
            window_count_label(self.cards.len())
        )
    }
}

/// Builds the filtered cards of the effective workspace.
///
/// With an icon cache, each card's icon is resolved here, so the first render of an app id starts
/// its lookup.
pub fn window_grid(
    snapshot: &SwitcherSnapshot,
    catalog: &AppCatalog,
    navigation: &NavigationIndex,
    icons: Option<&IconCache>,
    title_max_chars: usize,
) -> WindowGrid {
    let workspace_label = workspace_label(&snapshot.state, effective_workspace_of(snapshot));
    let cursor = navigation.current();
    let cards: Vec<WindowCard> = visible_windows(snapshot, catalog)
        .into_iter()
        .map(|window| window_card(snapshot, window, catalog, cursor, icons, title_max_chars))
        .collect();

    let empty_text = match (cards.is_empty(), snapshot.view.query.trim().is_empty()) {
        (false, _) => None,
        (true, true) => Some("no windows"),
        (true, false) => Some("no matches"),
    };

    WindowGrid {
        workspace_label,
        cards,
        empty_text,
    }
}

fn window_card(
    snapshot: &SwitcherSnapshot,
    window: &Window,
    catalog: &AppCatalog,
    cursor: Option<WindowId>,
    icons: Option<&IconCache>,
    title_max_chars: usize,
) -> WindowCard {
    let app_id = window.app_id.as_deref().filter(|id| !id.is_empty());
    let display = catalog.resolve(app_id);
    let full_title = window.title.clone().unwrap_or_default();
    let title = if full_title.is_empty() {
        truncate_title(&display.name, title_max_chars)
    } else {
        truncate_title(&full_title, title_max_chars)
    };

    WindowCard {
        id: window.id,
        app_id: app_id.map(str::to_string),
        slug: app_slug(app_id),
        app_name: display.name.into_owned(),
        glyph: display.glyph.into_owned(),
        title,
        full_title,
        focused: snapshot.state.focused_window_id == Some(window.id),
        nav_focused: cursor == Some(window.id),
        floating: window.is_floating,
        urgent: window.is_urgent,
        icon: app_id.map(|id| match icons {
            Some(cache) => cache.resolve(id),
            None => IconEntry::Unresolved,
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One column of the layout strip.
pub struct LayoutColumn {
    pub idx: u8,
    /// Column is the effective workspace.
    pub active: bool,
    pub has_windows: bool,
    pub tooltip: String,
}

/// One column per workspace, in list order.
pub fn layout_strip(snapshot: &SwitcherSnapshot) -> Vec<LayoutColumn> {
    let effective = effective_workspace_of(snapshot);
    snapshot
        .state
        .workspaces
        .iter()
        .map(|ws| {
            let count = snapshot.state.windows_in(ws.id).len();
            let name = ws.name.as_deref().filter(|name| !name.is_empty()).unwrap_or("—");
            LayoutColumn {
                idx: ws.idx,
                active: Some(ws.id) == effective,
                has_windows: count > 0,
                tooltip: format!("ws {}: {name} ({count} windows)", ws.idx),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Entry of the "move to workspace" popup.
pub struct MoveTarget {
    pub idx: u8,
    pub label: String,
}

pub fn move_targets(snapshot: &SwitcherSnapshot) -> Vec<MoveTarget> {
    snapshot
        .state
        .workspaces
        .iter()
        .map(|ws| MoveTarget {
            idx: ws.idx,
            label: ws.label(),
        })
        .collect()
}
