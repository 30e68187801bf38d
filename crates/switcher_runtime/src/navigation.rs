//! Keyboard cursor over the windows currently shown in the grid.

use wm_host::{WindowId, WmCommand, WorkspaceId};

use crate::{
    app_catalog::AppCatalog,
    effect_executor::CommandDispatcher,
    model::SwitcherSnapshot,
    search::visible_windows,
    selection::effective_workspace_of,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct NavigationScope {
    selected: Option<WorkspaceId>,
    workspace: Option<WorkspaceId>,
    query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered list of navigable window ids plus a wrapping cursor.
///
/// The list is the filtered contents of the effective workspace. Rebuilding within the same
/// scope keeps the cursor on the same window when it survives. The scope is the explicit selection,
/// the effective workspace, and the stored query text before case folding. Any change to one of
/// them resets the cursor to the first item.
pub struct NavigationIndex {
    items: Vec<WindowId>,
    index: usize,
    scope: Option<NavigationScope>,
}

impl NavigationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the item list from `snapshot`.
    pub fn rebuild(&mut self, snapshot: &SwitcherSnapshot, catalog: &AppCatalog) {
        let scope = NavigationScope {
            selected: snapshot.view.selected_workspace_id,
            workspace: effective_workspace_of(snapshot),
            query: snapshot.view.query.clone(),
        };
        let items: Vec<WindowId> = visible_windows(snapshot, catalog)
            .iter()
            .map(|window| window.id)
            .collect();

        self.index = if self.scope.as_ref() == Some(&scope) {
            self.current()
                .and_then(|id| items.iter().position(|item| *item == id))
                .unwrap_or(0)
        } else {
            0
        };
        self.items = items;
        self.scope = Some(scope);
    }

    /// Moves the cursor by `delta`, wrapping at both ends. No-op when empty.
    pub fn advance(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        let step = delta.rem_euclid(len as isize) as usize;
        self.index = (self.index + step) % len;
    }

    /// Highlighted window id.
    pub fn current(&self) -> Option<WindowId> {
        self.items.get(self.index).copied()
    }

    /// Focuses the highlighted window and hides the overlay once that succeeds.
    ///
    /// Local state is left alone; the resulting focus change arrives through the event stream.
    pub fn activate(&self, dispatcher: &CommandDispatcher) -> Option<WindowId> {
        let id = self.current()?;
        dispatcher.dispatch_then_hide(WmCommand::FocusWindow { id });
        Some(id)
    }

    pub fn items(&self) -> &[WindowId] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::LocalPool;
    use pretty_assertions::assert_eq;
    use wm_host::{MemoryOverlayService, MemoryWmCommandService, Window, Workspace};

    use super::*;
    use crate::{
        model::{ViewState, WmState},
        window_manager::group_by_workspace,
    };

    fn app_window(id: u64, workspace_id: u64, app_id: &str) -> Window {
        let mut window = Window::new(id, Some(workspace_id));
        window.app_id = Some(app_id.to_string());
        window
    }

    fn snapshot(windows: Vec<Window>, selected: u64, query: &str) -> SwitcherSnapshot {
        SwitcherSnapshot {
            state: Rc::new(WmState {
                workspaces: vec![Workspace::new(1, 1), Workspace::new(2, 2)],
                windows_by_workspace: group_by_workspace(windows),
                ..WmState::default()
            }),
            view: ViewState {
                selected_workspace_id: Some(WorkspaceId(selected)),
                query: query.to_string(),
            },
        }
    }

    fn three_windows() -> Vec<Window> {
        vec![
            app_window(10, 1, "kitty"),
            app_window(11, 1, "firefox"),
            app_window(12, 1, "foot"),
            app_window(20, 2, "slack"),
        ]
    }

    #[test]
    fn advance_wraps_in_both_directions() {
        let mut nav = NavigationIndex::new();
        nav.rebuild(&snapshot(three_windows(), 1, ""), &AppCatalog::builtin());
        assert_eq!(nav.items(), &[WindowId(10), WindowId(11), WindowId(12)]);

        nav.advance(-1);
        assert_eq!(nav.current(), Some(WindowId(12)));
        nav.advance(1);
        assert_eq!(nav.current(), Some(WindowId(10)));
        nav.advance(7);
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn advance_on_empty_index_is_a_noop() {
        let mut nav = NavigationIndex::new();
        nav.advance(1);
        nav.advance(-3);
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn advance_handles_extreme_deltas() {
        let mut nav = NavigationIndex::new();
        nav.rebuild(&snapshot(three_windows(), 1, ""), &AppCatalog::builtin());
        nav.advance(1);
        nav.advance(isize::MAX);
        assert_eq!(nav.current(), Some(WindowId(12)));
        nav.advance(isize::MIN);
        assert_eq!(nav.current(), Some(WindowId(10)));
        nav.advance(isize::MIN + 1);
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn selection_or_query_edits_through_the_engine_reset_the_cursor() {
        use crate::engine::ReconciliationEngine;
        use wm_host::WmEvent;

        let catalog = AppCatalog::builtin();
        let mut engine = ReconciliationEngine::new();
        let mut focused = Workspace::new(1, 1);
        focused.is_focused = true;
        engine.apply_event(WmEvent::WorkspacesChanged {
            workspaces: vec![focused, Workspace::new(2, 2)],
        });
        engine.apply_event(WmEvent::WindowsChanged {
            windows: vec![
                app_window(10, 1, "firefox"),
                app_window(11, 1, "firefox"),
                app_window(12, 1, "firefox"),
            ],
        });

        let mut nav = NavigationIndex::new();
        nav.rebuild(&engine.snapshot(), &catalog);
        nav.advance(2);
        assert_eq!(nav.index(), 2);

        engine.select_workspace(Some(WorkspaceId(1)));
        nav.rebuild(&engine.snapshot(), &catalog);
        assert_eq!(nav.index(), 0);

        engine.set_query("fire");
        nav.rebuild(&engine.snapshot(), &catalog);
        nav.advance(2);
        engine.set_query("FIRE");
        nav.rebuild(&engine.snapshot(), &catalog);
        assert_eq!(nav.items().len(), 3);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn cursor_follows_its_window_within_the_same_scope() {
        let catalog = AppCatalog::builtin();
        let mut nav = NavigationIndex::new();
        nav.rebuild(&snapshot(three_windows(), 1, ""), &catalog);
        nav.advance(2);
        assert_eq!(nav.current(), Some(WindowId(12)));

        let mut windows = three_windows();
        windows.remove(0);
        nav.rebuild(&snapshot(windows, 1, ""), &catalog);
        assert_eq!(nav.current(), Some(WindowId(12)));
        assert_eq!(nav.index(), 1);

        nav.rebuild(&snapshot(vec![app_window(10, 1, "kitty")], 1, ""), &catalog);
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn scope_change_resets_the_cursor() {
        let catalog = AppCatalog::builtin();
        let mut nav = NavigationIndex::new();
        nav.rebuild(&snapshot(three_windows(), 1, ""), &catalog);
        nav.advance(1);

        nav.rebuild(&snapshot(three_windows(), 1, "f"), &catalog);
        assert_eq!(nav.items(), &[WindowId(11), WindowId(12)]);
        assert_eq!(nav.index(), 0);

        nav.advance(1);
        nav.rebuild(&snapshot(three_windows(), 2, "f"), &catalog);
        assert!(nav.is_empty());
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn query_matching_a_display_name_keeps_the_window() {
        let mut nav = NavigationIndex::new();
        nav.rebuild(
            &snapshot(vec![app_window(30, 1, "org.mozilla.firefox")], 1, "Fire"),
            &AppCatalog::builtin(),
        );
        assert_eq!(nav.items(), &[WindowId(30)]);

        let mut nav = NavigationIndex::new();
        nav.rebuild(
            &snapshot(vec![app_window(31, 1, "io.example.browser")], 1, "fire"),
            &AppCatalog::with_overrides([(
                "io.example.browser",
                crate::app_catalog::AppDisplay::new("Firewall Browser", "B"),
            )]),
        );
        assert_eq!(nav.items(), &[WindowId(31)]);
    }

    #[test]
    fn activate_focuses_the_current_window() {
        let mut pool = LocalPool::new();
        let service = MemoryWmCommandService::default();
        let overlay = MemoryOverlayService::default();
        let dispatcher = CommandDispatcher::new(
            Rc::new(service.clone()),
            Rc::new(overlay.clone()),
            pool.spawner(),
        );
        let mut nav = NavigationIndex::new();
        assert_eq!(nav.activate(&dispatcher), None);

        nav.rebuild(&snapshot(three_windows(), 1, ""), &AppCatalog::builtin());
        nav.advance(1);
        assert_eq!(nav.activate(&dispatcher), Some(WindowId(11)));
        pool.run_until_stalled();

        assert_eq!(
            service.issued(),
            vec![WmCommand::FocusWindow { id: WindowId(11) }]
        );
        assert_eq!(overlay.hide_count(), 1);
    }
}
