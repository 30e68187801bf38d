//! Event transitions and the bootstrap merge for the window-manager snapshot.

use wm_host::{StatePatch, WmEvent};

use crate::{
    model::{ViewState, WmState},
    window_manager::{
        dedupe_windows, first_focused_window, first_focused_workspace, group_by_workspace,
        normalize_focus_flags, remove_window, set_window_focus, upsert_window,
    },
};

/// Applies one [`WmEvent`] to the server-truth state.
///
/// This is the authoritative transition function of the reconciliation engine. Events are applied
/// literally in the order given; no causal reordering is attempted. Every transition ends with the
/// single-focus normalization pass, so at most one workspace and one window carry a focus flag.
pub fn reduce_wm_state(state: &mut WmState, event: WmEvent) {
    match event {
        WmEvent::WorkspacesChanged { workspaces } => {
            state.focused_workspace_id =
                first_focused_workspace(&workspaces).or(state.focused_workspace_id);
            state.workspaces = workspaces;
        }
        WmEvent::WorkspaceActivated { id, focused } => {
            for ws in &mut state.workspaces {
                ws.is_active = ws.id == id;
                if focused {
                    ws.is_focused = ws.id == id;
                }
            }
            if focused {
                state.focused_workspace_id = Some(id);
            }
        }
        WmEvent::WindowsChanged { windows } => {
            state.focused_window_id = first_focused_window(&windows).or(state.focused_window_id);
            state.windows_by_workspace = group_by_workspace(windows);
        }
        WmEvent::WindowOpenedOrChanged { window } => {
            let window_id = window.id;
            let takes_focus = window.is_focused;
            upsert_window(&mut state.windows_by_workspace, window);
            if takes_focus {
                state.focused_window_id = Some(window_id);
                set_window_focus(&mut state.windows_by_workspace, Some(window_id));
            }
        }
        WmEvent::WindowClosed { id } => {
            remove_window(&mut state.windows_by_workspace, id);
        }
        WmEvent::WindowFocusChanged { id } => {
            state.focused_window_id = id;
            set_window_focus(&mut state.windows_by_workspace, id);
        }
    }

    normalize_focus_flags(state);
}

/// Merges a bootstrap payload over the current state, then seeds the selection.
///
/// Fields absent from `patch` keep their current values. When no explicit selection exists after
/// the merge, the selection defaults to the focused workspace; this is the only place selection is
/// derived from focus.
pub fn merge_state_patch(state: &mut WmState, view: &mut ViewState, patch: StatePatch) {
    if let Some(workspaces) = patch.workspaces {
        state.workspaces = workspaces;
    }
    if let Some(mut buckets) = patch.windows_by_workspace {
        dedupe_windows(&mut buckets);
        state.windows_by_workspace = buckets;
    }
    if let Some(window_id) = patch.focused_window_id {
        state.focused_window_id = Some(window_id);
    }
    if let Some(workspace_id) = patch.focused_workspace_id {
        state.focused_workspace_id = Some(workspace_id);
    }
    if let Some(selected) = patch.selected_workspace_id {
        view.selected_workspace_id = Some(selected);
    }
    if view.selected_workspace_id.is_none() {
        view.selected_workspace_id = state.focused_workspace_id;
    }

    normalize_focus_flags(state);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wm_host::{Window, WindowId, Workspace, WorkspaceId};

    use super::*;

    fn workspace(id: u64, idx: u8, focused: bool) -> Workspace {
        let mut ws = Workspace::new(id, idx);
        ws.is_focused = focused;
        ws.is_active = focused;
        ws
    }

    fn window(id: u64, workspace_id: u64, focused: bool) -> Window {
        let mut w = Window::new(id, Some(workspace_id));
        w.is_focused = focused;
        w
    }

    fn ids(state: &WmState, workspace_id: u64) -> Vec<u64> {
        state
            .windows_in(WorkspaceId(workspace_id))
            .iter()
            .map(|w| w.id.0)
            .collect()
    }

    fn seeded() -> WmState {
        let mut state = WmState::default();
        reduce_wm_state(
            &mut state,
            WmEvent::WorkspacesChanged {
                workspaces: vec![workspace(1, 1, true), workspace(2, 2, false)],
            },
        );
        reduce_wm_state(
            &mut state,
            WmEvent::WindowsChanged {
                windows: vec![window(10, 1, true), window(11, 2, false)],
            },
        );
        state
    }

    #[test]
    fn workspaces_changed_takes_flagged_focus_or_keeps_previous() {
        let mut state = seeded();
        assert_eq!(state.focused_workspace_id, Some(WorkspaceId(1)));

        reduce_wm_state(
            &mut state,
            WmEvent::WorkspacesChanged {
                workspaces: vec![workspace(1, 1, false), workspace(2, 2, false)],
            },
        );
        assert_eq!(state.focused_workspace_id, Some(WorkspaceId(1)));

        reduce_wm_state(
            &mut state,
            WmEvent::WorkspacesChanged {
                workspaces: vec![workspace(1, 1, false), workspace(2, 2, true)],
            },
        );
        assert_eq!(state.focused_workspace_id, Some(WorkspaceId(2)));
    }

    #[test]
    fn workspace_activated_with_focus_moves_the_single_focus_flag() {
        let mut state = seeded();
        reduce_wm_state(
            &mut state,
            WmEvent::WorkspaceActivated {
                id: WorkspaceId(2),
                focused: true,
            },
        );

        assert!(!state.workspaces[0].is_focused);
        assert!(state.workspaces[1].is_focused);
        assert!(state.workspaces[1].is_active);
        assert!(!state.workspaces[0].is_active);
        assert_eq!(state.focused_workspace_id, Some(WorkspaceId(2)));
    }

    #[test]
    fn workspace_activated_without_focus_only_touches_active_flags() {
        let mut state = seeded();
        reduce_wm_state(
            &mut state,
            WmEvent::WorkspaceActivated {
                id: WorkspaceId(2),
                focused: false,
            },
        );

        assert!(state.workspaces[0].is_focused);
        assert!(!state.workspaces[0].is_active);
        assert!(state.workspaces[1].is_active);
        assert_eq!(state.focused_workspace_id, Some(WorkspaceId(1)));
    }

    #[test]
    fn windows_changed_without_flag_retains_previous_focus_pointer() {
        let mut state = seeded();
        reduce_wm_state(
            &mut state,
            WmEvent::WindowsChanged {
                windows: vec![window(11, 2, false), Window::new(12, None)],
            },
        );

        assert_eq!(state.focused_window_id, Some(WindowId(10)));
        assert_eq!(ids(&state, 2), vec![11]);
        assert_eq!(ids(&state, 0), vec![12]);
        assert!(ids(&state, 1).is_empty());
    }

    #[test]
    fn window_moved_to_another_workspace_is_appended_after_existing_members() {
        let mut state = seeded();
        reduce_wm_state(
            &mut state,
            WmEvent::WindowOpenedOrChanged {
                window: window(10, 2, true),
            },
        );

        assert!(ids(&state, 1).is_empty());
        assert_eq!(ids(&state, 2), vec![11, 10]);
        assert_eq!(state.total_windows(), 2);
    }

    #[test]
    fn focused_window_opening_takes_over_the_focus_flag() {
        let mut state = seeded();
        reduce_wm_state(
            &mut state,
            WmEvent::WindowOpenedOrChanged {
                window: window(12, 1, true),
            },
        );

        assert_eq!(state.focused_window_id, Some(WindowId(12)));
        let flagged: Vec<u64> = state
            .windows_by_workspace
            .values()
            .flatten()
            .filter(|w| w.is_focused)
            .map(|w| w.id.0)
            .collect();
        assert_eq!(flagged, vec![12]);
    }

    #[test]
    fn closing_an_unknown_window_leaves_state_unchanged() {
        let mut state = seeded();
        let before = state.clone();
        reduce_wm_state(&mut state, WmEvent::WindowClosed { id: WindowId(999) });
        assert_eq!(state, before);

        reduce_wm_state(&mut state, WmEvent::WindowClosed { id: WindowId(11) });
        assert!(ids(&state, 2).is_empty());
    }

    #[test]
    fn focus_change_to_none_clears_every_window_flag() {
        let mut state = seeded();
        reduce_wm_state(&mut state, WmEvent::WindowFocusChanged { id: None });
        assert_eq!(state.focused_window_id, None);
        assert!(state
            .windows_by_workspace
            .values()
            .flatten()
            .all(|w| !w.is_focused));

        reduce_wm_state(
            &mut state,
            WmEvent::WindowFocusChanged {
                id: Some(WindowId(11)),
            },
        );
        assert_eq!(state.window(WindowId(11)).map(|w| w.is_focused), Some(true));
        assert_eq!(state.window(WindowId(10)).map(|w| w.is_focused), Some(false));
    }

    #[test]
    fn merge_defaults_selection_to_focus_only_when_unset() {
        let mut state = WmState::default();
        let mut view = ViewState::default();
        merge_state_patch(
            &mut state,
            &mut view,
            StatePatch {
                workspaces: Some(vec![workspace(1, 1, false), workspace(2, 2, true)]),
                focused_workspace_id: Some(WorkspaceId(2)),
                ..StatePatch::default()
            },
        );
        assert_eq!(view.selected_workspace_id, Some(WorkspaceId(2)));

        let mut view = ViewState {
            selected_workspace_id: Some(WorkspaceId(1)),
            query: String::new(),
        };
        merge_state_patch(
            &mut state,
            &mut view,
            StatePatch {
                focused_workspace_id: Some(WorkspaceId(2)),
                ..StatePatch::default()
            },
        );
        assert_eq!(view.selected_workspace_id, Some(WorkspaceId(1)));
        assert_eq!(state.workspaces.len(), 2);
    }
}
