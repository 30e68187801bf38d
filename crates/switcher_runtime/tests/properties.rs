use std::{collections::HashSet, rc::Rc};

use futures::executor::LocalPool;
use proptest::prelude::*;
use switcher_runtime::{
    effective_workspace, AppCatalog, IconCache, NavigationIndex, ReconciliationEngine,
    SwitcherSnapshot, ViewState, WmState,
};
use wm_host::{MemoryIconService, Window, WindowId, WmEvent, Workspace, WorkspaceId};

fn workspace_strategy() -> impl Strategy<Value = Workspace> {
    (1u64..6, 1u8..10, any::<bool>(), any::<bool>()).prop_map(|(id, idx, focused, active)| {
        let mut ws = Workspace::new(id, idx);
        ws.is_focused = focused;
        ws.is_active = active;
        ws
    })
}

fn window_strategy() -> impl Strategy<Value = Window> {
    (1u64..8, proptest::option::of(1u64..6), any::<bool>()).prop_map(
        |(id, workspace_id, focused)| {
            let mut window = Window::new(id, workspace_id);
            window.is_focused = focused;
            window
        },
    )
}

fn event_strategy() -> impl Strategy<Value = WmEvent> {
    prop_oneof![
        prop::collection::vec(workspace_strategy(), 0..5)
            .prop_map(|workspaces| WmEvent::WorkspacesChanged { workspaces }),
        (1u64..6, any::<bool>()).prop_map(|(id, focused)| WmEvent::WorkspaceActivated {
            id: WorkspaceId(id),
            focused,
        }),
        prop::collection::vec(window_strategy(), 0..6)
            .prop_map(|windows| WmEvent::WindowsChanged { windows }),
        window_strategy().prop_map(|window| WmEvent::WindowOpenedOrChanged { window }),
        (1u64..8).prop_map(|id| WmEvent::WindowClosed { id: WindowId(id) }),
        proptest::option::of(1u64..8).prop_map(|id| WmEvent::WindowFocusChanged {
            id: id.map(WindowId),
        }),
    ]
}

fn assert_invariants(state: &WmState) -> Result<(), TestCaseError> {
    let focused_workspaces = state.workspaces.iter().filter(|ws| ws.is_focused).count();
    prop_assert!(focused_workspaces <= 1);

    let all: Vec<&Window> = state.windows_by_workspace.values().flatten().collect();
    prop_assert!(all.iter().filter(|w| w.is_focused).count() <= 1);

    let unique: HashSet<WindowId> = all.iter().map(|w| w.id).collect();
    prop_assert_eq!(unique.len(), all.len());
    Ok(())
}

/// Navigation index over `windows`, all placed on the single workspace 1.
fn navigation_over(windows: Vec<Window>) -> NavigationIndex {
    let mut engine = ReconciliationEngine::new();
    engine.apply_event(WmEvent::WorkspacesChanged { workspaces: vec![Workspace::new(1, 1)] });
    engine.apply_event(WmEvent::WindowsChanged {
        windows: windows
            .into_iter()
            .map(|mut w| {
                w.workspace_id = Some(WorkspaceId(1));
                w
            })
            .collect(),
    });
    let snapshot: SwitcherSnapshot = engine.snapshot();
    let mut nav = NavigationIndex::new();
    nav.rebuild(&snapshot, &AppCatalog::builtin());
    nav
}

proptest! {
    #[test]
    fn moving_one_window_never_duplicates_it(
        workspace_ids in prop::collection::vec(proptest::option::of(1u64..6), 1..20),
    ) {
        let mut engine = ReconciliationEngine::new();
        for workspace_id in workspace_ids {
            engine.apply_event(WmEvent::WindowOpenedOrChanged {
                window: Window::new(42, workspace_id),
            });
            let holders = engine
                .state()
                .windows_by_workspace
                .values()
                .filter(|bucket| bucket.iter().any(|w| w.id == WindowId(42)))
                .count();
            prop_assert_eq!(holders, 1);
            prop_assert_eq!(engine.state().total_windows(), 1);
        }
    }

    #[test]
    fn single_focus_and_unique_ids_hold_after_any_event_sequence(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut engine = ReconciliationEngine::new();
        for event in events {
            engine.apply_event(event);
            assert_invariants(engine.state())?;
        }
    }

    #[test]
    fn effective_workspace_is_total_for_non_empty_lists(
        workspaces in prop::collection::vec(workspace_strategy(), 1..6),
    ) {
        let state = WmState { workspaces, ..WmState::default() };
        let chosen = effective_workspace(&state, &ViewState::default());
        prop_assert!(chosen.is_some());
        prop_assert!(state.workspaces.iter().any(|ws| Some(ws.id) == chosen));
    }

    #[test]
    fn advance_stays_in_bounds(
        windows in prop::collection::vec(window_strategy(), 0..8),
        deltas in prop::collection::vec(-20isize..20, 0..30),
    ) {
        let mut nav = navigation_over(windows);
        for delta in deltas {
            nav.advance(delta);
            if nav.is_empty() {
                prop_assert_eq!(nav.index(), 0);
                prop_assert_eq!(nav.current(), None);
            } else {
                prop_assert!(nav.index() < nav.len());
            }
        }
    }

    #[test]
    fn advance_stays_in_bounds_for_any_delta(
        windows in prop::collection::vec(window_strategy(), 1..8),
        deltas in prop::collection::vec(any::<isize>(), 1..30),
    ) {
        let mut nav = navigation_over(windows);
        let len = nav.len() as i128;
        let mut expected = 0i128;
        for delta in deltas {
            nav.advance(delta);
            expected = (expected + delta as i128).rem_euclid(len);
            prop_assert!(nav.index() < nav.len());
            prop_assert_eq!(nav.index() as i128, expected);
        }
    }

    #[test]
    fn repeated_icon_requests_fetch_once(repeats in 1usize..10) {
        let mut pool = LocalPool::new();
        let service = MemoryIconService::default();
        let cache = IconCache::new(Rc::new(service.clone()), pool.spawner());
        for _ in 0..repeats {
            cache.resolve("org.example.app");
        }
        pool.run_until_stalled();
        prop_assert_eq!(service.request_count("org.example.app"), 1);
    }
}
