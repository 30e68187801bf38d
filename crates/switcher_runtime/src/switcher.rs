//! Switcher facade wiring the engine, navigation cursor, icon cache, and command dispatch.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use futures::executor::LocalSpawner;
use serde_json::Value;
use wm_host::{
    EventDecodeError, StatePatch, WindowId, WmCommand, WmCommandService, WmEvent, WmHostServices,
    WorkspaceId,
};

use crate::{
    app_catalog::AppCatalog,
    config::SwitcherConfig,
    effect_executor::CommandDispatcher,
    engine::{ReconciliationEngine, SubscriptionId},
    icon_cache::{IconCache, IconEntry},
    input::{map_key, KeyAction, KeyOutcome, SwitcherKey},
    model::SwitcherSnapshot,
    navigation::NavigationIndex,
    view::{self, HeaderMeta, LayoutColumn, MoveTarget, WindowGrid, WorkspaceRow},
};

/// Client-side switcher core: one instance per overlay.
///
/// The navigation index is rebuilt by an engine subscription, so it is current by the time any
/// mutating call returns.
pub struct Switcher {
    engine: ReconciliationEngine,
    navigation: Rc<RefCell<NavigationIndex>>,
    catalog: Rc<AppCatalog>,
    icons: IconCache,
    dispatcher: CommandDispatcher,
    config: SwitcherConfig,
}

impl Switcher {
    pub fn new(config: SwitcherConfig, services: WmHostServices, spawner: LocalSpawner) -> Self {
        let catalog = Rc::new(config.catalog());
        let navigation = Rc::new(RefCell::new(NavigationIndex::new()));

        let mut engine = ReconciliationEngine::new();
        {
            let navigation = Rc::clone(&navigation);
            let catalog = Rc::clone(&catalog);
            engine.subscribe(move |snapshot| {
                navigation.borrow_mut().rebuild(snapshot, &catalog);
            });
        }

        Self {
            engine,
            navigation,
            catalog,
            icons: IconCache::new(services.icons, spawner.clone()),
            dispatcher: CommandDispatcher::new(services.commands, services.overlay, spawner),
            config,
        }
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn catalog(&self) -> &AppCatalog {
        &self.catalog
    }

    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    pub fn engine(&self) -> &ReconciliationEngine {
        &self.engine
    }

    pub fn navigation(&self) -> Ref<'_, NavigationIndex> {
        self.navigation.borrow()
    }

    /// Command service used for the bootstrap `get_state` call.
    pub fn commands(&self) -> &Rc<dyn WmCommandService> {
        self.dispatcher.service()
    }

    pub fn snapshot(&self) -> SwitcherSnapshot {
        self.engine.snapshot()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl Fn(&SwitcherSnapshot) + 'static,
    ) -> SubscriptionId {
        self.engine.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Registers a callback for settled icon lookups so hosts can patch placeholders.
    pub fn on_icon_resolved(&self, listener: impl Fn(&str, &IconEntry) + 'static) {
        self.icons.set_listener(listener);
    }

    pub fn apply_event(&mut self, event: WmEvent) {
        self.engine.apply_event(event);
    }

    /// # Errors
    ///
    /// See [`ReconciliationEngine::apply_raw_event`].
    pub fn apply_raw_event(&mut self, raw: &Value) -> Result<(), EventDecodeError> {
        self.engine.apply_raw_event(raw)
    }

    pub fn set_state(&mut self, patch: StatePatch) {
        self.engine.set_state(patch);
    }

    pub fn set_query(&mut self, query: &str) {
        self.engine.set_query(query);
    }

    pub fn select_workspace(&mut self, id: WorkspaceId) {
        self.engine.select_workspace(Some(id));
    }

    /// Hook for the overlay regaining visibility.
    pub fn overlay_shown(&mut self) {
        if self.config.clear_query_on_show {
            self.engine.reset_for_overlay_shown();
        }
    }

    /// Applies the overlay keyboard map.
    pub fn handle_key(&mut self, key: SwitcherKey, search_focused: bool) -> KeyOutcome {
        match map_key(key, search_focused) {
            KeyAction::Ignore => KeyOutcome::Ignored,
            KeyAction::HideOverlay => {
                self.dispatcher.overlay().hide();
                KeyOutcome::HideOverlay
            }
            KeyAction::Advance(delta) => {
                let mut navigation = self.navigation.borrow_mut();
                if navigation.is_empty() {
                    return KeyOutcome::Ignored;
                }
                navigation.advance(delta);
                KeyOutcome::Navigated
            }
            KeyAction::StepWorkspace(delta) => {
                if self.engine.step_workspace_selection(delta) {
                    KeyOutcome::WorkspaceSelected
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyAction::ActivateCurrent => self
                .navigation
                .borrow()
                .activate(&self.dispatcher)
                .map_or(KeyOutcome::Ignored, KeyOutcome::Activated),
            KeyAction::CloseCurrent => match self.navigation.borrow().current() {
                Some(id) => {
                    self.close_window(id);
                    KeyOutcome::Closed(id)
                }
                None => KeyOutcome::Ignored,
            },
            KeyAction::MoveCurrent => match self.navigation.borrow().current() {
                Some(id) => {
                    self.dispatcher.overlay().open_move_popup(id);
                    KeyOutcome::OpenMovePopup(id)
                }
                None => KeyOutcome::Ignored,
            },
            KeyAction::FocusWorkspace(index) => {
                self.focus_workspace(index);
                KeyOutcome::FocusWorkspace(index)
            }
        }
    }

    /// Focuses workspace `index` (1-based) and hides the overlay on success.
    pub fn focus_workspace(&self, index: u8) {
        self.dispatcher
            .dispatch_then_hide(WmCommand::FocusWorkspace { index });
    }

    /// Focuses `id` and hides the overlay on success.
    pub fn focus_window(&self, id: WindowId) {
        self.dispatcher
            .dispatch_then_hide(WmCommand::FocusWindow { id });
    }

    pub fn close_window(&self, id: WindowId) {
        self.dispatcher.dispatch(WmCommand::CloseWindow { id });
    }

    /// Moves `window_id` to the workspace at display index `workspace_index`.
    pub fn move_window(&self, window_id: WindowId, workspace_index: u8) {
        self.dispatcher.dispatch(WmCommand::MoveWindowToWorkspace {
            window_id,
            workspace_index,
        });
    }

    pub fn header_meta(&self) -> HeaderMeta {
        view::header_meta(&self.snapshot())
    }

    pub fn workspace_rows(&self) -> Vec<WorkspaceRow> {
        view::workspace_rows(&self.snapshot())
    }

    /// Grid for the effective workspace; starts icon lookups for newly seen app ids.
    pub fn window_grid(&self) -> WindowGrid {
        view::window_grid(
            &self.snapshot(),
            &self.catalog,
            &self.navigation.borrow(),
            Some(&self.icons),
            self.config.title_max_chars,
        )
    }

    pub fn layout_strip(&self) -> Vec<LayoutColumn> {
        view::layout_strip(&self.snapshot())
    }

    pub fn move_targets(&self) -> Vec<MoveTarget> {
        view::move_targets(&self.snapshot())
    }
}
