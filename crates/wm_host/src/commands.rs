//! Outbound window-manager command contracts and adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::ipc::{StatePatch, WindowId};

/// Object-safe boxed future used by [`WmCommandService`] async methods.
pub type WmCommandFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Fire-and-forget actions the switcher asks the window manager to perform.
pub enum WmCommand {
    /// Focus the workspace at 1-based display `index`.
    FocusWorkspace {
        /// 1-based workspace display index.
        index: u8,
    },
    /// Focus a window.
    FocusWindow {
        /// Window to focus.
        id: WindowId,
    },
    /// Ask a window to close.
    CloseWindow {
        /// Window to close.
        id: WindowId,
    },
    /// Move a window to the workspace at 1-based display `workspace_index`, without following it.
    MoveWindowToWorkspace {
        /// Window to move.
        window_id: WindowId,
        /// 1-based target workspace display index.
        workspace_index: u8,
    },
}

impl WmCommand {
    /// Stable command name used in diagnostics; matches the backend's command handler names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FocusWorkspace { .. } => "focus_workspace",
            Self::FocusWindow { .. } => "focus_window",
            Self::CloseWindow { .. } => "close_window",
            Self::MoveWindowToWorkspace { .. } => "move_window_to_workspace",
        }
    }
}

/// Host service executing window-manager actions and serving the bootstrap state.
pub trait WmCommandService {
    /// Focuses the workspace at 1-based display `index`.
    fn focus_workspace<'a>(&'a self, index: u8) -> WmCommandFuture<'a, Result<(), String>>;

    /// Focuses window `id`.
    fn focus_window<'a>(&'a self, id: WindowId) -> WmCommandFuture<'a, Result<(), String>>;

    /// Closes window `id`.
    fn close_window<'a>(&'a self, id: WindowId) -> WmCommandFuture<'a, Result<(), String>>;

    /// Moves `window_id` to the workspace at 1-based display `workspace_index`.
    fn move_window_to_workspace<'a>(
        &'a self,
        window_id: WindowId,
        workspace_index: u8,
    ) -> WmCommandFuture<'a, Result<(), String>>;

    /// Fetches the full state used once to seed the snapshot at startup.
    fn get_state<'a>(&'a self) -> WmCommandFuture<'a, Result<StatePatch, String>>;
}

/// Routes a [`WmCommand`] value to the matching [`WmCommandService`] method.
///
/// # Errors
///
/// Returns whatever error the service reports for the command.
pub async fn run_command_with<S: WmCommandService + ?Sized>(
    service: &S,
    command: WmCommand,
) -> Result<(), String> {
    match command {
        WmCommand::FocusWorkspace { index } => service.focus_workspace(index).await,
        WmCommand::FocusWindow { id } => service.focus_window(id).await,
        WmCommand::CloseWindow { id } => service.close_window(id).await,
        WmCommand::MoveWindowToWorkspace {
            window_id,
            workspace_index,
        } => {
            service
                .move_window_to_workspace(window_id, workspace_index)
                .await
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op command service for unsupported targets; every command succeeds and the state is empty.
pub struct NoopWmCommandService;

impl WmCommandService for NoopWmCommandService {
    fn focus_workspace<'a>(&'a self, _index: u8) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn focus_window<'a>(&'a self, _id: WindowId) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn close_window<'a>(&'a self, _id: WindowId) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn move_window_to_workspace<'a>(
        &'a self,
        _window_id: WindowId,
        _workspace_index: u8,
    ) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn get_state<'a>(&'a self) -> WmCommandFuture<'a, Result<StatePatch, String>> {
        Box::pin(async { Ok(StatePatch::default()) })
    }
}

#[derive(Debug, Default)]
struct MemoryCommandLog {
    issued: Vec<WmCommand>,
    state: StatePatch,
    failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory command service that records issued commands and serves a canned state.
///
/// Clones share the same log, so a test can keep one handle while the runtime owns another.
pub struct MemoryWmCommandService {
    inner: Rc<RefCell<MemoryCommandLog>>,
}

impl MemoryWmCommandService {
    /// Creates a service whose `get_state` returns `state`.
    pub fn with_state(state: StatePatch) -> Self {
        let service = Self::default();
        service.inner.borrow_mut().state = state;
        service
    }

    /// Makes every subsequent call fail with `message`; `None` restores success.
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.borrow_mut().failure = message.map(str::to_string);
    }

    /// Returns every command issued so far, in call order.
    pub fn issued(&self) -> Vec<WmCommand> {
        self.inner.borrow().issued.clone()
    }

    fn record(&self, command: WmCommand) -> Result<(), String> {
        let mut inner = self.inner.borrow_mut();
        inner.issued.push(command);
        match &inner.failure {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

impl WmCommandService for MemoryWmCommandService {
    fn focus_workspace<'a>(&'a self, index: u8) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async move { self.record(WmCommand::FocusWorkspace { index }) })
    }

    fn focus_window<'a>(&'a self, id: WindowId) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async move { self.record(WmCommand::FocusWindow { id }) })
    }

    fn close_window<'a>(&'a self, id: WindowId) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async move { self.record(WmCommand::CloseWindow { id }) })
    }

    fn move_window_to_workspace<'a>(
        &'a self,
        window_id: WindowId,
        workspace_index: u8,
    ) -> WmCommandFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.record(WmCommand::MoveWindowToWorkspace {
                window_id,
                workspace_index,
            })
        })
    }

    fn get_state<'a>(&'a self) -> WmCommandFuture<'a, Result<StatePatch, String>> {
        Box::pin(async move {
            let inner = self.inner.borrow();
            match &inner.failure {
                Some(message) => Err(message.clone()),
                None => Ok(inner.state.clone()),
            }
        })
    }
}
