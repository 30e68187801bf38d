//! Overlay window controls the switcher asks its host shell to perform.

use std::{cell::RefCell, rc::Rc};

use crate::ipc::WindowId;

/// Host-side controls for the switcher overlay window.
pub trait OverlayService {
    /// Hides the overlay.
    fn hide(&self);

    /// Opens the "move to workspace" popup for `window_id`.
    fn open_move_popup(&self, window_id: WindowId);
}

#[derive(Debug, Clone, Copy, Default)]
/// Overlay service for headless hosts.
pub struct NoopOverlayService;

impl OverlayService for NoopOverlayService {
    fn hide(&self) {}

    fn open_move_popup(&self, _window_id: WindowId) {}
}

#[derive(Debug, Default)]
struct OverlayLog {
    hide_count: usize,
    move_popups: Vec<WindowId>,
}

#[derive(Debug, Clone, Default)]
/// Overlay service that records requests; clones share the same log.
pub struct MemoryOverlayService {
    inner: Rc<RefCell<OverlayLog>>,
}

impl MemoryOverlayService {
    /// How many times [`OverlayService::hide`] was called.
    pub fn hide_count(&self) -> usize {
        self.inner.borrow().hide_count
    }

    /// Windows for which a move popup was requested, in order.
    pub fn move_popups(&self) -> Vec<WindowId> {
        self.inner.borrow().move_popups.clone()
    }
}

impl OverlayService for MemoryOverlayService {
    fn hide(&self) {
        self.inner.borrow_mut().hide_count += 1;
    }

    fn open_move_popup(&self, window_id: WindowId) {
        self.inner.borrow_mut().move_popups.push(window_id);
    }
}
