//! Host-bundle model handed to the switcher runtime at construction.

use std::rc::Rc;

use crate::{
    IconService, NoopIconService, NoopOverlayService, NoopWmCommandService, OverlayService,
    WmCommandService,
};

#[derive(Clone)]
/// Service bundle for everything the switcher core delegates to its host.
pub struct WmHostServices {
    /// Window-manager actions and bootstrap state.
    pub commands: Rc<dyn WmCommandService>,
    /// Application icon lookup.
    pub icons: Rc<dyn IconService>,
    /// Overlay window controls.
    pub overlay: Rc<dyn OverlayService>,
}

impl WmHostServices {
    /// Assembles a bundle from concrete adapters.
    pub fn new(
        commands: Rc<dyn WmCommandService>,
        icons: Rc<dyn IconService>,
        overlay: Rc<dyn OverlayService>,
    ) -> Self {
        Self {
            commands,
            icons,
            overlay,
        }
    }

    /// Bundle of no-op adapters for headless runs and baseline tests.
    pub fn noop() -> Self {
        Self::new(
            Rc::new(NoopWmCommandService),
            Rc::new(NoopIconService),
            Rc::new(NoopOverlayService),
        )
    }
}

impl Default for WmHostServices {
    fn default() -> Self {
        Self::noop()
    }
}
