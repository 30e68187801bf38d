//! Fire-and-forget executor for outbound window-manager commands.

use std::rc::Rc;

use futures::{executor::LocalSpawner, task::LocalSpawnExt};
use wm_host::{run_command_with, OverlayService, WmCommand, WmCommandService};

#[derive(Clone)]
/// Spawns window-manager commands on the local executor and logs their failures.
///
/// Command results never feed back into the snapshot; the window manager reports the outcome
/// through the event stream.
pub struct CommandDispatcher {
    service: Rc<dyn WmCommandService>,
    overlay: Rc<dyn OverlayService>,
    spawner: LocalSpawner,
}

impl CommandDispatcher {
    pub fn new(
        service: Rc<dyn WmCommandService>,
        overlay: Rc<dyn OverlayService>,
        spawner: LocalSpawner,
    ) -> Self {
        Self {
            service,
            overlay,
            spawner,
        }
    }

    /// Issues `command` without waiting for it.
    pub fn dispatch(&self, command: WmCommand) {
        self.spawn(command, false);
    }

    /// Issues `command` and hides the overlay once it succeeds.
    pub fn dispatch_then_hide(&self, command: WmCommand) {
        self.spawn(command, true);
    }

    pub fn overlay(&self) -> &Rc<dyn OverlayService> {
        &self.overlay
    }

    pub fn service(&self) -> &Rc<dyn WmCommandService> {
        &self.service
    }

    fn spawn(&self, command: WmCommand, hide_on_success: bool) {
        let service = Rc::clone(&self.service);
        let overlay = Rc::clone(&self.overlay);
        let task = async move {
            match run_command_with(service.as_ref(), command).await {
                Ok(()) if hide_on_success => overlay.hide(),
                Ok(()) => {}
                Err(err) => {
                    tracing::warn!(
                        command = command.name(),
                        error = %err,
                        "window manager command failed"
                    );
                }
            }
        };
        if let Err(err) = self.spawner.spawn_local(task) {
            tracing::warn!(
                command = command.name(),
                error = %err,
                "window manager command could not be scheduled"
            );
        }
    }
}
