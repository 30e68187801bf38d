//! Startup bootstrap and the inbound event pump.

use std::{cell::RefCell, rc::Rc};

use futures::{pin_mut, Stream, StreamExt};
use wm_host::decode_event_str;

use crate::switcher::Switcher;

/// Seeds `switcher` from a single `get_state` call.
///
/// A failed call is logged and the empty snapshot kept; the event stream fills it in later.
/// Returns whether the bootstrap payload was applied.
pub async fn bootstrap(switcher: &RefCell<Switcher>) -> bool {
    let service = Rc::clone(switcher.borrow().commands());
    match service.get_state().await {
        Ok(patch) => {
            tracing::info!(
                workspaces = patch.workspaces.as_ref().map_or(0, Vec::len),
                windows = patch.total_windows(),
                "loaded initial window manager state"
            );
            switcher.borrow_mut().set_state(patch);
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "initial state unavailable, starting empty");
            false
        }
    }
}

/// Drains raw JSON event lines into `switcher` in delivery order.
///
/// Lines that fail to decode are logged and skipped. Returns the number of events applied.
pub async fn pump_events<S>(switcher: &RefCell<Switcher>, events: S) -> usize
where
    S: Stream<Item = String>,
{
    pin_mut!(events);
    let mut applied = 0;
    while let Some(line) = events.next().await {
        match decode_event_str(&line) {
            Ok(Some(event)) => {
                switcher.borrow_mut().apply_event(event);
                applied += 1;
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(error = %err, "skipping undecodable window manager event");
            }
        }
    }
    applied
}
