//! Externally-tagged window-manager event union and its transport-boundary decoder.
//!
//! The backend serializes every event as a JSON object with exactly one key naming the variant,
//! e.g. `{"WindowClosed": {"id": 12}}`. Decoding happens once here; downstream code matches on
//! [`WmEvent`] instead of inspecting keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::ipc::{Window, WindowId, Workspace, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Change events consumed by the reconciliation engine.
pub enum WmEvent {
    /// The complete workspace set was replaced.
    WorkspacesChanged {
        /// New workspace list.
        workspaces: Vec<Workspace>,
    },
    /// A workspace became active on its output, optionally also taking focus.
    WorkspaceActivated {
        /// Activated workspace.
        id: WorkspaceId,
        /// Whether the activation also moved keyboard focus.
        focused: bool,
    },
    /// The complete window list was replaced.
    WindowsChanged {
        /// New window list.
        windows: Vec<Window>,
    },
    /// A window was opened or one of its properties (including workspace) changed.
    WindowOpenedOrChanged {
        /// Full new window record.
        window: Window,
    },
    /// A window was closed.
    WindowClosed {
        /// Closed window.
        id: WindowId,
    },
    /// Keyboard focus moved to another window, or to none.
    WindowFocusChanged {
        /// Newly focused window.
        #[serde(default)]
        id: Option<WindowId>,
    },
}

impl WmEvent {
    /// Variant keys this crate understands. Anything else is dropped as a forward-compatible no-op.
    pub const VARIANTS: [&'static str; 6] = [
        "WorkspacesChanged",
        "WorkspaceActivated",
        "WindowsChanged",
        "WindowOpenedOrChanged",
        "WindowClosed",
        "WindowFocusChanged",
    ];

    /// Returns the wire name of this variant.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::WorkspacesChanged { .. } => "WorkspacesChanged",
            Self::WorkspaceActivated { .. } => "WorkspaceActivated",
            Self::WindowsChanged { .. } => "WindowsChanged",
            Self::WindowOpenedOrChanged { .. } => "WindowOpenedOrChanged",
            Self::WindowClosed { .. } => "WindowClosed",
            Self::WindowFocusChanged { .. } => "WindowFocusChanged",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Transport-contract violations found while decoding an event message.
pub enum EventDecodeError {
    /// The message text was not JSON.
    #[error("event is not valid JSON: {0}")]
    Json(String),
    /// The message was neither an object nor a bare variant name.
    #[error("event is not a JSON object")]
    NotAnObject,
    /// The object did not carry exactly one variant key.
    #[error("event object must carry exactly one variant key, found {0}")]
    KeyCount(usize),
    /// A recognised variant carried a payload missing required fields.
    #[error("malformed `{variant}` payload: {message}")]
    Payload {
        /// Variant key of the malformed message.
        variant: String,
        /// Deserializer diagnostic.
        message: String,
    },
}

/// Decodes one externally-tagged event value.
///
/// Returns `Ok(None)` for variants this crate does not know (including bare-string unit variants),
/// so newer backends can add events without breaking older switchers.
///
/// # Errors
///
/// Returns [`EventDecodeError`] when the value is not a single-key object or when a recognised
/// variant's payload does not match its shape.
pub fn decode_event(raw: &Value) -> Result<Option<WmEvent>, EventDecodeError> {
    let object = match raw {
        Value::Object(object) => object,
        Value::String(variant) => {
            tracing::debug!(variant = %variant, "ignoring unit window-manager event");
            return Ok(None);
        }
        _ => return Err(EventDecodeError::NotAnObject),
    };
    if object.len() != 1 {
        return Err(EventDecodeError::KeyCount(object.len()));
    }
    let Some(variant) = object.keys().next() else {
        return Err(EventDecodeError::KeyCount(0));
    };
    if !WmEvent::VARIANTS.contains(&variant.as_str()) {
        tracing::debug!(variant = %variant, "ignoring unknown window-manager event");
        return Ok(None);
    }
    WmEvent::deserialize(raw)
        .map(Some)
        .map_err(|err| EventDecodeError::Payload {
            variant: variant.clone(),
            message: err.to_string(),
        })
}

/// Decodes one line of the event stream.
///
/// # Errors
///
/// Returns [`EventDecodeError::Json`] for non-JSON input and otherwise behaves like
/// [`decode_event`].
pub fn decode_event_str(line: &str) -> Result<Option<WmEvent>, EventDecodeError> {
    let raw: Value =
        serde_json::from_str(line.trim()).map_err(|err| EventDecodeError::Json(err.to_string()))?;
    decode_event(&raw)
}
