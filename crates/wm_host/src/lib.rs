//! Typed window-manager host contracts and shared wire models used by the switcher runtime.
//!
//! This crate is the API-first boundary towards the window-manager backend. It exposes the IPC
//! data model (workspaces, windows, the bootstrap state payload), the externally-tagged event
//! union decoded at the transport edge, and the outbound command / icon / overlay service traits.
//! Concrete transports live outside this workspace; the `Noop*` and `Memory*` adapters here back
//! unsupported targets and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod event;
pub mod host;
pub mod icons;
pub mod ipc;
pub mod overlay;

pub use commands::{
    run_command_with, MemoryWmCommandService, NoopWmCommandService, WmCommand, WmCommandFuture,
    WmCommandService,
};
pub use event::{decode_event, decode_event_str, EventDecodeError, WmEvent};
pub use host::WmHostServices;
pub use icons::{IconFuture, IconService, MemoryIconService, NoopIconService};
pub use ipc::{StatePatch, Window, WindowId, Workspace, WorkspaceId, UNASSIGNED_WORKSPACE};
pub use overlay::{MemoryOverlayService, NoopOverlayService, OverlayService};
