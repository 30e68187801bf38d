//! Client-side state core for the workspace switcher overlay.
//!
//! [`ReconciliationEngine`] mirrors the window manager from bootstrap state and live events,
//! [`NavigationIndex`] drives keyboard selection over the visible windows, and [`IconCache`]
//! memoizes icon lookups. [`Switcher`] wires them to the host services from `wm_host`.

pub mod app_catalog;
pub mod boot;
pub mod config;
pub mod effect_executor;
pub mod engine;
pub mod icon_cache;
pub mod input;
pub mod model;
pub mod navigation;
pub mod reducer;
pub mod search;
pub mod selection;
pub mod switcher;
pub mod view;
mod window_manager;

pub use app_catalog::{app_slug, AppCatalog, AppDisplay};
pub use boot::{bootstrap, pump_events};
pub use config::{AppOverride, ConfigError, SwitcherConfig};
pub use effect_executor::CommandDispatcher;
pub use engine::{ReconciliationEngine, Subscriber, SubscriptionId};
pub use icon_cache::{IconCache, IconEntry, IconListener};
pub use input::{map_key, KeyAction, KeyOutcome, SwitcherKey};
pub use model::*;
pub use navigation::NavigationIndex;
pub use reducer::{merge_state_patch, reduce_wm_state};
pub use selection::{effective_workspace, workspace_label};
pub use switcher::Switcher;
