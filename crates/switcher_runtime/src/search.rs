//! Query filtering shared by the navigation index and the view derivations.

use wm_host::{Window, Workspace};

use crate::{app_catalog::AppCatalog, model::SwitcherSnapshot, selection::effective_workspace_of};

/// Normalized form of a user query: trimmed and lowercased.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether `window` matches the already-normalized `query_lower`.
///
/// Title, catalog display name, and raw app id are each checked on their own, so a query can hit
/// a display name whose app id does not contain it. An empty query matches everything.
pub fn matches_query(window: &Window, query_lower: &str, catalog: &AppCatalog) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(query_lower);

    window.title.as_deref().is_some_and(contains)
        || contains(&*catalog.display_name(window.app_id.as_deref()))
        || window.app_id.as_deref().is_some_and(contains)
}

/// Whether a workspace row survives the query, matched against its label.
pub fn workspace_matches(workspace: &Workspace, query_lower: &str) -> bool {
    query_lower.is_empty() || workspace.label().to_lowercase().contains(query_lower)
}

/// Windows of the effective workspace that match the snapshot's query, in bucket order.
pub fn visible_windows<'s>(
    snapshot: &'s SwitcherSnapshot,
    catalog: &AppCatalog,
) -> Vec<&'s Window> {
    let Some(workspace_id) = effective_workspace_of(snapshot) else {
        return Vec::new();
    };
    let query = normalize_query(&snapshot.view.query);
    snapshot
        .state
        .windows_in(workspace_id)
        .iter()
        .filter(|window| matches_query(window, &query, catalog))
        .collect()
}
