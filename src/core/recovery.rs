//! Startup reconciliation against the tracker's open interval
//!
//! Maps the tags of a running `timew` interval back to a category path and
//! works out how much of the reminder interval is left, so a restart does
//! not reset the reminder cadence.

use std::time::Duration;

use tracing::{info, warn};

use super::category::{CategoryPath, CategoryTree};
use crate::error::StatusParseError;
use crate::tracker::{Tracker, TrackerStatus, parse_status};
use crate::utils::format_short;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecoveredSession {
    pub(crate) path: CategoryPath,
    /// Time until the first reminder
    pub(crate) remaining: Duration,
    /// Cadence after the first reminder
    pub(crate) interval: Duration,
}

fn sorted_tokens<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut tokens: Vec<&str> = names.into_iter().flat_map(str::split_whitespace).collect();
    tokens.sort_unstable();
    tokens
}

/// Find the category path whose name tokens equal `tags` as a multiset.
///
/// Top-level categories are tried before any (category, subcategory) pair;
/// the first match wins.
pub(crate) fn match_tags(tree: &CategoryTree, tags: &[String]) -> Option<CategoryPath> {
    let wanted = sorted_tokens(tags.iter().map(String::as_str));

    if let Some(cat) = tree
        .categories()
        .iter()
        .find(|cat| sorted_tokens([cat.name.as_str()]) == wanted)
    {
        return Some(CategoryPath::new(cat.name.clone(), None));
    }

    tree.categories().iter().find_map(|cat| {
        cat.subcategories()
            .iter()
            .find(|sub| sorted_tokens([cat.name.as_str(), sub.name.as_str()]) == wanted)
            .map(|sub| CategoryPath::new(cat.name.clone(), Some(sub.name.clone())))
    })
}

/// Reconcile status text against the tree. `Ok(None)` means nothing to
/// restore: the tracker is idle or its tags match no category.
pub(crate) fn recover_from_status(
    tree: &CategoryTree,
    status_text: &str,
) -> Result<Option<RecoveredSession>, StatusParseError> {
    let TrackerStatus::Tracking { tags, elapsed } = parse_status(status_text)? else {
        return Ok(None);
    };

    let Some(path) = match_tags(tree, &tags) else {
        info!(?tags, "Open interval matches no category");
        return Ok(None);
    };

    let interval = tree.interval_for(&path);
    let remaining = interval.saturating_sub(elapsed);
    Ok(Some(RecoveredSession {
        path,
        remaining,
        interval,
    }))
}

/// Query the tracker and reconcile. Failures are logged and yield `None`:
/// the engine then starts without an armed reminder.
pub(crate) fn recover(tree: &CategoryTree, tracker: &dyn Tracker) -> Option<RecoveredSession> {
    let status = match tracker.status() {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Cannot query tracker status");
            return None;
        }
    };

    match recover_from_status(tree, &status) {
        Ok(Some(session)) => {
            info!(
                path = %session.path,
                remaining = %format_short(session.remaining),
                interval = %format_short(session.interval),
                "Recovered running session"
            );
            Some(session)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(error = %e, "Cannot parse tracker status, skipping recovery");
            None
        }
    }
}
