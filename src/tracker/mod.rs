//! External interval tracker boundary
//!
//! The engine only ever talks to the tracker through the [`Tracker`] trait:
//! start, stop, status and export. [`Timew`] implements it by spawning the
//! `timew` binary.

pub(crate) mod export;
pub(crate) mod status;
pub(crate) mod timew;

use crate::error::TrackerError;

/// Operations consumed from the external tracker. All calls block until the
/// child process exits.
pub(crate) trait Tracker {
    /// Start tracking with the given tags, in order. Returns tracker output.
    fn start(&self, tags: &[String]) -> Result<String, TrackerError>;

    /// Stop the open interval. Returns tracker output.
    fn stop(&self) -> Result<String, TrackerError>;

    /// Raw status text.
    fn status(&self) -> Result<String, TrackerError>;

    /// JSON export for a range argument such as `:week`.
    fn export(&self, range: &str) -> Result<String, TrackerError>;
}

pub(crate) use export::{TrackedInterval, parse_export};
pub(crate) use status::{TrackerStatus, parse_status};
pub(crate) use timew::Timew;
