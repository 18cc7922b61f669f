//! Session owner
//!
//! [`Warden`] is the only place that touches the reminder. Every inbound
//! command and every timer fire goes through `&mut Warden`, so a stop is
//! always fully processed before the next start can arm anything.

use tracing::{info, warn};

use super::command::{Command, parse_command};
use crate::consts::REMINDER_MESSAGE;
use crate::core::{
    CategoryPath, CategoryTree, RecoveredSession, ReminderScheduler, generate_report,
};
use crate::core::category::CategoryKind;
use crate::notify::Notifier;
use crate::tracker::Tracker;
use crate::utils::format_short;

pub(crate) struct Warden<'a> {
    tree: &'a CategoryTree,
    tracker: &'a dyn Tracker,
    notifier: &'a dyn Notifier,
    reminder: ReminderScheduler,
    current: Option<CategoryPath>,
    report_range: String,
}

impl<'a> Warden<'a> {
    pub(crate) fn new(
        tree: &'a CategoryTree,
        tracker: &'a dyn Tracker,
        notifier: &'a dyn Notifier,
        report_range: impl Into<String>,
    ) -> Self {
        Warden {
            tree,
            tracker,
            notifier,
            reminder: ReminderScheduler::new(),
            current: None,
            report_range: report_range.into(),
        }
    }

    pub(crate) fn reminder(&self) -> &ReminderScheduler {
        &self.reminder
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<&CategoryPath> {
        self.current.as_ref()
    }

    /// Re-arm from a recovered session. An overdue session gets one reminder
    /// right away and then the normal cadence.
    pub(crate) fn restore(&mut self, session: RecoveredSession) {
        let RecoveredSession {
            path,
            remaining,
            interval,
        } = session;
        if !interval.is_zero() && remaining.is_zero() {
            info!(path = %path, "Recovered session is overdue");
            self.notifier.notify(REMINDER_MESSAGE);
            self.reminder.arm(interval, interval);
        } else {
            self.reminder.arm(remaining, interval);
        }
        self.current = Some(path);
    }

    pub(crate) fn handle_line(&mut self, line: &str) {
        let command = parse_command(line);
        info!(?command, "Command received");
        match command {
            Command::Open => self.notifier.notify(&self.category_list()),
            Command::Stop => self.stop(),
            Command::Report(range) => {
                let range = range.unwrap_or_else(|| self.report_range.clone());
                self.send_report(&range);
            }
            Command::Status => self.notifier.notify(&self.status_text()),
            Command::Choose(text) => self.choose(&text),
            Command::Empty => {}
        }
    }

    /// Resolve free text to a category path. Tries the whole text as a
    /// top-level name, then every `category/subcategory` split.
    fn resolve(&self, text: &str) -> Result<CategoryPath, String> {
        if let Some(cat) = self.tree.find(text) {
            return match &cat.kind {
                CategoryKind::Leaf { .. } => Ok(CategoryPath::new(cat.name.clone(), None)),
                CategoryKind::Parent { subcategories, .. } => {
                    let names: Vec<&str> = subcategories.iter().map(|s| s.name.as_str()).collect();
                    Err(format!(
                        "choose subcategory of {}: {}",
                        cat.name,
                        names.join(", ")
                    ))
                }
            };
        }

        text.match_indices('/')
            .find_map(|(idx, _)| {
                let (cat_name, sub_name) = (text[..idx].trim(), text[idx + 1..].trim());
                let cat = self.tree.find(cat_name)?;
                let sub = cat.subcategory(sub_name)?;
                Some(CategoryPath::new(cat.name.clone(), Some(sub.name.clone())))
            })
            .ok_or_else(|| "unknown category".to_string())
    }

    fn choose(&mut self, text: &str) {
        match self.resolve(text) {
            Ok(path) => self.start(path),
            Err(reply) => self.notifier.notify(&reply),
        }
    }

    /// Cancel first, then start the tracker. A failed start leaves nothing
    /// armed.
    pub(crate) fn start(&mut self, path: CategoryPath) {
        self.reminder.cancel();
        self.current = None;

        let interval = self.tree.interval_for(&path);
        info!(path = %path, interval = %format_short(interval), "Starting activity");
        match self.tracker.start(&path.tags()) {
            Ok(output) => {
                self.notifier.notify(&output);
                self.reminder.arm(interval, interval);
                self.current = Some(path);
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Tracker start failed");
                self.notifier.notify(&format!("error: {e}"));
            }
        }
    }

    /// The local reminder is cancelled even if the tracker fails to stop.
    pub(crate) fn stop(&mut self) {
        self.reminder.cancel();
        self.current = None;
        match self.tracker.stop() {
            Ok(output) => self.notifier.notify(&output),
            Err(e) => {
                warn!(error = %e, "Tracker stop failed");
                self.notifier.notify(&format!("error: {e}"));
            }
        }
    }

    pub(crate) fn on_reminder(&mut self) {
        if self.reminder.fire() {
            info!(path = ?self.current.as_ref().map(ToString::to_string), "Reminder fired");
            self.notifier.notify(REMINDER_MESSAGE);
        }
    }

    pub(crate) fn send_report(&self, range: &str) {
        self.notifier.notify(&generate_report(self.tracker, range));
    }

    /// Weekly report using the configured range
    pub(crate) fn send_scheduled_report(&self) {
        info!(range = %self.report_range, "Weekly report due");
        self.send_report(&self.report_range);
    }

    pub(crate) fn shutdown(&mut self) {
        self.reminder.cancel();
    }

    fn category_list(&self) -> String {
        let mut lines = vec!["categories:".to_string()];
        for cat in self.tree.categories() {
            let subs: Vec<&str> = cat.subcategories().iter().map(|s| s.name.as_str()).collect();
            if subs.is_empty() {
                lines.push(format!("- {}", cat.name));
            } else {
                lines.push(format!("- {} ({})", cat.name, subs.join(", ")));
            }
        }
        lines.join("\n")
    }

    fn status_text(&self) -> String {
        match (&self.current, self.reminder.remaining()) {
            (Some(path), Some(left)) => {
                format!("tracking {path}, next reminder in {}", format_short(left))
            }
            (Some(path), None) => format!("tracking {path}, no reminder configured"),
            (None, _) => "no reminder armed".to_string(),
        }
    }
}
