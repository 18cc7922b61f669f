//! Notification sink
//!
//! Reminders, reports and command replies all leave the engine as plain
//! text through [`Notifier`].

use std::io::Write;

use tracing::warn;

pub(crate) trait Notifier {
    fn notify(&self, text: &str);
}

/// Writes each notification to stdout, separated by a blank line.
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}\n", text.trim_end()).and_then(|_| stdout.flush()) {
            warn!(error = %e, "Cannot write notification");
        }
    }
}
