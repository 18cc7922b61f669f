//! Event loop
//!
//! One task multiplexes four sources: inbound command lines, the reminder
//! timer, the weekly report timer and the shutdown signal. Handlers run to
//! completion one at a time, which is what keeps the reminder free of
//! fire-after-cancel races.

mod command;
mod warden;

use std::future::Future;
use std::io::BufRead;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::core::ReportSchedule;

pub(crate) use warden::Warden;

/// Forward stdin lines into a channel. The sender drops at end of input.
/// Reads on a plain thread, so a pending read never holds up shutdown.
pub(crate) fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(32);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Cannot read stdin");
                    break;
                }
            }
        }
    });
    rx
}

/// Resolves on ctrl-c, or SIGTERM on unix.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Run until `shutdown` resolves. Closing the input only stops command
/// handling; timers keep running. `schedule = None` disables weekly reports.
pub(crate) async fn run(
    warden: &mut Warden<'_>,
    mut schedule: Option<ReportSchedule>,
    mut input: mpsc::Receiver<String>,
    shutdown: impl Future<Output = ()>,
) {
    let mut input_open = true;
    let mut shutdown = std::pin::pin!(shutdown);

    if let Some(schedule) = &schedule {
        info!(next = %schedule.next_deadline(), "Weekly report scheduled");
    }

    loop {
        let report_due = async {
            match &schedule {
                Some(s) => tokio::time::sleep(s.until_deadline(Utc::now())).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down");
                break;
            }
            _ = warden.reminder().wait() => warden.on_reminder(),
            _ = report_due => {
                warden.send_scheduled_report();
                if let Some(s) = schedule.as_mut() {
                    s.advance(Utc::now());
                }
            }
            line = input.recv(), if input_open => match line {
                Some(line) => warden.handle_line(&line),
                None => {
                    info!("Input closed, timers keep running");
                    input_open = false;
                }
            },
        }
    }

    warden.shutdown();
}
