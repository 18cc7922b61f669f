use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use super::Tracker;
use crate::error::TrackerError;

/// Tracker backed by the timewarrior CLI.
pub(crate) struct Timew {
    bin: PathBuf,
}

impl Timew {
    pub(crate) fn new(bin: impl Into<PathBuf>) -> Self {
        Timew { bin: bin.into() }
    }

    fn bin_name(&self) -> String {
        self.bin.display().to_string()
    }

    /// Run `timew <args>` and capture stdout. With `tolerate_exit` a non-zero
    /// exit still yields stdout, since `timew` signals "not tracking" that way.
    fn run(&self, args: &[&str], tolerate_exit: bool) -> Result<String, TrackerError> {
        debug!(bin = %self.bin.display(), ?args, "Running tracker");
        let output = Command::new(&self.bin).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrackerError::NotFound {
                    bin: self.bin_name(),
                }
            } else {
                TrackerError::Spawn {
                    bin: self.bin_name(),
                    source: e,
                }
            }
        })?;

        if output.status.success() || tolerate_exit {
            Ok(String::from_utf8(output.stdout)?)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TrackerError::Failed {
                bin: self.bin_name(),
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

impl Tracker for Timew {
    fn start(&self, tags: &[String]) -> Result<String, TrackerError> {
        let mut args = vec!["start"];
        args.extend(tags.iter().map(String::as_str));
        info!(?tags, "Starting tracker");
        self.run(&args, false)
    }

    fn stop(&self) -> Result<String, TrackerError> {
        info!("Stopping tracker");
        self.run(&["stop"], false)
    }

    fn status(&self) -> Result<String, TrackerError> {
        self.run(&[], true)
    }

    fn export(&self, range: &str) -> Result<String, TrackerError> {
        self.run(&["export", range], false)
    }
}
