//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::consts::DEFAULT_REPORT_RANGE;

use super::commands::Commands;

const DEFAULT_CATEGORY_FILE: &str = "category.yml";
const DEFAULT_TIMEW_BIN: &str = "timew";

#[derive(Parser)]
#[command(name = "timewarden")]
#[command(
    about = "Reminds you that timewarrior is still tracking and sends weekly time reports",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Category file (YAML list of categories with optional subcat and time)
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) categories: Option<PathBuf>,

    /// timewarrior binary to run
    #[arg(long, global = true, value_name = "BIN")]
    pub(crate) timew: Option<String>,

    /// Timezone the weekly report deadline is anchored in (e.g., "Europe/Berlin", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    #[arg(skip)]
    pub(crate) report_range: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if self.categories.is_none() {
            self.categories = config.categories.clone();
        }
        if self.timew.is_none() {
            self.timew = config.timew.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.report_range.is_none() {
            self.report_range = config.report_range.clone();
        }
        self
    }

    pub(crate) fn categories_path(&self) -> PathBuf {
        self.categories
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATEGORY_FILE))
    }

    pub(crate) fn timew_bin(&self) -> &str {
        self.timew.as_deref().unwrap_or(DEFAULT_TIMEW_BIN)
    }

    /// Export range for scheduled and default on-demand reports
    pub(crate) fn report_range(&self) -> &str {
        self.report_range.as_deref().unwrap_or(DEFAULT_REPORT_RANGE)
    }
}
