//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Run the reminder engine, reading commands from stdin (default)
    Run,
    /// Print a time-per-tag report
    Report {
        /// timew export range (default: :week, or report_range from config)
        #[arg(short, long)]
        range: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show what would be restored from the running timew interval
    Recover,
    /// Show when the next weekly report fires
    NextReport,
    /// List configured categories and reminder intervals
    Categories,
}
