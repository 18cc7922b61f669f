mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod notify;
mod output;
mod tracker;
mod utils;

use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};

use cli::{Cli, Commands};
use config::Config;
use crate::core::recovery::recover_from_status;
use crate::core::{CategoryTree, ReportSchedule, build_report, recover};
use error::AppError;
use notify::ConsoleNotifier;
use output::{output_report_json, print_category_table, render_report_text};
use tracker::{Timew, Tracker};
use utils::{Timezone, format_short, init_logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);

    init_logging(cli.debug);
    if let Some(path) = &config.source {
        debug!(path = %path.display(), "Loaded config");
    }

    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<(), AppError> {
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let tree = CategoryTree::load(&cli.categories_path())?;
    let tracker = Timew::new(cli.timew_bin());

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Run => {
            let notifier = ConsoleNotifier;
            let mut warden = app::Warden::new(&tree, &tracker, &notifier, cli.report_range());
            if let Some(session) = recover(&tree, &tracker) {
                warden.restore(session);
            }
            let schedule = ReportSchedule::new(timezone, Utc::now());
            info!(
                categories = tree.categories().len(),
                timezone = %timezone.display_name(),
                "Engine started"
            );
            app::run(
                &mut warden,
                Some(schedule),
                app::spawn_stdin_reader(),
                app::shutdown_signal(),
            )
            .await;
        }
        Commands::Report { range, json } => {
            let range = range.as_deref().unwrap_or(cli.report_range());
            let report = build_report(&tracker, range)?;
            if *json {
                println!("{}", output_report_json(&report));
            } else {
                println!("{}", render_report_text(&report));
            }
        }
        Commands::Recover => {
            let status = tracker.status()?;
            match recover_from_status(&tree, &status) {
                Ok(Some(session)) => println!(
                    "{}: next reminder in {}, then every {}",
                    session.path,
                    format_short(session.remaining),
                    format_short(session.interval)
                ),
                Ok(None) => println!("nothing to recover"),
                Err(e) => println!("nothing to recover ({e})"),
            }
        }
        Commands::NextReport => {
            let schedule = ReportSchedule::new(timezone, Utc::now());
            let local = timezone.to_naive_local(schedule.next_deadline());
            println!(
                "{} ({})",
                local.format("%Y-%m-%d %H:%M"),
                timezone.display_name()
            );
        }
        Commands::Categories => print_category_table(&tree),
    }

    Ok(())
}
