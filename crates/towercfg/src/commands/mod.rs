use clap::ArgMatches;
use tracing::error;

use towercfg_core::events;

pub mod helpers;
mod json_types;

mod show;
mod sources;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches),
        Some(("sources", sub_matches)) => sources::handle_sources_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
