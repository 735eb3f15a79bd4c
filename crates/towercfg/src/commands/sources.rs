use clap::ArgMatches;
use std::path::Path;
use tracing::info;

use super::helpers;
use super::json_types::SourceOutput;
use towercfg_core::ConfigResolver;

pub(crate) fn handle_sources_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.sources_started");

    let resolver = ConfigResolver::from_environment()?;
    let params = helpers::direct_params(matches, dirs::home_dir().as_deref());

    let mut entries: Vec<SourceOutput> = resolver
        .candidates()
        .into_iter()
        .map(|candidate| SourceOutput {
            state: file_state(&candidate.path),
            path: candidate.path.display().to_string(),
            origin: candidate.origin.to_string(),
        })
        .collect();

    if let Some(explicit) = &params.config_file {
        entries.push(SourceOutput {
            state: file_state(explicit),
            path: explicit.display().to_string(),
            origin: "explicit".to_string(),
        });
    }

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in &entries {
            println!("{:<9} {:<17} {}", entry.state, entry.origin, entry.path);
        }
    }

    info!(event = "cli.sources_completed", count = entries.len());

    Ok(())
}

fn file_state(path: &Path) -> &'static str {
    if path.is_dir() {
        "directory"
    } else if path.exists() {
        "present"
    } else {
        "missing"
    }
}
