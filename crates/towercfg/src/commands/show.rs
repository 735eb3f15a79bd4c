use clap::ArgMatches;
use tracing::info;

use super::helpers;
use super::json_types::{REDACTED, ResolvedConfigOutput};
use crate::host::normalize_host;

const NOT_SET: &str = "(not set)";

pub(crate) fn handle_show_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.show_started");

    let resolution = helpers::resolve_with_warning(matches)?;
    let config = &resolution.config;

    if matches.get_flag("json") {
        let loaded_files = resolution
            .loaded_files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let warnings = resolution.warning().into_iter().collect();
        let output = ResolvedConfigOutput::new(config, loaded_files, warnings);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("host:        {}", normalize_host(&config.host));
        println!(
            "username:    {}",
            config.username.as_deref().unwrap_or(NOT_SET)
        );
        println!(
            "password:    {}",
            if config.password.is_some() { REDACTED } else { NOT_SET }
        );
        println!("verify_ssl:  {}", config.verify_ssl);
        println!(
            "oauth_token: {}",
            if config.oauth_token.is_some() { REDACTED } else { NOT_SET }
        );
    }

    info!(
        event = "cli.show_completed",
        files_loaded = resolution.loaded_files.len()
    );

    Ok(())
}
