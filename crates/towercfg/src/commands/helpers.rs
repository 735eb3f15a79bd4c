use clap::ArgMatches;
use secrecy::SecretString;
use std::path::{Path, PathBuf};

use towercfg_core::{ConfigResolver, DirectParams, Resolution};

/// Collect direct parameters from global CLI args (env fallback already applied by clap).
pub fn direct_params(matches: &ArgMatches, home: Option<&Path>) -> DirectParams {
    DirectParams {
        host: matches.get_one::<String>("host").cloned(),
        username: matches.get_one::<String>("username").cloned(),
        password: matches
            .get_one::<String>("password")
            .map(|p| SecretString::from(p.clone())),
        verify_certs: matches.get_one::<bool>("verify-certs").copied(),
        oauth_token: matches
            .get_one::<String>("oauth-token")
            .map(|t| SecretString::from(t.clone())),
        config_file: matches
            .get_one::<String>("config-file")
            .map(|p| expand_home(p, home)),
    }
}

/// Expand a leading `~` against the home directory.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(raw),
    }
}

/// Resolve settings for the current process and print any warning to stderr.
///
/// The duplicated-parameter warning is printed even when the explicit config
/// file fails to load.
pub fn resolve_with_warning(
    matches: &ArgMatches,
) -> Result<Resolution, Box<dyn std::error::Error>> {
    let resolver = ConfigResolver::from_environment()?;
    let params = direct_params(matches, dirs::home_dir().as_deref());

    let resolution = resolver.resolve(&params).inspect_err(|e| {
        if let Some(message) = e.warning() {
            print_warning(&message);
        }
    })?;
    resolution.emit_warnings(Some(print_warning));

    Ok(resolution)
}

fn print_warning(message: &str) {
    eprintln!("Warning: {}", message);
}
