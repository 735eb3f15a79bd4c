//! Discovery of implicit config file candidates.
//!
//! Candidates are returned in application order, lowest precedence first:
//! 1. System config (`/etc/tower/tower_cli.cfg`)
//! 2. Home config (`~/.tower_cli.cfg`)
//! 3. `.tower_cli.cfg` in each ancestor of the working directory, outermost
//!    first, ending with the working directory itself. The filesystem root is
//!    not searched.
//! 4. `tower_cli.cfg` (no leading dot) in the working directory

use crate::config::defaults::{CONFIG_NAME, hidden_config_name};
use crate::config::types::{CandidateOrigin, ConfigCandidate};
use std::path::{Path, PathBuf};

/// Build the ordered candidate list for a working directory.
///
/// This only computes paths; nothing is read from disk.
pub fn discover_candidates(cwd: &Path, home: Option<&Path>, system: &Path) -> Vec<ConfigCandidate> {
    let hidden = hidden_config_name();
    let mut candidates = vec![ConfigCandidate {
        path: system.to_path_buf(),
        origin: CandidateOrigin::System,
    }];

    if let Some(home) = home {
        candidates.push(ConfigCandidate {
            path: home.join(&hidden),
            origin: CandidateOrigin::Home,
        });
    }

    candidates.extend(
        ancestor_dirs(cwd)
            .into_iter()
            .map(|dir| ConfigCandidate {
                path: dir.join(&hidden),
                origin: CandidateOrigin::Ancestor,
            }),
    );

    candidates.push(ConfigCandidate {
        path: cwd.join(CONFIG_NAME),
        origin: CandidateOrigin::WorkingDirectory,
    });

    candidates
}

/// Directories from the outermost non-root ancestor down to `cwd`.
fn ancestor_dirs(cwd: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = cwd
        .ancestors()
        // The root is the only ancestor without a parent.
        .filter(|dir| dir.parent().is_some())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    dirs.reverse();
    dirs
}
