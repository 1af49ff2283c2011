//! Gathers `releasenotes.yaml` files from a documentation checkout.
//!
//! The docs repository keeps one file per section at
//! `<section>/releasenotes/releasenotes.yaml`. Collecting copies each of them
//! into a flat directory as `<section>.yaml`, which is the layout
//! [`crate::process::process_directory`] expects and the name the scope table
//! is keyed on.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const RELEASE_NOTES_DIR: &str = "releasenotes";
pub const RELEASE_NOTES_FILE: &str = "releasenotes.yaml";

const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> CollectError + '_ {
    move |source| CollectError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Copy every `<section>/releasenotes/releasenotes.yaml` under `docs_root`
/// into `output_dir/<section>.yaml`.
pub fn collect_release_notes(
    docs_root: &Path,
    output_dir: &Path,
) -> Result<Vec<CollectedFile>, CollectError> {
    info!(docs_root = %docs_root.display(), output_dir = %output_dir.display(), "Collecting release notes");
    fs::create_dir_all(output_dir).map_err(io_err(output_dir))?;

    let mut found = Vec::new();
    visit_dir(docs_root, &mut found)?;
    found.sort();

    let mut collected: Vec<CollectedFile> = Vec::new();
    for (section, source) in found {
        let destination = output_dir.join(format!("{section}.yaml"));
        if collected.iter().any(|c| c.destination == destination) {
            warn!(
                source = %source.display(),
                destination = %destination.display(),
                "Section name collides with an earlier one, overwriting"
            );
            collected.retain(|c| c.destination != destination);
        }
        fs::copy(&source, &destination).map_err(io_err(&source))?;
        info!(source = %source.display(), destination = %destination.display(), "Copied release notes");
        collected.push(CollectedFile {
            source,
            destination,
        });
    }

    collected.sort_by(|a, b| a.destination.cmp(&b.destination));
    Ok(collected)
}

/// Recursively records `(section name, path)` for each release-notes file.
fn visit_dir(dir: &Path, found: &mut Vec<(String, PathBuf)>) -> Result<(), CollectError> {
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        if !path.is_dir() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if SKIPPED_DIRS.contains(&name) {
            debug!(path = %path.display(), "Skipping directory");
            continue;
        }
        if name == RELEASE_NOTES_DIR {
            let candidate = path.join(RELEASE_NOTES_FILE);
            if candidate.is_file() {
                let section = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                found.push((section, candidate));
            }
        }
        visit_dir(&path, found)?;
    }
    Ok(())
}
