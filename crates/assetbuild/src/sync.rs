//! Destination reset and filtered recursive copy.
//!
//! # Design
//! - The output tree is wiped file by file; directories are left in place.
//! - Every source file whose full path avoids the exclusion set is copied to the
//!   same relative location, overwriting whatever is there.
//! - Failures are returned immediately; a partial copy is not rolled back.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::error::{AssetBuildError, AssetBuildResult};
use crate::exclude::ExclusionSet;
use crate::output::Console;

/// Counters gathered over one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Files removed from the output tree before copying.
    pub deleted: u64,
    /// Files copied into the output tree.
    pub copied: u64,
    /// Source files left out because they matched an exclusion pattern.
    pub skipped: u64,
    /// Bytes written by the copy.
    pub bytes: u64,
}

/// Outcome of the copy phase alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied.
    pub copied: u64,
    /// Files skipped by the exclusion set.
    pub skipped: u64,
    /// Bytes written.
    pub bytes: u64,
}

/// Run a full build for `config`: create the output directory, wipe it, then
/// copy the filtered source tree into it.
///
/// # Errors
/// Returns a configuration error from [`RunConfig::check_target`] before the
/// filesystem is touched, and IO/traversal errors from the later phases.
pub fn build_assets<O: Write, E: Write>(
    config: &RunConfig,
    exclusions: &ExclusionSet,
    console: &mut Console<O, E>,
) -> AssetBuildResult<SyncReport> {
    config.check_target()?;
    prepare_output_dir(config.output_dir())?;

    console.status(&format!(
        "Deleting old game files for {}...",
        config.game_name()
    ));
    let deleted = reset_destination(config.output_dir())?;

    console.status(&format!(
        "Building game files for {}...",
        config.game_name()
    ));
    let stats = copy_filtered(config.source_dir(), config.output_dir(), exclusions)?;

    let report = SyncReport {
        deleted,
        copied: stats.copied,
        skipped: stats.skipped,
        bytes: stats.bytes,
    };
    info!(
        game = config.game_name(),
        release = config.release_configuration(),
        deleted = report.deleted,
        copied = report.copied,
        skipped = report.skipped,
        bytes = report.bytes,
        "asset build finished"
    );
    console.status("Done!");
    Ok(report)
}

/// Create the output directory and any missing parents.
///
/// # Errors
/// Returns an IO error if the directory cannot be created.
pub fn prepare_output_dir(output_dir: &Path) -> AssetBuildResult<()> {
    fs::create_dir_all(output_dir)
        .map_err(|source| AssetBuildError::io("prepare.create_dir", output_dir, source))
}

/// Delete every non-directory entry below `output_dir`, returning the count.
///
/// # Errors
/// Returns the first traversal or removal failure.
pub fn reset_destination(output_dir: &Path) -> AssetBuildResult<u64> {
    let mut files = Vec::new();
    for entry in WalkDir::new(output_dir).min_depth(1) {
        let entry = entry
            .map_err(|source| AssetBuildError::walkdir("reset.walk", output_dir, source))?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }

    let mut deleted = 0_u64;
    for path in files {
        fs::remove_file(&path)
            .map_err(|source| AssetBuildError::io("reset.remove_file", &path, source))?;
        debug!(path = %path.display(), "removed stale output file");
        deleted += 1;
    }
    Ok(deleted)
}

/// Copy every non-excluded file under `source_dir` into `output_dir`,
/// mirroring relative paths.
///
/// # Errors
/// Returns the first traversal, directory creation, or copy failure.
pub fn copy_filtered(
    source_dir: &Path,
    output_dir: &Path,
    exclusions: &ExclusionSet,
) -> AssetBuildResult<CopyStats> {
    let mut stats = CopyStats::default();
    for entry in WalkDir::new(source_dir).follow_links(true) {
        let entry = entry
            .map_err(|source| AssetBuildError::walkdir("copy.walk", source_dir, source))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(pattern) = exclusions.matching_pattern(path) {
            debug!(path = %path.display(), pattern, "skipped development file");
            stats.skipped += 1;
            continue;
        }

        let target = output_path(source_dir, output_dir, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| AssetBuildError::io("copy.create_parent", parent, source))?;
        }
        let bytes = fs::copy(path, &target)
            .map_err(|source| AssetBuildError::io("copy.file", &target, source))?;
        debug!(from = %path.display(), to = %target.display(), bytes, "copied asset");
        stats.copied += 1;
        stats.bytes += bytes;
    }
    Ok(stats)
}

fn output_path(source_dir: &Path, output_dir: &Path, path: &Path) -> AssetBuildResult<PathBuf> {
    let relative = path
        .strip_prefix(source_dir)
        .map_err(|_| AssetBuildError::OutsideRoot {
            path: path.to_path_buf(),
            root: source_dir.to_path_buf(),
        })?;
    Ok(output_dir.join(relative))
}
