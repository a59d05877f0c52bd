//! Temporary base directories laid out as `assets/<game>` and
//! `build/<release>/<game>`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A throwaway base directory removed on drop.
pub struct AssetRoot {
    dir: TempDir,
}

impl AssetRoot {
    /// Create an empty base directory under the system temp dir.
    ///
    /// # Errors
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("assetbuild-")
            .tempdir()
            .context("failed to create temporary asset root")?;
        Ok(Self { dir })
    }

    /// Base directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `<root>/assets/<game>`.
    #[must_use]
    pub fn source_dir(&self, game: &str) -> PathBuf {
        self.path().join("assets").join(game)
    }

    /// `<root>/build/<release>/<game>`.
    #[must_use]
    pub fn output_dir(&self, release: &str, game: &str) -> PathBuf {
        self.path().join("build").join(release).join(game)
    }

    /// Write a source asset at `relative` below the game's source directory.
    ///
    /// # Errors
    /// Returns an error if the file or its parents cannot be written.
    pub fn write_source(&self, game: &str, relative: &str, contents: &str) -> Result<PathBuf> {
        write_file(&self.source_dir(game).join(relative), contents)
    }

    /// Write a file at `relative` below the game's output directory.
    ///
    /// # Errors
    /// Returns an error if the file or its parents cannot be written.
    pub fn write_output(
        &self,
        release: &str,
        game: &str,
        relative: &str,
        contents: &str,
    ) -> Result<PathBuf> {
        write_file(&self.output_dir(release, game).join(relative), contents)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Map every file below `dir` (relative path, `/`-separated) to its contents.
///
/// A missing directory yields an empty map.
///
/// # Errors
/// Returns an error if traversal or reading fails.
pub fn snapshot(dir: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut files = BTreeMap::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("{} escaped {}", entry.path().display(), dir.display()))?;
        let key = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let contents = fs::read(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        files.insert(key, contents);
    }
    Ok(files)
}
