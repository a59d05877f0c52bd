//! Run configuration resolved once from the positional command-line tokens.
//!
//! # Design
//! - `RunConfig` is immutable after [`RunConfig::resolve`] and passed by reference.
//! - The output directory is always derived from the game and release names.
//! - Positional grammar follows the historical tool: `-q` counts as a positional
//!   token and only enables quiet mode when it is not the final token.

use std::path::{Component, Path, PathBuf};

use crate::error::{AssetBuildError, AssetBuildResult};

/// Game built when no game is named on the command line.
pub const DEFAULT_GAME_NAME: &str = "examplegame";
/// Release configuration used when none is named.
pub const DEFAULT_RELEASE_CONFIGURATION: &str = "Debug";
/// Token that enables quiet mode.
pub const QUIET_FLAG: &str = "-q";
/// Directory under the base directory holding per-game source assets.
pub const ASSETS_DIR: &str = "assets";
/// Directory under the base directory holding per-configuration build output.
pub const BUILD_DIR: &str = "build";

/// Immutable configuration for a single asset build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    game_name: String,
    release_configuration: String,
    quiet: bool,
    explicit_target: bool,
    source_dir: PathBuf,
    output_dir: PathBuf,
}

impl RunConfig {
    /// Resolve the configuration from positional tokens relative to `root`.
    ///
    /// With two or more tokens the first two name the game and release
    /// configuration. Fewer tokens fall back to the defaults; a lone token is
    /// ignored. Tokens past the second are ignored apart from the quiet flag.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(root: &Path, args: &[S]) -> Self {
        let (game_name, release_configuration, explicit_target) = match args {
            [game, release, ..] => (
                game.as_ref().to_string(),
                release.as_ref().to_string(),
                true,
            ),
            _ => (
                DEFAULT_GAME_NAME.to_string(),
                DEFAULT_RELEASE_CONFIGURATION.to_string(),
                false,
            ),
        };

        let source_dir = root.join(ASSETS_DIR).join(&game_name);
        let output_dir = root
            .join(BUILD_DIR)
            .join(&release_configuration)
            .join(&game_name);

        Self {
            quiet: quiet_requested(args),
            game_name,
            release_configuration,
            explicit_target,
            source_dir,
            output_dir,
        }
    }

    /// Validate the resolved target before anything on disk is touched.
    ///
    /// Game and release names must each be one plain path segment so the
    /// derived directories stay under `assets/` and `build/`, the source and
    /// output directories must not contain one another, and an explicitly
    /// named game must have a source directory.
    ///
    /// # Errors
    /// Returns `InvalidPathSegment`, `OverlappingDirs`, or `MissingSourceDir`.
    pub fn check_target(&self) -> AssetBuildResult<()> {
        check_segment("game", &self.game_name)?;
        check_segment("release", &self.release_configuration)?;
        if self.output_dir.starts_with(&self.source_dir)
            || self.source_dir.starts_with(&self.output_dir)
        {
            return Err(AssetBuildError::OverlappingDirs {
                source_dir: self.source_dir.clone(),
                output_dir: self.output_dir.clone(),
            });
        }
        self.check_source_dir()
    }

    /// Fail with [`AssetBuildError::MissingSourceDir`] when a game was named
    /// explicitly and its source directory does not exist.
    ///
    /// Runs with default targets are not checked here; a missing default
    /// source surfaces as a traversal failure during the copy.
    ///
    /// # Errors
    /// Returns `MissingSourceDir` for an explicit target without sources.
    pub fn check_source_dir(&self) -> AssetBuildResult<()> {
        if self.explicit_target && !self.source_dir.is_dir() {
            return Err(AssetBuildError::MissingSourceDir {
                path: self.source_dir.clone(),
            });
        }
        Ok(())
    }

    /// Name of the game being built.
    #[must_use]
    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    /// Release configuration the build lands under.
    #[must_use]
    pub fn release_configuration(&self) -> &str {
        &self.release_configuration
    }

    /// Whether status output is suppressed.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Whether the game and release configuration came from the command line.
    #[must_use]
    pub const fn explicit_target(&self) -> bool {
        self.explicit_target
    }

    /// `<root>/assets/<game>`.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// `<root>/build/<release>/<game>`.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn check_segment(field: &'static str, value: &str) -> AssetBuildResult<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(AssetBuildError::InvalidPathSegment {
            field,
            value: value.to_string(),
        }),
    }
}

fn quiet_requested<S: AsRef<str>>(args: &[S]) -> bool {
    let considered = args.len().saturating_sub(1);
    args.iter()
        .take(considered)
        .any(|arg| arg.as_ref().eq_ignore_ascii_case(QUIET_FLAG))
}
