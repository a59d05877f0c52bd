//! # Design
//!
//! - Constant error messages; paths and operation labels live in fields.
//! - Each variant knows which process exit code it maps to.
//! - Source errors are preserved for the top-level diagnostic chain.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a successful run.
pub const EXIT_OK: i32 = 0;
/// Exit status when the named target is unusable (missing source directory,
/// malformed game or release name, overlapping directories).
pub const EXIT_MISSING_SOURCE: i32 = 2;
/// Exit status for any failure while resetting or copying.
pub const EXIT_RUNTIME_FAILURE: i32 = 8;

/// Result type for asset build operations.
pub type AssetBuildResult<T> = Result<T, AssetBuildError>;

/// Errors produced while building a game's asset tree.
#[derive(Debug, Error)]
pub enum AssetBuildError {
    /// The explicitly named game has no source directory.
    #[error("source directory does not exist")]
    MissingSourceDir {
        /// Resolved source directory that was checked.
        path: PathBuf,
    },
    /// A game or release token is not exactly one plain path segment.
    #[error("argument is not a single path segment")]
    InvalidPathSegment {
        /// Which positional token was rejected.
        field: &'static str,
        /// Token as supplied.
        value: String,
    },
    /// The source and output directories are the same or nested.
    #[error("source and output directories overlap")]
    OverlappingDirs {
        /// Resolved source directory.
        source_dir: PathBuf,
        /// Resolved output directory.
        output_dir: PathBuf,
    },
    /// The working directory could not be resolved as the base directory.
    #[error("failed to resolve base directory")]
    CurrentDir {
        /// Underlying IO error.
        source: io::Error,
    },
    /// IO failures while interacting with the filesystem.
    #[error("asset io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Walkdir traversal failures.
    #[error("asset walkdir failure")]
    Walkdir {
        /// Operation that triggered the walkdir failure.
        operation: &'static str,
        /// Root of the traversal.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },
    /// A walked entry did not live under the root it was walked from.
    #[error("asset path outside traversal root")]
    OutsideRoot {
        /// Offending entry path.
        path: PathBuf,
        /// Traversal root.
        root: PathBuf,
    },
}

impl AssetBuildError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn walkdir(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: walkdir::Error,
    ) -> Self {
        Self::Walkdir {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure class.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingSourceDir { .. }
            | Self::InvalidPathSegment { .. }
            | Self::OverlappingDirs { .. } => EXIT_MISSING_SOURCE,
            Self::CurrentDir { .. }
            | Self::Io { .. }
            | Self::Walkdir { .. }
            | Self::OutsideRoot { .. } => EXIT_RUNTIME_FAILURE,
        }
    }

    /// Whether the failure was detected before any filesystem change.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        self.exit_code() == EXIT_MISSING_SOURCE
    }

    /// Human-readable detail including the path context and source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = match self {
            Self::MissingSourceDir { path } => format!("{self}: {}", path.display()),
            Self::InvalidPathSegment { field, value } => format!("{self}: {field} '{value}'"),
            Self::OverlappingDirs {
                source_dir,
                output_dir,
            } => format!(
                "{self}: {} and {}",
                source_dir.display(),
                output_dir.display()
            ),
            Self::CurrentDir { .. } => self.to_string(),
            Self::Io {
                operation, path, ..
            }
            | Self::Walkdir {
                operation, path, ..
            } => format!("{self} during {operation} at {}", path.display()),
            Self::OutsideRoot { path, root } => format!(
                "{self}: {} is not under {}",
                path.display(),
                root.display()
            ),
        };
        let mut source = self.source();
        while let Some(err) = source {
            detail.push_str("\n  caused by: ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}
