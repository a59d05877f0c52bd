#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Diagnostic logging setup shared by the assetbuild binaries.
//!
//! Status lines meant for the person running a build are printed by the CLI
//! itself; this crate only owns the `tracing` subscriber that carries
//! per-file diagnostics to stderr.

pub mod error;
pub mod init;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_env_filter, init_logging};
