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
#![allow(clippy::module_name_repetitions)]

//! Copies a game's raw asset tree into the build output, leaving editor,
//! save, screenshot, and modelling files behind.
//!
//! Layout:
//! - `cli.rs`: argument parsing, top-level error handling, exit codes
//! - `config.rs`: run configuration resolved from positional tokens
//! - `exclude.rs`: development-only path patterns
//! - `sync.rs`: destination reset and filtered copy
//! - `output.rs`: status, loud, and error message channels
//! - `main.rs`: thin entrypoint delegating to `run()`

pub mod cli;
pub mod config;
pub mod error;
pub mod exclude;
pub mod output;
pub mod sync;

pub use cli::{execute, run, run_from};
pub use config::RunConfig;
pub use error::{AssetBuildError, AssetBuildResult};
pub use exclude::ExclusionSet;
pub use output::Console;
pub use sync::{SyncReport, build_assets};
