//! Command-line parsing, top-level error handling, and exit codes.

use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use assetbuild_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use clap::Parser;
use tracing::debug;

use crate::config::RunConfig;
use crate::error::{AssetBuildError, AssetBuildResult, EXIT_OK};
use crate::exclude::ExclusionSet;
use crate::output::{Console, signon};
use crate::sync::build_assets;

#[derive(Parser, Debug)]
#[command(
    name = "assetbuild",
    version,
    about = "Copy a game's shippable assets into the build tree",
    override_usage = "assetbuild [OPTIONS] [<game> <release-config>] [-q]"
)]
struct Cli {
    #[arg(
        long,
        env = "ASSETBUILD_ROOT",
        value_name = "DIR",
        help = "Directory holding assets/ and build/ (defaults to the working directory)"
    )]
    root: Option<PathBuf>,
    #[arg(
        long,
        env = "ASSETBUILD_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Diagnostic log filter; RUST_LOG takes precedence"
    )]
    log_level: String,
    #[arg(
        long,
        env = "ASSETBUILD_LOG_FORMAT",
        value_parser = parse_log_format,
        default_value = "pretty",
        help = "Diagnostic log encoding (pretty or json)"
    )]
    log_format: LogFormat,
    #[arg(
        value_name = "ARGS",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "<game> <release-config>, optionally with -q before the last token"
    )]
    args: Vec<String>,
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

/// Run with the process arguments and return the exit status.
#[must_use]
pub fn run() -> i32 {
    run_from(env::args_os())
}

/// Run with an explicit argument list (including the program name) and
/// return the exit status.
#[must_use]
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
    };
    if let Err(err) = init_logging(&logging) {
        debug!(error = %err, "keeping previously installed tracing subscriber");
    }

    let root = match resolve_root(cli.root) {
        Ok(root) => root,
        Err(err) => {
            Console::stdio(false).error(&format!("an error occurred: {}", err.detail()));
            return err.exit_code();
        }
    };

    let config = RunConfig::resolve(&root, &cli.args);
    let mut console = Console::stdio(config.quiet());
    execute(&config, &mut console)
}

/// Print the banner, build the assets for `config`, and map the outcome to
/// an exit status.
pub fn execute<O: Write, E: Write>(config: &RunConfig, console: &mut Console<O, E>) -> i32 {
    console.loud(&signon());
    console.status(&format!("Builds assets for {}", config.game_name()));

    match build_assets(config, &ExclusionSet::builtin(), console) {
        Ok(_) => EXIT_OK,
        Err(err) if err.is_configuration() => {
            console.loud(&configuration_message(config, &err));
            console.usage();
            err.exit_code()
        }
        Err(err) => {
            console.error(&format!("an error occurred: {}", err.detail()));
            err.exit_code()
        }
    }
}

fn configuration_message(config: &RunConfig, err: &AssetBuildError) -> String {
    match err {
        AssetBuildError::MissingSourceDir { .. } => format!(
            "The base directory {} does not exist!",
            config.source_dir().display()
        ),
        _ => format!("Invalid arguments: {}", err.detail()),
    }
}

fn resolve_root(root: Option<PathBuf>) -> AssetBuildResult<PathBuf> {
    match root {
        Some(root) => Ok(root),
        None => env::current_dir().map_err(|source| AssetBuildError::CurrentDir { source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXIT_MISSING_SOURCE, EXIT_RUNTIME_FAILURE};
    use clap::CommandFactory;
    use std::error::Error;
    use std::fs;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn Error>>;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("assetbuild").chain(args.iter().copied()))
    }

    fn execute_captured(config: &RunConfig) -> (i32, String, String) {
        let mut console = Console::with_writers(config.quiet(), Vec::new(), Vec::new());
        let code = execute(config, &mut console);
        let (out, err) = console.into_writers();
        (
            code,
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&err).into_owned(),
        )
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_without_arguments() -> TestResult {
        let cli = parse(&[])?;
        assert!(cli.args.is_empty());
        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(cli.log_format, LogFormat::Pretty);
        Ok(())
    }

    #[test]
    fn leading_quiet_token_is_positional() -> TestResult {
        let cli = parse(&["-q", "zombono", "Debug"])?;
        assert_eq!(cli.args, ["-q", "zombono", "Debug"]);
        Ok(())
    }

    #[test]
    fn options_precede_positional_tokens() -> TestResult {
        let cli = parse(&[
            "--root",
            "/repo",
            "--log-format",
            "json",
            "zombono",
            "Release",
            "-q",
            "--root",
        ])?;
        assert_eq!(cli.root, Some(PathBuf::from("/repo")));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.args, ["zombono", "Release", "-q", "--root"]);
        Ok(())
    }

    #[test]
    fn unknown_log_format_is_a_usage_error() {
        let err = parse(&["--log-format", "xml"]).err();
        assert!(err.is_some_and(|err| err.exit_code() == 2));
    }

    #[test]
    fn explicit_root_is_used_verbatim() -> TestResult {
        assert_eq!(
            resolve_root(Some(PathBuf::from("/repo")))?,
            PathBuf::from("/repo")
        );
        assert_eq!(resolve_root(None)?, env::current_dir()?);
        Ok(())
    }

    #[test]
    fn execute_succeeds_and_prints_status() -> TestResult {
        let temp = TempDir::new()?;
        let config = RunConfig::resolve(temp.path(), &["zombono", "Debug"]);
        fs::create_dir_all(config.source_dir())?;
        fs::write(config.source_dir().join("a.png"), "a")?;

        let (code, out, err) = execute_captured(&config);

        assert_eq!(code, EXIT_OK);
        assert!(out.starts_with(&signon()));
        assert!(out.contains("Builds assets for zombono\n"));
        assert!(out.ends_with("Done!\n"));
        assert!(err.is_empty());
        Ok(())
    }

    #[test]
    fn execute_reports_missing_source_with_usage() -> TestResult {
        let temp = TempDir::new()?;
        let config = RunConfig::resolve(temp.path(), &["-q", "ghost", "Debug"]);

        let (code, out, err) = execute_captured(&config);

        assert_eq!(code, EXIT_MISSING_SOURCE);
        assert!(out.contains("does not exist!"));
        assert!(out.contains("assetbuild [--root <DIR>]"));
        assert!(!out.contains("Builds assets"));
        assert!(err.is_empty());
        assert!(!temp.path().join("build").exists());
        Ok(())
    }

    #[test]
    fn execute_rejects_absolute_game_without_touching_it() -> TestResult {
        let temp = TempDir::new()?;
        let elsewhere = TempDir::new()?;
        fs::write(elsewhere.path().join("precious.png"), "keep")?;
        let game = elsewhere.path().to_string_lossy().into_owned();
        let config = RunConfig::resolve(temp.path(), &[game.as_str(), "Debug"]);

        let (code, out, err) = execute_captured(&config);

        assert_eq!(code, EXIT_MISSING_SOURCE);
        assert!(out.contains("Invalid arguments: argument is not a single path segment: game"));
        assert!(out.contains("assetbuild [--root <DIR>]"));
        assert!(err.is_empty());
        assert_eq!(
            fs::read_to_string(elsewhere.path().join("precious.png"))?,
            "keep"
        );
        assert!(!temp.path().join("build").exists());
        Ok(())
    }

    #[test]
    fn execute_maps_runtime_failures_to_exit_eight() -> TestResult {
        let temp = TempDir::new()?;
        let config = RunConfig::resolve(temp.path(), &[] as &[&str]);

        let (code, _, err) = execute_captured(&config);

        assert_eq!(code, EXIT_RUNTIME_FAILURE);
        assert!(err.starts_with("Error: an error occurred: asset walkdir failure"));
        Ok(())
    }
}
