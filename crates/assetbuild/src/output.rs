//! Status, loud, and error channels for build messages.
//!
//! Status lines disappear in quiet mode; loud lines and errors never do.
//! Errors are tinted red only when the error stream is a terminal.

use std::io::{self, IsTerminal, Stderr, Stdout, Write};

/// Usage text printed after a configuration error.
pub const USAGE: &str = "assetbuild [--root <DIR>] [<game> <release-config>] [-q]\n\n\
<game>: directory name under <root>/assets (default: examplegame)\n\
<release-config>: configuration to release the game for (Debug, Playtest or Release)\n\
-q: quiets everything except errors (must not be the final argument)";

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Banner shown at the start of every run.
#[must_use]
pub fn signon() -> String {
    format!("Asset Build Tool {}", env!("CARGO_PKG_VERSION"))
}

/// Message writer honouring quiet mode.
#[derive(Debug)]
pub struct Console<O = Stdout, E = Stderr> {
    quiet: bool,
    color: bool,
    out: O,
    err: E,
}

impl Console {
    /// Console bound to the process stdout and stderr.
    #[must_use]
    pub fn stdio(quiet: bool) -> Self {
        let err = io::stderr();
        let color = err.is_terminal();
        Self {
            quiet,
            color,
            out: io::stdout(),
            err,
        }
    }
}

impl<O: Write, E: Write> Console<O, E> {
    /// Console over arbitrary writers, without color.
    #[must_use]
    pub const fn with_writers(quiet: bool, out: O, err: E) -> Self {
        Self {
            quiet,
            color: false,
            out,
            err,
        }
    }

    /// Whether status lines are being suppressed.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Status line; dropped in quiet mode.
    pub fn status(&mut self, text: &str) {
        if !self.quiet {
            self.loud(text);
        }
    }

    /// Line shown regardless of quiet mode.
    pub fn loud(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    /// Usage text, shown regardless of quiet mode.
    pub fn usage(&mut self) {
        self.loud(USAGE);
    }

    /// Error line on the error stream.
    pub fn error(&mut self, text: &str) {
        let _ = if self.color {
            writeln!(self.err, "{RED}Error: {text}{RESET}")
        } else {
            writeln!(self.err, "Error: {text}")
        };
    }

    /// Recover the underlying writers.
    #[must_use]
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(quiet: bool, emit: impl FnOnce(&mut Console<Vec<u8>, Vec<u8>>)) -> (String, String) {
        let mut console = Console::with_writers(quiet, Vec::new(), Vec::new());
        emit(&mut console);
        let (out, err) = console.into_writers();
        (
            String::from_utf8_lossy(&out).into_owned(),
            String::from_utf8_lossy(&err).into_owned(),
        )
    }

    #[test]
    fn status_lines_print_when_not_quiet() {
        let (out, err) = render(false, |console| {
            console.loud("banner");
            console.status("working");
        });
        assert_eq!(out, "banner\nworking\n");
        assert!(err.is_empty());
    }

    #[test]
    fn quiet_mode_keeps_loud_lines_and_errors() {
        let (out, err) = render(true, |console| {
            assert!(console.is_quiet());
            console.loud("banner");
            console.status("working");
            console.error("boom");
        });
        assert_eq!(out, "banner\n");
        assert_eq!(err, "Error: boom\n");
    }

    #[test]
    fn usage_is_loud() {
        let (out, _) = render(true, |console| console.usage());
        assert!(out.starts_with("assetbuild [--root <DIR>]"));
        assert!(out.contains("-q: quiets everything except errors"));
    }

    #[test]
    fn signon_carries_package_version() {
        assert_eq!(
            signon(),
            format!("Asset Build Tool {}", env!("CARGO_PKG_VERSION"))
        );
    }
}
