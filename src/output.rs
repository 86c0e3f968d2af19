//! # Output Configuration
//!
//! This module decides whether CLI output (the run summary and the log lines
//! written by `env_logger`) uses colors and emoji.
//!
//! `--color always` and `--color never` are taken as given. `--color auto`
//! looks at the environment:
//! - `NO_COLOR` set to anything disables colors (https://no-color.org/)
//! - `CLICOLOR=0` disables colors
//! - `CLICOLOR_FORCE` set to a non-zero value enables them even without a TTY
//! - `TERM=dumb` disables colors
//! - otherwise the stdout terminal decides, via `console`
//!
//! ## Usage
//!
//! ```rust
//! use repofetch::output::{ColorChoice, OutputConfig};
//!
//! let choice: ColorChoice = "never".parse().unwrap();
//! let output = OutputConfig::new(choice);
//! assert_eq!(output.emoji("✅", "[OK]"), "[OK]");
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(format!(
                "invalid color choice '{}', expected always, never or auto",
                other
            )),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(name)
    }
}

/// Whether output is decorated with colors and emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolves `choice` against the environment and terminal.
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => env_allows_color(),
        };
        Self { use_color }
    }

    /// Plain output, for tests and piped runs.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// `decorated` when colors are on, `plain` otherwise.
    pub fn emoji<'a>(&self, decorated: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            decorated
        } else {
            plain
        }
    }

    /// The matching `env_logger` write style.
    pub fn write_style(&self) -> env_logger::WriteStyle {
        if self.use_color {
            env_logger::WriteStyle::Always
        } else {
            env_logger::WriteStyle::Never
        }
    }
}

fn env_allows_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}
