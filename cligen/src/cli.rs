//! Command-line interface definitions for `cligen`.
//!
//! Two invocation forms are accepted and may not be mixed for the same value:
//!
//! ```text
//! cligen <command> "<help text>" [output-path]
//! cligen --command=<name> --help="<text>" [--output=<path>]
//! ```
//!
//! `--help` carries the generated command's help text, so the tool's own
//! usage lives behind `--usage`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args as ClapArgs, Parser};

use crate::directive::UnknownDirectivePolicy;
use crate::error::CligenError;
use crate::generator::GeneratorConfig;

/// Environment variable naming the Rust source file to read.
pub const SOURCE_ENV: &str = "CLIGEN_SOURCE";

/// Parsed CLI arguments for `cligen`.
#[derive(Debug, Parser)]
#[command(name = "cligen")]
#[command(about = "Generate a clap front end from an annotated argument struct")]
#[command(version, disable_help_flag = true)]
pub struct Args {
    /// Command name (short form).
    #[arg(value_name = "COMMAND")]
    pub command_name: Option<String>,
    /// Help text of the generated command (short form).
    #[arg(value_name = "HELP")]
    pub help_text: Option<String>,
    /// Front-end output path (short form).
    #[arg(value_name = "OUTPUT")]
    pub output_path: Option<Utf8PathBuf>,
    /// Command name.
    #[arg(long = "command", value_name = "name")]
    pub command: Option<String>,
    /// Help text of the generated command.
    #[arg(long = "help", value_name = "text")]
    pub help: Option<String>,
    /// Front-end output path; defaults to `cmd/<command>/src/main.rs`.
    #[arg(long = "output", value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Rust source file holding the argument struct.
    #[arg(long, value_name = "path", env = SOURCE_ENV)]
    pub source: Option<Utf8PathBuf>,
    /// Directive handling flags.
    #[command(flatten)]
    pub directives: DirectiveArgs,
    /// Print this tool's usage.
    #[arg(long = "usage", action = ArgAction::Help)]
    pub usage: Option<bool>,
}

/// Flags controlling unrecognised directive tokens.
#[derive(Debug, ClapArgs, Clone, Copy)]
pub struct DirectiveArgs {
    /// Fail when a field carries an unrecognised directive.
    #[arg(long = "deny-unknown-directives", conflicts_with = "should_ignore_unknown")]
    pub should_deny_unknown: bool,
    /// Do not warn about unrecognised directives.
    #[arg(long = "quiet-directives")]
    pub should_ignore_unknown: bool,
}

impl DirectiveArgs {
    /// Policy selected by the flags; warning is the default.
    #[must_use]
    pub const fn policy(self) -> UnknownDirectivePolicy {
        if self.should_deny_unknown {
            UnknownDirectivePolicy::Deny
        } else if self.should_ignore_unknown {
            UnknownDirectivePolicy::Ignore
        } else {
            UnknownDirectivePolicy::Warn
        }
    }
}

impl Args {
    /// Resolves both invocation forms into a generator configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CligenError::Usage`] when the command or help text is
    /// missing or given twice, and [`CligenError::MissingSource`] when no
    /// source file is configured.
    pub fn into_config(self) -> Result<GeneratorConfig, CligenError> {
        let command = pick("command", self.command_name, self.command)?
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| CligenError::Usage("a command name is required".to_owned()))?;
        let help = pick("help", self.help_text, self.help)?
            .ok_or_else(|| CligenError::Usage("help text is required".to_owned()))?;
        let output = pick("output", self.output_path, self.output)?;
        let source = self
            .source
            .filter(|path| !path.as_str().is_empty())
            .ok_or(CligenError::MissingSource { var: SOURCE_ENV })?;

        Ok(GeneratorConfig {
            command,
            help,
            source,
            output,
            policy: self.directives.policy(),
        })
    }
}

fn pick<T>(
    name: &str,
    positional: Option<T>,
    flag: Option<T>,
) -> Result<Option<T>, CligenError> {
    match (positional, flag) {
        (Some(_), Some(_)) => Err(CligenError::Usage(format!(
            "{name} given both positionally and as --{name}"
        ))),
        (positional, flag) => Ok(positional.or(flag)),
    }
}
