//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use repofetch::config::Config;
use repofetch::defaults;
use repofetch::output::{ColorChoice, OutputConfig};

use crate::commands;

/// repofetch - Clone a set of git repositories and pin them in a lock file
#[derive(Parser, Debug)]
#[command(name = "repofetch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the manifest listing the repositories to fetch
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "REPOFETCH_MANIFEST",
        default_value = defaults::MANIFEST_FILE
    )]
    manifest: PathBuf,

    /// Path to the lock file recording resolved revisions
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "REPOFETCH_LOCK",
        default_value = defaults::LOCK_FILE
    )]
    lock: PathBuf,

    /// Directory to install repositories into (overrides the manifest's
    /// base_directory)
    #[arg(long, global = true, value_name = "DIR", env = "REPOFETCH_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone every repository in the manifest and write the lock file
    Install(commands::install::InstallArgs),

    /// Pull the latest commit of every unpinned repository and rewrite the lock file
    Update(commands::update::UpdateArgs),

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let output = OutputConfig::new(self.color);
        let config = self.config();

        match self.command {
            Some(Commands::Install(args)) => {
                init_logging(&self.log_level, &output);
                commands::install::execute(args, &config, &output)
            }
            Some(Commands::Update(args)) => {
                init_logging(&self.log_level, &output);
                commands::update::execute(args, &config, &output)
            }
            Some(Commands::Unknown(words)) => {
                if let Some(name) = words.first() {
                    eprintln!("Unknown command: {}\n", name);
                }
                print_usage()
            }
            None => print_usage(),
        }
    }

    /// Builds the run configuration from the parsed flags.
    pub fn config(&self) -> Config {
        let config = Config::default()
            .with_manifest_path(&self.manifest)
            .with_lock_path(&self.lock);
        match &self.base_dir {
            Some(dir) => config.with_base_dir(dir),
            None => config,
        }
    }
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}

/// Installs the global logger. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str, output: &OutputConfig) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .write_style(output.write_style())
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
