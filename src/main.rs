use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use namesweep::sweep::{self, Config, ConsoleReporter, Overrides, WalkMode};

/// Delete every file under a directory whose name appears in a list file
#[derive(Debug, Parser)]
#[command(name = "namesweep", version, about)]
struct Args {
    /// List file, one file name per line
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Directory to sweep recursively
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// TOML config file (defaults to <config dir>/namesweep/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Walk strategy
    #[arg(short, long, value_enum)]
    mode: Option<WalkMode>,

    /// Maximum concurrent filesystem calls in async mode
    #[arg(long, value_name = "N")]
    max_in_flight: Option<usize>,

    /// Exit with an error if any entry could not be processed
    #[arg(long)]
    strict: bool,

    /// Do not print the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            list_file: self.list.clone(),
            root: self.root.clone(),
            mode: self.mode,
            max_in_flight: self.max_in_flight,
            strict: self.strict,
            quiet: self.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let mut config = Config::load(args.config.as_deref())?;
    config.apply(args.overrides());

    let reporter = Arc::new(ConsoleReporter::new(config.quiet));
    let report = sweep::run(&config, reporter).await?;

    if config.strict && report.has_errors() {
        bail!("{} entries could not be processed", report.errors.len());
    }

    Ok(())
}
