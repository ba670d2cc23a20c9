use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check;
mod config;
mod export;
mod parse;
mod show;
mod util;

#[derive(Parser, Debug)]
#[command(name = "probspec")]
#[command(about = "Build, check and export challenge problem pages.", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (`-v` info, `-vv` debug). `PROBSPEC_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Site config file (defaults to `probspec.json` searched upwards from cwd).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the problems in the built-in catalog.
    List(show::ListArgs),
    /// Print one problem as a markdown page or a JSON record.
    Show(show::ShowArgs),
    /// Write problem pages, records and an index to a directory.
    Export(export::ExportArgs),
    /// Build every problem, lint interfaces and render every document.
    Check(check::CheckArgs),
    /// Parse a problem JSON record and print its binding signature.
    Parse(parse::ParseArgs),
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir()?;
    let site = config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Command::List(args) => show::cmd_list(&site, args),
        Command::Show(args) => show::cmd_show(&site, args),
        Command::Export(args) => export::cmd_export(&site, args),
        Command::Check(args) => check::cmd_check(args),
        Command::Parse(args) => parse::cmd_parse(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("PROBSPEC_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
