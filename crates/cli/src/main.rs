mod cmd;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dobuild_lib::BuildError;

use crate::cmd::{BuildOpts, cmd_build};
use crate::output::{OutputFormat, print_error};

/// dobuild - Builds the DeliveryOptimization client components
#[derive(Parser)]
#[command(name = "dobuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,

  /// Report format
  #[arg(short, long, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(flatten)]
  build: BuildOpts,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cmd_build(cli.build, cli.output) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::from(exit_status(&err))
    }
  }
}

/// Exit with the failing tool's code when it fits an exit status, else 1.
fn exit_status(err: &anyhow::Error) -> u8 {
  err
    .downcast_ref::<BuildError>()
    .and_then(BuildError::exit_code)
    .and_then(|code| u8::try_from(code).ok())
    .filter(|code| *code != 0)
    .unwrap_or(1)
}
