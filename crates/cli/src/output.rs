//! Terminal reporting for a build run.
//!
//! Text output is the start banner, one `Time to <phase>` line per executed
//! phase and a completion line. JSON output is the serialized run report.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use dobuild_lib::BuildConfiguration;
use dobuild_lib::runner::PhaseTimings;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

const DONE_MARK: &str = "✓";
const FAIL_MARK: &str = "✗";
const BANNER_MARK: &str = "#";

/// Clock-style elapsed time, `H:MM:SS.mmm`.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  format!(
    "{}:{:02}:{:02}.{:03}",
    secs / 3600,
    (secs / 60) % 60,
    secs % 60,
    duration.subsec_millis()
  )
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    DONE_MARK.if_supports_color(Stream::Stdout, |s| s.green()),
    message.if_supports_color(Stream::Stdout, |s| s.bold())
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    FAIL_MARK.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

fn print_field(label: &str, value: &dyn std::fmt::Display) {
  println!(
    "  {:<16} {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// What is about to be built and where.
pub fn print_banner(config: &BuildConfiguration) {
  println!(
    "{} Starting Build for project: {}",
    BANNER_MARK.if_supports_color(Stream::Stdout, |s| s.cyan()),
    config.project
  );
  print_field("Target OS", &config.platform.display_name());
  print_field("Flavor", &config.flavor_label());
  print_field("Config", &config.flavor);
  print_field("Subproject", &config.project);
  print_field("CMake Target", &config.target);
  print_field("CMake Generator", &config.generator);
  print_field("Clean", &config.clean);
  print_field("Source Path", &config.source_path.display());
  print_field("Build Path", &config.build_path().display());
  println!();
}

/// One line per phase that ran, in execution order.
pub fn print_phase_times(timings: &PhaseTimings) {
  for (phase, elapsed) in timings.iter() {
    print_field(&format!("Time to {phase}"), &format_duration(elapsed));
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let mut stdout = io::stdout().lock();
  serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON report")?;
  writeln!(stdout).context("Failed to write JSON report")?;
  Ok(())
}
