//! dobuild-lib: build orchestration for the Delivery Optimization client
//!
//! This crate turns a build request into CMake invocations:
//! - `platform`: host classification and build paths
//! - `config`: validated [`BuildConfiguration`] from flags and environment
//! - `compose`: per-platform generate and build options
//! - `execute`: running external tools
//! - `runner`: the clean → generate → build → package state machine

pub mod compose;
pub mod config;
pub mod error;
pub mod execute;
pub mod platform;
pub mod runner;
pub mod util;

pub use config::{BuildArgs, BuildConfiguration, BuildEnv, ConfigResolver};
pub use error::{BuildError, Result};
pub use runner::{BuildRunner, Phase, RunReport};
