mod build;

pub use build::{BuildOpts, cmd_build};
