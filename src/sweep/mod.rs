//! Sweep module - deletes files by base name from a directory tree
//!
//! A list file names the targets. Every file below the root whose name is
//! on the list is removed, in any subdirectory.

pub mod config;
pub mod deleter;
pub mod error;
pub mod report;
pub mod runner;
pub mod scanner;
pub mod stats;
pub mod targets;
pub mod walker;

pub use config::{Config, Overrides, WalkMode};
pub use deleter::{sweep_threaded, Deleter};
pub use error::SweepError;
pub use report::{ConsoleReporter, MemoryReporter, Reporter, SweepEvent, SweepReport};
pub use runner::run;
pub use scanner::{Candidate, Scanner};
pub use stats::Stats;
pub use targets::TargetSet;
pub use walker::Sweeper;
