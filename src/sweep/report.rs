//! Sweep events, console reporting, and the final run report.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::SweepError;
use super::stats::Stats;

/// One observable outcome of the walk.
#[derive(Debug)]
pub enum SweepEvent {
    /// A file was removed.
    Deleted { path: PathBuf, bytes: u64 },
    /// A single entry could not be listed, inspected, or removed.
    Failed(SweepError),
}

impl fmt::Display for SweepEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SweepEvent::Deleted { path, .. } => write!(f, "已删除文件: {}", path.display()),
            SweepEvent::Failed(err) => write!(f, "{}", err),
        }
    }
}

/// Receives events as they happen.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &SweepEvent);

    /// Called once after the walk has completed.
    fn finish(&self, _report: &SweepReport) {}
}

/// Prints deletions to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &SweepEvent) {
        match event {
            SweepEvent::Deleted { path, .. } => {
                println!("{} {}", "已删除文件:".green(), path.display());
            }
            SweepEvent::Failed(err) => {
                eprintln!("{}", err.to_string().red());
            }
        }
    }

    fn finish(&self, report: &SweepReport) {
        if self.quiet {
            return;
        }

        let line = report.summary_line();
        if report.has_errors() {
            println!("{}", line.yellow().bold());
        } else {
            println!("{}", line.bold());
        }
    }
}

/// Keeps rendered event lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn deletion_lines(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.starts_with("已删除文件: "))
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: &SweepEvent) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(event.to_string());
        }
    }
}

/// Outcome of a completed sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub deleted: Vec<PathBuf>,
    pub errors: Vec<SweepError>,
    pub directories_scanned: usize,
    pub files_inspected: usize,
    pub bytes_freed: u64,
    pub duration: Duration,
}

impl SweepReport {
    pub fn files_deleted(&self) -> usize {
        self.deleted.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Swept {} dirs: deleted {} files ({}), {} errors in {:.2}s",
            self.directories_scanned,
            self.files_deleted(),
            humansize::format_size(self.bytes_freed, humansize::BINARY),
            self.errors.len(),
            self.duration.as_secs_f64()
        )
    }
}

/// Single-owner accumulator that forwards events to a reporter and
/// builds the final report.
pub(crate) struct EventLog<'a> {
    reporter: &'a dyn Reporter,
    stats: Arc<Stats>,
    deleted: Vec<PathBuf>,
    errors: Vec<SweepError>,
}

impl<'a> EventLog<'a> {
    pub(crate) fn new(reporter: &'a dyn Reporter, stats: Arc<Stats>) -> Self {
        Self {
            reporter,
            stats,
            deleted: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, event: SweepEvent) {
        self.reporter.report(&event);
        match event {
            SweepEvent::Deleted { path, bytes } => {
                self.stats.add_deleted(bytes);
                self.deleted.push(path);
            }
            SweepEvent::Failed(err) => self.errors.push(err),
        }
    }

    pub(crate) fn finish(self, duration: Duration) -> SweepReport {
        SweepReport {
            deleted: self.deleted,
            errors: self.errors,
            directories_scanned: self.stats.directories(),
            files_inspected: self.stats.inspected(),
            bytes_freed: self.stats.bytes(),
            duration,
        }
    }
}
