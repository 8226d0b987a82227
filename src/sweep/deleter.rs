//! Deletion side of the threaded sweep mode.

use crossbeam_channel::{bounded, Receiver};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::error::SweepError;
use super::report::{EventLog, Reporter, SweepEvent, SweepReport};
use super::scanner::{Candidate, Scanner};
use super::stats::Stats;
use super::targets::TargetSet;

/// Channel capacity between scanner and deleter.
const CHANNEL_CAPACITY: usize = 1024;

/// Removes candidates received from a [`Scanner`].
pub struct Deleter {
    stats: Arc<Stats>,
}

impl Deleter {
    pub fn new(stats: Arc<Stats>) -> Self {
        Self { stats }
    }

    /// Consume candidates until the sender side is dropped.
    pub fn process(&self, rx: Receiver<Candidate>, reporter: &dyn Reporter) -> SweepReport {
        let start = Instant::now();
        let mut log = EventLog::new(reporter, Arc::clone(&self.stats));
        for candidate in rx {
            match candidate {
                Candidate::Match { path, bytes } => log.record(remove(path, bytes)),
                Candidate::Error(err) => log.record(SweepEvent::Failed(err)),
            }
        }
        log.finish(start.elapsed())
    }
}

fn remove(path: PathBuf, bytes: u64) -> SweepEvent {
    match fs::remove_file(&path) {
        Ok(()) => SweepEvent::Deleted { path, bytes },
        Err(source) => SweepEvent::Failed(SweepError::Delete { path, source }),
    }
}

/// Run a scanner thread and a deleter on the calling thread until both
/// are done.
pub fn sweep_threaded(
    root: PathBuf,
    threads: usize,
    targets: Arc<TargetSet>,
    reporter: &dyn Reporter,
) -> SweepReport {
    let stats = Arc::new(Stats::new());
    let scanner = Scanner::new(root, threads, targets, Arc::clone(&stats));
    let deleter = Deleter::new(stats);

    let (tx, rx) = bounded(CHANNEL_CAPACITY);
    std::thread::scope(|scope| {
        scope.spawn(move || scanner.scan(tx));
        deleter.process(rx, reporter)
    })
}
