//! Async sweep over a directory tree.
//!
//! A coordinator owns a `JoinSet` of jobs. Listing a directory yields one
//! inspect job per child, and inspecting a directory yields a new listing
//! job, so siblings and subtrees overlap freely. A semaphore caps how many
//! filesystem calls are in flight at once. `run` returns once the set is
//! drained.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use super::error::SweepError;
use super::report::{EventLog, Reporter, SweepEvent, SweepReport};
use super::stats::Stats;
use super::targets::TargetSet;

/// Default cap on concurrent filesystem calls.
pub fn default_max_in_flight() -> usize {
    num_cpus::get().saturating_mul(4).max(1)
}

enum Job {
    Scan(PathBuf),
    Inspect(PathBuf),
}

enum Outcome {
    Listed {
        children: Vec<PathBuf>,
        error: Option<SweepError>,
    },
    Directory(PathBuf),
    Event(SweepEvent),
    Kept,
}

/// State shared by every job of one run.
struct Shared {
    targets: Arc<TargetSet>,
    limiter: Semaphore,
    stats: Arc<Stats>,
}

/// Deletes every file under `root` whose base name is in the target set.
pub struct Sweeper {
    root: PathBuf,
    targets: Arc<TargetSet>,
    max_in_flight: usize,
}

impl Sweeper {
    pub fn new(root: impl Into<PathBuf>, targets: Arc<TargetSet>) -> Self {
        Self {
            root: root.into(),
            targets,
            max_in_flight: default_max_in_flight(),
        }
    }

    /// Limit concurrent filesystem calls. Zero is treated as one.
    ///
    /// The cap applies to I/O only. One task is still spawned per entry, so
    /// the job set grows with the width of the tree.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    /// Walk the tree, delete matches, and wait for every job to finish.
    ///
    /// Entry errors are reported and collected, never returned.
    pub async fn run(&self, reporter: &dyn Reporter) -> SweepReport {
        let start = Instant::now();
        let stats = Arc::new(Stats::new());
        let shared = Arc::new(Shared {
            targets: Arc::clone(&self.targets),
            limiter: Semaphore::new(self.max_in_flight),
            stats: Arc::clone(&stats),
        });

        let mut log = EventLog::new(reporter, stats);
        let mut jobs = JoinSet::new();
        spawn_job(&mut jobs, &shared, Job::Scan(self.root.clone()));

        while let Some(joined) = jobs.join_next().await {
            match joined {
                Ok(Outcome::Listed { children, error }) => {
                    if let Some(err) = error {
                        log.record(SweepEvent::Failed(err));
                    }
                    for child in children {
                        spawn_job(&mut jobs, &shared, Job::Inspect(child));
                    }
                }
                Ok(Outcome::Directory(dir)) => {
                    spawn_job(&mut jobs, &shared, Job::Scan(dir));
                }
                Ok(Outcome::Event(event)) => log.record(event),
                Ok(Outcome::Kept) => {}
                Err(e) => log.record(job_failure(e)),
            }
        }

        log.finish(start.elapsed())
    }
}

/// A job that panicked or was cancelled lost its part of the tree.
fn job_failure(err: JoinError) -> SweepEvent {
    SweepEvent::Failed(SweepError::WorkerFailed {
        reason: err.to_string(),
    })
}

fn spawn_job(jobs: &mut JoinSet<Outcome>, shared: &Arc<Shared>, job: Job) {
    let shared = Arc::clone(shared);
    jobs.spawn(async move {
        // The semaphore is never closed, so acquire only fails on shutdown
        let _permit = shared.limiter.acquire().await.ok();
        match job {
            Job::Scan(dir) => scan(&shared, dir).await,
            Job::Inspect(path) => inspect(&shared, path).await,
        }
    });
}

async fn scan(shared: &Shared, dir: PathBuf) -> Outcome {
    let mut read_dir = match tokio::fs::read_dir(&dir).await {
        Ok(read_dir) => read_dir,
        Err(source) => {
            return Outcome::Event(SweepEvent::Failed(SweepError::ScanDirectory {
                path: dir,
                source,
            }));
        }
    };
    shared.stats.add_directory();

    let mut children = Vec::new();
    loop {
        match read_dir.next_entry().await {
            Ok(Some(entry)) => children.push(dir.join(entry.file_name())),
            Ok(None) => break,
            Err(source) => {
                return Outcome::Listed {
                    children,
                    error: Some(SweepError::ScanDirectory { path: dir, source }),
                };
            }
        }
    }

    Outcome::Listed {
        children,
        error: None,
    }
}

async fn inspect(shared: &Shared, path: PathBuf) -> Outcome {
    // metadata follows symlinks: linked directories are descended
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(source) => {
            return Outcome::Event(SweepEvent::Failed(SweepError::Inspect { path, source }));
        }
    };

    if metadata.is_dir() {
        return Outcome::Directory(path);
    }

    shared.stats.add_inspected();
    let matched = path
        .file_name()
        .map(|name| shared.targets.contains(name))
        .unwrap_or(false);
    if !matched {
        return Outcome::Kept;
    }

    match tokio::fs::remove_file(&path).await {
        Ok(()) => Outcome::Event(SweepEvent::Deleted {
            path,
            bytes: metadata.len(),
        }),
        Err(source) => Outcome::Event(SweepEvent::Failed(SweepError::Delete { path, source })),
    }
}
