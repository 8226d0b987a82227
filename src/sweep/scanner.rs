//! Parallel tree scanner for the threaded sweep mode.
//!
//! Walks with jwalk on its own rayon pool and streams matching files and
//! walk errors to a channel. Deletion happens on the receiving side.

use crossbeam_channel::Sender;
use jwalk::{Parallelism, WalkDir};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::SweepError;
use super::stats::Stats;
use super::targets::TargetSet;

/// Item produced by the scanner.
#[derive(Debug)]
pub enum Candidate {
    /// A file whose base name is in the target set.
    Match { path: PathBuf, bytes: u64 },
    /// A directory could not be read or an entry could not be inspected.
    Error(SweepError),
}

pub struct Scanner {
    root: PathBuf,
    threads: usize,
    targets: Arc<TargetSet>,
    stats: Arc<Stats>,
}

impl Scanner {
    pub fn new(root: PathBuf, threads: usize, targets: Arc<TargetSet>, stats: Arc<Stats>) -> Self {
        Self {
            root,
            threads: threads.max(1),
            targets,
            stats,
        }
    }

    /// Walk the whole tree, sending candidates to `tx`.
    ///
    /// Stops early only if the receiver is dropped.
    pub fn scan(&self, tx: Sender<Candidate>) {
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .skip_hidden(false)
            .sort(false)
            .parallelism(Parallelism::RayonNewPool(self.threads));

        for entry in walker {
            let candidate = match entry {
                Ok(mut entry) => {
                    if entry.file_type().is_dir() {
                        // jwalk keeps listing failures on the directory entry
                        match entry.read_children_error.take() {
                            Some(err) => Candidate::Error(SweepError::ScanDirectory {
                                path: entry.path(),
                                source: io_source(err),
                            }),
                            None => {
                                self.stats.add_directory();
                                continue;
                            }
                        }
                    } else if entry.depth == 0 {
                        Candidate::Error(SweepError::ScanDirectory {
                            path: entry.path(),
                            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
                        })
                    } else {
                        self.stats.add_inspected();
                        if !self.targets.contains(entry.file_name()) {
                            continue;
                        }
                        match entry.metadata() {
                            Ok(metadata) => Candidate::Match {
                                path: entry.path(),
                                bytes: metadata.len(),
                            },
                            Err(e) => Candidate::Error(self.classify(e)),
                        }
                    }
                }
                Err(e) => Candidate::Error(self.classify(e)),
            };

            if tx.send(candidate).is_err() {
                break;
            }
        }
    }

    /// Map a walk error onto listing or inspection failure.
    fn classify(&self, err: jwalk::Error) -> SweepError {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.root.clone());
        let listing = err.depth() == 0 || (err.loop_ancestor().is_none() && path.is_dir());
        let source = io_source(err);

        if listing {
            SweepError::ScanDirectory { path, source }
        } else {
            SweepError::Inspect { path, source }
        }
    }
}

fn io_source(err: jwalk::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message))
}
