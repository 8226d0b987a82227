//! End-to-end sweep: load the list, walk the tree, report.

use std::sync::Arc;

use super::config::{Config, WalkMode};
use super::deleter::sweep_threaded;
use super::error::SweepError;
use super::report::{Reporter, SweepReport};
use super::targets::TargetSet;
use super::walker::Sweeper;

/// Run one sweep with the given configuration.
///
/// Fails before touching the tree when the config is invalid or the list
/// file cannot be read. Entry errors are part of the returned report.
pub async fn run(config: &Config, reporter: Arc<dyn Reporter>) -> Result<SweepReport, SweepError> {
    config.validate()?;
    let targets = Arc::new(TargetSet::load(&config.list_file).await?);

    let report = match config.mode {
        WalkMode::Async => {
            Sweeper::new(config.root.clone(), targets)
                .with_max_in_flight(config.max_in_flight)
                .run(&*reporter)
                .await
        }
        WalkMode::Threaded => {
            let root = config.root.clone();
            let threads = num_cpus::get();
            let worker = Arc::clone(&reporter);
            tokio::task::spawn_blocking(move || {
                sweep_threaded(root, threads, targets, &*worker)
            })
            .await
            .map_err(|e| SweepError::WorkerFailed {
                reason: e.to_string(),
            })?
        }
    };

    reporter.finish(&report);
    Ok(report)
}
