//! Scheduler for running crawl cycles on an interval
//!
//! Cycles run one at a time on the calling task. Shutdown is only observed
//! between cycles, so a cycle that has started always finishes and the
//! checkpoint file stays the single durability boundary.

use crate::checkpoint::CheckpointStore;
use crate::crawler::coordinator::Coordinator;
use crate::crawler::fetcher::Transport;
use crate::output::ArticleSink;
use std::time::Duration;
use tokio::sync::watch;

/// Timing of the periodic loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Wait between the end of one cycle and the start of the next
    pub interval: Duration,
    /// Run a cycle before the first wait
    pub run_immediately: bool,
}

impl ScheduleOptions {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run_immediately: false,
        }
    }
}

/// Runs crawl cycles until `shutdown` flips to `true` or its sender is dropped
///
/// Each cycle's articles go to `sink`. A failing sink is logged and the loop
/// carries on; the articles of that cycle are not retried.
///
/// # Returns
///
/// The number of cycles that ran.
pub async fn run_periodic<T, C, S>(
    coordinator: &Coordinator<T, C>,
    sink: &mut S,
    options: ScheduleOptions,
    mut shutdown: watch::Receiver<bool>,
) -> u64
where
    T: Transport,
    C: CheckpointStore,
    S: ArticleSink + ?Sized,
{
    let mut cycles = 0u64;
    let mut wait_first = !options.run_immediately;

    loop {
        if *shutdown.borrow() {
            break;
        }

        if wait_first {
            tracing::debug!("Next cycle in {:?}", options.interval);
            tokio::select! {
                _ = tokio::time::sleep(options.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
            }
        }
        wait_first = true;

        let report = coordinator.run_cycle().await;
        cycles += 1;

        if let Err(e) = sink.deliver(&report.articles) {
            tracing::error!(
                "Failed to deliver {} article(s): {}",
                report.articles.len(),
                e
            );
        }
    }

    tracing::info!("Scheduler stopped after {} cycle(s)", cycles);
    cycles
}
