//! Background job scheduler.
//!
//! Registers one daily cron job per configured trigger time. Every job drives
//! the same shared [`Pipeline`], whose run guard turns an overlapping trigger
//! into a logged skip.

use std::sync::Arc;

use chrono_tz::Tz;
use pricewatch_core::TriggerTime;
use pricewatch_pipeline::{Pipeline, RunOutcome};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the scheduler.
///
/// The returned handle must be kept alive for the lifetime of the process;
/// dropping it stops all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    pipeline: Arc<Pipeline>,
    triggers: &[TriggerTime],
    timezone: Tz,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    for trigger in triggers {
        let job = trigger_job(Arc::clone(&pipeline), *trigger, timezone)?;
        scheduler.add(job).await?;
        tracing::info!(
            at = %trigger,
            timezone = %timezone,
            cron = %trigger.cron_expression(),
            "scheduler: registered daily scrape"
        );
    }

    scheduler.start().await?;
    Ok(scheduler)
}

/// A daily job firing at `trigger` local time in `timezone`.
fn trigger_job(
    pipeline: Arc<Pipeline>,
    trigger: TriggerTime,
    timezone: Tz,
) -> Result<Job, JobSchedulerError> {
    let cron = trigger.cron_expression();

    Job::new_async_tz(cron.as_str(), timezone, move |_uuid, _lock| {
        let pipeline = Arc::clone(&pipeline);

        Box::pin(async move {
            tracing::info!(at = %trigger, "scheduler: starting scrape run");
            match pipeline.run().await {
                RunOutcome::Skipped => {
                    tracing::warn!(at = %trigger, "scheduler: run skipped, previous run active");
                }
                RunOutcome::Completed(summary) => {
                    tracing::info!(
                        at = %trigger,
                        records = summary.records,
                        reported = summary.reported,
                        "scheduler: scrape run complete"
                    );
                }
            }
        })
    })
}
