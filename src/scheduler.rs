use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::store::PriorityStore;
use crate::workers::DecayWorker;

/// Cron-driven wrapper around the decay worker with an explicit lifecycle.
///
/// Each wake runs one full decay-then-sweep pass to completion. A failed
/// pass is logged and abandoned; the next wake recomputes every level from
/// absolute timestamps, so there is no retry or checkpointing here.
pub struct DecayScheduler {
    inner: JobScheduler,
}

impl DecayScheduler {
    pub async fn start<S>(worker: Arc<DecayWorker<S>>, cron_schedule: &str) -> Result<Self>
    where
        S: PriorityStore + 'static,
    {
        let inner = JobScheduler::new().await?;

        let job = Job::new_async(cron_schedule, move |_id, _lock| {
            let worker = worker.clone();
            Box::pin(async move {
                info!("Running daily priority decay task...");
                if let Err(e) = worker.run_pass(chrono::Utc::now()).await {
                    error!("Error during priority decay task: {}", e);
                }
            })
        })?;

        inner.add(job).await?;
        inner.start().await?;
        info!("Decay scheduler started with schedule '{}'", cron_schedule);

        Ok(Self { inner })
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.inner.shutdown().await?;
        info!("Decay scheduler stopped");
        Ok(())
    }
}
