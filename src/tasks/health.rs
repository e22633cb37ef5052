use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{api::SpamApiClient, domain::HealthStatus, state::SharedHealth};

/// Probes the service once and stores the outcome. Returns the new status.
pub async fn refresh_health(client: &SpamApiClient, shared: &SharedHealth) -> HealthStatus {
    let status = client.check_health().await;
    let previous = std::mem::replace(&mut *shared.write(), status);
    if previous != status {
        tracing::info!(
            target: "health",
            from = previous.label(),
            to = status.label(),
            base = client.base_url(),
            "service status changed"
        );
    }
    status
}

/// Runs the first probe immediately, then keeps polling on `cron_spec`.
pub async fn start_health_monitor(
    client: SpamApiClient,
    cron_spec: &str,
    shared: SharedHealth,
) -> Result<JobScheduler> {
    refresh_health(&client, &shared).await;

    let scheduler = JobScheduler::new().await?;
    let job = Job::new_async(cron_spec, move |_id, _l| {
        let client = client.clone();
        let shared = shared.clone();
        Box::pin(async move {
            refresh_health(&client, &shared).await;
        })
    })?;
    scheduler.add(job).await?;
    tracing::info!(target: "scheduler", cron = %cron_spec, "health poll registered");
    scheduler.start().await?;
    Ok(scheduler)
}
