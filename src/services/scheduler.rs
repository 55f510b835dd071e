use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use sqlx::PgPool;

use crate::config::settings::FootballApiSettings;
use crate::services::fixture_sync::FixtureSyncService;
use crate::services::football_api::FootballApiClient;
use crate::services::live_update::LiveUpdateService;

/// Owns the two recurring jobs of the fixture pipeline: the window sync and
/// the live-update sweep. Retry is the scheduler's job: a failed run is
/// logged and the next tick tries again from scratch.
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    pool: PgPool,
    client: FootballApiClient,
    settings: FootballApiSettings,
}

impl SchedulerService {
    pub async fn new(
        pool: PgPool,
        client: FootballApiClient,
        settings: FootballApiSettings,
    ) -> Result<Self, Box<dyn Error>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            pool,
            client,
            settings,
        })
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        let scheduler = self.scheduler.lock().await;

        // Fixture window sync
        let pool = self.pool.clone();
        let client = self.client.clone();
        let settings = self.settings.clone();
        let sync_job = Job::new_async(self.settings.sync_schedule.as_str(), move |_uuid, _l| {
            let pool = pool.clone();
            let client = client.clone();
            let settings = settings.clone();

            Box::pin(async move {
                tracing::info!("🔄 Running scheduled fixture sync");
                let service = FixtureSyncService::new(pool, client, &settings);
                match service.sync().await {
                    Ok(summary) => {
                        tracing::info!("✅ Scheduled sync stored {} fixtures", summary.synced);
                    }
                    Err(e) => {
                        tracing::error!("❌ Scheduled fixture sync failed: {}", e);
                    }
                }
            })
        })?;
        scheduler.add(sync_job).await?;

        // Live status sweep
        let pool = self.pool.clone();
        let client = self.client.clone();
        let lead_window = self.settings.lead_window_minutes;
        let update_job =
            Job::new_async(self.settings.live_update_schedule.as_str(), move |_uuid, _l| {
                let pool = pool.clone();
                let client = client.clone();

                Box::pin(async move {
                    let service = LiveUpdateService::new(pool, client, lead_window);
                    match service.run_sweep().await {
                        Ok(summary) => {
                            if summary.updated > 0 {
                                tracing::info!(
                                    "✅ Live sweep updated {} of {} fixtures",
                                    summary.updated,
                                    summary.checked
                                );
                            }
                        }
                        Err(e) => {
                            tracing::error!("❌ Live sweep failed: {}", e);
                        }
                    }
                })
            })?;
        scheduler.add(update_job).await?;

        scheduler.start().await?;

        tracing::info!("✅ Scheduler started (sync + live update jobs registered)");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), Box<dyn Error>> {
        let mut scheduler = self.scheduler.lock().await;
        scheduler.shutdown().await?;

        tracing::info!("🛑 Scheduler service stopped");
        Ok(())
    }
}
