use futures::stream::{self, StreamExt};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::fixture_queries::{self, FixtureToCheck};
use crate::services::football_api::FootballApiClient;

/// How many fixtures are polled concurrently during a sweep.
const MAX_CONCURRENT_CHECKS: usize = 4;

#[derive(Debug, Serialize, Clone)]
pub struct SweepSummary {
    pub checked: usize,
    pub updated: usize,
    pub updated_ids: Vec<i64>,
}

/// Advances status and score of imminent and in-progress fixtures by
/// re-polling the external API per fixture.
///
/// Each fixture is handled in its own scope: one failed fetch or write is
/// logged and skipped without touching the rest of the batch, and nothing
/// is retried within the same sweep. The next scheduled run re-selects
/// whatever is still eligible.
pub struct LiveUpdateService {
    pool: PgPool,
    client: FootballApiClient,
    lead_window_minutes: i64,
}

impl LiveUpdateService {
    pub fn new(pool: PgPool, client: FootballApiClient, lead_window_minutes: i64) -> Self {
        Self { pool, client, lead_window_minutes }
    }

    /// One full sweep over the eligible fixtures. Only the selection query
    /// can fail the sweep as a whole.
    pub async fn run_sweep(&self) -> Result<SweepSummary, sqlx::Error> {
        let candidates =
            fixture_queries::fixtures_to_check(&self.pool, self.lead_window_minutes).await?;

        tracing::info!("Found {} fixtures to check", candidates.len());

        let checked = candidates.len();

        let mut updated_ids: Vec<i64> = stream::iter(candidates)
            .map(|candidate| self.check_fixture(candidate))
            .buffer_unordered(MAX_CONCURRENT_CHECKS)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;
        updated_ids.sort_unstable();

        tracing::info!(
            "✅ Sweep completed. Updated {} of {} fixtures",
            updated_ids.len(),
            checked
        );

        Ok(SweepSummary { checked, updated: updated_ids.len(), updated_ids })
    }

    /// Poll one fixture and write its new state if anything changed.
    /// Returns the fixture id when a write happened.
    async fn check_fixture(&self, candidate: FixtureToCheck) -> Option<i64> {
        let api_fixture = match self.client.fetch_fixture(candidate.id).await {
            Ok(Some(fixture)) => fixture,
            Ok(None) => {
                tracing::info!("No data returned for fixture {}", candidate.id);
                return None;
            }
            Err(e) => {
                tracing::warn!("Fetch failed for fixture {}: {}", candidate.id, e);
                return None;
            }
        };

        let new_status = api_fixture.fixture.status.short;
        let home_score = api_fixture.goals.home;
        let away_score = api_fixture.goals.away;

        tracing::debug!(
            "Fixture {}: {} -> {}, score: {:?}-{:?}",
            candidate.id,
            candidate.status_short,
            new_status,
            home_score,
            away_score
        );

        // Skip the write when nothing moved
        if new_status == candidate.status_short && home_score.is_none() && away_score.is_none() {
            return None;
        }

        // An upstream glitch can momentarily report NS for a match that has
        // already kicked off; a fixture never moves back to scheduled
        if new_status == "NS" && candidate.status_short != "NS" {
            tracing::warn!(
                "Ignoring backward transition for fixture {} ({} -> NS)",
                candidate.id,
                candidate.status_short
            );
            return None;
        }

        match fixture_queries::update_fixture_state(
            &self.pool,
            candidate.id,
            &new_status,
            home_score,
            away_score,
        )
        .await
        {
            Ok(()) => {
                if candidate.status_short == "NS" && new_status != "NS" {
                    tracing::info!(
                        "⚠️ Predictions locked for fixture {} ({} -> {})",
                        candidate.id,
                        candidate.status_short,
                        new_status
                    );
                }
                Some(candidate.id)
            }
            Err(e) => {
                tracing::error!("Failed to update fixture {}: {}", candidate.id, e);
                None
            }
        }
    }
}
