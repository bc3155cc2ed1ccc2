//! Statistics service.
//!
//! Counters are recomputed from approved rows on every read; nothing is
//! cached or incrementally maintained.

use std::collections::HashMap;
use std::sync::Arc;

use rapport_common::AppResult;
use rapport_db::store::{AdminStats, ReportStore, SubjectStats};

/// Service computing public and administrative statistics.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn ReportStore>,
}

impl StatsService {
    /// Create a new stats service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Per-subject positive/negative counters over approved reports.
    pub async fn report_stats(&self) -> AppResult<HashMap<String, SubjectStats>> {
        self.store.report_stats().await
    }

    /// Counters for one subject; zeroes when it has no approved reports.
    pub async fn subject_stats(&self, subject_id: &str) -> AppResult<SubjectStats> {
        Ok(self
            .report_stats()
            .await?
            .get(subject_id)
            .copied()
            .unwrap_or_default())
    }

    /// Share of approved reports that are positive, or `None` when the
    /// subject has no approved reports at all.
    #[allow(clippy::cast_precision_loss)]
    pub async fn trust_score(&self, subject_id: &str) -> AppResult<Option<f64>> {
        let stats = self.subject_stats(subject_id).await?;
        let total = stats.positive + stats.negative;

        if total == 0 {
            return Ok(None);
        }

        Ok(Some(stats.positive as f64 / total as f64))
    }

    /// Point-in-time counts for the admin dashboard.
    pub async fn admin_stats(&self) -> AppResult<AdminStats> {
        self.store.admin_stats().await
    }
}
