//! Analytics client.

use super::types::{DailyTrend, DashboardStats, HourlyActivity, PopularQuery, RecentQuery};
use crate::{ApiClient, Result};
use std::sync::Arc;

const STATS_PATH: &str = "/api/analytics/stats";
const RECENT_PATH: &str = "/api/analytics/recent";
const POPULAR_PATH: &str = "/api/analytics/popular";
const HOURLY_PATH: &str = "/api/analytics/hourly";
const TRENDS_PATH: &str = "/api/analytics/trends";

/// Everything the live dashboard shows on one refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub popular: Vec<PopularQuery>,
    pub recent: Vec<RecentQuery>,
}

#[derive(Clone)]
pub struct AnalyticsClient {
    api: Arc<ApiClient>,
}

impl AnalyticsClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.api.get_json(STATS_PATH, &[]).await
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<RecentQuery>> {
        self.api
            .get_json(RECENT_PATH, &[("limit", limit.to_string())])
            .await
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<PopularQuery>> {
        self.api
            .get_json(POPULAR_PATH, &[("limit", limit.to_string())])
            .await
    }

    /// Per-hour counts for today.
    pub async fn hourly(&self) -> Result<Vec<HourlyActivity>> {
        self.api.get_json(HOURLY_PATH, &[]).await
    }

    pub async fn trends(&self, days: u32) -> Result<Vec<DailyTrend>> {
        self.api
            .get_json(TRENDS_PATH, &[("days", days.to_string())])
            .await
    }

    /// Stats, top 5 popular and 10 most recent queries, fetched concurrently.
    /// The first failure wins.
    pub async fn dashboard(&self) -> Result<DashboardSnapshot> {
        let (stats, popular, recent) =
            futures::try_join!(self.stats(), self.popular(5), self.recent(10))?;
        Ok(DashboardSnapshot {
            stats,
            popular,
            recent,
        })
    }
}
