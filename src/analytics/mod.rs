//! Analytics adapter: read-only dashboard statistics.

mod client;
mod types;

pub use client::{AnalyticsClient, DashboardSnapshot};
pub use types::{
    DailyTrend, DashboardStats, HourlyActivity, PopularQuery, RecentQuery, UserTypeCount,
};
