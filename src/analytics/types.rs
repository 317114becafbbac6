//! Analytics types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_queries: u64,
    #[serde(default)]
    pub today_queries: u64,
    #[serde(default)]
    pub week_queries: u64,
    #[serde(default)]
    pub month_queries: u64,
    /// Percentage in `0..=100`.
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub avg_response_time_ms: f64,
    #[serde(default)]
    pub user_type_breakdown: Vec<UserTypeCount>,
}

impl DashboardStats {
    pub fn successful_queries(&self) -> u64 {
        (self.total_queries as f64 * self.success_rate / 100.0).round() as u64
    }

    pub fn failed_queries(&self) -> u64 {
        (self.total_queries as f64 * (100.0 - self.success_rate) / 100.0).round() as u64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTypeCount {
    #[serde(rename = "_id", default, deserialize_with = "crate::utils::lenient::string")]
    pub user_type: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentQuery {
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub user_type: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub query: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub matched_case_id: Option<String>,
    #[serde(default)]
    pub response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularQuery {
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub query: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub hour: u8,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub successful: u64,
}
