//! Resolve types.

use serde::{Deserialize, Serialize};

pub const USER_TYPE_UMRAH: &str = "umrah";
pub const USER_TYPE_EXTERNAL: &str = "external";

/// Highest score the backend is assumed to give a match (5 keywords, 2 points each).
///
/// The backend does not declare its scale; percentages derived from it are
/// wrong if the scoring range ever changes.
pub const ASSUMED_MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub name: String,
    /// `"umrah"`, `"external"`, or any type the backend knows.
    pub user_type: String,
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_alternatives: Option<bool>,
}

impl ResolveRequest {
    pub fn new(
        name: impl Into<String>,
        user_type: impl Into<String>,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            user_type: user_type.into(),
            issue: issue.into(),
            get_alternatives: None,
        }
    }

    /// Ask the backend for the ranked list of candidates as well.
    pub fn with_alternatives(mut self, enabled: bool) -> Self {
        self.get_alternatives = Some(enabled);
        self
    }
}

/// One candidate resolution. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub case_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub priority: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub response_text: Option<String>,
    #[serde(default)]
    pub fallback: Option<String>,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::lenient::string")]
    pub last_updated: Option<String>,
}

impl MatchResult {
    /// The text to show the agent: the response, else the fallback wording.
    pub fn display_text(&self) -> Option<&str> {
        self.response_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.fallback.as_deref().filter(|s| !s.is_empty()))
    }

    /// Score as a percentage of [`ASSUMED_MAX_SCORE`], capped at 100.
    pub fn accuracy_percent(&self) -> Option<u8> {
        let score = self.score?;
        if !score.is_finite() {
            return None;
        }
        let pct = (score / ASSUMED_MAX_SCORE * 100.0).round().clamp(0.0, 100.0);
        Some(pct as u8)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub best_match: Option<MatchResult>,
    /// Ranked candidates; includes the primary match at some position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<MatchResult>>,
}

impl ResolveResponse {
    /// Candidates to cycle through: the alternatives, else just the match.
    pub fn candidates(&self) -> Vec<MatchResult> {
        match &self.alternatives {
            Some(alts) if !alts.is_empty() => alts.clone(),
            _ => self.best_match.iter().cloned().collect(),
        }
    }
}
