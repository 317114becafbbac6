//! Search types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub caller_name: String,
    pub caller_type: String,
    pub issue_description: String,
    pub activation: Option<String>,
    pub registration: Option<String>,
    pub request_status: Option<String>,
}

impl SearchRequest {
    pub fn new(
        caller_name: impl Into<String>,
        caller_type: impl Into<String>,
        issue_description: impl Into<String>,
    ) -> Self {
        Self {
            caller_name: caller_name.into(),
            caller_type: caller_type.into(),
            issue_description: issue_description.into(),
            ..Default::default()
        }
    }

    /// Form fields in send order. Empty optional fields are left out.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("caller_name", self.caller_name.clone()),
            ("caller_type", self.caller_type.clone()),
            ("issue_description", self.issue_description.clone()),
        ];
        let optional = [
            ("activation", &self.activation),
            ("registration", &self.registration),
            ("request_status", &self.request_status),
        ];
        for (name, value) in optional {
            if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
                fields.push((name, v.clone()));
            }
        }
        fields
    }
}

/// Either a rendered result or a backend-supplied error text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}
