use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub success: bool,
    pub content: String,
    pub metadata: HashMap<String, String>,
    pub error: Option<String>,
    pub unsupported_site: bool,
}

impl ScrapeResult {
    pub fn success(content: String, metadata: HashMap<String, String>) -> Self {
        Self {
            success: true,
            content,
            metadata,
            error: None,
            unsupported_site: false,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn unsupported(error: impl Into<String>) -> Self {
        Self {
            unsupported_site: true,
            ..Self::failure(error)
        }
    }
}
