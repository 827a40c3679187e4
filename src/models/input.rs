use serde::{Deserialize, Serialize};

/// One user submission, owned by a single pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub raw_input: String,
}

impl AnalysisRequest {
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
    Text(String),
    UrlRef(String),
}

impl ClassifiedInput {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedInput::Text(_) => "text",
            ClassifiedInput::UrlRef(_) => "url",
        }
    }
}
