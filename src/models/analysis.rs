use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::sentiment::{Keyword, SentenceSentiment, SentimentLabel};

pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// The normalized report handed to presentation. List fields are always
/// present, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_sentiment: SentimentLabel,
    pub overall_score: f64,
    pub confidence: f64,
    pub sentences: Vec<SentenceSentiment>,
    pub insights: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub summary: String,
}

impl AnalysisResult {
    /// Result used when the model output cannot be parsed at all.
    pub fn fallback() -> Self {
        Self {
            overall_sentiment: SentimentLabel::Neutral,
            overall_score: 0.0,
            confidence: DEFAULT_CONFIDENCE,
            sentences: Vec::new(),
            insights: vec!["Unable to fully parse the analysis. Please try again.".to_string()],
            keywords: Vec::new(),
            summary: "Analysis completed with limited results.".to_string(),
        }
    }
}

/// Model output as it arrived: every field optional, mistyped fields read
/// as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialAnalysisResult {
    #[serde(default, deserialize_with = "lenient")]
    pub overall_sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sentences: Option<Vec<PartialSentence>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub insights: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub keywords: Option<Vec<PartialKeyword>>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialSentence {
    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PartialKeyword {
    #[serde(default, deserialize_with = "lenient")]
    pub word: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub count: Option<f64>,
}

impl PartialAnalysisResult {
    pub fn into_result(self) -> AnalysisResult {
        let overall_score = clamp_score(self.overall_score.unwrap_or(0.0));
        let overall_sentiment = resolve_label(self.overall_sentiment.as_deref(), overall_score);

        let sentences = self
            .sentences
            .unwrap_or_default()
            .into_iter()
            .filter_map(PartialSentence::into_sentence)
            .collect();

        let insights = self
            .insights
            .unwrap_or_default()
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect();

        AnalysisResult {
            overall_sentiment,
            overall_score,
            confidence: self
                .confidence
                .unwrap_or(DEFAULT_CONFIDENCE)
                .clamp(0.0, 1.0),
            sentences,
            insights,
            keywords: merge_keywords(self.keywords.unwrap_or_default()),
            summary: self.summary.unwrap_or_default(),
        }
    }
}

impl PartialSentence {
    fn into_sentence(self) -> Option<SentenceSentiment> {
        let text = self.text.filter(|t| !t.trim().is_empty())?;
        let score = clamp_score(self.score.unwrap_or(0.0));
        Some(SentenceSentiment {
            text,
            sentiment: resolve_label(self.sentiment.as_deref(), score),
            score,
        })
    }
}

fn merge_keywords(raw: Vec<PartialKeyword>) -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for kw in raw {
        let Some(word) = kw.word.filter(|w| !w.trim().is_empty()) else {
            continue;
        };
        let count = kw.count.map(|c| c.round().max(1.0) as u32).unwrap_or(1);
        let key = word.trim().to_lowercase();

        match index.get(&key) {
            Some(&i) => keywords[i].count = keywords[i].count.saturating_add(count),
            None => {
                index.insert(key, keywords.len());
                keywords.push(Keyword {
                    word,
                    sentiment: resolve_label(kw.sentiment.as_deref(), 0.0),
                    count,
                });
            }
        }
    }

    keywords
}

/// Known labels pass through; anything else is read off the score.
fn resolve_label(raw: Option<&str>, score: f64) -> SentimentLabel {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SentimentLabel::from_score(score))
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(-1.0, 1.0)
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}
