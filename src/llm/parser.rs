use serde_json::Value;

use crate::models::analysis::{AnalysisResult, PartialAnalysisResult};

/// Outcome of reading a model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Parsed(AnalysisResult),
    /// No JSON object could be recovered; holds `AnalysisResult::fallback()`.
    Fallback(AnalysisResult),
}

impl Normalized {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            Normalized::Parsed(result) | Normalized::Fallback(result) => result,
        }
    }
}

pub fn normalize(raw_text: &str) -> Normalized {
    let parsed = parse_object(extract_json(raw_text))
        .or_else(|| find_balanced_object(raw_text).and_then(parse_object));

    match parsed {
        Some(partial) => Normalized::Parsed(partial.into_result()),
        None => {
            tracing::warn!("Failed to parse model response, using fallback analysis");
            Normalized::Fallback(AnalysisResult::fallback())
        }
    }
}

fn parse_object(candidate: &str) -> Option<PartialAnalysisResult> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Candidate is not valid JSON: {}", e);
            None
        }
    }
}

/// Picks the JSON candidate: a ```json fence, then a bare ``` fence, then
/// the whole text.
fn extract_json(text: &str) -> &str {
    if let Some(block) = fenced_block(text, "```json") {
        return block;
    }

    if let Some(block) = fenced_block(text, "```") {
        return strip_language_tag(block);
    }

    text.trim()
}

fn fenced_block<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let end = text[start..].find("```")?;
    Some(text[start..start + end].trim())
}

fn strip_language_tag(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, rest))
            if !first.is_empty()
                && first.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            rest.trim()
        }
        _ => block,
    }
}

/// First `{ ... }` span whose braces balance outside of string literals.
fn find_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Keyword, SentenceSentiment, SentimentLabel};

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the analysis:
```json
{"summary": "ok"}
```
"#;
        assert_eq!(extract_json(input), r#"{"summary": "ok"}"#);
    }

    #[test]
    fn test_extract_json_from_bare_fence_with_tag() {
        let input = "```javascript\n{\"summary\": \"ok\"}\n```";
        assert_eq!(extract_json(input), r#"{"summary": "ok"}"#);

        let input = "```\n{\"summary\": \"ok\"}\n```";
        assert_eq!(extract_json(input), r#"{"summary": "ok"}"#);
    }

    #[test]
    fn test_extract_json_whole_text() {
        let input = "  {\"summary\": \"ok\"}  ";
        assert_eq!(extract_json(input), r#"{"summary": "ok"}"#);
    }

    #[test]
    fn test_fence_stripping() {
        let input = "```json\n{\"overallSentiment\":\"positive\",\"overallScore\":0.8,\"confidence\":0.9,\"sentences\":[],\"insights\":[],\"keywords\":[],\"summary\":\"ok\"}\n```";
        let normalized = normalize(input);

        assert!(!normalized.is_fallback());
        let result = normalized.into_result();
        assert_eq!(result.overall_sentiment, SentimentLabel::Positive);
        assert_eq!(result.overall_score, 0.8);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.summary, "ok");
    }

    #[test]
    fn test_valid_json_copied_field_for_field() {
        let input = r#"```json
{
  "overallSentiment": "negative",
  "overallScore": -0.65,
  "confidence": 0.88,
  "sentences": [
    {"text": "The food was cold.", "sentiment": "negative", "score": -0.7},
    {"text": "The host was friendly.", "sentiment": "positive", "score": 0.6}
  ],
  "insights": ["Service speed is the main complaint", "Ambiance is a strength"],
  "keywords": [{"word": "cold", "sentiment": "negative", "count": 1}],
  "summary": "Mostly negative dining experience."
}
```"#;
        let result = normalize(input).into_result();

        assert_eq!(
            result,
            AnalysisResult {
                overall_sentiment: SentimentLabel::Negative,
                overall_score: -0.65,
                confidence: 0.88,
                sentences: vec![
                    SentenceSentiment {
                        text: "The food was cold.".to_string(),
                        sentiment: SentimentLabel::Negative,
                        score: -0.7,
                    },
                    SentenceSentiment {
                        text: "The host was friendly.".to_string(),
                        sentiment: SentimentLabel::Positive,
                        score: 0.6,
                    },
                ],
                insights: vec![
                    "Service speed is the main complaint".to_string(),
                    "Ambiance is a strength".to_string(),
                ],
                keywords: vec![Keyword {
                    word: "cold".to_string(),
                    sentiment: SentimentLabel::Negative,
                    count: 1,
                }],
                summary: "Mostly negative dining experience.".to_string(),
            }
        );
    }

    #[test]
    fn test_fallback_on_malformed_json() {
        let normalized = normalize("not json at all");
        assert!(normalized.is_fallback());

        let result = normalized.into_result();
        assert_eq!(result.overall_sentiment, SentimentLabel::Neutral);
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.confidence, 0.5);
        assert!(result.sentences.is_empty());
        assert!(result.keywords.is_empty());
        assert!(!result.insights.is_empty());
        assert!(!result.summary.is_empty());
    }

    #[test]
    fn test_fallback_on_non_object_json() {
        assert!(normalize("[1, 2, 3]").is_fallback());
        assert!(normalize("```json\n\"positive\"\n```").is_fallback());
    }

    #[test]
    fn test_fallback_on_truncated_fence() {
        assert!(normalize("```json\n{\"overallSentiment\": \"posi").is_fallback());
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let input = r#"Sure! Here is the result: {"overallSentiment": "positive", "summary": "Great {brace} in text"} Hope this helps."#;
        let normalized = normalize(input);

        assert!(!normalized.is_fallback());
        let result = normalized.into_result();
        assert_eq!(result.overall_sentiment, SentimentLabel::Positive);
        assert_eq!(result.summary, "Great {brace} in text");
    }

    #[test]
    fn test_find_balanced_object_multibyte() {
        let input = "résumé → {\"summary\": \"naïve ✓\"} tail";
        assert_eq!(find_balanced_object(input), Some("{\"summary\": \"naïve ✓\"}"));
    }
}
