pub const SYSTEM_PROMPT: &str = r#"You are an expert sentiment analysis AI. Analyze the provided text and return a JSON response with the following structure:
{
  "overallSentiment": "positive" | "negative" | "neutral",
  "overallScore": number between -1 (most negative) and 1 (most positive),
  "confidence": number between 0 and 1,
  "sentences": [
    {
      "text": "the sentence",
      "sentiment": "positive" | "negative" | "neutral",
      "score": number between -1 and 1
    }
  ],
  "insights": [
    "Key insight 1",
    "Key insight 2",
    "Key insight 3"
  ],
  "keywords": [
    { "word": "keyword", "sentiment": "positive" | "negative" | "neutral", "count": 1 }
  ],
  "summary": "A brief 1-2 sentence summary of the overall sentiment"
}

Analyze deeply and provide actionable insights. Be accurate with sentiment scores."#;

pub fn user_prompt(text: &str) -> String {
    format!("Analyze the sentiment of this text:\n\n{}", text)
}

/// Shortens `text` to at most `max_chars` characters for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push_str("...");
    short
}
