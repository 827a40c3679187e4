use chrono::{DateTime, Utc};

use crate::models::{AnalysisResult, Keyword, SentimentLabel};

const BAR_WIDTH: usize = 20;

/// One-line notice shown after a successful run.
pub fn completion_message(result: &AnalysisResult) -> String {
    format!(
        "Detected {} sentiment with {} confidence",
        result.overall_sentiment.as_str(),
        percent(result.confidence)
    )
}

/// Label for the gauge needle, read from the score alone.
pub fn gauge_label(score: f64) -> SentimentLabel {
    SentimentLabel::from_score(score)
}

pub fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

pub fn signed_score(score: f64) -> String {
    let scaled = (score * 100.0).round();
    if scaled > 0.0 {
        format!("+{:.0}", scaled)
    } else {
        format!("{:.0}", scaled)
    }
}

/// Horizontal bar whose filled length is proportional to `|score|`.
pub fn score_bar(score: f64) -> String {
    let filled = ((score.abs().min(1.0)) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn keyword_tag(keyword: &Keyword) -> String {
    if keyword.count > 1 {
        format!("{} ({}) ×{}", keyword.word, keyword.sentiment.as_str(), keyword.count)
    } else {
        format!("{} ({})", keyword.word, keyword.sentiment.as_str())
    }
}

fn overview_line(result: &AnalysisResult) -> String {
    format!(
        "{} sentences analyzed • {} keywords detected",
        result.sentences.len(),
        result.keywords.len()
    )
}

/// Plain-text rendering of an `AnalysisResult` for the terminal.
pub fn format_text(result: &AnalysisResult, analyzed_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n=== Sentiment Analysis: {} ===\n\n",
        result.overall_sentiment
    ));
    output.push_str(&format!(
        "Gauge: {} {} ({} • {} confidence)\n",
        score_bar(result.overall_score),
        percent(result.overall_score),
        gauge_label(result.overall_score),
        percent(result.confidence)
    ));
    output.push_str(&format!("{}\n", overview_line(result)));

    if !result.summary.is_empty() {
        output.push_str(&format!("\nSummary:\n  {}\n", result.summary));
    }

    if !result.sentences.is_empty() {
        output.push_str("\nSentence Breakdown:\n");
        for sentence in &result.sentences {
            output.push_str(&format!(
                "  {} {:>4} {:<8} {}\n",
                score_bar(sentence.score),
                signed_score(sentence.score),
                sentence.sentiment.as_str(),
                sentence.text
            ));
        }
    }

    if !result.insights.is_empty() {
        output.push_str("\nKey Insights:\n");
        for (i, insight) in result.insights.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, insight));
        }
    }

    if !result.keywords.is_empty() {
        let tags: Vec<String> = result.keywords.iter().map(keyword_tag).collect();
        output.push_str(&format!("\nKeywords: {}\n", tags.join(", ")));
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

pub fn format_markdown(result: &AnalysisResult, analyzed_at: DateTime<Utc>) -> String {
    let mut output = String::new();

    output.push_str("# Sentiment Analysis\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!(
        "| Overall Sentiment | {} |\n",
        result.overall_sentiment
    ));
    output.push_str(&format!(
        "| Score | {} |\n",
        percent(result.overall_score)
    ));
    output.push_str(&format!(
        "| Confidence | {} |\n",
        percent(result.confidence)
    ));
    output.push_str(&format!("\n_{}_\n", overview_line(result)));

    if !result.summary.is_empty() {
        output.push_str(&format!("\n## Summary\n\n> {}\n", result.summary));
    }

    if !result.sentences.is_empty() {
        output.push_str("\n## Sentence Breakdown\n\n");
        output.push_str("| Sentence | Sentiment | Score |\n");
        output.push_str("|----------|-----------|-------|\n");
        for sentence in &result.sentences {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                sentence.text.replace('|', "\\|"),
                sentence.sentiment,
                signed_score(sentence.score)
            ));
        }
    }

    if !result.insights.is_empty() {
        output.push_str("\n## Key Insights\n\n");
        for (i, insight) in result.insights.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, insight));
        }
    }

    if !result.keywords.is_empty() {
        output.push_str("\n## Keywords\n\n");
        for keyword in &result.keywords {
            output.push_str(&format!("- `{}`\n", keyword_tag(keyword)));
        }
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
