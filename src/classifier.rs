use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::models::ClassifiedInput;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?[a-z0-9.-]+\.[a-z]{2,6}([/?#]\S*)?$")
        .expect("Invalid regex: URL shape pattern")
});

/// Shape match only: prose that looks like a bare domain ("e.g.com") counts
/// as a URL, and a URL whose top-level label is longer than six letters
/// does not.
pub fn is_url(input: &str) -> bool {
    URL_PATTERN.is_match(input.trim())
}

/// Decides whether a submission is a link to fetch or text to analyze.
/// Empty or whitespace-only input is a validation failure, not a class.
pub fn classify(raw: &str) -> Result<ClassifiedInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Please provide text to analyze".to_string()));
    }

    if is_url(trimmed) {
        Ok(ClassifiedInput::UrlRef(trimmed.to_string()))
    } else {
        Ok(ClassifiedInput::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_urls() {
        for input in [
            "example.com",
            "https://example.com",
            "http://news.example.co.uk/story?id=42",
            "  www.my-site.org/reviews/latest  ",
            "HTTPS://Example.COM/Path",
        ] {
            assert!(
                matches!(classify(input).unwrap(), ClassifiedInput::UrlRef(_)),
                "expected URL: {}",
                input
            );
        }
    }

    #[test]
    fn test_classify_text() {
        for input in [
            "I love this product!",
            "The app is okay. It does what it's supposed to do.",
            "example.com is my favourite site",
            "localhost",
            "e.g. 3.5 stars",
            "https://example.photography",
        ] {
            assert!(
                matches!(classify(input).unwrap(), ClassifiedInput::Text(_)),
                "expected text: {}",
                input
            );
        }
    }

    #[test]
    fn test_classify_trims_input() {
        assert_eq!(
            classify("  example.com\n").unwrap(),
            ClassifiedInput::UrlRef("example.com".to_string())
        );
        assert_eq!(
            classify("  hello there  ").unwrap(),
            ClassifiedInput::Text("hello there".to_string())
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(classify(""), Err(Error::Validation(_))));
        assert!(matches!(classify("  \n\t "), Err(Error::Validation(_))));
    }
}
