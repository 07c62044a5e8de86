//! SEO text analysis
//!
//! Pure computation over the submitted text; no I/O.

use serde::Serialize;
use std::collections::HashMap;

/// Assumed reading speed
const WORDS_PER_MINUTE: usize = 200;
/// Content below this is flagged as thin
const THIN_CONTENT_WORDS: usize = 300;
/// Average sentence length above this is flagged
const LONG_SENTENCE_AVG: f64 = 25.0;
/// Keyword density above this is flagged as stuffing
const STUFFING_DENSITY: f64 = 0.03;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "if",
    "in", "is", "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "were", "will",
    "with", "you", "your",
];

#[derive(Debug, Clone, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    pub count: usize,
    pub density: f64,
}

#[derive(Debug, Serialize)]
pub struct SeoReport {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_words: f64,
    pub reading_time_minutes: usize,
    pub top_keywords: Vec<KeywordDensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_keyword_count: Option<usize>,
    pub warnings: Vec<String>,
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.trim().chars().any(char::is_alphanumeric))
        .count()
}

/// Analyze a text for basic SEO signals
pub fn analyze(text: &str, focus_keyword: Option<&str>) -> SeoReport {
    let words = tokenize(text);
    let word_count = words.len();
    let sentences = sentence_count(text);

    let avg_sentence_words = if sentences > 0 {
        word_count as f64 / sentences as f64
    } else {
        0.0
    };

    let reading_time_minutes = word_count.div_ceil(WORDS_PER_MINUTE);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        if !STOPWORDS.contains(&word.as_str()) {
            *counts.entry(word.as_str()).or_default() += 1;
        }
    }
    let mut top_keywords: Vec<KeywordDensity> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordDensity {
            keyword: keyword.to_string(),
            count,
            density: count as f64 / word_count as f64,
        })
        .collect();
    top_keywords.sort_by(|a, b| b.count.cmp(&a.count).then(a.keyword.cmp(&b.keyword)));
    top_keywords.truncate(5);

    let focus_keyword_count = focus_keyword.map(|kw| {
        let kw = kw.to_lowercase();
        words.iter().filter(|w| **w == kw).count()
    });

    let mut warnings = Vec::new();
    if word_count < THIN_CONTENT_WORDS {
        warnings.push(format!(
            "Thin content: {} words, aim for at least {}",
            word_count, THIN_CONTENT_WORDS
        ));
    }
    if avg_sentence_words > LONG_SENTENCE_AVG {
        warnings.push(format!(
            "Sentences average {:.1} words, aim for under {:.0}",
            avg_sentence_words, LONG_SENTENCE_AVG
        ));
    }
    if let (Some(count), Some(kw)) = (focus_keyword_count, focus_keyword) {
        if count == 0 {
            warnings.push(format!("Focus keyword '{}' does not appear in the text", kw));
        } else if word_count > 0 && count as f64 / word_count as f64 > STUFFING_DENSITY {
            warnings.push(format!("Focus keyword '{}' looks stuffed", kw));
        }
    }

    SeoReport {
        word_count,
        sentence_count: sentences,
        avg_sentence_words,
        reading_time_minutes,
        top_keywords,
        focus_keyword_count,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_words_and_sentences() {
        let report = analyze("Rust is fast. Rust is safe! Is Rust fun?", None);
        assert_eq!(report.word_count, 9);
        assert_eq!(report.sentence_count, 3);
        assert!((report.avg_sentence_words - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text() {
        let report = analyze("", None);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.sentence_count, 0);
        assert_eq!(report.reading_time_minutes, 0);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = vec!["word"; 201].join(" ");
        assert_eq!(analyze(&text, None).reading_time_minutes, 2);
    }

    #[test]
    fn test_stopwords_excluded_from_keywords() {
        let report = analyze("the the the rust rust compiler", None);
        assert!(report.top_keywords.iter().all(|k| k.keyword != "the"));
        assert_eq!(report.top_keywords[0].keyword, "rust");
        assert_eq!(report.top_keywords[0].count, 2);
    }

    #[test]
    fn test_punctuation_stripped_from_tokens() {
        let report = analyze("Coffee, coffee; COFFEE!", None);
        assert_eq!(report.top_keywords[0].keyword, "coffee");
        assert_eq!(report.top_keywords[0].count, 3);
    }

    #[test]
    fn test_missing_focus_keyword_warns() {
        let report = analyze("A short note about tea.", Some("espresso"));
        assert_eq!(report.focus_keyword_count, Some(0));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("does not appear")));
    }

    #[test]
    fn test_thin_content_warning() {
        let report = analyze("Just a few words here.", None);
        assert!(report.warnings.iter().any(|w| w.contains("Thin content")));
    }

    #[test]
    fn test_deterministic() {
        let text = "Brewing guides help readers brew better coffee at home.";
        let a = analyze(text, Some("coffee"));
        let b = analyze(text, Some("coffee"));
        assert_eq!(a.word_count, b.word_count);
        assert_eq!(a.top_keywords.len(), b.top_keywords.len());
        assert_eq!(a.warnings, b.warnings);
    }
}
