use chatlens_types::Direction;

use crate::normalize::{NormalizedMessage, messages_by_direction};

/// Label recorded for a text the detector could not classify.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Per-text language classifier.
pub trait LanguageDetector {
    /// ISO 639-1 code when available, else whatever code the detector
    /// produces; `None` when the text cannot be classified.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Statistical detector backed by `whatlang`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        let code = info.lang().code();
        let short = isolang::Language::from_639_3(code).and_then(|lang| lang.to_639_1());
        Some(short.unwrap_or(code).to_string())
    }
}

/// One label per user message with text, in message order.
pub fn detect_languages(
    messages: &[NormalizedMessage],
    detector: &dyn LanguageDetector,
) -> Vec<String> {
    messages_by_direction(messages, Direction::User)
        .map(|m| {
            detector
                .detect(m.text())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
        })
        .collect()
}

/// Most frequent non-unknown label.
///
/// Ties go to the label seen first. `None` when nothing was classified.
pub fn predominant_language(labels: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for label in labels.iter().filter(|l| l.as_str() != UNKNOWN_LANGUAGE) {
        match counts.iter_mut().find(|(seen, _)| *seen == label.as_str()) {
            Some(entry) => entry.1 += 1,
            None => counts.push((label.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_messages;
    use chatlens_types::RawMessage;

    struct PrefixDetector;

    impl LanguageDetector for PrefixDetector {
        fn detect(&self, text: &str) -> Option<String> {
            text.split_once(':').map(|(lang, _)| lang.to_string())
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_only_user_text_is_classified() {
        let raw = vec![
            RawMessage::new(Direction::User, "es:hola", "2025-03-01T10:00:00Z"),
            RawMessage::new(Direction::Agent, "en:hello", "2025-03-01T10:00:01Z"),
            RawMessage::new(Direction::User, "", "2025-03-01T10:00:02Z"),
            RawMessage::new(Direction::User, "???", "2025-03-01T10:00:03Z"),
        ];
        let detected = detect_languages(&normalize_messages(&raw), &PrefixDetector);
        assert_eq!(detected, labels(&["es", "unknown"]));
    }

    #[test]
    fn test_predominant_ignores_unknown() {
        let detected = labels(&["unknown", "unknown", "es"]);
        assert_eq!(predominant_language(&detected).as_deref(), Some("es"));
    }

    #[test]
    fn test_predominant_tie_goes_to_first_seen() {
        let detected = labels(&["en", "es", "es", "en"]);
        assert_eq!(predominant_language(&detected).as_deref(), Some("en"));
    }

    #[test]
    fn test_no_determination() {
        assert_eq!(predominant_language(&[]), None);
        assert_eq!(predominant_language(&labels(&["unknown"])), None);
    }

    #[test]
    fn test_whatlang_reports_short_codes() {
        let detector = WhatlangDetector;
        let spanish = detector.detect(
            "Hola, necesito ayuda con mi pedido porque todavía no llegó a mi casa y ya pasaron dos semanas",
        );
        assert_eq!(spanish.as_deref(), Some("es"));
        assert_eq!(detector.detect(""), None);
    }
}
