//! Offline keyword classifier.
//!
//! Last tier of sentiment resolution: runs when every hosted model failed.
//! Pure and deterministic; the vocabularies cover Turkish and English.

use crate::types::SentimentLabel;

/// Positive cues, matched as lower-case substrings.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "mutlu", "harika", "güzel", "iyi", "mükemmel", "süper", "neşeli", "sevinçli",
    "happy", "great", "good", "excellent", "wonderful", "amazing", "fantastic",
    "joyful", "cheerful", "glad", "pleased", "delighted", "excited", "proud",
    "başarılı", "başarı", "kutlama", "celebration", "win", "kazan", "motive",
    "enerjik", "enerji", "canlı", "dinç",
];

/// Negative cues, matched as lower-case substrings.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "kötü", "üzgün", "yorgun", "stresli", "endişeli", "kaygılı", "kızgın",
    "bad", "sad", "tired", "stressed", "anxious", "worried", "angry", "mad",
    "frustrated", "disappointed", "depressed", "exhausted", "drained", "upset",
    "hasta", "sick", "ağrı", "pain", "acı", "zor", "difficult", "problem",
    "korku", "fear", "kaygı", "anxiety", "hayal kırıklığı", "disappointment",
];

/// Classify `text` by keyword hits.
///
/// One-sided matches decide directly. When both vocabularies match, the
/// side with more matching keywords wins and a tie goes to positive. No
/// match at all is neutral.
pub fn classify(text: &str) -> SentimentLabel {
    let lower = text.to_lowercase();
    let positive = hits(&lower, POSITIVE_KEYWORDS);
    let negative = hits(&lower, NEGATIVE_KEYWORDS);

    match (positive, negative) {
        (0, 0) => SentimentLabel::Neutral,
        (_, 0) => SentimentLabel::Positive,
        (0, _) => SentimentLabel::Negative,
        (p, n) if p >= n => SentimentLabel::Positive,
        _ => SentimentLabel::Negative,
    }
}

/// Number of keywords from `vocabulary` contained in `text`.
fn hits(text: &str, vocabulary: &[&str]) -> usize {
    vocabulary.iter().filter(|keyword| text.contains(*keyword)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_positive_entry() {
        assert_eq!(
            classify("Bugün çok mutlu ve enerjik hissediyorum"),
            SentimentLabel::Positive
        );
    }

    #[test]
    fn english_negative_entry() {
        assert_eq!(
            classify("Feeling TIRED and worried about tomorrow"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn no_cues_is_neutral() {
        assert_eq!(classify("Markete gittim, ekmek aldım."), SentimentLabel::Neutral);
    }

    #[test]
    fn mixed_entry_goes_to_majority() {
        // "yorgun", "stresli", "zor" against "güzel".
        assert_eq!(
            classify("Güzel bir sabahtı ama yorgun, stresli ve zor bir gün geçti"),
            SentimentLabel::Negative
        );
    }

    #[test]
    fn mixed_tie_goes_to_positive() {
        assert_eq!(classify("happy but sad"), SentimentLabel::Positive);
    }

    #[test]
    fn classification_is_stable() {
        let text = "Sınavda başarılı oldum ama biraz endişeliyim";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
    }
}
