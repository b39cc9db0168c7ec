use vader_sentiment::SentimentIntensityAnalyzer;

use crate::review::SentimentScore;

/// Wraps the VADER intensity analyzer behind a small, infallible
/// interface. Scoring is a pure function of the text; the lexicon is
/// fixed when the analyzer is built, so results never change between
/// calls for the same input.
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    pub fn new() -> Self {
        SentimentScorer {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Scores one piece of text. Any string is accepted, including the
    /// empty one, which scores neutral across the board.
    pub fn score(&self, text: &str) -> SentimentScore {
        let scores = self.analyzer.polarity_scores(text);
        let value = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        SentimentScore {
            neg: value("neg"),
            neu: value("neu"),
            pos: value("pos"),
            compound: value("compound"),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("This place is absolutely wonderful, I love it!");

        assert!(score.compound > 0.0);
        assert!(score.pos > 0.0);
    }

    #[test]
    fn negative_text_scores_negative() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("Terrible experience, I hate everything about it.");

        assert!(score.compound < 0.0);
        assert!(score.neg > 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scorer = SentimentScorer::new();
        let score = scorer.score("");

        assert_eq!(score.compound, 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = SentimentScorer::new();
        let text = "The service was fine but the food was disappointing.";

        assert_eq!(scorer.score(text), scorer.score(text));
    }
}
