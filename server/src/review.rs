use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::errors::BackendError;

/// The format of a stored [`Review`] timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single customer review, as persisted in the backing file.
///
/// The serde names pin the exact column headers and JSON keys of the wire
/// and storage formats.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Review {
    /// The server-assigned identifier.
    #[serde(rename = "ReviewId")]
    pub id: String,

    /// The review text.
    #[serde(rename = "ReviewBody")]
    pub body: String,

    /// One of the valid metro areas.
    #[serde(rename = "Location")]
    pub location: String,

    /// Local creation time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl Review {
    /// Builds a new review with a fresh id and the current local time.
    pub fn new(body: String, location: String) -> Self {
        Review {
            id: Uuid::new_v4().to_string(),
            body,
            location,
            timestamp: now_local().format(TIMESTAMP_FORMAT),
        }
    }

    /// The calendar date of the timestamp, taken from its first
    /// whitespace-delimited token.
    pub fn date(&self) -> Result<Date, BackendError> {
        let token = self.timestamp.split_whitespace().next().unwrap_or_default();

        parse_date(token).map_err(|_| BackendError::MalformedTimestamp {
            timestamp: self.timestamp.clone(),
        })
    }
}

/// Parses a `YYYY-MM-DD` string as a calendar date.
pub fn parse_date(s: &str) -> Result<Date, time::ParseError> {
    Date::parse(s, DATE_FORMAT)
}

fn now_local() -> OffsetDateTime {
    OffsetDateTime::try_now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// The polarity breakdown for one piece of text. `compound` is the
/// normalized aggregate in [-1, 1] used as the sort key for reads.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct SentimentScore {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// A review with its freshly computed sentiment, as served by reads.
/// Never persisted; scores are recomputed on every request.
#[derive(Clone, Debug, Serialize)]
pub struct AnnotatedReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_review_has_wellformed_timestamp() {
        let review = Review::new("Lovely.".to_owned(), "Denver, Colorado".to_owned());

        assert_eq!(review.timestamp.len(), 19);
        assert!(review.date().is_ok());
        time::PrimitiveDateTime::parse(&review.timestamp, TIMESTAMP_FORMAT)
            .expect("timestamp parses back");
    }

    #[test]
    fn new_reviews_get_distinct_ids() {
        let a = Review::new("One.".to_owned(), "Mesa, Arizona".to_owned());
        let b = Review::new("Two.".to_owned(), "Mesa, Arizona".to_owned());

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn date_uses_first_token_only() {
        let review = Review {
            id: "x".to_owned(),
            body: String::new(),
            location: "Denver, Colorado".to_owned(),
            timestamp: "2024-02-29 23:59:59".to_owned(),
        };

        assert_eq!(
            review.date().unwrap(),
            parse_date("2024-02-29").unwrap()
        );
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let review = Review {
            id: "x".to_owned(),
            body: String::new(),
            location: "Denver, Colorado".to_owned(),
            timestamp: "not a date".to_owned(),
        };

        assert!(review.date().is_err());
    }

    #[test]
    fn invalid_calendar_dates_do_not_parse() {
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }
}
