use thiserror::Error;
use warp::reject;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The submitted or queried location is not one of the known metro
    /// areas.
    #[error("Invalid location")]
    InvalidLocation,

    /// A date parameter is not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date format")]
    InvalidDateFormat,

    /// The form submission lacks `ReviewBody` or `Location`.
    #[error("Missing required fields")]
    MissingFields,

    /// A persisted timestamp could not be interpreted, which means the
    /// backing file holds corrupt data.
    #[error("malformed stored timestamp")]
    MalformedTimestamp { timestamp: String },

    /// Represents an error reading or writing the backing CSV file.
    #[error("CSV error")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// Represents an I/O error while persisting.
    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl reject::Reject for BackendError {}
