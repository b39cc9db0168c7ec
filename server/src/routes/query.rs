use serde::Deserialize;

/// The optional filters accepted by the list endpoint. Dates are kept
/// as raw strings here; validation happens in the handler so a bad
/// value maps to the right error body.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
