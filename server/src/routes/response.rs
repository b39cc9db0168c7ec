use serde::Serialize;

/// The admin health check payload.
#[derive(Debug, Serialize)]
pub struct Healthz<'a> {
    pub revision: Option<&'a str>,
    pub timestamp: Option<&'a str>,
    pub version: &'a str,
}
