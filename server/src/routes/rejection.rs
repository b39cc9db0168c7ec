use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            error: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

/// The client-visible error body. The wire contract is a single
/// human-readable `error` key, nothing else.
#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    pub(crate) error: String,
}

/// Where in request handling the error arose. Logged alongside the
/// error, never serialized to the client.
#[derive(Clone, Debug)]
pub enum Context {
    List {
        location: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    },
    Create,
}

impl Context {
    pub fn list(
        location: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
    ) -> Context {
        Context::List {
            location,
            start_date,
            end_date,
        }
    }

    pub fn create() -> Context {
        Context::Create
    }
}
