use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::BackendError;

pub mod admin;
mod handlers;
mod query;
mod rejection;
mod response;

pub use internal::*;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Request failed"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &BackendError) -> StatusCode {
    use BackendError::*;

    match e {
        InvalidLocation | InvalidDateFormat | MissingFields => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use std::collections::HashMap;

    use warp::filters::BoxedFilter;
    use warp::Filter;
    use warp::Reply;
    use warp::{get as g, post, query};

    use super::{handlers, query as q};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    // Dispatch is purely on method; the path is never inspected.

    pub fn make_list_route(environment: Environment) -> Route {
        warp::any()
            .map(move || environment.clone())
            .and(g())
            .and(query::<q::ListQuery>())
            .and_then(handlers::list)
            .boxed()
    }

    pub fn make_create_route(environment: Environment) -> Route {
        warp::any()
            .map(move || environment.clone())
            .and(post())
            .and(warp::body::form::<HashMap<String, String>>())
            .and_then(handlers::create)
            .boxed()
    }
}
