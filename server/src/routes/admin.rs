use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, Reply};
use warp::Filter;

use super::response::Healthz;
use crate::environment::Environment;

pub fn make_healthz_route(
    _environment: Environment,
) -> impl warp::Filter<Extract = (impl Reply,), Error = reject::Rejection> + Clone {
    warp::path("healthz").and(warp::get()).map(move || {
        json(&Healthz {
            revision: info::REVISION,
            timestamp: info::BUILD_TIMESTAMP,
            version: info::VERSION,
        })
    })
}

type TerminationFuture = BoxFuture<'static, ()>;

pub type TerminationFunction = Arc<dyn Fn() -> TerminationFuture + Send + Sync>;

pub fn make_termination_route(
    _environment: Environment,
    terminate: TerminationFunction,
) -> impl warp::Filter<Extract = (impl Reply,), Error = reject::Rejection> + Clone {
    let handler = move || -> BoxFuture<'static, Result<StatusCode, std::convert::Infallible>> {
        let terminate = terminate.clone();

        async move {
            terminate().await;
            Ok(StatusCode::NO_CONTENT)
        }
        .boxed()
    };

    warp::path("terminate").and(warp::post()).and_then(handler)
}
