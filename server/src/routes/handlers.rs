use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;
use time::Date;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::BackendError;
use crate::location;
use crate::review::{parse_date, AnnotatedReview, Review};
use crate::routes::{
    query::ListQuery,
    rejection::{Context, Rejection},
};
use crate::sentiment::SentimentScorer;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn list(environment: Environment, query: ListQuery) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| {
            Rejection::new(
                Context::list(
                    query.location.clone(),
                    query.start_date.clone(),
                    query.end_date.clone(),
                ),
                e,
            )
        };

        debug!(environment.logger, "Listing reviews..."; "location" => ?query.location, "start_date" => ?query.start_date, "end_date" => ?query.end_date);

        let reviews = environment.store.snapshot();

        let mut annotated = annotate(reviews, &environment.scorer);
        sort_by_compound(&mut annotated);

        let annotated =
            filter_by_location(annotated, query.location.as_deref()).map_err(&error_handler)?;
        let annotated = filter_by_date_window(
            annotated,
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        )
        .map_err(&error_handler)?;

        with_status(json(&annotated), StatusCode::OK)
    }
}

pub async fn create(environment: Environment, form: HashMap<String, String>) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::create(), e);

        let review = validate_submission(&form).map_err(&error_handler)?;

        debug!(environment.logger, "Appending review..."; "id" => &review.id, "location" => &review.location);

        // Persist before replying: a 201 promises the review is durable.
        environment
            .store
            .append(review.clone())
            .await
            .map_err(&error_handler)?;

        with_status(json(&review), StatusCode::CREATED)
    }
}

/// Checks a form submission and builds the review to store. Only
/// absence of a field is rejected; empty strings pass through verbatim.
fn validate_submission(form: &HashMap<String, String>) -> Result<Review, BackendError> {
    let body = form.get("ReviewBody").ok_or(BackendError::MissingFields)?;
    let location = form.get("Location").ok_or(BackendError::MissingFields)?;

    if !location::is_valid(location) {
        return Err(BackendError::InvalidLocation);
    }

    Ok(Review::new(body.clone(), location.clone()))
}

fn annotate(reviews: Vec<Review>, scorer: &SentimentScorer) -> Vec<AnnotatedReview> {
    reviews
        .into_iter()
        .map(|review| {
            let sentiment = scorer.score(&review.body);
            AnnotatedReview { review, sentiment }
        })
        .collect()
}

/// Stable descending sort on the compound score; equal scores keep
/// their insertion order.
fn sort_by_compound(reviews: &mut [AnnotatedReview]) {
    reviews.sort_by(|a, b| {
        b.sentiment
            .compound
            .partial_cmp(&a.sentiment.compound)
            .unwrap_or(Ordering::Equal)
    });
}

fn filter_by_location(
    reviews: Vec<AnnotatedReview>,
    location: Option<&str>,
) -> Result<Vec<AnnotatedReview>, BackendError> {
    let location = match location {
        Some(location) => location,
        None => return Ok(reviews),
    };

    if !location::is_valid(location) {
        return Err(BackendError::InvalidLocation);
    }

    Ok(reviews
        .into_iter()
        .filter(|r| r.review.location == location)
        .collect())
}

/// Keeps reviews whose timestamp date falls inside the given bounds,
/// both inclusive. With neither bound present no date filtering
/// happens at all.
fn filter_by_date_window(
    reviews: Vec<AnnotatedReview>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<AnnotatedReview>, BackendError> {
    if start_date.is_none() && end_date.is_none() {
        return Ok(reviews);
    }

    let start = parse_bound(start_date)?;
    let end = parse_bound(end_date)?;

    let mut kept = Vec::with_capacity(reviews.len());

    for review in reviews {
        let date = review.review.date()?;

        let after_start = start.map_or(true, |s| date >= s);
        let before_end = end.map_or(true, |e| date <= e);

        if after_start && before_end {
            kept.push(review);
        }
    }

    Ok(kept)
}

fn parse_bound(bound: Option<&str>) -> Result<Option<Date>, BackendError> {
    bound
        .map(|b| parse_date(b).map_err(|_| BackendError::InvalidDateFormat))
        .transpose()
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
