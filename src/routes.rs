// Route definitions and handlers

use std::convert::Infallible;

use reqwest::Url;
use tracing::warn;
use warp::filters::cors::Cors;
use warp::http::Uri;
use warp::Filter;

use crate::config::Settings;
use crate::handlers::{self, AppState};

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let api = warp::path("api").and(warp::path("v1"));
    let cors = cors_filter(&state.settings);
    let with_state = warp::any().map(move || state.clone());

    // POST /api/v1/ask
    let ask = api
        .and(warp::path("ask"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_state.clone())
        .and_then(handlers::ask_handler);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state)
        .and_then(handlers::health_handler);

    // Errors get CORS headers too; rejections from the CORS check itself are
    // recovered by the outer handler.
    ask.or(health)
        .recover(handlers::handle_rejection)
        .with(cors)
        .recover(handlers::handle_rejection)
}

fn cors_filter(settings: &Settings) -> Cors {
    let builder = warp::cors()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization"]);

    match allowed_origins(settings) {
        None => builder.allow_any_origin().build(),
        Some(origins) => builder
            .allow_origins(origins.iter().map(String::as_str))
            .build(),
    }
}

/// Origins to pass to the CORS filter, or `None` to allow any
///
/// Each entry is normalised to the ASCII form a browser sends in its `Origin`
/// header. Entries that are not a bare `scheme://host[:port]` are skipped.
fn allowed_origins(settings: &Settings) -> Option<Vec<String>> {
    let origins = settings.cors_origins();
    if origins.iter().any(|o| o == "*") {
        return None;
    }

    let mut valid: Vec<String> = Vec::new();
    for origin in origins {
        match normalize_origin(&origin) {
            Some(normalized) => {
                if !valid.contains(&normalized) {
                    valid.push(normalized);
                }
            }
            None => warn!(origin = %origin, "skipping invalid CORS origin"),
        }
    }
    Some(valid)
}

/// ASCII serialization of `origin`, or `None` if it is not a plain origin
///
/// Hosts come back punycoded, percent-decoded and lowercased, and default
/// ports are dropped, so the result always parses as a warp origin.
fn normalize_origin(origin: &str) -> Option<String> {
    if !origin.contains("://") || origin.ends_with('/') {
        return None;
    }
    let url = Url::parse(origin).ok()?;
    let plain = matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none();
    if !plain {
        return None;
    }

    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    let serialized = origin.ascii_serialization();
    if !serialized.is_ascii() || serialized.parse::<Uri>().is_err() {
        return None;
    }
    Some(serialized)
}
