// POST /api/v1/ask handler

use std::convert::Infallible;

use tracing::info;
use warp::http::StatusCode;

use crate::handlers::AppState;
use crate::models::{AskRequest, ErrorBody};

pub async fn ask_handler(
    request: AskRequest,
    state: AppState,
) -> Result<impl warp::Reply, Infallible> {
    let max_tokens = state.settings.clamp_max_tokens(request.max_tokens);
    info!(
        prompt_chars = request.prompt.chars().count(),
        requested_max_tokens = ?request.max_tokens,
        max_tokens,
        "POST /api/v1/ask"
    );

    let reply = match state.client.ask(&request.prompt, Some(max_tokens)).await {
        Ok(response) => warp::reply::with_status(warp::reply::json(&response), StatusCode::OK),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&ErrorBody::from(&err)),
            err.status(),
        ),
    };

    Ok(reply)
}
