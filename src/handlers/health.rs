// GET /health handler

use std::convert::Infallible;

use tracing::debug;

use crate::handlers::AppState;
use crate::models::HealthResponse;

pub async fn health_handler(state: AppState) -> Result<impl warp::Reply, Infallible> {
    debug!("GET /health");

    let response = HealthResponse {
        status: "ok".to_string(),
        name: state.settings.app_name.clone(),
        version: state.settings.app_version.clone(),
    };

    Ok(warp::reply::json(&response))
}
