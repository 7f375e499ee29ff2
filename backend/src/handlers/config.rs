use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::ApiResult;
use crate::state::AppState;
use shared::config::{FeatureFlags, PublicConfig};

pub async fn get_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.public_config.as_ref().clone())
}

pub async fn get_features(State(state): State<AppState>) -> Json<FeatureFlags> {
    Json(state.public_config.features())
}

/// Serves `window.__TIMEFUL_CONFIG__` for the browser bundle.
pub async fn config_script(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let script = state
        .public_config
        .to_script()
        .map_err(anyhow::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        script,
    ))
}
