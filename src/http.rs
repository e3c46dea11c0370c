//! HTTP control handlers for runtime level tuning
//!
//! Two axum handlers expose get/set of a shared logger's level threshold
//! so verbosity can be adjusted at runtime without a redeploy.

use crate::core::{Level, Logger};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

/// Form body accepted by [`set_level`].
#[derive(Debug, Deserialize)]
pub struct SetLevelForm {
    pub level: String,
}

/// Handle `GET` on the level endpoint: `200` with the current level's
/// canonical name. No side effects.
pub async fn get_level(State(logger): State<Arc<Logger>>) -> String {
    logger.level().to_string()
}

/// Handle `POST level=<name>` on the level endpoint.
///
/// - unparsable level: `400` with a descriptive body, no change
/// - equal to the current level: `304` with the old level, no change
/// - otherwise: swap the threshold, `200` with the **old** level so the
///   caller sees the transition
pub async fn set_level(
    State(logger): State<Arc<Logger>>,
    Form(form): Form<SetLevelForm>,
) -> Response {
    let Some(new_level) = Level::parse(&form.level) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("invalid log level: {}", form.level),
        )
            .into_response();
    };

    let old_level = logger.level();
    if new_level == old_level {
        return (StatusCode::NOT_MODIFIED, old_level.to_string()).into_response();
    }

    logger.set_level(new_level);
    (StatusCode::OK, old_level.to_string()).into_response()
}

/// Router exposing the control surface at `/log/level`
/// (`GET` to read, `POST` to change).
pub fn router(logger: Arc<Logger>) -> Router {
    Router::new()
        .route("/log/level", get(get_level).post(set_level))
        .with_state(logger)
}
