// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalogo_api::{map_error, ApiError};
use serde_json::json;
use tracing::error;

/// Wire error body, same contract for every failure: `{"message": ...}`.
#[must_use]
pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"message": err.message}))).into_response()
}

#[must_use]
pub(crate) fn store_error_response(route: &'static str, err: &StoreError) -> Response {
    match err {
        StoreError::NotFound => api_error_response(&ApiError::product_not_found()),
        StoreError::Upstream(message) => {
            error!(route, error = %message, "store request failed");
            api_error_response(&ApiError::upstream(message.clone()))
        }
    }
}
