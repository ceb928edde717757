// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidAtivoFlag
        | ApiErrorCode::MissingImageFile
        | ApiErrorCode::InvalidImageType => 400,
        ApiErrorCode::ProductNotFound => 404,
        ApiErrorCode::UpstreamStore => 500,
        _ => 500,
    };

    ApiErrorMapping { status_code }
}
