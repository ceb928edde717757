// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidAtivoFlag,
    MissingImageFile,
    InvalidImageType,
    ProductNotFound,
    UpstreamStore,
    Internal,
}

/// Error carried from handlers to the response layer. The wire body is
/// `{"message": ...}` with a user-facing message; the code picks the
/// status via [`crate::map_error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(err: &ValidationError) -> Self {
        let code = if matches!(err, ValidationError::AtivoInvalido) {
            ApiErrorCode::InvalidAtivoFlag
        } else {
            ApiErrorCode::ValidationFailed
        };
        Self::new(code, err.to_string())
    }

    #[must_use]
    pub fn missing_image_file() -> Self {
        Self::new(
            ApiErrorCode::MissingImageFile,
            "Envie um arquivo no campo 'image'.",
        )
    }

    #[must_use]
    pub fn invalid_image_type() -> Self {
        Self::new(
            ApiErrorCode::InvalidImageType,
            "Formato inválido. Use JPEG, PNG ou WEBP.",
        )
    }

    #[must_use]
    pub fn product_not_found() -> Self {
        Self::new(ApiErrorCode::ProductNotFound, "Produto não encontrado.")
    }

    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::UpstreamStore, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}
