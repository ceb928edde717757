#![forbid(unsafe_code)]

mod dto;
mod error_mapping;
mod errors;
mod validate;

pub use dto::{NewProduto, ProdutoPatch, SettingsPatch};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use validate::{
    validate_ativo, validate_create, validate_patch, validate_settings_patch, ValidationError,
};

pub const CRATE_NAME: &str = "catalogo-api";
