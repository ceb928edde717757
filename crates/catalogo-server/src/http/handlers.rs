// SPDX-License-Identifier: Apache-2.0

use crate::http::response_contract::{api_error_response, store_error_response};
use crate::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalogo_api::{
    validate_ativo, validate_create, validate_patch, validate_settings_patch, ApiError,
    ApiErrorCode,
};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

const ALLOWED_IMAGE_TYPES: [(&str, &str); 3] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

fn body_object(body: &Value) -> Result<&Map<String, Value>, ApiError> {
    body.as_object().ok_or_else(|| {
        ApiError::new(
            ApiErrorCode::ValidationFailed,
            "Corpo da requisição deve ser um objeto JSON.",
        )
    })
}

pub(crate) async fn health_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub(crate) async fn list_products_handler(State(state): State<AppState>) -> Response {
    match state.store.list_products(true).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => store_error_response("/products", &e),
    }
}

pub(crate) async fn admin_products_handler(State(state): State<AppState>) -> Response {
    match state.store.list_products(false).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => store_error_response("/admin/products", &e),
    }
}

pub(crate) async fn create_product_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let map = match body_object(&body) {
        Ok(map) => map,
        Err(e) => return api_error_response(&e),
    };
    let novo = match validate_create(map) {
        Ok(novo) => novo,
        Err(e) => return api_error_response(&ApiError::validation(&e)),
    };
    match state.store.insert_product(&novo).await {
        Ok(produto) => {
            info!(id = %produto.id, codigo = %produto.codigo, "product created");
            (StatusCode::CREATED, Json(produto)).into_response()
        }
        // Insert rejections are constraint violations (duplicate codigo
        // and the like), surfaced to the client like validation errors.
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": e.to_string()})),
        )
            .into_response(),
    }
}

pub(crate) async fn patch_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let map = match body_object(&body) {
        Ok(map) => map,
        Err(e) => return api_error_response(&e),
    };
    let patch = match validate_patch(map) {
        Ok(patch) => patch,
        Err(e) => return api_error_response(&ApiError::validation(&e)),
    };
    match state.store.update_product(&id, patch.into_fields()).await {
        Ok(produto) => {
            info!(id = %produto.id, "product updated");
            Json(produto).into_response()
        }
        Err(e) => store_error_response("/products/{id}", &e),
    }
}

pub(crate) async fn set_ativo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let ativo = match body_object(&body).and_then(|map| {
        validate_ativo(map).map_err(|e| ApiError::validation(&e))
    }) {
        Ok(ativo) => ativo,
        Err(e) => return api_error_response(&e),
    };
    let mut fields = Map::new();
    fields.insert("ativo".to_string(), Value::Bool(ativo));
    match state.store.update_product(&id, fields).await {
        Ok(produto) => {
            info!(id = %produto.id, ativo, "product visibility toggled");
            Json(produto).into_response()
        }
        Err(e) => store_error_response("/products/{id}/ativo", &e),
    }
}

pub(crate) async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete_product(&id).await {
        Ok(()) => {
            info!(id = %id, "product deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => store_error_response("/products/{id}", &e),
    }
}

pub(crate) async fn upload_image_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (e.status(), Json(json!({"message": e.body_text()}))).into_response()
            }
        };
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        match field.bytes().await {
            Ok(bytes) => {
                file = Some((content_type, bytes.to_vec()));
                break;
            }
            Err(e) => {
                return (e.status(), Json(json!({"message": e.body_text()}))).into_response()
            }
        }
    }
    let Some((content_type, bytes)) = file else {
        return api_error_response(&ApiError::missing_image_file());
    };

    // MIME gate runs before any storage call.
    let Some((_, ext)) = ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
    else {
        return api_error_response(&ApiError::invalid_image_type());
    };

    let object_path = format!("products/{id}.{ext}");
    let public_url = match state
        .store
        .upload_image(&object_path, &content_type, bytes)
        .await
    {
        Ok(url) => url,
        Err(e) => return store_error_response("/products/{id}/image", &e),
    };

    // Second, independent call; a failure here leaves the uploaded
    // object in place without a foto_url pointing at it.
    let mut fields = Map::new();
    fields.insert("foto_url".to_string(), Value::String(public_url));
    match state.store.update_product(&id, fields).await {
        Ok(produto) => {
            info!(id = %produto.id, path = %object_path, "product image uploaded");
            Json(json!({
                "message": "Imagem enviada com sucesso.",
                "product": produto
            }))
            .into_response()
        }
        Err(e) => store_error_response("/products/{id}/image", &e),
    }
}

pub(crate) async fn settings_handler(State(state): State<AppState>) -> Response {
    match state.store.fetch_settings().await {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => store_error_response("/settings", &e),
    }
}

pub(crate) async fn patch_settings_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let map = match body_object(&body) {
        Ok(map) => map,
        Err(e) => return api_error_response(&e),
    };
    let patch = match validate_settings_patch(map) {
        Ok(patch) => patch,
        Err(e) => return api_error_response(&ApiError::validation(&e)),
    };
    let mut fields = patch.into_fields();
    fields.insert(
        "updated_at".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    match state.store.update_settings(fields).await {
        Ok(settings) => {
            info!("settings updated");
            Json(settings).into_response()
        }
        Err(e) => store_error_response("/settings", &e),
    }
}
