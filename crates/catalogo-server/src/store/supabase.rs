// SPDX-License-Identifier: Apache-2.0

use crate::{CatalogStore, StoreConfig, StoreError};
use async_trait::async_trait;
use catalogo_api::NewProduto;
use catalogo_model::{AppSettings, Produto, SETTINGS_ROW_ID};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value};
use tracing::instrument;

pub const PRODUCTS_TABLE: &str = "products";
pub const SETTINGS_TABLE: &str = "app_settings";
pub const IMAGE_BUCKET: &str = "product-images";

/// Supabase REST (PostgREST) and object-storage client. Every call is
/// a single request; no retries, failures surface immediately.
pub struct SupabaseBackend {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl SupabaseBackend {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Upstream(format!("http client init failed: {e}")))?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            client,
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{IMAGE_BUCKET}/{path}", self.base_url)
    }

    fn public_object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{IMAGE_BUCKET}/{path}",
            self.base_url
        )
    }

    fn auth_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(&self.service_key)
            .map_err(|e| StoreError::Upstream(format!("invalid service key header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.service_key))
            .map_err(|e| StoreError::Upstream(format!("invalid auth header: {e}")))?;
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn error_from(resp: reqwest::Response) -> StoreError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        // PostgREST errors carry {"message": ...}; fall back to the raw body.
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        StoreError::Upstream(format!("store request failed status={status}: {message}"))
    }

    /// PostgREST `return=representation` responses are arrays even for
    /// single-row writes; an empty array means no row matched.
    async fn single_row<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = resp
            .json()
            .await
            .map_err(|e| StoreError::Upstream(format!("store response parse failed: {e}")))?;
        Ok(rows.into_iter().next())
    }

    fn send_failed(e: reqwest::Error) -> StoreError {
        StoreError::Upstream(format!("store request failed: {e}"))
    }
}

#[async_trait]
impl CatalogStore for SupabaseBackend {
    fn backend_tag(&self) -> &'static str {
        "supabase"
    }

    #[instrument(name = "store_list_products", skip(self))]
    async fn list_products(&self, only_active: bool) -> Result<Vec<Produto>, StoreError> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "created_at.desc".to_string()),
        ];
        if only_active {
            query.push(("ativo".to_string(), "eq.true".to_string()));
        }
        let resp = self
            .client
            .get(self.rest_url(PRODUCTS_TABLE))
            .headers(self.auth_headers()?)
            .query(&query)
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json::<Vec<Produto>>()
            .await
            .map_err(|e| StoreError::Upstream(format!("store response parse failed: {e}")))
    }

    #[instrument(name = "store_insert_product", skip(self, novo))]
    async fn insert_product(&self, novo: &NewProduto) -> Result<Produto, StoreError> {
        let resp = self
            .client
            .post(self.rest_url(PRODUCTS_TABLE))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .query(&[("select", "*")])
            .json(novo)
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Self::single_row(resp)
            .await?
            .ok_or_else(|| StoreError::Upstream("insert returned no representation".to_string()))
    }

    #[instrument(name = "store_update_product", skip(self, fields))]
    async fn update_product(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Produto, StoreError> {
        let resp = self
            .client
            .patch(self.rest_url(PRODUCTS_TABLE))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .json(&Value::Object(fields))
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Self::single_row(resp).await?.ok_or(StoreError::NotFound)
    }

    #[instrument(name = "store_delete_product", skip(self))]
    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.rest_url(PRODUCTS_TABLE))
            .headers(self.auth_headers()?)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(())
    }

    #[instrument(name = "store_upload_image", skip(self, bytes))]
    async fn upload_image(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let content_type_value = HeaderValue::from_str(content_type)
            .map_err(|e| StoreError::Upstream(format!("invalid content type header: {e}")))?;
        let resp = self
            .client
            .post(self.object_url(path))
            .headers(self.auth_headers()?)
            .header(CONTENT_TYPE, content_type_value)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(self.public_object_url(path))
    }

    #[instrument(name = "store_fetch_settings", skip(self))]
    async fn fetch_settings(&self) -> Result<AppSettings, StoreError> {
        let resp = self
            .client
            .get(self.rest_url(SETTINGS_TABLE))
            .headers(self.auth_headers()?)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{SETTINGS_ROW_ID}"))])
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Self::single_row(resp)
            .await?
            .ok_or_else(|| StoreError::Upstream("settings row missing".to_string()))
    }

    #[instrument(name = "store_update_settings", skip(self, fields))]
    async fn update_settings(
        &self,
        fields: Map<String, Value>,
    ) -> Result<AppSettings, StoreError> {
        let resp = self
            .client
            .patch(self.rest_url(SETTINGS_TABLE))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .query(&[("select", "*".to_string()), ("id", format!("eq.{SETTINGS_ROW_ID}"))])
            .json(&Value::Object(fields))
            .send()
            .await
            .map_err(Self::send_failed)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Self::single_row(resp)
            .await?
            .ok_or_else(|| StoreError::Upstream("settings row missing".to_string()))
    }
}
