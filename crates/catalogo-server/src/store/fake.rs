// SPDX-License-Identifier: Apache-2.0

use crate::{CatalogStore, StoreError};
use async_trait::async_trait;
use catalogo_api::NewProduto;
use catalogo_model::{AppSettings, Produto, SETTINGS_ROW_ID};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub path: String,
    pub content_type: String,
    pub byte_len: usize,
}

/// In-memory store for tests. `fail_requests`/`fail_uploads` simulate
/// an upstream outage; `uploads` records every storage call so tests
/// can assert that rejected uploads never reach storage.
pub struct FakeStore {
    pub products: Mutex<Vec<Produto>>,
    pub settings: Mutex<AppSettings>,
    pub uploads: Mutex<Vec<UploadedImage>>,
    pub insert_seq: AtomicU64,
    pub fail_requests: AtomicBool,
    pub fail_uploads: AtomicBool,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            settings: Mutex::new(AppSettings {
                id: SETTINGS_ROW_ID,
                company_name: "Minha Empresa".to_string(),
                catalog_name: "Catálogo de Atacado".to_string(),
                contact_phone: None,
                updated_at: "2026-01-01T00:00:00+00:00".to_string(),
            }),
            uploads: Mutex::new(Vec::new()),
            insert_seq: AtomicU64::new(1),
            fail_requests: AtomicBool::new(false),
            fail_uploads: AtomicBool::new(false),
        }
    }
}

impl FakeStore {
    fn check_outage(&self) -> Result<(), StoreError> {
        if self.fail_requests.load(Ordering::Relaxed) {
            return Err(StoreError::Upstream("fake store outage".to_string()));
        }
        Ok(())
    }

    fn merge_row<T>(row: &T, fields: &Map<String, Value>) -> Result<T, StoreError>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
    {
        let mut value = serde_json::to_value(row)
            .map_err(|e| StoreError::Upstream(format!("fake row encode failed: {e}")))?;
        let Some(object) = value.as_object_mut() else {
            return Err(StoreError::Upstream("fake row is not an object".to_string()));
        };
        for (key, field) in fields {
            object.insert(key.clone(), field.clone());
        }
        serde_json::from_value(value)
            .map_err(|e| StoreError::Upstream(format!("fake row merge failed: {e}")))
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn list_products(&self, only_active: bool) -> Result<Vec<Produto>, StoreError> {
        self.check_outage()?;
        let mut rows: Vec<Produto> = self
            .products
            .lock()
            .await
            .iter()
            .filter(|p| !only_active || p.ativo)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_product(&self, novo: &NewProduto) -> Result<Produto, StoreError> {
        self.check_outage()?;
        let seq = self.insert_seq.fetch_add(1, Ordering::Relaxed);
        let created_at = format!(
            "2026-01-01T{:02}:{:02}:{:02}+00:00",
            seq / 3600 % 24,
            seq / 60 % 60,
            seq % 60
        );
        let produto = Produto {
            id: format!("prod-{seq:04}"),
            nome: novo.nome.clone(),
            codigo: novo.codigo.clone(),
            preco_atacado: novo.preco_atacado,
            categoria: novo.categoria,
            foto_url: novo.foto_url.clone(),
            ativo: true,
            created_at: created_at.clone(),
            updated_at: created_at,
        };
        self.products.lock().await.push(produto.clone());
        Ok(produto)
    }

    async fn update_product(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Produto, StoreError> {
        self.check_outage()?;
        let mut rows = self.products.lock().await;
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Err(StoreError::NotFound);
        };
        let merged = Self::merge_row(row, &fields)?;
        *row = merged;
        Ok(row.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        self.check_outage()?;
        self.products.lock().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn upload_image(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        if self.fail_uploads.load(Ordering::Relaxed) {
            return Err(StoreError::Upstream("fake upload outage".to_string()));
        }
        self.uploads.lock().await.push(UploadedImage {
            path: path.to_string(),
            content_type: content_type.to_string(),
            byte_len: bytes.len(),
        });
        Ok(format!(
            "https://fake.supabase.local/storage/v1/object/public/product-images/{path}"
        ))
    }

    async fn fetch_settings(&self) -> Result<AppSettings, StoreError> {
        self.check_outage()?;
        Ok(self.settings.lock().await.clone())
    }

    async fn update_settings(
        &self,
        fields: Map<String, Value>,
    ) -> Result<AppSettings, StoreError> {
        self.check_outage()?;
        let mut settings = self.settings.lock().await;
        let merged = Self::merge_row(&*settings, &fields)?;
        *settings = merged;
        Ok(settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogo_model::Categoria;

    fn novo(nome: &str, codigo: &str) -> NewProduto {
        NewProduto {
            nome: nome.to_string(),
            codigo: codigo.to_string(),
            preco_atacado: 12.0,
            categoria: Categoria::Vestuario,
            foto_url: None,
        }
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_filters_inactive() {
        let store = FakeStore::default();
        let first = store.insert_product(&novo("Camiseta Lisa", "CL-1")).await.expect("insert");
        let second = store.insert_product(&novo("Camiseta Estampada", "CE-2")).await.expect("insert");

        let mut fields = Map::new();
        fields.insert("ativo".to_string(), Value::Bool(false));
        store.update_product(&first.id, fields).await.expect("hide");

        let public = store.list_products(true).await.expect("public list");
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].id, second.id);

        let admin = store.list_products(false).await.expect("admin list");
        assert_eq!(admin.len(), 2);
        assert_eq!(admin[0].id, second.id, "newest first");
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = FakeStore::default();
        let err = store
            .update_product("prod-9999", Map::new())
            .await
            .expect_err("missing row");
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn merge_rejects_fields_that_break_the_row_shape() {
        let store = FakeStore::default();
        let p = store.insert_product(&novo("Chapéu Palha", "CP-7")).await.expect("insert");
        let mut fields = Map::new();
        fields.insert("categoria".to_string(), Value::String("brincos".to_string()));
        let err = store.update_product(&p.id, fields).await.expect_err("bad categoria");
        assert!(matches!(err, StoreError::Upstream(_)));
    }
}
