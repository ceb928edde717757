// SPDX-License-Identifier: Apache-2.0

use catalogo_model::Categoria;
use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized insert payload produced by [`crate::validate_create`].
/// `foto_url` serializes as an explicit `null` when absent; the store
/// schema expects the column on every insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduto {
    pub nome: String,
    pub codigo: String,
    pub preco_atacado: f64,
    pub categoria: Categoria,
    pub foto_url: Option<String>,
}

/// Normalized partial-update payload produced by [`crate::validate_patch`].
/// The outer `Option` is key presence; for `foto_url` the inner
/// `Option` carries an explicit wire `null` (clear the image) as
/// distinct from an absent key (leave it alone).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProdutoPatch {
    pub nome: Option<String>,
    pub codigo: Option<String>,
    pub preco_atacado: Option<f64>,
    pub categoria: Option<Categoria>,
    pub foto_url: Option<Option<String>>,
}

impl ProdutoPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.codigo.is_none()
            && self.preco_atacado.is_none()
            && self.categoria.is_none()
            && self.foto_url.is_none()
    }

    /// Update map containing only the fields actually present.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(nome) = self.nome {
            fields.insert("nome".to_string(), Value::String(nome));
        }
        if let Some(codigo) = self.codigo {
            fields.insert("codigo".to_string(), Value::String(codigo));
        }
        if let Some(preco) = self.preco_atacado {
            fields.insert("preco_atacado".to_string(), serde_json::json!(preco));
        }
        if let Some(categoria) = self.categoria {
            fields.insert(
                "categoria".to_string(),
                Value::String(categoria.as_str().to_string()),
            );
        }
        if let Some(foto_url) = self.foto_url {
            fields.insert(
                "foto_url".to_string(),
                foto_url.map_or(Value::Null, Value::String),
            );
        }
        fields
    }
}

/// Partial update for the settings singleton, same presence semantics
/// as [`ProdutoPatch`]. `updated_at` is appended by the caller, not by
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsPatch {
    pub company_name: Option<String>,
    pub catalog_name: Option<String>,
    pub contact_phone: Option<Option<String>>,
}

impl SettingsPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.catalog_name.is_none()
            && self.contact_phone.is_none()
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(company_name) = self.company_name {
            fields.insert("company_name".to_string(), Value::String(company_name));
        }
        if let Some(catalog_name) = self.catalog_name {
            fields.insert("catalog_name".to_string(), Value::String(catalog_name));
        }
        if let Some(contact_phone) = self.contact_phone {
            fields.insert(
                "contact_phone".to_string(),
                contact_phone.map_or(Value::Null, Value::String),
            );
        }
        fields
    }
}
