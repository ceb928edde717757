// SPDX-License-Identifier: Apache-2.0

use crate::{NewProduto, ProdutoPatch, SettingsPatch};
use catalogo_model::{
    Categoria, CATALOG_NAME_MIN_LEN, CODIGO_MIN_LEN, COMPANY_NAME_MIN_LEN, NOME_MIN_LEN,
};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Field-level rejection. `Display` is the user-facing message sent on
/// the wire; the enumerated category list is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    NomeInvalido,
    CodigoInvalido,
    PrecoInvalido,
    CategoriaInvalida,
    FotoUrlInvalida,
    AtivoInvalido,
    CompanyNameInvalido,
    CatalogNameInvalido,
    ContactPhoneInvalido,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NomeInvalido => {
                write!(f, "Nome inválido (mínimo {NOME_MIN_LEN} caracteres).")
            }
            Self::CodigoInvalido => {
                write!(f, "Código inválido (mínimo {CODIGO_MIN_LEN} caracteres).")
            }
            Self::PrecoInvalido => {
                write!(f, "Preço de atacado inválido (use número maior que zero).")
            }
            Self::CategoriaInvalida => {
                write!(
                    f,
                    "Categoria inválida. Use: {}",
                    Categoria::joined_identifiers()
                )
            }
            Self::FotoUrlInvalida => write!(f, "Foto inválida (use URL em texto ou null)."),
            Self::AtivoInvalido => write!(f, "Campo 'ativo' deve ser boolean."),
            Self::CompanyNameInvalido => {
                write!(
                    f,
                    "Nome da empresa inválido (mínimo {COMPANY_NAME_MIN_LEN} caracteres)."
                )
            }
            Self::CatalogNameInvalido => {
                write!(
                    f,
                    "Nome do catálogo inválido (mínimo {CATALOG_NAME_MIN_LEN} caracteres)."
                )
            }
            Self::ContactPhoneInvalido => write!(f, "Telefone inválido."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Price key lookup with legacy camelCase fallback. The snake_case key
/// wins when both carry a value; a `null` under either key counts as
/// absent, so older clients can keep sending `precoAtacado`.
fn preco_input(body: &Map<String, Value>) -> Option<&Value> {
    body.get("preco_atacado")
        .filter(|v| !v.is_null())
        .or_else(|| body.get("precoAtacado").filter(|v| !v.is_null()))
}

/// Converts a wire price into a positive finite number. Accepts JSON
/// numbers and plain numeric strings ("29.9"); locale-formatted input
/// ("10,50") is not converted here, the UI does that before sending.
fn parse_preco(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite() && *p > 0.0)
}

fn trimmed_string(value: &Value, min_len: usize) -> Option<String> {
    let s = value.as_str()?.trim();
    (s.chars().count() >= min_len).then(|| s.to_string())
}

pub fn validate_create(body: &Map<String, Value>) -> Result<NewProduto, ValidationError> {
    let nome = body
        .get("nome")
        .and_then(|v| trimmed_string(v, NOME_MIN_LEN))
        .ok_or(ValidationError::NomeInvalido)?;

    let codigo = body
        .get("codigo")
        .and_then(|v| trimmed_string(v, CODIGO_MIN_LEN))
        .ok_or(ValidationError::CodigoInvalido)?;

    let preco_atacado = preco_input(body)
        .and_then(parse_preco)
        .ok_or(ValidationError::PrecoInvalido)?;

    let categoria = body
        .get("categoria")
        .and_then(Value::as_str)
        .and_then(|raw| Categoria::parse(raw).ok())
        .ok_or(ValidationError::CategoriaInvalida)?;

    let foto_url = match body.get("fotoUrl") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(ValidationError::FotoUrlInvalida),
    };

    Ok(NewProduto {
        nome,
        codigo,
        preco_atacado,
        categoria,
        foto_url,
    })
}

pub fn validate_patch(body: &Map<String, Value>) -> Result<ProdutoPatch, ValidationError> {
    let mut patch = ProdutoPatch::default();

    if let Some(value) = body.get("nome") {
        patch.nome =
            Some(trimmed_string(value, NOME_MIN_LEN).ok_or(ValidationError::NomeInvalido)?);
    }

    if let Some(value) = body.get("codigo") {
        patch.codigo =
            Some(trimmed_string(value, CODIGO_MIN_LEN).ok_or(ValidationError::CodigoInvalido)?);
    }

    if let Some(value) = preco_input(body) {
        patch.preco_atacado = Some(parse_preco(value).ok_or(ValidationError::PrecoInvalido)?);
    }

    if let Some(value) = body.get("categoria") {
        let categoria = value
            .as_str()
            .and_then(|raw| Categoria::parse(raw).ok())
            .ok_or(ValidationError::CategoriaInvalida)?;
        patch.categoria = Some(categoria);
    }

    // Explicit null clears the image; an absent key leaves it alone.
    match body.get("foto_url") {
        None => {}
        Some(Value::Null) => patch.foto_url = Some(None),
        Some(Value::String(s)) => patch.foto_url = Some(Some(s.clone())),
        Some(_) => return Err(ValidationError::FotoUrlInvalida),
    }

    Ok(patch)
}

/// Type check for the visibility toggle body: `{"ativo": <bool>}`.
pub fn validate_ativo(body: &Map<String, Value>) -> Result<bool, ValidationError> {
    match body.get("ativo") {
        Some(Value::Bool(ativo)) => Ok(*ativo),
        _ => Err(ValidationError::AtivoInvalido),
    }
}

pub fn validate_settings_patch(body: &Map<String, Value>) -> Result<SettingsPatch, ValidationError> {
    let mut patch = SettingsPatch::default();

    if let Some(value) = body.get("company_name") {
        patch.company_name = Some(
            trimmed_string(value, COMPANY_NAME_MIN_LEN)
                .ok_or(ValidationError::CompanyNameInvalido)?,
        );
    }

    if let Some(value) = body.get("catalog_name") {
        patch.catalog_name = Some(
            trimmed_string(value, CATALOG_NAME_MIN_LEN)
                .ok_or(ValidationError::CatalogNameInvalido)?,
        );
    }

    match body.get("contact_phone") {
        None => {}
        Some(Value::Null) => patch.contact_phone = Some(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            patch.contact_phone = Some(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            });
        }
        Some(_) => return Err(ValidationError::ContactPhoneInvalido),
    }

    Ok(patch)
}
