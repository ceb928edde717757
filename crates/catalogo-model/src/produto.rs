// SPDX-License-Identifier: Apache-2.0

use crate::Categoria;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NOME_MIN_LEN: usize = 3;
pub const CODIGO_MIN_LEN: usize = 2;

/// A catalog row as stored by the backing service. The id and the two
/// timestamps are store-generated and never produced by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Produto {
    pub id: String,
    pub nome: String,
    pub codigo: String,
    pub preco_atacado: f64,
    pub categoria: Categoria,
    pub foto_url: Option<String>,
    pub ativo: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProdutoInvariantError {
    NomeTooShort,
    CodigoTooShort,
    UntrimmedField(&'static str),
    NonPositivePreco,
}

impl Display for ProdutoInvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NomeTooShort => write!(f, "nome must have at least {NOME_MIN_LEN} characters"),
            Self::CodigoTooShort => {
                write!(f, "codigo must have at least {CODIGO_MIN_LEN} characters")
            }
            Self::UntrimmedField(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::NonPositivePreco => write!(f, "preco_atacado must be finite and > 0"),
        }
    }
}

impl std::error::Error for ProdutoInvariantError {}

impl Produto {
    /// Checks the stored-row invariants: trimmed nome/codigo of minimum
    /// length and a strictly positive, finite wholesale price.
    pub fn validate(&self) -> Result<(), ProdutoInvariantError> {
        if self.nome.trim() != self.nome {
            return Err(ProdutoInvariantError::UntrimmedField("nome"));
        }
        if self.codigo.trim() != self.codigo {
            return Err(ProdutoInvariantError::UntrimmedField("codigo"));
        }
        if self.nome.chars().count() < NOME_MIN_LEN {
            return Err(ProdutoInvariantError::NomeTooShort);
        }
        if self.codigo.chars().count() < CODIGO_MIN_LEN {
            return Err(ProdutoInvariantError::CodigoTooShort);
        }
        if !self.preco_atacado.is_finite() || self.preco_atacado <= 0.0 {
            return Err(ProdutoInvariantError::NonPositivePreco);
        }
        Ok(())
    }
}
