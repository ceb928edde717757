// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Canonical category order, used for rendering and for the
/// enumerated list in validation messages.
pub const CATEGORIAS: [Categoria; 7] = [
    Categoria::Promocoes,
    Categoria::BolsasPochetes,
    Categoria::ChapeusBonesViseiras,
    Categoria::Vestuario,
    Categoria::AcessoriosBrinquedosInfantil,
    Categoria::MaisVendidos,
    Categoria::LarCasa,
];

/// Closed set of product category identifiers. The wire form is the
/// snake_case identifier; labels exist for display only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Categoria {
    Promocoes,
    BolsasPochetes,
    ChapeusBonesViseiras,
    Vestuario,
    AcessoriosBrinquedosInfantil,
    MaisVendidos,
    LarCasa,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct UnknownCategoria(pub String);

impl Display for UnknownCategoria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown categoria: {}", self.0)
    }
}

impl std::error::Error for UnknownCategoria {}

impl Categoria {
    pub fn parse(raw: &str) -> Result<Self, UnknownCategoria> {
        match raw {
            "promocoes" => Ok(Self::Promocoes),
            "bolsas_pochetes" => Ok(Self::BolsasPochetes),
            "chapeus_bones_viseiras" => Ok(Self::ChapeusBonesViseiras),
            "vestuario" => Ok(Self::Vestuario),
            "acessorios_brinquedos_infantil" => Ok(Self::AcessoriosBrinquedosInfantil),
            "mais_vendidos" => Ok(Self::MaisVendidos),
            "lar_casa" => Ok(Self::LarCasa),
            _ => Err(UnknownCategoria(raw.to_string())),
        }
    }

    #[must_use]
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Promocoes => "promocoes",
            Self::BolsasPochetes => "bolsas_pochetes",
            Self::ChapeusBonesViseiras => "chapeus_bones_viseiras",
            Self::Vestuario => "vestuario",
            Self::AcessoriosBrinquedosInfantil => "acessorios_brinquedos_infantil",
            Self::MaisVendidos => "mais_vendidos",
            Self::LarCasa => "lar_casa",
        }
    }

    /// Human-readable label, display only. Never consulted by validation.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Promocoes => "Promoções",
            Self::BolsasPochetes => "Bolsas e Pochetes",
            Self::ChapeusBonesViseiras => "Chapéus, Bonés e Viseiras",
            Self::Vestuario => "Vestuário",
            Self::AcessoriosBrinquedosInfantil => "Acessórios, Brinquedos e Infantil",
            Self::MaisVendidos => "Mais vendidos",
            Self::LarCasa => "Lar e casa",
        }
    }

    /// Comma-joined identifier list in canonical order, for error messages.
    #[must_use]
    pub fn joined_identifiers() -> String {
        CATEGORIAS
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Categoria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
