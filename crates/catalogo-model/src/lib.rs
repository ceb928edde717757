#![forbid(unsafe_code)]
//! Catalog domain SSOT.
//!
//! ```compile_fail
//! use catalogo_model::Categoria;
//!
//! fn exhaustive_match(c: Categoria) -> &'static str {
//!     match c {
//!         Categoria::Promocoes => "p",
//!         Categoria::BolsasPochetes => "b",
//!         Categoria::ChapeusBonesViseiras => "c",
//!         Categoria::Vestuario => "v",
//!         Categoria::AcessoriosBrinquedosInfantil => "a",
//!         Categoria::MaisVendidos => "m",
//!         Categoria::LarCasa => "l",
//!     }
//! }
//! ```

mod categoria;
mod produto;
mod settings;

pub use categoria::{Categoria, UnknownCategoria, CATEGORIAS};
pub use produto::{Produto, ProdutoInvariantError, CODIGO_MIN_LEN, NOME_MIN_LEN};
pub use settings::{
    AppSettings, CATALOG_NAME_MIN_LEN, COMPANY_NAME_MIN_LEN, SETTINGS_ROW_ID,
};

pub const CRATE_NAME: &str = "catalogo-model";
