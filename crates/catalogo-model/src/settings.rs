// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// The settings table holds exactly one row; this id is fixed by the
/// schema and the row is only ever read and patched, never created or
/// deleted through the API.
pub const SETTINGS_ROW_ID: i64 = 1;

pub const COMPANY_NAME_MIN_LEN: usize = 2;
pub const CATALOG_NAME_MIN_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSettings {
    pub id: i64,
    pub company_name: String,
    pub catalog_name: String,
    pub contact_phone: Option<String>,
    pub updated_at: String,
}
