//! Settings vault: a key/value/timestamp append log in the user's spreadsheet.
//!
//! Saves never update a row in place. Readers resolve the log with
//! latest-write-wins, later rows overriding earlier ones for the same key.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::adapters::SheetsApi;
use crate::config::{SPREADSHEET_PREFIX, VAULT_COLUMNS, VAULT_SHEET};
use crate::error::{DashboardError, Result};
use crate::models::VaultEntry;

/// Name of the spreadsheet holding a user's vault and tracker log.
pub fn spreadsheet_name(email: &str) -> String {
    format!("{SPREADSHEET_PREFIX}{}", email.trim().to_lowercase())
}

/// Parse raw sheet rows into entries, skipping the header row and blank keys.
///
/// Only a leading row equal to the column header is treated as the header;
/// later rows are entries even when their key is `key`.
pub fn parse_entries(rows: &[Vec<String>]) -> Vec<VaultEntry> {
    let has_header = rows.first().is_some_and(|row| is_header(row));
    rows.iter()
        .skip(usize::from(has_header))
        .filter(|row| row.first().is_some_and(|k| !k.trim().is_empty()))
        .map(|row| VaultEntry {
            key: row[0].trim().to_string(),
            value: row.get(1).cloned().unwrap_or_default(),
            timestamp: row.get(2).cloned().unwrap_or_default(),
        })
        .collect()
}

fn is_header(row: &[String]) -> bool {
    row.len() >= VAULT_COLUMNS.len()
        && row.iter().zip(VAULT_COLUMNS).all(|(cell, col)| cell.trim() == *col)
}

/// Resolve the log to the latest value per key.
pub fn latest_values(entries: &[VaultEntry]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for entry in entries {
        values.insert(entry.key.clone(), entry.value.clone());
    }
    values
}

// ---------------------------------------------------------------------------
// Vault
// ---------------------------------------------------------------------------

pub struct Vault<'a> {
    sheets: SheetsApi<'a>,
}

impl<'a> Vault<'a> {
    pub fn new(sheets: SheetsApi<'a>) -> Self {
        Self { sheets }
    }

    /// Find or create the spreadsheet belonging to `email`.
    pub async fn open(&self, email: &str) -> Result<String> {
        if email.trim().is_empty() {
            return Err(DashboardError::AuthRequired);
        }
        self.sheets.ensure_spreadsheet(&spreadsheet_name(email)).await
    }

    /// Latest value per key, optionally restricted to `keys`.
    pub async fn load(
        &self,
        spreadsheet_id: &str,
        keys: Option<&[String]>,
    ) -> Result<BTreeMap<String, String>> {
        let range = format!("{VAULT_SHEET}!A:C");
        let rows = self.sheets.read_values(spreadsheet_id, &range).await?;
        let mut values = latest_values(&parse_entries(&rows));
        if let Some(keys) = keys.filter(|k| !k.is_empty()) {
            values.retain(|k, _| keys.iter().any(|want| want == k));
        }
        Ok(values)
    }

    /// Append a new value for `key`.
    pub async fn save(&self, spreadsheet_id: &str, key: &str, value: &str) -> Result<VaultEntry> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DashboardError::missing(["key"]));
        }
        let entry = VaultEntry {
            key: key.to_string(),
            value: value.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.sheets
            .append_rows(spreadsheet_id, VAULT_SHEET, &[entry.to_row()])
            .await?;
        info!(key, "vault entry saved");
        Ok(entry)
    }
}
