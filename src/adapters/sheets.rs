//! Spreadsheet adapter: locate or create the per-user document, read ranges
//! and append rows. The document is only ever appended to.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::config::{TRACKER_COLUMNS, TRACKER_SHEET, VAULT_COLUMNS, VAULT_SHEET};
use crate::error::{DashboardError, Result};
use crate::http::{get_json, post_json};
use crate::DashboardClient;

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileList {
    files: Vec<FileEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileEntry {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ValueRange {
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppendResponse {
    updates: AppendUpdates,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AppendUpdates {
    updated_rows: usize,
}

// ---------------------------------------------------------------------------
// SheetsApi
// ---------------------------------------------------------------------------

/// Read/append interface for the user's spreadsheet documents.
pub struct SheetsApi<'a> {
    client: &'a DashboardClient,
    token: &'a str,
}

impl<'a> SheetsApi<'a> {
    pub fn new(client: &'a DashboardClient, token: &'a str) -> Self {
        Self { client, token }
    }

    /// Find a spreadsheet by exact name. Returns its id if one exists.
    pub async fn find_spreadsheet(&self, name: &str) -> Result<Option<String>> {
        let url = format!("{}/files", self.client.endpoints().drive);
        let q = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        let query = [
            ("q", q),
            ("fields", "files(id,name)".to_string()),
            ("spaces", "drive".to_string()),
        ];
        let list: FileList = get_json(self.client.http(), &url, Some(self.token), &query).await?;
        Ok(list.files.into_iter().map(|f| f.id).find(|id| !id.is_empty()))
    }

    /// Create a spreadsheet with the given tabs, each seeded with its header row.
    pub async fn create_spreadsheet(&self, name: &str, tabs: &[(&str, &[&str])]) -> Result<String> {
        let url = format!("{}/v4/spreadsheets", self.client.endpoints().sheets);
        let sheets: Vec<Value> = tabs
            .iter()
            .map(|(title, _)| json!({ "properties": { "title": title } }))
            .collect();
        let body = json!({ "properties": { "title": name }, "sheets": sheets });

        let created: CreatedSpreadsheet =
            post_json(self.client.http(), &url, Some(self.token), &[], &body).await?;
        if created.spreadsheet_id.is_empty() {
            return Err(DashboardError::Upstream {
                status: 502,
                message: "Spreadsheet creation returned no id".to_string(),
            });
        }

        for (title, header) in tabs {
            let header: Vec<String> = header.iter().map(|h| h.to_string()).collect();
            self.append_rows(&created.spreadsheet_id, title, &[header])
                .await?;
        }
        info!(name, id = %created.spreadsheet_id, "created spreadsheet");
        Ok(created.spreadsheet_id)
    }

    /// Find the named spreadsheet or create it with the vault and tracker tabs.
    pub async fn ensure_spreadsheet(&self, name: &str) -> Result<String> {
        if let Some(id) = self.find_spreadsheet(name).await? {
            return Ok(id);
        }
        self.create_spreadsheet(
            name,
            &[(VAULT_SHEET, VAULT_COLUMNS), (TRACKER_SHEET, TRACKER_COLUMNS)],
        )
        .await
    }

    /// Read a range as rows of strings. Non-string cells are stringified.
    pub async fn read_values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.client.endpoints().sheets,
            spreadsheet_id,
            urlencoding::encode(range)
        );
        let values: ValueRange = get_json(self.client.http(), &url, Some(self.token), &[]).await?;
        Ok(values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Append rows after the last row of `range`. Returns the rows written.
    pub async fn append_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.client.endpoints().sheets,
            spreadsheet_id,
            urlencoding::encode(range)
        );
        let query = [
            ("valueInputOption", "RAW".to_string()),
            ("insertDataOption", "INSERT_ROWS".to_string()),
        ];
        let body = json!({ "values": rows });
        let resp: AppendResponse =
            post_json(self.client.http(), &url, Some(self.token), &query, &body).await?;
        Ok(resp.updates.updated_rows)
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
