//! Google スプレッドシート（Sheets API v4）の RecordStore 実装
//!
//! 文書は ID か名前で指定する。名前の場合は Drive API で 1 回だけ検索して ID を覚える。

use crate::adapter::google_auth::GoogleAuth;
use crate::config::SpreadsheetRef;
use crate::error::Error;
use crate::llm::openai::api_error_message;
use crate::ports::outbound::RecordStore;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// 追記・読み出しの対象範囲。シート名が無ければ先頭シート。
pub fn append_range(worksheet: Option<&str>) -> String {
    match worksheet {
        Some(name) => format!("{}!A1", quote_sheet_name(name)),
        None => "A1".to_string(),
    }
}

pub fn read_range(worksheet: Option<&str>) -> String {
    match worksheet {
        Some(name) => format!("{}!A:Z", quote_sheet_name(name)),
        None => "A:Z".to_string(),
    }
}

/// A1 記法のシート名（' は '' にエスケープ）
fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Drive 検索クエリ（名前完全一致・スプレッドシートのみ・ゴミ箱除外）
pub fn drive_query(name: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME
    )
}

/// Drive 検索結果から先頭のファイル ID を取り出す
pub fn parse_drive_files(body: &str, name: &str) -> Result<String, Error> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| Error::json(format!("Failed to parse Drive response: {}", e)))?;
    v["files"][0]["id"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| {
            Error::http(format!(
                "Spreadsheet '{}' not found (is it shared with the service account?)",
                name
            ))
        })
}

/// values GET の応答を行の配列にする（values が無ければ空）
pub fn parse_values(body: &str) -> Result<Vec<Vec<String>>, Error> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| Error::json(format!("Failed to parse values response: {}", e)))?;
    let rows = match v["values"].as_array() {
        Some(rows) => rows,
        None => return Ok(Vec::new()),
    };
    Ok(rows
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| {
                    cells
                        .iter()
                        .map(|c| match c {
                            Value::String(s) => s.clone(),
                            Value::Null => String::new(),
                            other => other.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect())
}

/// Sheets API を使う RecordStore
pub struct GoogleSheetsStore {
    client: reqwest::blocking::Client,
    auth: Arc<GoogleAuth>,
    spreadsheet: SpreadsheetRef,
    worksheet: Option<String>,
    resolved_id: Mutex<Option<String>>,
}

impl GoogleSheetsStore {
    pub fn new(
        auth: Arc<GoogleAuth>,
        spreadsheet: SpreadsheetRef,
        worksheet: Option<String>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            auth,
            spreadsheet,
            worksheet,
            resolved_id: Mutex::new(None),
        })
    }

    fn spreadsheet_id(&self, token: &str) -> Result<String, Error> {
        let name = match &self.spreadsheet {
            SpreadsheetRef::Id(id) => return Ok(id.clone()),
            SpreadsheetRef::Name(name) => name,
        };
        let mut resolved = self
            .resolved_id
            .lock()
            .map_err(|_| Error::io_msg("spreadsheet id lock poisoned"))?;
        if let Some(id) = resolved.as_ref() {
            return Ok(id.clone());
        }

        let response = self
            .client
            .get(DRIVE_FILES_URL)
            .bearer_auth(token)
            .query(&[
                ("q", drive_query(name).as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
            ])
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::http(format!(
                "Drive lookup failed: {}",
                api_error_message(status, &body)
            )));
        }
        let id = parse_drive_files(&body, name)?;
        *resolved = Some(id.clone());
        Ok(id)
    }

    fn values_url(&self, id: &str, range: &str, suffix: &str) -> Result<reqwest::Url, Error> {
        let mut url = reqwest::Url::parse(SHEETS_BASE_URL)
            .map_err(|e| Error::invalid_argument(format!("Invalid Sheets URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::invalid_argument("Sheets URL cannot be a base"))?
            .push(id)
            .push("values")
            .push(&format!("{}{}", range, suffix));
        Ok(url)
    }
}

impl RecordStore for GoogleSheetsStore {
    fn name(&self) -> &str {
        "google-sheets"
    }

    fn append_row(&self, row: &[String]) -> Result<(), Error> {
        let token = self.auth.access_token()?;
        let id = self.spreadsheet_id(&token)?;
        let url = self.values_url(&id, &append_range(self.worksheet.as_deref()), ":append")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [row] }))
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::http(format!(
                "Append failed: {}",
                api_error_message(status, &body)
            )));
        }
        Ok(())
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, Error> {
        let token = self.auth.access_token()?;
        let id = self.spreadsheet_id(&token)?;
        let url = self.values_url(&id, &read_range(self.worksheet.as_deref()), "")?;
        let response = self.client.get(url).bearer_auth(&token).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::http(format!(
                "Read failed: {}",
                api_error_message(status, &body)
            )));
        }
        parse_values(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(append_range(None), "A1");
        assert_eq!(read_range(None), "A:Z");
        assert_eq!(append_range(Some("기록")), "'기록'!A1");
        assert_eq!(read_range(Some("Bob's")), "'Bob''s'!A:Z");
    }

    #[test]
    fn test_drive_query_escapes_quotes() {
        assert_eq!(
            drive_query("MAP_DATABASE"),
            "name = 'MAP_DATABASE' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
        assert!(drive_query("it's").starts_with("name = 'it\\'s'"));
    }

    #[test]
    fn test_parse_drive_files() {
        assert_eq!(
            parse_drive_files(r#"{"files":[{"id":"1AbC","name":"MAP_DATABASE"}]}"#, "MAP_DATABASE")
                .unwrap(),
            "1AbC"
        );
        let err = parse_drive_files(r#"{"files":[]}"#, "MAP_DATABASE").unwrap_err();
        assert!(matches!(err, Error::Http(ref m) if m.contains("MAP_DATABASE")));
    }

    #[test]
    fn test_parse_values() {
        let rows = parse_values(
            r#"{"range":"Sheet1!A1:Z3","values":[["a","b"],["c",1,null],[]]}"#,
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "1".to_string(), String::new()],
                vec![],
            ]
        );
        assert!(parse_values(r#"{"range":"Sheet1!A1:Z1000"}"#).unwrap().is_empty());
        assert!(matches!(parse_values("oops"), Err(Error::Json(_))));
    }
}
