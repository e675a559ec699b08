//! `GroceryListSource` over the Sheets v4 REST API.

use async_trait::async_trait;
use grocerbot_protocols::{GroceryListSource, ShoppingRequest, ShoppingResult, SourceError};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::auth::refresh_access_token;
use crate::rows::{parse_rows, results_batch};

pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Spreadsheet location and OAuth client credentials.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// A1 range holding the list, header row included.
    pub range: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_endpoint: String,
    pub api_base: String,
}

impl SheetsConfig {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: "A1:C50".to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Grocery list source backed by one spreadsheet.
pub struct SheetsGrocerySource {
    config: SheetsConfig,
    client: Client,
    access_token: Option<String>,
}

impl SheetsGrocerySource {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            access_token: None,
        }
    }

    /// Browser link to the spreadsheet, optionally at one sheet.
    pub fn sheet_url(&self, sheet_id: Option<i64>) -> String {
        let base = format!(
            "https://docs.google.com/spreadsheets/d/{}",
            self.config.spreadsheet_id
        );
        match sheet_id {
            Some(id) => format!("{}/edit#gid={}", base, id),
            None => base,
        }
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.spreadsheet_id
        )
    }

    fn token(&self) -> Result<&str, SourceError> {
        self.access_token
            .as_deref()
            .ok_or(SourceError::NotInitialized)
    }

    /// Fail on a non-success status with Google's error message.
    async fn check(resp: Response) -> Result<Response, SourceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message = body["error"]["message"]
            .as_str()
            .unwrap_or("no error message")
            .to_string();
        Err(SourceError::Api(format!("{}: {}", status, message)))
    }
}

#[async_trait]
impl GroceryListSource for SheetsGrocerySource {
    async fn init(&mut self) -> Result<(), SourceError> {
        debug!("Initializing Google Sheets client");
        let token = refresh_access_token(
            &self.client,
            &self.config.token_endpoint,
            &self.config.client_id,
            &self.config.client_secret,
            &self.config.refresh_token,
        )
        .await?;
        debug!("Access token valid for {}s", token.expires_in);
        self.access_token = Some(token.token);
        Ok(())
    }

    async fn get_list(&self) -> Result<Vec<ShoppingRequest>, SourceError> {
        let url = format!("{}/values/{}", self.spreadsheet_url(), self.config.range);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let range: ValueRange = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| SourceError::Api(format!("unreadable values response: {}", e)))?;

        let list = parse_rows(&range.values)?;
        info!("Read {} items from the grocery list", list.len());
        Ok(list)
    }

    async fn record_results(
        &self,
        title: &str,
        sheet_id: i64,
        results: &[ShoppingResult],
    ) -> Result<String, SourceError> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url());
        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.token()?)
            .json(&results_batch(title, sheet_id, results))
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        Self::check(resp).await?;

        let link = self.sheet_url(Some(sheet_id));
        info!("Recorded {} results in sheet '{}'", results.len(), title);
        Ok(link)
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
