use serde_json::{Value, json};

use crate::error::ApiError;

/// API version pinned by every request. Bumping this is a behavioral
/// change: block shapes differ between versions.
pub const NOTION_VERSION: &str = "2022-06-28";

const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Result of a successful create-page call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPage {
    pub page_id: String,
    pub url: Option<String>,
}

/// The two calls the delivery orchestrator needs. The seam exists so
/// the orchestrator's state machine is testable against a scripted
/// implementation with no network.
pub trait NotionApi {
    /// Creates a page under `parent_id` carrying the first chunk of
    /// blocks. `children` must already respect the per-call block cap.
    fn create_page(
        &self,
        parent_id: &str,
        title: &str,
        children: &[Value],
    ) -> Result<CreatedPage, ApiError>;

    /// Appends one further chunk to an existing page.
    fn append_children(&self, page_id: &str, children: &[Value]) -> Result<(), ApiError>;
}

/// Blocking HTTP client against the real service.
///
/// Blocking on purpose: delivery is strictly sequential (each append
/// targets a page id only known after the create call), so async would
/// buy nothing here.
pub struct HttpNotionClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl HttpNotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Same client against a different host, for integration tests.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            token: token.into(),
            base_url: base_url.into(),
        }
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json()?)
    }
}

impl NotionApi for HttpNotionClient {
    fn create_page(
        &self,
        parent_id: &str,
        title: &str,
        children: &[Value],
    ) -> Result<CreatedPage, ApiError> {
        let body = json!({
            "parent": { "page_id": parent_id },
            "properties": {
                "title": {
                    "title": [{ "type": "text", "text": { "content": title } }],
                },
            },
            "children": children,
        });
        let response = self.send(
            self.http
                .post(format!("{}/v1/pages", self.base_url))
                .json(&body),
        )?;

        let page_id = response["id"]
            .as_str()
            .ok_or_else(|| ApiError::Malformed("create-page response missing id".to_string()))?
            .to_string();
        let url = response["url"].as_str().map(str::to_string);
        Ok(CreatedPage { page_id, url })
    }

    fn append_children(&self, page_id: &str, children: &[Value]) -> Result<(), ApiError> {
        self.send(
            self.http
                .patch(format!("{}/v1/blocks/{}/children", self.base_url, page_id))
                .json(&json!({ "children": children })),
        )?;
        Ok(())
    }
}
