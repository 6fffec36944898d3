//! HTTP actions.

use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::args::Args;
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::registry::Action;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("markup pattern is valid"));

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}

fn validate_url(url: &str) -> Result<(), ActionError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ActionError::InvalidArgument(format!(
            "url '{}' must start with http:// or https://",
            url
        )))
    }
}

/// `url_status_code(url)`: HTTP GET and return the response status code.
pub struct UrlStatusCodeAction {
    client: reqwest::Client,
}

impl UrlStatusCodeAction {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for UrlStatusCodeAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for UrlStatusCodeAction {
    fn name(&self) -> &'static str {
        "url_status_code"
    }

    async fn invoke(
        &self,
        args: &[String],
        _ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(1)?;
        let url = args.required(0, "url")?;
        validate_url(url)?;

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        tracing::debug!(url = %url, status, "Fetched status code");

        Ok(serde_json::json!(status))
    }
}

/// `website_headings(url, tag=h4)`: text of every `<tag>` element on a page.
pub struct WebsiteHeadingsAction {
    client: reqwest::Client,
}

impl WebsiteHeadingsAction {
    pub fn new() -> Self {
        Self {
            client: build_client(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract the text content of every `tag` element in `html`.
    pub fn extract(html: &str, tag: &str) -> Result<Vec<String>, ActionError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ActionError::InvalidArgument(format!("invalid tag '{}'", tag)));
        }

        let tag = regex::escape(tag);
        let element = Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>"))
            .map_err(|e| ActionError::ExecutionFailed(format!("Invalid tag pattern: {}", e)))?;

        Ok(element
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|inner| {
                let text = MARKUP_RE.replace_all(inner.as_str(), " ");
                text.split_whitespace().collect::<Vec<_>>().join(" ")
            })
            .collect())
    }
}

impl Default for WebsiteHeadingsAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Action for WebsiteHeadingsAction {
    fn name(&self) -> &'static str {
        "website_headings"
    }

    async fn invoke(
        &self,
        args: &[String],
        _ctx: &mut ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let args = Args::new(args);
        args.at_most(2)?;
        let url = args.required(0, "url")?;
        let tag = args.optional(1, "h4");
        validate_url(url)?;

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let headings = Self::extract(&body, tag)?;
        tracing::debug!(url = %url, tag = %tag, count = headings.len(), "Extracted headings");

        Ok(serde_json::Value::String(headings.join(", ")))
    }
}
