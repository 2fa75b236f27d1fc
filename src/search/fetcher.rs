//! Single-page requests against the upstream search endpoint.

use reqwest::{Client, StatusCode, Url};

use crate::config;
use crate::error::{PauperfallError, Result};
use crate::models::{SearchEnvelope, UpstreamError, UpstreamPage};

/// Result of fetching one page. Fetching never returns an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The page was fetched and parsed.
    Page(UpstreamPage),
    /// The API reported that the query matches nothing (HTTP 404).
    NoMatches,
    /// Network failure, unexpected status, or an unparseable body.
    Failed(String),
}

/// Performs one HTTP round trip per page.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch and parse the page at `url`.
    pub async fn fetch(&self, url: &Url) -> PageOutcome {
        match self.try_fetch(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(%url, error = %e, "page fetch failed");
                PageOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_fetch(&self, url: &Url) -> Result<PageOutcome> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            let details = serde_json::from_slice::<UpstreamError>(&body)
                .ok()
                .and_then(|e| e.details)
                .unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                tracing::debug!(%url, %details, "upstream reported no matches");
                return Ok(PageOutcome::NoMatches);
            }
            return Err(PauperfallError::UpstreamUnavailable(format!(
                "status {status}: {details}"
            )));
        }

        let body = resp.bytes().await?;
        let envelope: SearchEnvelope = serde_json::from_slice(&body)?;
        Ok(PageOutcome::Page(envelope.into()))
    }
}

/// URL of the first results page for `query` under `api_base`.
pub fn search_url(api_base: &str, query: &str) -> Result<Url> {
    let endpoint = format!("{}/{}", api_base.trim_end_matches('/'), config::SEARCH_PATH);
    Url::parse_with_params(&endpoint, &[("q", query)])
        .map_err(|e| PauperfallError::InvalidArgument(format!("bad search URL {endpoint}: {e}")))
}

/// Derive the URL of page `page` from a next-page URL.
///
/// The first `page` parameter is replaced in place and any duplicates are
/// dropped; without one, `page` is appended. All other parameters keep
/// their order.
pub fn page_url(template: &str, page: usize) -> Result<Url> {
    let mut url = Url::parse(template).map_err(|e| {
        PauperfallError::InvalidArgument(format!("bad next page URL {template}: {e}"))
    })?;
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let page = page.to_string();

    let mut replaced = false;
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in &pairs {
            if key != "page" {
                query.append_pair(key, value);
            } else if !replaced {
                query.append_pair("page", &page);
                replaced = true;
            }
        }
        if !replaced {
            query.append_pair("page", &page);
        }
    }
    Ok(url)
}
