//! Generic JSON request helpers shared by every adapter.
//!
//! One call per helper invocation; nothing is retried. A non-2xx response is
//! turned into [`DashboardError::Upstream`] carrying the status code and the
//! best message we can dig out of the body.

use std::future::Future;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};

/// Hard cap on continuation-token pages followed by [`collect_pages`].
pub const MAX_PAGES: usize = 10;

/// Items gathered from a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    /// `true` when [`MAX_PAGES`] was reached with a continuation token still
    /// outstanding, i.e. some results were dropped.
    pub truncated: bool,
}

/// GET `url` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    query: &[(&str, String)],
) -> Result<T> {
    debug!(url, "GET");
    let mut req = client.get(url).query(query);
    if let Some(token) = bearer {
        req = req.bearer_auth(token);
    }
    send_json(req).await
}

/// POST a JSON body to `url` and decode the JSON response.
pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    bearer: Option<&str>,
    query: &[(&str, String)],
    body: &B,
) -> Result<T> {
    debug!(url, "POST");
    let mut req = client.post(url).query(query).json(body);
    if let Some(token) = bearer {
        req = req.bearer_auth(token);
    }
    send_json(req).await
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = upstream_message(&body).unwrap_or_else(|| {
            format!(
                "Upstream returned {}",
                status.canonical_reason().unwrap_or("an error")
            )
        });
        return Err(DashboardError::Upstream {
            status: status.as_u16(),
            message,
        });
    }
    // Some endpoints answer 200 with an empty body.
    let bytes = resp.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Object(Default::default()))?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract an error message from an upstream error body.
///
/// Understands `{"error": {"message": ...}}`, `{"error": "..."}` and
/// `{"message": ...}`. Returns `None` when nothing usable is found.
pub fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(Value::Object(err)) => err.get("message").and_then(|m| m.as_str()),
        Some(Value::String(s)) => Some(s.as_str()),
        _ => value.get("message").and_then(|m| m.as_str()),
    };
    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Follow continuation tokens until exhausted or [`MAX_PAGES`] is hit.
///
/// `fetch` receives the token for the page to load (`None` for the first
/// page) and returns the page items plus the next token, if any.
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Paged<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>)>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let (page, next) = fetch(token.take()).await?;
        items.extend(page);
        match next.filter(|t| !t.is_empty()) {
            Some(next) => token = Some(next),
            None => {
                return Ok(Paged {
                    items,
                    truncated: false,
                })
            }
        }
    }

    warn!(
        pages = MAX_PAGES,
        items = items.len(),
        "pagination cap reached; remaining pages dropped"
    );
    Ok(Paged {
        items,
        truncated: true,
    })
}
