use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};
use futures::{AsyncReadExt as _, FutureExt as _};
use gpui::http_client::{http, AsyncBody, HttpClient, HttpRequestExt, Method, RedirectPolicy};
use serde_json::Value;
use thiserror::Error;

use crate::models::Article;

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;
const USER_AGENT: &str = "AgenceEco/0.1 (GPUI Desktop)";

/// Everything that can go wrong between a view and the API, collapsed to the
/// cases the UI distinguishes. Errors belonging to a superseded load cycle
/// are dropped by the caller before they reach the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network request failed: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Http(u16),
    #[error("unusable response payload")]
    MalformedPayload,
    #[error("missing article id")]
    MissingId,
}

/// Explicit configuration handed to each component at construction; there are
/// no module-level globals for the base URL or paths.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Candidate list endpoints, raced in parallel.
    pub list_paths: Vec<String>,
    /// Candidate single-article endpoints, tried in order.
    pub article_paths: Vec<String>,
    pub request_timeout: Duration,
    /// Delay before the "Chargement…" indicator may appear (anti-flicker).
    pub loading_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            list_paths: vec!["articles".to_string(), "api/articles".to_string()],
            article_paths: vec!["articles".to_string(), "api/articles".to_string()],
            request_timeout: Duration::from_millis(8000),
            loading_delay: Duration::from_millis(250),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(base) = std::env::var("AGENCECO_API_BASE")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
        {
            config.base_url = base;
        }
        config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        )
    }

    /// `<base>/<path>/<id>` with the id percent-encoded as a path segment.
    fn article_url(&self, path: &str, id: &str) -> Option<String> {
        let mut url = url::Url::parse(&self.endpoint(path)).ok()?;
        url.path_segments_mut().ok()?.push(id);
        Some(url.to_string())
    }
}

/// Unwraps the list envelope variants the API is known to produce: a bare
/// array, or the first array-valued field among `items`, `data`, `articles`,
/// `news`. `None` means the payload is unusable.
pub fn unwrap_list(payload: &Value) -> Option<Vec<Value>> {
    if let Value::Array(items) = payload {
        return Some(items.clone());
    }
    let obj = payload.as_object()?;
    ["items", "data", "articles", "news"].iter().find_map(|key| {
        if let Some(Value::Array(items)) = obj.get(*key) {
            Some(items.clone())
        } else {
            None
        }
    })
}

/// Single-record counterpart: first element of an array, else the first
/// present field among `data`, `item`, `article`, else the payload itself
/// when object-shaped.
pub fn unwrap_single(payload: Value) -> Option<Value> {
    match payload {
        Value::Array(mut items) => {
            if items.is_empty() {
                None
            } else {
                Some(items.remove(0))
            }
        }
        Value::Object(ref obj) => {
            for key in ["data", "item", "article"] {
                if let Some(inner) = obj.get(key) {
                    return Some(inner.clone());
                }
            }
            Some(payload)
        }
        _ => None,
    }
}

pub struct ArticlesClient {
    http: Arc<dyn HttpClient>,
    config: ApiConfig,
}

impl ArticlesClient {
    pub fn new(http: Arc<dyn HttpClient>, config: ApiConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetches the article list by racing every candidate endpoint; the first
    /// response that is HTTP-successful and unwraps to an array wins, and the
    /// losing requests are dropped (their transports are cancelled). Fails
    /// only once every candidate has failed.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>, ApiError> {
        let candidates = self
            .config
            .list_paths
            .iter()
            .map(|path| {
                let url = self.config.endpoint(path);
                self.fetch_list_candidate(url).boxed_local()
            })
            .collect::<Vec<_>>();
        race(candidates).await
    }

    async fn fetch_list_candidate(&self, url: String) -> Result<Vec<Article>, ApiError> {
        let payload = self.get_json(&url).await?;
        let items = unwrap_list(&payload).ok_or(ApiError::MalformedPayload)?;
        Ok(items
            .into_iter()
            .filter_map(|value| Article::from_value(value).ok())
            .collect())
    }

    /// Fetches one article, trying each candidate endpoint in order and
    /// keeping the last error when all of them fail. An empty id is a
    /// precondition failure: no request is issued at all.
    pub async fn fetch_article(&self, id: &str) -> Result<Article, ApiError> {
        let id = validate_id(id)?;
        let mut last_error = ApiError::MalformedPayload;
        for path in &self.config.article_paths {
            let Some(url) = self.config.article_url(path, id) else {
                continue;
            };
            match self.fetch_single_candidate(&url).await {
                Ok(article) => return Ok(article),
                Err(error) => last_error = error,
            }
        }
        tracing::warn!(%id, %last_error, "échec du chargement de l'article");
        Err(last_error)
    }

    async fn fetch_single_candidate(&self, url: &str) -> Result<Article, ApiError> {
        let payload = self.get_json(url).await?;
        let record = unwrap_single(payload).ok_or(ApiError::MalformedPayload)?;
        Article::from_value(record).map_err(|_| ApiError::MalformedPayload)
    }

    /// Deletes an article on the primary endpoint, with bearer auth. A 401 is
    /// surfaced like any other failure; clearing the session and rerouting to
    /// a login surface belongs to the auth collaborator, never to this client.
    pub async fn delete_article(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let id = validate_id(id)?;
        let url = self
            .config
            .article_paths
            .first()
            .and_then(|path| self.config.article_url(path, id))
            .ok_or_else(|| ApiError::Network("no article endpoint configured".to_string()))?;

        let request = http::Request::builder()
            .method(Method::DELETE)
            .uri(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(AsyncBody::empty())
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }
        Ok(())
    }

    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let request = http::Request::builder()
            .method(Method::GET)
            .uri(url)
            .follow_redirects(RedirectPolicy::FollowAll)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .body(AsyncBody::empty())
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Http(response.status().as_u16()));
        }

        let mut body = response.into_body();
        let bytes = read_to_end_limited(&mut body, MAX_BODY_BYTES).await?;
        serde_json::from_slice(&bytes).map_err(|_| ApiError::MalformedPayload)
    }
}

fn validate_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        Err(ApiError::MissingId)
    } else {
        Ok(id)
    }
}

/// First-success-wins over a set of candidate futures. Losing candidates are
/// dropped as soon as a winner resolves; if every candidate fails, the last
/// failure is reported.
async fn race<T>(candidates: Vec<LocalBoxFuture<'_, Result<T, ApiError>>>) -> Result<T, ApiError> {
    if candidates.is_empty() {
        return Err(ApiError::Network("no endpoint candidates configured".to_string()));
    }
    let (value, _losers) = future::select_ok(candidates).await?;
    Ok(value)
}

/// Resolves `fut`, unless `deadline` completes first, in which case the
/// result is [`ApiError::Timeout`]. The deadline is any future (in practice
/// an executor timer), which keeps this combinator runtime-agnostic.
pub async fn with_timeout<T, F, D>(fut: F, deadline: D) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    futures::pin_mut!(fut);
    futures::pin_mut!(deadline);
    match future::select(fut, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

async fn read_to_end_limited(body: &mut AsyncBody, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    let mut total = 0usize;
    let mut buf = [0u8; 8192];
    loop {
        let n = body
            .read(&mut buf)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if n == 0 {
            break;
        }
        total = total.saturating_add(n);
        if total > limit {
            return Err(ApiError::MalformedPayload);
        }
        bytes.extend_from_slice(&buf[..n]);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn unwrap_list_accepts_known_envelopes() {
        assert_eq!(
            unwrap_list(&json!({ "data": [1, 2, 3] })),
            Some(vec![json!(1), json!(2), json!(3)])
        );
        assert_eq!(unwrap_list(&json!({ "items": [9] })), Some(vec![json!(9)]));
        assert_eq!(
            unwrap_list(&json!({ "articles": [{ "title": "A" }] })),
            Some(vec![json!({ "title": "A" })])
        );
        assert_eq!(unwrap_list(&json!({ "news": [] })), Some(vec![]));
        assert_eq!(unwrap_list(&json!([1, 2])), Some(vec![json!(1), json!(2)]));
        assert_eq!(unwrap_list(&json!({ "foo": 1 })), None);
        assert_eq!(unwrap_list(&json!("nope")), None);
    }

    #[test]
    fn unwrap_list_probes_in_priority_order() {
        let payload = json!({ "data": [1], "items": [2] });
        assert_eq!(unwrap_list(&payload), Some(vec![json!(2)]));
        // A non-array value under a probed key falls through to the next one.
        let payload = json!({ "items": "pas une liste", "data": [3] });
        assert_eq!(unwrap_list(&payload), Some(vec![json!(3)]));
    }

    #[test]
    fn unwrap_single_handles_arrays_envelopes_and_bare_objects() {
        assert_eq!(
            unwrap_single(json!([{ "id": 1 }, { "id": 2 }])),
            Some(json!({ "id": 1 }))
        );
        assert_eq!(unwrap_single(json!([])), None);
        assert_eq!(
            unwrap_single(json!({ "data": { "id": 3 } })),
            Some(json!({ "id": 3 }))
        );
        assert_eq!(
            unwrap_single(json!({ "item": { "id": 4 } })),
            Some(json!({ "id": 4 }))
        );
        assert_eq!(
            unwrap_single(json!({ "article": { "id": 5 } })),
            Some(json!({ "id": 5 }))
        );
        assert_eq!(
            unwrap_single(json!({ "id": 6 })),
            Some(json!({ "id": 6 }))
        );
        assert_eq!(unwrap_single(json!(12)), None);
    }

    #[test]
    fn endpoint_building_normalizes_slashes_and_encodes_ids() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.endpoint("articles"), "http://localhost:3000/articles");
        assert_eq!(
            config.article_url("articles", "42").unwrap(),
            "http://localhost:3000/articles/42"
        );
        assert_eq!(
            config.article_url("articles", "a/b?c").unwrap(),
            "http://localhost:3000/articles/a%2Fb%3Fc"
        );
    }

    #[test]
    fn validate_id_rejects_blank_ids_before_any_request() {
        assert_eq!(validate_id(""), Err(ApiError::MissingId));
        assert_eq!(validate_id("   "), Err(ApiError::MissingId));
        assert_eq!(validate_id(" 42 "), Ok("42"));
    }

    #[test]
    fn race_takes_the_first_success_even_after_failures() {
        let result = block_on(race(vec![
            future::ready(Err(ApiError::Http(500))).boxed_local(),
            future::ready(Ok("A")).boxed_local(),
        ]));
        assert_eq!(result, Ok("A"));
    }

    #[test]
    fn race_fails_only_when_every_candidate_failed() {
        let result: Result<(), _> = block_on(race(vec![
            future::ready(Err(ApiError::Http(500))).boxed_local(),
            future::ready(Err(ApiError::Http(404))).boxed_local(),
        ]));
        assert!(result.is_err());

        let result: Result<(), _> = block_on(race(vec![]));
        assert!(result.is_err());
    }

    #[test]
    fn with_timeout_reports_a_timeout_when_the_deadline_fires_first() {
        let result: Result<(), _> = block_on(with_timeout(
            future::pending::<Result<(), ApiError>>(),
            future::ready(()),
        ));
        assert_eq!(result, Err(ApiError::Timeout));

        let result = block_on(with_timeout(
            future::ready(Ok(7)),
            future::pending::<()>(),
        ));
        assert_eq!(result, Ok(7));
    }
}
