use crate::layers::client::{RiskClassifier, StatsProvider};
use crate::layers::domain::errors::DashboardError;
use async_trait::async_trait;
use protocol::config::ServerConfig;
use protocol::{BrandStatsPayload, ErrorBody, PredictRequest, PredictResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static HTTP_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

struct HttpResponse {
    status: u16,
    body: String,
}

/// reqwest-backed client for the prediction and stats endpoints. No request
/// timeout is set: a call waits until the backend answers or the connection
/// fails.
pub(crate) struct HttpBackend {
    client: Client,
    predict_url: String,
    stats_url: String,
    session_cookie: Option<String>,
}

impl HttpBackend {
    pub(crate) fn new(config: &ServerConfig) -> Result<Self, DashboardError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
            predict_url: join_base_path(&config.base_url, &config.predict_path)?,
            stats_url: join_base_path(&config.base_url, &config.stats_path)?,
            session_cookie: config.session_cookie.clone(),
        })
    }

    fn stats_url_for(&self, entity: &str) -> String {
        format!(
            "{}/{}",
            self.stats_url.trim_end_matches('/'),
            urlencoding::encode(entity)
        )
    }

    async fn send(&self, method: &str, request: RequestBuilder) -> Result<HttpResponse, DashboardError> {
        let request_id = HTTP_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let mut request = request.header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(
                    event = "http.error",
                    request = request_id,
                    method,
                    connect = err.is_connect(),
                    timeout = err.is_timeout(),
                    error = %err,
                );
                return Err(err.into());
            }
        };
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await?;
        tracing::debug!(
            event = "http.response",
            request = request_id,
            method,
            path = %url,
            status,
            body_len = body.len(),
        );
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl RiskClassifier for HttpBackend {
    async fn classify(
        &self,
        request: &PredictRequest,
    ) -> Result<Option<PredictResponse>, DashboardError> {
        let payload = serde_json::to_string(request)
            .map_err(|err| DashboardError::Transport(err.to_string()))?;
        let builder = self
            .client
            .post(&self.predict_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let response = self.send("POST", builder).await?;
        ensure_success("POST", &self.predict_url, &response)?;
        // Unparseable text or a mistyped field fails like a dropped
        // connection. Valid JSON that is not an object carries no risk label.
        let body = serde_json::from_str::<Value>(&response.body)
            .map_err(|err| DashboardError::Transport(format!("invalid prediction body: {err}")))?;
        if !body.is_object() {
            return Ok(None);
        }
        serde_json::from_value::<PredictResponse>(body)
            .map(Some)
            .map_err(|err| DashboardError::Transport(format!("invalid prediction body: {err}")))
    }
}

#[async_trait]
impl StatsProvider for HttpBackend {
    async fn brand_stats(&self, entity: &str) -> Result<BrandStatsPayload, DashboardError> {
        let url = self.stats_url_for(entity);
        let response = self.send("GET", self.client.get(&url)).await?;
        ensure_success("GET", &url, &response)?;
        let body = serde_json::from_str::<Value>(&response.body)
            .map_err(|err| DashboardError::MalformedResponse(format!("invalid stats body: {err}")))?;
        if !body.is_object() {
            return Ok(BrandStatsPayload::default());
        }
        serde_json::from_value(body)
            .map_err(|err| DashboardError::MalformedResponse(format!("invalid stats body: {err}")))
    }
}

fn ensure_success(method: &str, url: &str, response: &HttpResponse) -> Result<(), DashboardError> {
    if response.status / 100 == 2 {
        return Ok(());
    }
    let detail = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| format!(": {}", body.error))
        .unwrap_or_default();
    Err(DashboardError::Transport(format!(
        "{method} {url} returned status {}{detail}",
        response.status
    )))
}

pub(crate) fn join_base_path(base: &str, path: &str) -> Result<String, DashboardError> {
    if base.trim().is_empty() {
        return Err(DashboardError::Transport("base_url is empty".to_string()));
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(app: Router) -> ServerConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ServerConfig {
            base_url: format!("http://{addr}/"),
            ..ServerConfig::default()
        }
    }

    fn request(brand: &str, comment: &str) -> PredictRequest {
        PredictRequest {
            brand: brand.to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn join_base_path_normalizes_slashes() {
        assert_eq!(
            join_base_path("http://host:5000/", "predict").unwrap(),
            "http://host:5000/predict"
        );
        assert_eq!(
            join_base_path("http://host:5000", "/brand_stats").unwrap(),
            "http://host:5000/brand_stats"
        );
        assert!(join_base_path("  ", "/predict").is_err());
    }

    #[tokio::test]
    async fn classify_posts_brand_and_comment() {
        let app = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                let risk = if body["comment"] == "terrible product" {
                    "Negative"
                } else {
                    "Positive"
                };
                Json(json!({
                    "brand": body["brand"],
                    "risk": risk,
                    "confidence": 91.3,
                }))
            }),
        );
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let response = backend
            .classify(&request("Acme", "terrible product"))
            .await
            .unwrap()
            .expect("body");
        assert_eq!(response.label(), Some("Negative"));
        assert_eq!(response.brand.as_deref(), Some("Acme"));
        assert_eq!(response.confidence, Some(91.3));
    }

    #[tokio::test]
    async fn classify_maps_server_error_to_transport() {
        let app = Router::new().route(
            "/predict",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "model not loaded" })),
                )
            }),
        );
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let err = backend
            .classify(&request("Acme", "fine"))
            .await
            .expect_err("500");
        match err {
            DashboardError::Transport(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("model not loaded"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn classify_null_body_is_none() {
        let app = Router::new().route("/predict", post(|| async { Json(Value::Null) }));
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let response = backend.classify(&request("Acme", "fine")).await.unwrap();
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn classify_scalar_body_is_none() {
        for body in [json!(42), json!("ok"), json!(true), json!([])] {
            let app = Router::new().route(
                "/predict",
                post(move || {
                    let body = body.clone();
                    async move { Json(body) }
                }),
            );
            let backend = HttpBackend::new(&serve(app).await).unwrap();
            let response = backend.classify(&request("Acme", "fine")).await.unwrap();
            assert!(response.is_none());
        }
    }

    #[tokio::test]
    async fn classify_mistyped_risk_is_transport() {
        let app = Router::new().route("/predict", post(|| async { Json(json!({ "risk": 5 })) }));
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let err = backend
            .classify(&request("Acme", "fine"))
            .await
            .expect_err("risk must be a string");
        assert!(matches!(err, DashboardError::Transport(_)));
    }

    #[tokio::test]
    async fn classify_unreachable_server_is_transport() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let backend = HttpBackend::new(&ServerConfig {
            base_url: format!("http://{addr}"),
            ..ServerConfig::default()
        })
        .unwrap();
        let err = backend
            .classify(&request("Acme", "fine"))
            .await
            .expect_err("connection refused");
        assert!(matches!(err, DashboardError::Transport(_)));
    }

    #[tokio::test]
    async fn brand_stats_encodes_entity_and_sends_cookie() {
        let app = Router::new().route(
            "/brand_stats/:brand",
            get(|Path(brand): Path<String>, headers: HeaderMap| async move {
                let cookie = headers
                    .get("cookie")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                if cookie != "session=abc" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
                }
                (
                    StatusCode::OK,
                    Json(json!({ "Negative": brand.len(), "Total": brand.len() })),
                )
            }),
        );
        let mut config = serve(app).await;
        config.session_cookie = Some("session=abc".to_string());
        let backend = HttpBackend::new(&config).unwrap();
        let payload = backend.brand_stats("Acme Corp/EU").await.unwrap();
        assert_eq!(payload.negative, Some(12.0));
        assert_eq!(payload.positive, None);

        config.session_cookie = None;
        let anonymous = HttpBackend::new(&config).unwrap();
        let err = anonymous.brand_stats("Acme").await.expect_err("401");
        assert!(matches!(err, DashboardError::Transport(message) if message.contains("401")));
    }

    #[tokio::test]
    async fn brand_stats_rejects_non_json_body() {
        let app = Router::new().route("/brand_stats/:brand", get(|| async { "not json" }));
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let err = backend.brand_stats("Acme").await.expect_err("bad body");
        assert!(matches!(err, DashboardError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn brand_stats_scalar_body_counts_as_empty() {
        let app = Router::new().route("/brand_stats/:brand", get(|| async { Json(json!(42)) }));
        let backend = HttpBackend::new(&serve(app).await).unwrap();
        let payload = backend.brand_stats("Acme").await.unwrap();
        assert_eq!(payload, BrandStatsPayload::default());
    }
}
