use async_trait::async_trait;
use cardio_protocol::{classify_response, PredictRequest, RiskClassification, PREDICT_PATH};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
pub(crate) enum PredictError {
    InvalidUrl(String),
    Transport(reqwest::Error),
    Status(u16),
    Decode(serde_json::Error),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::InvalidUrl(reason) => write!(f, "invalid api url: {reason}"),
            PredictError::Transport(err) => write!(f, "request failed: {err}"),
            PredictError::Status(status) => write!(f, "server error: {status}"),
            PredictError::Decode(err) => write!(f, "unreadable response: {err}"),
        }
    }
}

impl std::error::Error for PredictError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictError::Transport(err) => Some(err),
            PredictError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        PredictError::Transport(err)
    }
}

impl From<serde_json::Error> for PredictError {
    fn from(err: serde_json::Error) -> Self {
        PredictError::Decode(err)
    }
}

/// Anything that can turn an assessment into a risk classification.
#[async_trait]
pub(crate) trait RiskPredictor: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<RiskClassification, PredictError>;
}

pub(crate) fn join_base_path(base: &str, path: &str) -> Result<String, PredictError> {
    if base.trim().is_empty() {
        return Err(PredictError::InvalidUrl("base url is empty".to_string()));
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

/// HTTP client for `POST {base}/predict`.
pub(crate) struct PredictClient {
    http: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl PredictClient {
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, PredictError> {
        let endpoint = join_base_path(base_url, PREDICT_PATH)?;
        let http = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    pub(crate) fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RiskPredictor for PredictClient {
    async fn predict(&self, request: &PredictRequest) -> Result<RiskClassification, PredictError> {
        let request_id = REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::to_string(request)?;
        info!(
            request_id,
            endpoint = %self.endpoint,
            body_len = payload.len(),
            "predict start"
        );
        debug!(request_id, %payload, "predict payload");

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(
                request_id,
                timeout = err.is_timeout(),
                connect = err.is_connect(),
                error = %err,
                "predict transport error"
            );
            PredictError::Transport(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(request_id, status = status.as_u16(), "predict rejected");
            return Err(PredictError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let risk = classify_response(&body).map_err(|err| {
            warn!(request_id, body_len = body.len(), error = %err, "predict body is not json");
            PredictError::Decode(err)
        })?;
        info!(request_id, status = status.as_u16(), ?risk, "predict done");
        Ok(risk)
    }
}
