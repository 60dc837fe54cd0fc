//! Client-side request pipeline for the pricing / fraud prediction service.
//!
//! The pipeline is the same for every endpoint: validate the form fields,
//! serialize them as JSON, POST to the endpoint path, then parse the result
//! variant that endpoint is contracted to return. Every failure class funnels
//! into [`PredictionError`] so callers have exactly one error surface.

use std::time::Duration;

use reqwest::Client;
use shared::{
    domain::{ProductFields, ProductQuery, QueryParseError, FORM_VALIDATION_MESSAGE},
    error::{ErrorBody, UNKNOWN_ERROR_MESSAGE},
    protocol::{
        FraudDetectionResponse, PredictionEndpoint, PredictionOutcome, PricePredictionResponse,
    },
};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

/// Bound on how long a single prediction request may stay in flight; an
/// unresponsive backend surfaces as a transport failure instead of pinning
/// the caller in the awaiting state forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("failed to construct http client: {0}")]
    Startup(String),
    #[error(transparent)]
    Validation(#[from] QueryParseError),
    #[error("request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} returned HTTP {status}: {detail}")]
    Api {
        endpoint: &'static str,
        status: u16,
        detail: String,
    },
    #[error("unreadable response from {endpoint}: {message}")]
    MalformedResponse {
        endpoint: &'static str,
        message: String,
    },
}

impl PredictionError {
    /// The one-line text shown after the `"Error: "` prefix in the UI.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Validation(_) => FORM_VALIDATION_MESSAGE.to_string(),
            PredictionError::Api { detail, .. } => detail.clone(),
            PredictionError::Transport { message, .. } => message.clone(),
            PredictionError::MalformedResponse { message, .. } => message.clone(),
            PredictionError::InvalidServerUrl { .. } | PredictionError::Startup(_) => {
                self.to_string()
            }
        }
    }
}

#[derive(Debug)]
pub struct PredictionClient {
    http: Client,
    server_url: Url,
}

impl PredictionClient {
    /// Builds a client for the given service origin, validating the URL
    /// eagerly so a bad configuration fails at startup rather than on the
    /// first submission.
    pub fn new(server_url: &str) -> Result<Self, PredictionError> {
        let parsed = Url::parse(server_url.trim()).map_err(|err| {
            PredictionError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: err.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PredictionError::InvalidServerUrl {
                url: server_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| PredictionError::Startup(err.to_string()))?;

        Ok(Self {
            http,
            server_url: parsed,
        })
    }

    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Validate raw form buffers, then run the shared submission pipeline.
    /// A validation failure short-circuits before any network traffic.
    pub async fn submit_fields(
        &self,
        endpoint: PredictionEndpoint,
        fields: &ProductFields,
    ) -> Result<PredictionOutcome, PredictionError> {
        let query = fields.parse()?;
        self.submit(endpoint, &query).await
    }

    /// Shared pipeline: POST the query as JSON and parse the result variant
    /// the endpoint is contracted to return.
    pub async fn submit(
        &self,
        endpoint: PredictionEndpoint,
        query: &ProductQuery,
    ) -> Result<PredictionOutcome, PredictionError> {
        let url = self.endpoint_url(endpoint);
        info!(
            endpoint = endpoint.path(),
            brand = %query.brand,
            "prediction: submitting product query"
        );

        let response = self
            .http
            .post(url)
            .json(query)
            .send()
            .await
            .map_err(|err| PredictionError::Transport {
                endpoint: endpoint.path(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail_or_fallback(),
                Err(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
            };
            error!(
                endpoint = endpoint.path(),
                status = status.as_u16(),
                detail = %detail,
                "prediction: service rejected request"
            );
            return Err(PredictionError::Api {
                endpoint: endpoint.path(),
                status: status.as_u16(),
                detail,
            });
        }

        let outcome = match endpoint {
            PredictionEndpoint::Price => response
                .json::<PricePredictionResponse>()
                .await
                .map(|body| PredictionOutcome::Price {
                    predicted_price: body.predicted_price,
                }),
            PredictionEndpoint::Fraud => response
                .json::<FraudDetectionResponse>()
                .await
                .map(|body| PredictionOutcome::Fraud {
                    is_fraud: body.is_fraud,
                }),
        }
        .map_err(|err| PredictionError::MalformedResponse {
            endpoint: endpoint.path(),
            message: err.to_string(),
        })?;

        info!(endpoint = endpoint.path(), "prediction: request succeeded");
        Ok(outcome)
    }

    fn endpoint_url(&self, endpoint: PredictionEndpoint) -> String {
        format!(
            "{}{}",
            self.server_url.as_str().trim_end_matches('/'),
            endpoint.path()
        )
    }
}

#[path = "tests/lib_tests.rs"]
#[cfg(test)]
mod tests;
