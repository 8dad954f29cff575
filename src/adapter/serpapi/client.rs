//! SerpAPI Google Flights client.
//!
//! One GET per lookup against `{base_url}/search`. Every failure mode is
//! folded into [`FareOutcome`]; nothing here returns an error to the sweep.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::dto::SearchResponse;
use super::settings::SerpApiConfig;
use crate::port::{FareLookup, FareLookupError, FareOutcome, FareRequest};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for the SerpAPI `google_flights` engine.
pub struct SerpApiClient {
    http: HttpClient,
    search_url: String,
    api_key: String,
    currency: String,
    language: String,
}

impl SerpApiClient {
    #[must_use]
    pub fn new(config: &SerpApiConfig, api_key: impl Into<String>) -> Self {
        let http = config.http.build_client().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        });

        Self {
            http,
            search_url: format!("{}/search", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            currency: config.currency.clone(),
            language: config.language.clone(),
        }
    }

    async fn fetch(&self, request: &FareRequest) -> Result<FareOutcome, FareLookupError> {
        let outbound_date = request.departure_date.format(DATE_FORMAT).to_string();
        let return_date = request.return_date.format(DATE_FORMAT).to_string();

        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("engine", "google_flights"),
                ("departure_id", request.origin.as_str()),
                ("arrival_id", request.destination.as_str()),
                ("outbound_date", outbound_date.as_str()),
                ("return_date", return_date.as_str()),
                ("currency", self.currency.as_str()),
                ("hl", self.language.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        // Error payloads arrive with 4xx statuses but still carry a JSON
        // `error` field, which is more useful than the status alone.
        match serde_json::from_str::<SearchResponse>(&body) {
            Ok(parsed) if status.is_success() || parsed.error.is_some() => {
                Ok(parsed.into_outcome(request))
            }
            Ok(_) => Err(FareLookupError::Http {
                status: status.as_u16(),
            }),
            Err(_) if !status.is_success() => Err(FareLookupError::Http {
                status: status.as_u16(),
            }),
            Err(err) => Err(FareLookupError::Decode(err.to_string())),
        }
    }
}

fn transport_error(err: reqwest::Error) -> FareLookupError {
    if err.is_timeout() {
        FareLookupError::Timeout
    } else {
        // Strip the URL: it carries the API key.
        FareLookupError::Transport(err.without_url().to_string())
    }
}

#[async_trait]
impl FareLookup for SerpApiClient {
    async fn lookup(&self, request: &FareRequest) -> FareOutcome {
        debug!(
            origin = %request.origin,
            destination = %request.destination,
            departure = %request.departure_date,
            return_date = %request.return_date,
            "Searching fares"
        );

        match self.fetch(request).await {
            Ok(outcome) => outcome,
            Err(err) => FareOutcome::Error(err),
        }
    }
}
