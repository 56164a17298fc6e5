//! ENTSO-E Transparency Platform client for actual total load.

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;

use crate::domain::{IngestConfig, LoadRecord};
use crate::error::AppError;
use crate::io::ingest::{COMPACT_TIMESTAMP_FORMAT, normalize};

pub struct EntsoeClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    document_type: String,
    process_type: String,
}

impl EntsoeClient {
    /// Build a client from the run configuration.
    ///
    /// A missing API key is accepted here and reported by the first fetch.
    pub fn new(config: &IngestConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AppError::Transport)?;
        Ok(Self::with_http_client(config, client))
    }

    /// Use a preconfigured HTTP client (proxy settings, custom TLS, ...).
    pub fn with_http_client(config: &IngestConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            document_type: config.document_type.clone(),
            process_type: config.process_type.clone(),
        }
    }

    /// Fetch the raw XML body for `[start, end)` in `zone`.
    pub fn fetch_load(&self, start: DateTime<Utc>, end: DateTime<Utc>, zone: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingCredential)?;
        if start >= end {
            return Err(AppError::InvalidRequest(format!(
                "period start {start} must be before end {end}"
            )));
        }
        if zone.trim().is_empty() {
            return Err(AppError::InvalidRequest("zone must not be empty".into()));
        }

        let period_start = compact_timestamp(start);
        let period_end = compact_timestamp(end);
        tracing::info!(zone, %period_start, %period_end, "requesting ENTSO-E actual total load");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("securityToken", api_key),
                ("documentType", self.document_type.as_str()),
                ("processType", self.process_type.as_str()),
                ("outBiddingZone_Domain", zone),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
            ])
            .send()
            .map_err(AppError::Transport)?;

        let status = resp.status();
        let body = resp.text().map_err(AppError::Transport)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "ENTSO-E response received");

        if !status.is_success() {
            return Err(AppError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Fetch and normalize in one step.
    pub fn fetch_load_records(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        zone: &str,
    ) -> Result<Vec<LoadRecord>, AppError> {
        let body = self.fetch_load(start, end, zone)?;
        normalize(&body)
    }
}

/// `YYYYMMDDHHMM` in UTC, as expected by `periodStart`/`periodEnd`.
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format(COMPACT_TIMESTAMP_FORMAT).to_string()
}
