//! HTTP client for the room schedule API.
//!
//! One request per fetch:
//! `GET {base}/roomId/{roomId}/date/{DD.MM.YYYY}` returning a JSON array of
//! lesson elements, normalized by [`parse_schedule_body`].

use super::error::FetchError;
use super::normalize::parse_schedule_body;
use super::types::LessonRecord;
use chrono::NaiveDate;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

/// Base URL of the campus map schedule integration.
pub const DEFAULT_BASE_URL: &str = "https://mapapi.susu.ru/integration/map/Schedule";

/// Anything that can produce the lessons of a room on a date.
///
/// The cache is generic over this so tests can substitute a fake upstream.
pub trait ScheduleSource {
    fn fetch(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LessonRecord>, FetchError>> + Send;
}

impl<T: ScheduleSource + Send + Sync> ScheduleSource for Arc<T> {
    fn fetch(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<LessonRecord>, FetchError>> + Send {
        self.as_ref().fetch(room_id, date)
    }
}

/// Configuration for the schedule client.
#[derive(Debug, Clone)]
pub struct ScheduleClientConfig {
    /// Base URL, without the `/roomId/...` suffix
    pub base_url: String,
    /// Whole-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for ScheduleClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Client for fetching lesson schedules from the upstream API.
pub struct ScheduleClient {
    client: Client,
    config: ScheduleClientConfig,
}

impl ScheduleClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(ScheduleClientConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(config: ScheduleClientConfig) -> Result<Self, FetchError> {
        // Reject a bad base URL up front rather than on every fetch
        Url::parse(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| FetchError::Transport {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, config })
    }

    /// Builds the request URL for a room and date.
    pub fn schedule_url(&self, room_id: &str, date: NaiveDate) -> Result<Url, FetchError> {
        schedule_url(&self.config.base_url, room_id, date)
    }

    /// Performs one request and normalizes the response. No retries.
    pub async fn fetch_schedule(
        &self,
        room_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<LessonRecord>, FetchError> {
        let url = self.schedule_url(room_id, date)?;
        let start = Instant::now();

        info!(room_id = %room_id, date = %date, url = %url, "Fetching schedule");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(room_id = %room_id, error = %e, "Schedule request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            // The body is still parsed; only a failed transfer is a transport error
            warn!(room_id = %room_id, status = %status, "Schedule request returned non-success status");
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received schedule body");

        let lessons = parse_schedule_body(&body).inspect_err(|e| {
            error!(room_id = %room_id, date = %date, error = %e, "Failed to parse schedule");
        })?;

        info!(
            room_id = %room_id,
            date = %date,
            count = lessons.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Schedule fetched"
        );

        Ok(lessons)
    }
}

impl ScheduleSource for ScheduleClient {
    async fn fetch(&self, room_id: &str, date: NaiveDate) -> Result<Vec<LessonRecord>, FetchError> {
        self.fetch_schedule(room_id, date).await
    }
}

/// Formats a date the way the upstream path expects it (`DD.MM.YYYY`).
pub fn format_upstream_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Joins `base`, the room id and the date into the schedule URL.
///
/// The room id is inserted as a single, percent-encoded path segment.
pub fn schedule_url(base: &str, room_id: &str, date: NaiveDate) -> Result<Url, FetchError> {
    let mut url = Url::parse(base)?;
    let date = format_upstream_date(date);

    url.path_segments_mut()
        .map_err(|_| FetchError::Transport {
            message: format!("base URL '{}' cannot carry a path", base),
        })?
        .pop_if_empty()
        .extend(["roomId", room_id, "date", date.as_str()]);

    Ok(url)
}
