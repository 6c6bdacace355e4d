//! Metrics service for delivery and engagement statistics.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::dispatch::Dispatcher;
use crate::errors::{unwrap_json, ApiError, ApiResult, StatusMessages};

const METRICS_ERRORS: StatusMessages = &[
    (400, "Invalid metrics query."),
    (403, "Forbidden."),
];

/// Bucket width for time-series metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsInterval {
    /// One bucket per hour
    Hour,
    /// One bucket per day
    Day,
    /// One bucket per week
    Week,
    /// One bucket per month
    Month,
}

impl MetricsInterval {
    fn as_str(&self) -> &'static str {
        match self {
            MetricsInterval::Hour => "hour",
            MetricsInterval::Day => "day",
            MetricsInterval::Week => "week",
            MetricsInterval::Month => "month",
        }
    }
}

/// Options shared by the time-series metrics endpoints
#[derive(Debug, Clone, Default)]
pub struct MetricsOptions {
    /// Start of the reporting window
    pub start_time: Option<DateTime<Utc>>,
    /// End of the reporting window
    pub end_time: Option<DateTime<Utc>>,
    /// Bucket width
    pub interval: Option<MetricsInterval>,
    /// Restrict to a campaign
    pub campaign_id: Option<String>,
}

impl MetricsOptions {
    fn validate(&self) -> Option<String> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if start >= end => {
                Some("The start time must be earlier than the end time.".into())
            }
            _ => None,
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = self.start_time {
            query.push(("start_time", start.to_rfc3339()));
        }
        if let Some(end) = self.end_time {
            query.push(("end_time", end.to_rfc3339()));
        }
        if let Some(interval) = self.interval {
            query.push(("interval", interval.as_str().to_string()));
        }
        if let Some(campaign_id) = &self.campaign_id {
            query.push(("campaign_id", campaign_id.clone()));
        }
        query
    }
}

/// Engagement counters over time
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementMetricsResponse {
    /// Time-ordered buckets
    #[serde(default)]
    pub buckets: Vec<EngagementBucket>,
}

/// Engagement counters for one bucket
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementBucket {
    /// Bucket start
    pub start: DateTime<Utc>,
    /// Bucket end
    pub end: DateTime<Utc>,
    /// Messages delivered
    #[serde(default)]
    pub delivered: u64,
    /// Messages opened
    #[serde(default)]
    pub opened: u64,
    /// Messages with at least one clicked link
    #[serde(default)]
    pub clicked: u64,
}

/// Delivery pipeline counters over time
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceMetricsResponse {
    /// Time-ordered buckets
    #[serde(default)]
    pub buckets: Vec<PerformanceBucket>,
}

/// Delivery pipeline counters for one bucket
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceBucket {
    /// Bucket start
    pub start: DateTime<Utc>,
    /// Bucket end
    pub end: DateTime<Utc>,
    /// Messages accepted for processing
    #[serde(default)]
    pub processed: u64,
    /// Messages delivered
    #[serde(default)]
    pub delivered: u64,
    /// Permanent delivery failures
    #[serde(default)]
    pub hard_bounced: u64,
    /// Temporary delivery failures
    #[serde(default)]
    pub soft_bounced: u64,
    /// Messages dropped before delivery
    #[serde(default)]
    pub dropped: u64,
}

/// Recipient reaction counters over time
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientBehaviourMetricsResponse {
    /// Time-ordered buckets
    #[serde(default)]
    pub buckets: Vec<RecipientBehaviourBucket>,
}

/// Recipient reaction counters for one bucket
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientBehaviourBucket {
    /// Bucket start
    pub start: DateTime<Utc>,
    /// Bucket end
    pub end: DateTime<Utc>,
    /// Unsubscribe events
    #[serde(default)]
    pub unsubscribed: u64,
    /// Abuse complaints
    #[serde(default)]
    pub complained: u64,
}

/// Account usage over the current billing period
#[derive(Debug, Clone, Deserialize)]
pub struct UsageMetricsResponse {
    /// Period start
    pub period_start: DateTime<Utc>,
    /// Period end
    pub period_end: DateTime<Utc>,
    /// Messages sent in the period
    #[serde(default)]
    pub messages: u64,
    /// Distinct recipients mailed in the period
    #[serde(default)]
    pub recipients: u64,
}

/// Metrics service
#[derive(Clone)]
pub struct MetricsService {
    dispatch: Dispatcher,
}

impl MetricsService {
    /// Create a new metrics service
    pub(crate) fn new(dispatch: Dispatcher) -> Self {
        Self { dispatch }
    }

    /// Engagement counters (delivered, opened, clicked)
    #[instrument(skip(self, options))]
    pub async fn engagement(&self, options: MetricsOptions) -> ApiResult<EngagementMetricsResponse> {
        self.time_series("engagement", options).await
    }

    /// Delivery pipeline counters (processed, delivered, bounced, dropped)
    #[instrument(skip(self, options))]
    pub async fn performance(&self, options: MetricsOptions) -> ApiResult<PerformanceMetricsResponse> {
        self.time_series("performance", options).await
    }

    /// Recipient reaction counters (unsubscribes, complaints)
    #[instrument(skip(self, options))]
    pub async fn recipient_behaviour(
        &self,
        options: MetricsOptions,
    ) -> ApiResult<RecipientBehaviourMetricsResponse> {
        self.time_series("recipient-behaviour", options).await
    }

    /// Usage for the current billing period
    #[instrument(skip(self))]
    pub async fn usage(&self) -> ApiResult<UsageMetricsResponse> {
        let result = self.dispatch.get("tx/v1/metrics/usage", &[]).await;
        unwrap_json(result, METRICS_ERRORS)
    }

    async fn time_series<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        options: MetricsOptions,
    ) -> ApiResult<T> {
        if let Some(message) = options.validate() {
            return Err(ApiError::validation(message));
        }

        let path = format!("tx/v1/metrics/{endpoint}");
        let result = self.dispatch.get(&path, &options.query()).await;
        unwrap_json(result, METRICS_ERRORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_must_precede_end() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let options = MetricsOptions {
            start_time: Some(start),
            end_time: Some(end),
            ..MetricsOptions::default()
        };
        assert_eq!(
            options.validate(),
            Some("The start time must be earlier than the end time.".into())
        );

        let options = MetricsOptions {
            start_time: Some(end),
            end_time: Some(start),
            ..MetricsOptions::default()
        };
        assert_eq!(options.validate(), None);
    }

    #[test]
    fn test_query_assembly() {
        let options = MetricsOptions {
            interval: Some(MetricsInterval::Day),
            campaign_id: Some("spring-launch".into()),
            ..MetricsOptions::default()
        };
        let query = options.query();
        assert!(query.contains(&("interval", "day".to_string())));
        assert!(query.contains(&("campaign_id", "spring-launch".to_string())));
    }
}
