//! Wire types for the scheduling-service API.
//!
//! These mirror the server's JSON payloads; the client treats them as
//! opaque data to render, never as state it owns. Unknown fields are
//! ignored so server-side additions don't break older clients.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription plans offered at registration, in display order.
pub const SUBSCRIPTION_PLANS: &[&str] = &["basic", "premium", "enterprise"];

/// Platforms the service can publish to, in display order.
pub const PLATFORMS: &[&str] = &["twitter", "facebook", "instagram"];

/// Authenticated user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub subscription_plan: String,
    pub subscription_active: bool,
}

/// Payload returned by login and register: the bearer token plus the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Lifecycle state of a scheduled post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Posted,
    Failed,
    /// Forward-compatibility: any status this client doesn't know about.
    #[serde(other)]
    Unknown,
}

/// A scheduled post as the server reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(with = "iso8601")]
    pub scheduled_time: DateTime<Utc>,
    pub status: PostStatus,
    #[serde(default)]
    pub media_url: Option<String>,
}

/// Request body for scheduling a new post.
#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    pub content: String,
    pub platforms: Vec<String>,
    #[serde(with = "iso8601")]
    pub scheduled_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

/// A connected social account. Credentials never come back from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub platform: String,
    pub account_name: String,
    pub is_active: bool,
}

/// Request body for connecting a social account.
///
/// `credentials` is submitted as raw opaque text; validation is the
/// server's concern.
#[derive(Debug, Clone, Serialize)]
pub struct AccountDraft {
    pub platform: String,
    pub account_name: String,
    pub credentials: String,
}

/// Request body for registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub subscription_plan: String,
}

/// Per-platform slice of the analytics summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformStats {
    pub posts: u64,
    pub reach: u64,
}

/// Aggregate analytics over a lookback window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub period_days: u32,
    #[serde(default)]
    pub total_posts: u64,
    pub total_likes: u64,
    pub total_shares: u64,
    pub total_comments: u64,
    pub total_reach: u64,
    pub avg_engagement_rate: f64,
    #[serde(default)]
    pub platform_breakdown: BTreeMap<String, PlatformStats>,
}

/// A recommended posting slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTime {
    pub hour: u8,
    pub day: String,
    pub reason: String,
}

/// Response of the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
}

/// ISO-8601 timestamp (de)serialization.
///
/// The server emits `datetime.isoformat()` output, which has no UTC
/// offset; well-formed RFC 3339 with an offset is accepted too. Naive
/// timestamps are taken as UTC.
pub mod iso8601 {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses an ISO-8601 timestamp, with or without an offset.
    ///
    /// # Errors
    /// Returns an error if the string matches neither form.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
    }
}
