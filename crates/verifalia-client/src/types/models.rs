/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - job snapshots, entries, listing pages, credit balance
[UPDATE]: When API schema changes or new types added
*/

use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Classification, Deduplication, JobStatus, Quality, ValidationStatus};
use super::time_span;

/// Metadata snapshot of a validation job, without per-entry results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOverview {
    pub id: String,
    pub created_on: DateTime<Utc>,
    pub submitted_on: DateTime<Utc>,
    /// Absent while the job is in progress
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(
        rename = "clientIP",
        default,
        deserialize_with = "serde_helpers::deserialize_ip_lenient"
    )]
    pub client_ip: Option<IpAddr>,
    pub quality: Quality,
    #[serde(default, with = "time_span::span")]
    pub retention: Duration,
    pub deduplication: Deduplication,
    pub status: JobStatus,
    pub no_of_entries: u32,
    #[serde(default)]
    pub progress: Option<Progress>,
}

/// Completion progress of an in-progress job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Completed share of the entries, from 0 to 1
    pub percentage: Decimal,
    #[serde(default, with = "time_span::span_option")]
    pub estimated_time_remaining: Option<Duration>,
}

/// One validated address within a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub index: u32,
    pub input_data: String,
    #[serde(default)]
    pub custom: Option<String>,
    #[serde(default)]
    pub completed_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub ascii_email_address_domain_part: Option<String>,
    #[serde(default)]
    pub email_address_local_part: Option<String>,
    #[serde(default)]
    pub email_address_domain_part: Option<String>,
    #[serde(default)]
    pub has_international_domain_name: Option<bool>,
    #[serde(default)]
    pub has_international_mailbox_name: Option<bool>,
    #[serde(default)]
    pub is_disposable_email_address: Option<bool>,
    #[serde(default)]
    pub is_free_email_address: Option<bool>,
    #[serde(default)]
    pub is_role_account: Option<bool>,
    pub status: ValidationStatus,
    pub classification: Classification,
    /// Zero-based position of the character which made syntax validation fail
    #[serde(default)]
    pub syntax_failure_index: Option<u32>,
    /// Index of the first occurrence this entry duplicates
    #[serde(default)]
    pub duplicate_of: Option<u32>,
}

/// Snapshot of a validation job, with the entries the server returned
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub overview: JobOverview,
    pub entries: Vec<JobEntry>,
}

impl Job {
    pub fn id(&self) -> &str {
        &self.overview.id
    }

    pub fn status(&self) -> JobStatus {
        self.overview.status
    }
}

/// Continuation metadata of a paginated response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Opaque token, only ever echoed back to the server
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub is_truncated: bool,
}

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage<T> {
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Credit balance of the account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    pub credit_packs: Decimal,
    #[serde(default)]
    pub free_credits: Option<Decimal>,
    /// Time left before the free daily credits are reset
    #[serde(default, with = "time_span::span_option")]
    pub free_credits_reset_in: Option<Duration>,
}

mod serde_helpers {
    use std::net::IpAddr;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize_ip_lenient<'de, D>(deserializer: D) -> Result<Option<IpAddr>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|value| value.trim().parse().ok()))
    }
}
