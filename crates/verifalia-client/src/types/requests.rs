/*
[INPUT]:  Caller-provided submission, retrieval and listing options
[OUTPUT]: Typed option structs and serde request bodies
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::content_type::ContentType;
use super::enums::{Deduplication, LineEnding, ListingDirection, Quality};
use super::time_span;

/// One address to validate, with an optional value echoed back in the results
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequestEntry {
    pub input_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
}

impl ValidationRequestEntry {
    pub fn new(input_data: impl Into<String>) -> Self {
        Self {
            input_data: input_data.into(),
            custom: None,
        }
    }

    pub fn with_custom(input_data: impl Into<String>, custom: impl Into<String>) -> Self {
        Self {
            input_data: input_data.into(),
            custom: Some(custom.into()),
        }
    }
}

impl From<&str> for ValidationRequestEntry {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ValidationRequestEntry {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Settings shared by every kind of job submission
#[derive(Debug, Clone, Default)]
pub struct SubmissionOptions {
    /// User-defined name for the job
    pub name: Option<String>,
    pub quality: Option<Quality>,
    pub deduplication: Option<Deduplication>,
    /// Processing priority, see `Priority`
    pub priority: Option<u8>,
    /// Data retention period after which the server deletes the job
    pub retention: Option<Duration>,
    /// URL the service invokes once the results are ready
    pub completion_callback: Option<Url>,
    /// How long the server may hold the submission open waiting for completion
    pub submission_wait_time: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

/// File-specific import settings
#[derive(Debug, Clone, Default)]
pub struct FileSubmissionOptions {
    /// Explicit content type; inferred from the file extension when unset
    pub content_type: Option<ContentType>,
    /// Zero-based index of the first row to import
    pub starting_row: Option<u32>,
    /// Zero-based index of the last row to import
    pub ending_row: Option<u32>,
    /// Zero-based column index (delimited and Excel files)
    pub column: Option<u32>,
    /// Zero-based worksheet index (Excel files)
    pub sheet: Option<u32>,
    pub line_ending: Option<LineEnding>,
    /// Column delimiter for delimited files
    pub delimiter: Option<String>,
}

/// Options for fetching a job or its overview
#[derive(Debug, Clone, Default)]
pub struct RetrievalOptions {
    /// How long the server may hold the request open waiting for completion
    pub wait_time: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

/// Options for listing jobs
#[derive(Debug, Clone, Default)]
pub struct ListingOptions {
    /// Advisory page size; the server may clamp it. This is not a cap on the total
    pub limit: Option<u32>,
    pub direction: ListingDirection,
    pub cancellation: Option<CancellationToken>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CallbackSettings {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct RequestSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplication: Option<Deduplication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time_span::span_option"
    )]
    pub retention: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<CallbackSettings>,
}

impl From<&SubmissionOptions> for RequestSettings {
    fn from(options: &SubmissionOptions) -> Self {
        Self {
            name: options.name.clone().filter(|name| !name.is_empty()),
            quality: options.quality,
            deduplication: options.deduplication,
            priority: options.priority,
            retention: options.retention.filter(|retention| !retention.is_zero()),
            callback: options.completion_callback.as_ref().map(|url| CallbackSettings {
                url: url.to_string(),
            }),
        }
    }
}

/// JSON body for inline entry submissions
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ValidationRequest<'a> {
    #[serde(flatten)]
    pub settings: RequestSettings,
    pub entries: &'a [ValidationRequestEntry],
}

/// JSON `settings` part for file submissions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileValidationRequest<'a> {
    #[serde(flatten)]
    pub settings: RequestSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ending: Option<LineEnding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<&'a str>,
}

impl<'a> FileValidationRequest<'a> {
    pub fn new(file_options: &'a FileSubmissionOptions, options: &SubmissionOptions) -> Self {
        Self {
            settings: RequestSettings::from(options),
            starting_row: file_options.starting_row,
            ending_row: file_options.ending_row,
            column: file_options.column,
            sheet: file_options.sheet,
            line_ending: file_options.line_ending,
            delimiter: file_options
                .delimiter
                .as_deref()
                .filter(|delimiter| !delimiter.is_empty()),
        }
    }
}
