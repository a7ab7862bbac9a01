/*
[INPUT]:  Addresses, entries or input files plus submission settings
[OUTPUT]: Job snapshots of newly submitted validation jobs
[POS]:    HTTP layer - job submission endpoints
[UPDATE]: When adding submission settings or input formats
*/

use std::path::Path;

use reqwest::{Method, StatusCode};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::http::transport::{InvocationRequest, RequestBody};
use crate::http::{Result, VerifaliaClient, VerifaliaError};
use crate::types::requests::{FileValidationRequest, ValidationRequest};
use crate::types::responses::PartialJob;
use crate::types::{
    ContentType, FileSubmissionOptions, Job, SubmissionOptions, ValidationRequestEntry,
};

const RESOURCE: &str = "email-validations";

impl VerifaliaClient {
    /// Submit a single address with default settings
    ///
    /// POST /email-validations
    pub async fn submit(&self, email_address: &str) -> Result<Job> {
        self.submit_entries(
            &[ValidationRequestEntry::new(email_address)],
            &SubmissionOptions::default(),
        )
        .await
    }

    /// Submit several addresses with default settings
    ///
    /// POST /email-validations
    pub async fn submit_many<I, S>(&self, email_addresses: I) -> Result<Job>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<ValidationRequestEntry> = email_addresses
            .into_iter()
            .map(ValidationRequestEntry::new)
            .collect();
        self.submit_entries(&entries, &SubmissionOptions::default())
            .await
    }

    /// Submit entries with explicit settings; does not wait for the job to complete
    ///
    /// POST /email-validations
    pub async fn submit_entries(
        &self,
        entries: &[ValidationRequestEntry],
        options: &SubmissionOptions,
    ) -> Result<Job> {
        let body = ValidationRequest {
            settings: options.into(),
            entries,
        };
        let request = submission_request(options).json_body(&body)?;
        debug!(entries = entries.len(), "submitting validation job");
        self.submit_invocation(request).await
    }

    /// Submit an input file; the content type is inferred from the extension unless
    /// set in `file_options`
    ///
    /// POST /email-validations (multipart/form-data)
    pub async fn submit_file(
        &self,
        path: impl AsRef<Path>,
        file_options: &FileSubmissionOptions,
        options: &SubmissionOptions,
    ) -> Result<Job> {
        let path = path.as_ref();
        let content_type = match file_options.content_type {
            Some(content_type) => content_type,
            None => ContentType::from_path(path).ok_or_else(|| {
                VerifaliaError::UnresolvedContentType {
                    file_name: path.display().to_string(),
                }
            })?,
        };
        let file = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.submit_file_bytes(file, file_name, content_type, file_options, options)
            .await
    }

    /// Submit input read from an async reader; defaults to `text/plain` unless set in
    /// `file_options`
    ///
    /// POST /email-validations (multipart/form-data)
    pub async fn submit_file_reader<R>(
        &self,
        mut reader: R,
        file_options: &FileSubmissionOptions,
        options: &SubmissionOptions,
    ) -> Result<Job>
    where
        R: AsyncRead + Unpin + Send,
    {
        let content_type = file_options.content_type.unwrap_or(ContentType::TextPlain);
        let mut file = Vec::new();
        reader.read_to_end(&mut file).await?;
        self.submit_file_bytes(file, None, content_type, file_options, options)
            .await
    }

    async fn submit_file_bytes(
        &self,
        file: Vec<u8>,
        file_name: Option<String>,
        content_type: ContentType,
        file_options: &FileSubmissionOptions,
        options: &SubmissionOptions,
    ) -> Result<Job> {
        let settings = serde_json::to_vec(&FileValidationRequest::new(file_options, options))?;
        debug!(
            bytes = file.len(),
            content_type = content_type.as_mime(),
            "submitting validation file"
        );
        let request = submission_request(options).body(RequestBody::Multipart {
            file,
            file_name,
            content_type,
            settings,
        });
        self.submit_invocation(request).await
    }

    async fn submit_invocation(&self, request: InvocationRequest) -> Result<Job> {
        let response = self.invoke(request).await?;
        match response.status {
            StatusCode::OK | StatusCode::ACCEPTED => {
                let job: Job = response.json::<PartialJob>()?.into();
                debug!(job_id = %job.id(), status = ?job.status(), "validation job submitted");
                Ok(job)
            }
            status => Err(VerifaliaError::unexpected_status(
                "submitting a job",
                status,
                response.text(),
            )),
        }
    }
}

fn submission_request(options: &SubmissionOptions) -> InvocationRequest {
    let mut request = InvocationRequest::new(Method::POST, RESOURCE)
        .cancellation(options.cancellation.clone());
    if let Some(wait_time) = options.submission_wait_time {
        request = request.query("waitTime", wait_time.as_secs());
    }
    request
}
