/*
[INPUT]:  In-progress job snapshots or job ids, waiting options
[OUTPUT]: Terminal job snapshots once the server finishes processing
[POS]:    HTTP layer - completion poller and submit-then-wait helpers
[UPDATE]: When changing polling cadence, wait strategies or run helpers
*/

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::http::{Result, VerifaliaClient, VerifaliaError};
use crate::types::{
    FileSubmissionOptions, Job, JobOverview, RetrievalOptions, SubmissionOptions,
    ValidationRequestEntry,
};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Pauses the poller between two fetches of an in-progress job
#[async_trait]
pub trait WaitStrategy: Send + Sync {
    /// Must return `VerifaliaError::Cancelled` once `cancellation` fires.
    async fn wait_for_next_poll(
        &self,
        overview: &JobOverview,
        cancellation: &CancellationToken,
    ) -> Result<()>;
}

/// Waits a fixed interval between polls
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval(pub Duration);

impl Default for FixedInterval {
    fn default() -> Self {
        Self(DEFAULT_POLL_INTERVAL)
    }
}

#[async_trait]
impl WaitStrategy for FixedInterval {
    async fn wait_for_next_poll(
        &self,
        _overview: &JobOverview,
        cancellation: &CancellationToken,
    ) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => Err(VerifaliaError::Cancelled),
            _ = tokio::time::sleep(self.0) => Ok(()),
        }
    }
}

/// Anything able to fetch the latest snapshot of a job
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_job(&self, id: &str, options: &RetrievalOptions) -> Result<Option<Job>>;
}

#[async_trait]
impl JobSource for VerifaliaClient {
    async fn fetch_job(&self, id: &str, options: &RetrievalOptions) -> Result<Option<Job>> {
        self.get_job(id, options).await
    }
}

/// How the poller waits for a job to complete
#[derive(Clone)]
pub struct WaitingOptions {
    pub cancellation: Option<CancellationToken>,
    /// Server-side wait time sent along with each poll
    pub poll_wait_time: Option<Duration>,
    pub wait_strategy: Arc<dyn WaitStrategy>,
}

impl Default for WaitingOptions {
    fn default() -> Self {
        Self {
            cancellation: None,
            poll_wait_time: None,
            wait_strategy: Arc::new(FixedInterval::default()),
        }
    }
}

impl fmt::Debug for WaitingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitingOptions")
            .field("cancellation", &self.cancellation)
            .field("poll_wait_time", &self.poll_wait_time)
            .finish_non_exhaustive()
    }
}

/// Poll `job` until its status leaves `InProgress`
pub async fn wait_for_completion<S>(source: &S, job: Job, options: &WaitingOptions) -> Result<Job>
where
    S: JobSource + ?Sized,
{
    let cancellation = options.cancellation.clone().unwrap_or_default();
    let retrieval = RetrievalOptions {
        wait_time: options.poll_wait_time,
        cancellation: Some(cancellation.clone()),
    };

    let mut current = job;
    while !current.status().is_terminal() {
        options
            .wait_strategy
            .wait_for_next_poll(&current.overview, &cancellation)
            .await?;

        let id = current.id().to_string();
        debug!(job_id = %id, "polling validation job");
        current = source
            .fetch_job(&id, &retrieval)
            .await?
            .ok_or(VerifaliaError::JobNotFound { id })?;
    }

    debug!(job_id = %current.id(), status = ?current.status(), "validation job finished");
    Ok(current)
}

/// Fetch the job identified by `id`, then poll it until completion
pub async fn wait_for_job<S>(source: &S, id: &str, options: &WaitingOptions) -> Result<Job>
where
    S: JobSource + ?Sized,
{
    let retrieval = RetrievalOptions {
        wait_time: options.poll_wait_time,
        cancellation: options.cancellation.clone(),
    };
    let job = source
        .fetch_job(id, &retrieval)
        .await?
        .ok_or_else(|| VerifaliaError::JobNotFound { id: id.to_string() })?;
    wait_for_completion(source, job, options).await
}

impl VerifaliaClient {
    /// Poll a submitted job until it completes
    pub async fn wait_for_completion(&self, job: Job, options: &WaitingOptions) -> Result<Job> {
        wait_for_completion(self, job, options).await
    }

    /// Poll a job by id until it completes
    pub async fn wait_for_job(&self, id: &str, options: &WaitingOptions) -> Result<Job> {
        wait_for_job(self, id, options).await
    }

    /// Validate a single address and wait for the result
    pub async fn run(&self, email_address: &str) -> Result<Job> {
        let job = self.submit(email_address).await?;
        self.wait_for_completion(job, &WaitingOptions::default())
            .await
    }

    /// Submit entries and wait for the job to complete
    pub async fn run_entries(
        &self,
        entries: &[ValidationRequestEntry],
        options: &SubmissionOptions,
        waiting: &WaitingOptions,
    ) -> Result<Job> {
        let job = self.submit_entries(entries, options).await?;
        self.wait_for_completion(job, waiting).await
    }

    /// Submit an input file and wait for the job to complete
    pub async fn run_file(
        &self,
        path: impl AsRef<Path>,
        file_options: &FileSubmissionOptions,
        options: &SubmissionOptions,
        waiting: &WaitingOptions,
    ) -> Result<Job> {
        let job = self.submit_file(path, file_options, options).await?;
        self.wait_for_completion(job, waiting).await
    }
}
