/*
[INPUT]:  Job identifiers and retrieval options
[OUTPUT]: Job snapshots, overviews and deletion outcomes
[POS]:    HTTP layer - job retrieval and deletion endpoints
[UPDATE]: When adding retrieval filters or changing absence semantics
*/

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::http::transport::InvocationRequest;
use crate::http::{Result, VerifaliaClient, VerifaliaError};
use crate::types::responses::PartialJob;
use crate::types::{Job, JobOverview, RetrievalOptions};

impl VerifaliaClient {
    /// Fetch a job with its entries; `None` when the job does not exist (anymore)
    ///
    /// GET /email-validations/{id}
    pub async fn get_job(&self, id: &str, options: &RetrievalOptions) -> Result<Option<Job>> {
        let request = retrieval_request(format!("email-validations/{id}"), options);
        let response = self.invoke(request).await?;
        match response.status {
            StatusCode::OK | StatusCode::ACCEPTED => {
                Ok(Some(response.json::<PartialJob>()?.into()))
            }
            StatusCode::NOT_FOUND | StatusCode::GONE => {
                debug!(job_id = id, "validation job not found");
                Ok(None)
            }
            status => Err(VerifaliaError::unexpected_status(
                "retrieving a job",
                status,
                response.text(),
            )),
        }
    }

    /// Fetch only the overview of a job; `None` when the job does not exist (anymore)
    ///
    /// GET /email-validations/{id}/overview
    pub async fn get_job_overview(
        &self,
        id: &str,
        options: &RetrievalOptions,
    ) -> Result<Option<JobOverview>> {
        let request = retrieval_request(format!("email-validations/{id}/overview"), options);
        let response = self.invoke(request).await?;
        match response.status {
            StatusCode::OK | StatusCode::ACCEPTED => Ok(Some(response.json()?)),
            StatusCode::NOT_FOUND | StatusCode::GONE => Ok(None),
            status => Err(VerifaliaError::unexpected_status(
                "retrieving a job overview",
                status,
                response.text(),
            )),
        }
    }

    /// Delete a job; deleting an already removed job succeeds
    ///
    /// DELETE /email-validations/{id}
    pub async fn delete_job(
        &self,
        id: &str,
        cancellation: Option<CancellationToken>,
    ) -> Result<()> {
        let request = InvocationRequest::new(Method::DELETE, format!("email-validations/{id}"))
            .cancellation(cancellation);
        let response = self.invoke(request).await?;
        match response.status {
            StatusCode::OK | StatusCode::GONE => {
                debug!(job_id = id, "validation job deleted");
                Ok(())
            }
            status => Err(VerifaliaError::unexpected_status(
                "deleting a job",
                status,
                response.text(),
            )),
        }
    }
}

fn retrieval_request(resource: String, options: &RetrievalOptions) -> InvocationRequest {
    let mut request =
        InvocationRequest::new(Method::GET, resource).cancellation(options.cancellation.clone());
    if let Some(wait_time) = options.wait_time {
        request = request.query("waitTime", wait_time.as_secs());
    }
    request
}
