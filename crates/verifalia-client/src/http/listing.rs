/*
[INPUT]:  Listing options (page size, direction, cancellation)
[OUTPUT]: Lazy stream of job overviews across server-side pages
[POS]:    HTTP layer - cursor-based job listing
[UPDATE]: When adding listing filters or changing paging behavior
*/

use std::collections::VecDeque;

use futures_util::Stream;
use futures_util::stream;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::http::transport::InvocationRequest;
use crate::http::{Result, VerifaliaClient, VerifaliaError};
use crate::types::{JobOverview, ListingOptions, ListingPage};

const RESOURCE: &str = "email-validations";

/// Which page the walker asks for next
#[derive(Debug, Clone)]
enum PageRequest {
    First,
    Cursor(String),
    Finished,
}

struct Walker {
    client: VerifaliaClient,
    options: ListingOptions,
    buffer: VecDeque<JobOverview>,
    next: PageRequest,
}

impl Walker {
    fn page_request(&self) -> Option<InvocationRequest> {
        let request = InvocationRequest::new(Method::GET, RESOURCE)
            .cancellation(self.options.cancellation.clone());
        match &self.next {
            PageRequest::First => {
                let request = request.query("sort", self.options.direction.sort_value());
                Some(match self.options.limit.filter(|limit| *limit > 0) {
                    Some(limit) => request.query("limit", limit),
                    None => request,
                })
            }
            PageRequest::Cursor(cursor) => Some(request.query("cursor", cursor)),
            PageRequest::Finished => None,
        }
    }

    /// Pull the next page into the buffer and decide what follows it
    async fn advance(&mut self) -> Result<()> {
        let Some(request) = self.page_request() else {
            return Ok(());
        };
        let response = self.client.invoke(request).await?;
        let page: ListingPage<JobOverview> = match response.status {
            StatusCode::OK => response.json()?,
            status => {
                return Err(VerifaliaError::unexpected_status(
                    "listing jobs",
                    status,
                    response.text(),
                ));
            }
        };
        debug!(
            items = page.data.len(),
            truncated = page.meta.is_truncated,
            "job listing page received"
        );

        self.next = if page.meta.is_truncated {
            match page.meta.cursor {
                Some(cursor) if !cursor.is_empty() => PageRequest::Cursor(cursor),
                _ => {
                    return Err(VerifaliaError::Decoding(
                        "truncated listing page without a cursor".to_string(),
                    ));
                }
            }
        } else {
            PageRequest::Finished
        };
        self.buffer.extend(page.data);
        Ok(())
    }
}

impl VerifaliaClient {
    /// Lazily walk the submitted jobs, one page per request.
    ///
    /// A page is requested only once the previous one has been consumed; dropping the
    /// stream stops the walk. After an error the stream ends.
    ///
    /// GET /email-validations
    pub fn list_jobs(
        &self,
        options: ListingOptions,
    ) -> impl Stream<Item = Result<JobOverview>> + Send + 'static {
        let walker = Walker {
            client: self.clone(),
            options,
            buffer: VecDeque::new(),
            next: PageRequest::First,
        };

        stream::unfold(walker, |mut walker| async move {
            loop {
                if let Some(overview) = walker.buffer.pop_front() {
                    return Some((Ok(overview), walker));
                }
                if matches!(walker.next, PageRequest::Finished) {
                    return None;
                }
                if let Err(err) = walker.advance().await {
                    walker.next = PageRequest::Finished;
                    walker.buffer.clear();
                    return Some((Err(err), walker));
                }
            }
        })
    }
}
