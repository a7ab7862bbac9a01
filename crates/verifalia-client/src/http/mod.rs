/*
[INPUT]:  HTTP client configuration, auth provider and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod credit;
pub mod error;
pub mod listing;
pub mod retrieval;
pub mod submission;
pub mod transport;
pub mod waiting;

pub use error::{EndpointFailure, Result, VerifaliaError};
pub use transport::{InvocationRequest, InvocationResponse, MultiplexedTransport, RequestBody};
pub use waiting::{
    FixedInterval, JobSource, WaitStrategy, WaitingOptions, wait_for_completion, wait_for_job,
};

pub use client::{BASE_URLS, CCA_BASE_URLS, ClientConfig, VerifaliaClient};
