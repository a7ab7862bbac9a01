/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Verifalia client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AppKeyAuth, AuthProvider, Authenticator, BasicAuth, CertificateAuth};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    EndpointFailure,
    FixedInterval,
    JobSource,
    MultiplexedTransport,
    Result,
    VerifaliaClient,
    VerifaliaError,
    WaitStrategy,
    WaitingOptions,
};

// Re-export all types
pub use types::*;

pub use tokio_util::sync::CancellationToken;
