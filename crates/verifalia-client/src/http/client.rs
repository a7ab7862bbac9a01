/*
[INPUT]:  HTTP configuration (base URLs, timeouts, user agent) and auth provider
[OUTPUT]: Configured Verifalia client sharing one multiplexed transport
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::AuthProvider;
use crate::http::Result;
use crate::http::transport::{InvocationRequest, InvocationResponse, MultiplexedTransport};

/// Base URLs for username/password and app key authentication
pub const BASE_URLS: &[&str] = &[
    "https://api-1.verifalia.com/v2.5",
    "https://api-2.verifalia.com/v2.5",
    "https://api-3.verifalia.com/v2.5",
];

/// Base URLs for client certificate authentication
pub const CCA_BASE_URLS: &[&str] = &[
    "https://api-cca-1.verifalia.com/v2.5",
    "https://api-cca-2.verifalia.com/v2.5",
    "https://api-cca-3.verifalia.com/v2.5",
];

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("verifalia-rest-client/rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Main HTTP client for the Verifalia API
///
/// Cloning is cheap: clones share the transport, its connection pool and its
/// endpoint rotation.
#[derive(Debug, Clone)]
pub struct VerifaliaClient {
    transport: Arc<MultiplexedTransport>,
}

impl VerifaliaClient {
    /// Create a new client with default configuration
    pub fn new(auth: AuthProvider) -> Result<Self> {
        Self::with_config(auth, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(auth: AuthProvider, config: ClientConfig) -> Result<Self> {
        let base_urls = auth.default_base_urls();
        Self::with_config_and_base_urls(auth, config, base_urls)
    }

    /// Create a new client with custom configuration and base URLs
    pub fn with_config_and_base_urls(
        auth: AuthProvider,
        config: ClientConfig,
        base_urls: &[&str],
    ) -> Result<Self> {
        let transport = MultiplexedTransport::new(auth, &config, base_urls)?;
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    pub fn base_urls(&self) -> &[Url] {
        self.transport.base_urls()
    }

    pub fn transport(&self) -> &MultiplexedTransport {
        &self.transport
    }

    pub(crate) async fn invoke(&self, request: InvocationRequest) -> Result<InvocationResponse> {
        self.transport.invoke(&request).await
    }
}
