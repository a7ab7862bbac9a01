/*
[INPUT]:  Credential material chosen at client construction
[OUTPUT]: Signed requests and HTTP client TLS configuration
[POS]:    Auth layer - capability trait and the closed set of providers
[UPDATE]: When adding new authentication methods
*/

use std::fmt;
use std::path::Path;

use reqwest::{ClientBuilder, RequestBuilder};

use super::{AppKeyAuth, BasicAuth, CertificateAuth};
use crate::http::client::{BASE_URLS, CCA_BASE_URLS};
use crate::http::Result;

/// Capability every authentication method provides to the transport
pub trait Authenticator: fmt::Debug + Send + Sync {
    /// Attach credentials to an outgoing request.
    ///
    /// Fails without touching the network when the credential material is missing.
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder>;

    /// Apply transport-level settings (TLS identity) to the HTTP client
    fn configure(&self, builder: ClientBuilder) -> Result<ClientBuilder> {
        Ok(builder)
    }

    /// Called after the service answered 401 / 403, before the error is surfaced
    fn handle_unauthorized(&self) -> Result<()> {
        Ok(())
    }
}

/// Authentication method of a client; fixed for the client's lifetime
#[derive(Debug, Clone)]
pub enum AuthProvider {
    Basic(BasicAuth),
    AppKey(AppKeyAuth),
    Certificate(CertificateAuth),
}

impl AuthProvider {
    /// Username / password of a Verifalia user
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthProvider::Basic(BasicAuth::new(username, password))
    }

    /// Browser app key
    pub fn app_key(app_key: impl Into<String>) -> Self {
        AuthProvider::AppKey(AppKeyAuth::new(app_key))
    }

    /// Mutual TLS client certificate, from a PEM bundle with the certificate chain and key
    pub fn certificate_pem(pem: &[u8]) -> Result<Self> {
        Ok(AuthProvider::Certificate(CertificateAuth::from_pem(pem)?))
    }

    /// Mutual TLS client certificate, read from a PEM file
    pub fn certificate_pem_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(AuthProvider::Certificate(CertificateAuth::from_pem_file(
            path,
        )?))
    }

    /// Base endpoints matching this authentication method
    pub fn default_base_urls(&self) -> &'static [&'static str] {
        match self {
            AuthProvider::Certificate(_) => CCA_BASE_URLS,
            AuthProvider::Basic(_) | AuthProvider::AppKey(_) => BASE_URLS,
        }
    }

    fn inner(&self) -> &dyn Authenticator {
        match self {
            AuthProvider::Basic(auth) => auth,
            AuthProvider::AppKey(auth) => auth,
            AuthProvider::Certificate(auth) => auth,
        }
    }
}

impl Authenticator for AuthProvider {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        self.inner().sign(request)
    }

    fn configure(&self, builder: ClientBuilder) -> Result<ClientBuilder> {
        self.inner().configure(builder)
    }

    fn handle_unauthorized(&self) -> Result<()> {
        self.inner().handle_unauthorized()
    }
}
