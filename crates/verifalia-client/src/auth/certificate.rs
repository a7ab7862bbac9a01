/*
[INPUT]:  PEM bundle with client certificate chain and private key
[OUTPUT]: HTTP client configured for mutual TLS
[POS]:    Auth layer - client certificate provider
[UPDATE]: When changing certificate loading or TLS backend
*/

use std::fmt;
use std::path::Path;

use reqwest::{ClientBuilder, Identity, RequestBuilder};

use super::Authenticator;
use crate::http::{Result, VerifaliaError};

/// Mutual TLS authentication; the identity is presented during the handshake
#[derive(Clone)]
pub struct CertificateAuth {
    identity: Identity,
}

impl CertificateAuth {
    pub fn from_pem(pem: &[u8]) -> Result<Self> {
        let identity = Identity::from_pem(pem).map_err(|err| {
            VerifaliaError::config(format!("invalid client certificate: {err}"))
        })?;
        Ok(Self { identity })
    }

    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|err| {
            VerifaliaError::config(format!(
                "cannot read client certificate {}: {err}",
                path.display()
            ))
        })?;
        Self::from_pem(&pem)
    }
}

impl fmt::Debug for CertificateAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateAuth").finish_non_exhaustive()
    }
}

impl Authenticator for CertificateAuth {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request)
    }

    fn configure(&self, builder: ClientBuilder) -> Result<ClientBuilder> {
        Ok(builder.use_rustls_tls().identity(self.identity.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage_pem() {
        let err = CertificateAuth::from_pem(b"-----BEGIN NOTHING-----").unwrap_err();
        assert!(err.to_string().contains("invalid client certificate"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CertificateAuth::from_pem_file("/nonexistent/client.pem").unwrap_err();
        assert!(matches!(err, VerifaliaError::Config(_)));
    }
}
