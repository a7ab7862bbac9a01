/*
[INPUT]:  Credentials supplied by the caller (user, app key, client certificate)
[OUTPUT]: Authenticated requests and TLS-configured HTTP clients
[POS]:    Auth layer - handles Verifalia API authentication
[UPDATE]: When auth flow or credential types change
*/

pub mod app_key;
pub mod basic;
pub mod certificate;
pub mod provider;

pub use app_key::AppKeyAuth;
pub use basic::BasicAuth;
pub use certificate::CertificateAuth;
pub use provider::{AuthProvider, Authenticator};
