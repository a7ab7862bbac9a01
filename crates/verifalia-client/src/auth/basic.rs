/*
[INPUT]:  Username and password of a Verifalia user
[OUTPUT]: HTTP basic Authorization header on each request
[POS]:    Auth layer - basic credential provider
[UPDATE]: When changing credential validation or header format
*/

use std::fmt;

use reqwest::RequestBuilder;

use super::Authenticator;
use crate::http::{Result, VerifaliaError};

/// HTTP basic authentication with a username / password pair
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Authenticator for BasicAuth {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.username.is_empty() {
            return Err(VerifaliaError::config(
                "empty username, please specify a valid value before authenticating",
            ));
        }
        Ok(request.basic_auth(&self.username, Some(&self.password)))
    }
}
