/*
[INPUT]:  Browser app key
[OUTPUT]: HTTP basic Authorization header carrying the key as username
[POS]:    Auth layer - app key provider
[UPDATE]: When changing credential validation or header format
*/

use std::fmt;

use reqwest::RequestBuilder;

use super::Authenticator;
use crate::http::{Result, VerifaliaError};

/// Browser app key, sent as the basic-auth username with an empty password
#[derive(Clone)]
pub struct AppKeyAuth {
    app_key: String,
}

impl AppKeyAuth {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
        }
    }
}

impl fmt::Debug for AppKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppKeyAuth")
            .field("app_key", &"<redacted>")
            .finish()
    }
}

impl Authenticator for AppKeyAuth {
    fn sign(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.app_key.is_empty() {
            return Err(VerifaliaError::config(
                "empty appKey, please specify a valid value before authenticating",
            ));
        }
        Ok(request.basic_auth(&self.app_key, Some("")))
    }
}
