/*
[INPUT]:  Invocation requests (method, resource, query, buffered body, headers)
[OUTPUT]: Raw HTTP responses or aggregate endpoint failures
[POS]:    HTTP layer - multiplexed invoker with endpoint rotation and failover
[UPDATE]: When changing failover policy, default headers or body encoding
*/

use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{AuthProvider, Authenticator};
use crate::http::client::ClientConfig;
use crate::http::error::{EndpointFailure, Result, VerifaliaError};
use crate::types::content_type::APPLICATION_JSON;
use crate::types::ContentType;

/// Request body, fully buffered so every failover attempt can resend it
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Vec<u8>),
    /// `inputFile` + `settings` parts of a file submission
    Multipart {
        file: Vec<u8>,
        file_name: Option<String>,
        content_type: ContentType,
        settings: Vec<u8>,
    },
}

impl RequestBody {
    fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart { .. })
    }
}

/// A single logical call, replayed against each endpoint until one answers
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub method: Method,
    /// Path relative to the base endpoint, e.g. `email-validations/{id}`
    pub resource: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Applied after the default headers; the caller's value wins
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub cancellation: Option<CancellationToken>,
}

impl InvocationRequest {
    pub fn new(method: Method, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            cancellation: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn cancellation(mut self, token: Option<CancellationToken>) -> Self {
        self.cancellation = token;
        self
    }
}

/// Status and buffered body of the endpoint that answered
#[derive(Debug, Clone)]
pub struct InvocationResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl InvocationResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Rotates calls across an ordered set of base endpoints and fails over on
/// connectivity errors
#[derive(Debug)]
pub struct MultiplexedTransport {
    http_client: Client,
    auth: AuthProvider,
    base_urls: Vec<Url>,
    cursor: AtomicUsize,
    user_agent: HeaderValue,
}

impl MultiplexedTransport {
    pub fn new(auth: AuthProvider, config: &ClientConfig, base_urls: &[&str]) -> Result<Self> {
        if base_urls.is_empty() {
            return Err(VerifaliaError::config("at least one base URL is required"));
        }
        let base_urls = base_urls
            .iter()
            .map(|url| Url::parse(url))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);
        let http_client = auth.configure(builder)?.build()?;

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|err| VerifaliaError::config(format!("invalid user agent: {err}")))?;

        Ok(Self {
            http_client,
            auth,
            base_urls,
            cursor: AtomicUsize::new(0),
            user_agent,
        })
    }

    pub fn base_urls(&self) -> &[Url] {
        &self.base_urls
    }

    pub fn auth(&self) -> &AuthProvider {
        &self.auth
    }

    fn next_base_url(&self) -> &Url {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.base_urls.len();
        &self.base_urls[index]
    }

    /// Send the request to the next endpoints in rotation until one of them answers.
    ///
    /// Statuses other than 401 / 403 are returned as-is for the caller to interpret.
    /// A credential that cannot sign the request fails with `Config` straight away instead
    /// of being recorded as an endpoint failure, since no other endpoint would accept it.
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResponse> {
        let cancellation = request.cancellation.clone().unwrap_or_default();
        let mut failures = Vec::with_capacity(self.base_urls.len());

        for attempt in 1..=self.base_urls.len() {
            if cancellation.is_cancelled() {
                return Err(VerifaliaError::Cancelled);
            }

            let base_url = self.next_base_url();
            let url = match build_url(base_url, &request.resource, &request.query) {
                Ok(url) => url,
                Err(message) => {
                    warn!(base_url = %base_url, "cannot build request URL: {message}");
                    failures.push(EndpointFailure {
                        url: base_url.to_string(),
                        message,
                    });
                    continue;
                }
            };

            let builder = self
                .http_client
                .request(request.method.clone(), url.clone())
                .headers(self.headers(request));
            let builder = attach_body(builder, &request.body)?;
            let builder = self.auth.sign(builder)?;

            debug!(
                method = %request.method,
                url = %url,
                attempt,
                "dispatching request"
            );

            let outcome = tokio::select! {
                biased;
                _ = cancellation.cancelled() => return Err(VerifaliaError::Cancelled),
                outcome = dispatch(builder) => outcome,
            };

            match outcome {
                Ok(response)
                    if matches!(
                        response.status,
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
                    ) =>
                {
                    warn!(
                        url = %url,
                        status = response.status.as_u16(),
                        "credentials rejected"
                    );
                    self.auth.handle_unauthorized()?;
                    return Err(VerifaliaError::Authentication {
                        status: response.status.as_u16(),
                    });
                }
                Ok(response) => {
                    debug!(url = %url, status = response.status.as_u16(), "response received");
                    return Ok(response);
                }
                Err(err) => {
                    warn!(base_url = %base_url, attempt, "endpoint failed: {err}");
                    failures.push(EndpointFailure {
                        url: base_url.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        Err(VerifaliaError::AllEndpointsFailed { failures })
    }

    fn headers(&self, request: &InvocationRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        if !request.body.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }
        for (name, value) in &request.headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }
}

fn build_url(
    base_url: &Url,
    resource: &str,
    query: &[(String, String)],
) -> std::result::Result<Url, String> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| format!("{base_url} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(resource.split('/').filter(|segment| !segment.is_empty()));
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

fn attach_body(builder: RequestBuilder, body: &RequestBody) -> Result<RequestBuilder> {
    match body {
        RequestBody::Empty => Ok(builder),
        RequestBody::Json(bytes) => Ok(builder.body(bytes.clone())),
        RequestBody::Multipart {
            file,
            file_name,
            content_type,
            settings,
        } => {
            let file_part = Part::bytes(file.clone())
                .file_name(file_name.clone().unwrap_or_else(|| "input".to_string()))
                .mime_str(content_type.as_mime())?;
            let settings_part = Part::bytes(settings.clone()).mime_str(APPLICATION_JSON)?;
            let form = Form::new()
                .part("inputFile", file_part)
                .part("settings", settings_part);
            Ok(builder.multipart(form))
        }
    }
}

async fn dispatch(builder: RequestBuilder) -> reqwest::Result<InvocationResponse> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    Ok(InvocationResponse {
        status,
        body: body.to_vec(),
    })
}
