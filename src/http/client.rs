//! HTTP request executor
//!
//! One `reqwest::Client` is built per run and shared by every scenario.
//! Session defaults (headers and cookies from the config document) are
//! fixed at construction; scenario values are layered on per request and
//! never written back. Redirects are not followed: a 3xx is an outcome.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{redirect::Policy, Client};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::common::config::RunConfig;
use crate::common::{Error, Result};
use crate::http::HttpResponse;
use crate::scenario::Scenario;

/// Sends the request described by a scenario
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one request for `scenario`
    ///
    /// Errors for which [`Error::is_transport`] holds mean no response was
    /// obtained; the caller records a failure and moves on.
    async fn send(&self, scenario: &Scenario) -> Result<HttpResponse>;
}

pub struct HttpClient {
    client: Client,
    base_url: String,
    default_headers: BTreeMap<String, String>,
    default_cookies: BTreeMap<String, String>,
    timeout_secs: u64,
}

impl HttpClient {
    pub fn new(base_url: &str, config: &RunConfig, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::from_reqwest(e, timeout_secs))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: config.headers.clone(),
            default_cookies: config.cookies.clone(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a scenario path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Session headers overlaid with scenario headers; scenario wins on collision
    pub fn merged_headers(&self, scenario: &Scenario) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.default_headers.iter().chain(scenario.headers.iter()) {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let cookies = self.merged_cookies(scenario);
        if !cookies.is_empty() {
            let (name, value) = parse_header(COOKIE.as_str(), &cookie_header(&cookies))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Session cookies overlaid with scenario cookies; scenario wins on collision
    pub fn merged_cookies(&self, scenario: &Scenario) -> BTreeMap<String, String> {
        let mut cookies = self.default_cookies.clone();
        cookies.extend(scenario.cookies.clone());
        cookies
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, scenario: &Scenario) -> Result<HttpResponse> {
        let url = self.url_for(&scenario.path);
        let headers = self.merged_headers(scenario)?;

        let mut request = self
            .client
            .request(scenario.method.into(), &url)
            .headers(headers);

        if !scenario.files.is_empty() {
            request = request.multipart(multipart_form(scenario).await?);
        } else if !scenario.data.is_empty() {
            request = request.form(&scenario.data);
        }

        tracing::debug!(
            scenario = %scenario.name,
            method = %scenario.method,
            %url,
            "sending request"
        );

        let response = request
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;
        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from_reqwest(e, self.timeout_secs))?;

        tracing::debug!(
            scenario = %scenario.name,
            status,
            body_len = body.len(),
            "received response"
        );

        Ok(HttpResponse::new(status, String::from_utf8_lossy(&body)))
    }
}

/// Build the multipart body: form fields first, then one part per attachment
///
/// Payload files are read here, per request. Upload names are sent verbatim
/// since some scenarios depend on the server seeing `../` in the filename.
async fn multipart_form(scenario: &Scenario) -> Result<Form> {
    let mut form = Form::new().percent_encode_noop();

    for (name, value) in &scenario.data {
        form = form.text(name.clone(), value.clone());
    }

    for file in &scenario.files {
        let bytes = tokio::fs::read(&file.source_path)
            .await
            .map_err(|e| Error::payload(&file.source_path, &e))?;

        let mut part = Part::bytes(bytes).file_name(file.effective_upload_name());
        if let Some(content_type) = &file.content_type {
            part = part.mime_str(content_type).map_err(|e| Error::InvalidHeader {
                name: "Content-Type".to_string(),
                reason: e.to_string(),
            })?;
        }
        form = form.part(file.field.clone(), part);
    }

    Ok(form)
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((header_name, header_value))
}

/// Fold cookies into a single `Cookie` header value
fn cookie_header(cookies: &BTreeMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}
