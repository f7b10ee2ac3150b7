//! Scenario data types
//!
//! A scenario is pure data: the request to send plus the criteria that
//! decide pass/fail. Behavior lives in [`Check`](super::Check).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::Check;

/// Priority label used for report ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Sort rank; lower runs first
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
            Severity::Info => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP method of a scenario request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// A file sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Form field name
    pub field: String,
    /// Local path to the payload content
    #[serde(rename = "path")]
    pub source_path: PathBuf,
    /// Filename declared to the server; may itself be an attack string
    #[serde(default, rename = "filename", skip_serializing_if = "Option::is_none")]
    pub upload_name: Option<String>,
    /// MIME type declared to the server; may deliberately lie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileAttachment {
    pub fn new(field: &str, source_path: PathBuf, upload_name: &str, content_type: &str) -> Self {
        Self {
            field: field.to_string(),
            source_path,
            upload_name: Some(upload_name.to_string()),
            content_type: Some(content_type.to_string()),
        }
    }

    /// Filename sent in the multipart part, defaulting to the payload's own name
    pub fn effective_upload_name(&self) -> String {
        self.upload_name.clone().unwrap_or_else(|| {
            self.source_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

/// One declarative security check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier, used by `--only`
    pub name: String,
    pub description: String,
    /// Grouping label such as "Authentication" or "CSRF"
    pub category: String,
    pub severity: Severity,
    pub method: HttpMethod,
    /// Request path appended to the base URL
    pub path: String,
    /// Form fields
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub files: Vec<FileAttachment>,
    /// Acceptable status codes; never empty
    #[serde(rename = "expected_status")]
    pub expected_statuses: Vec<u16>,
    /// Extra assertion over the response body
    #[serde(default, skip_serializing_if = "Check::is_none")]
    pub check: Check,
}

impl Scenario {
    /// Start a scenario with no request payload and no extra check
    pub fn new(
        name: &str,
        description: &str,
        category: &str,
        severity: Severity,
        method: HttpMethod,
        path: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            severity,
            method,
            path: path.to_string(),
            data: BTreeMap::new(),
            cookies: BTreeMap::new(),
            headers: BTreeMap::new(),
            files: Vec::new(),
            expected_statuses: Vec::new(),
            check: Check::None,
        }
    }

    pub fn with_data(mut self, fields: &[(&str, &str)]) -> Self {
        self.data.extend(owned_pairs(fields));
        self
    }

    pub fn with_cookies(mut self, cookies: &[(&str, &str)]) -> Self {
        self.cookies.extend(owned_pairs(cookies));
        self
    }

    pub fn with_headers(mut self, headers: &[(&str, &str)]) -> Self {
        self.headers.extend(owned_pairs(headers));
        self
    }

    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.files.push(file);
        self
    }

    pub fn expect(mut self, statuses: &[u16]) -> Self {
        self.expected_statuses = statuses.to_vec();
        self
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.check = check;
        self
    }

    /// Expected statuses joined for display, e.g. "400,401"
    pub fn expected_display(&self) -> String {
        self.expected_statuses
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
