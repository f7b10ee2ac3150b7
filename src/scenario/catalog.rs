//! Built-in scenario catalog
//!
//! Building the catalog only joins payload paths; nothing here touches the
//! network or checks that files exist. That keeps `--list` side-effect free.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{Check, FileAttachment, HttpMethod, Scenario, Severity};
use crate::common::{Error, Result};

const LOGIN: &str = "/api/auth/login";
const FARM_UPDATE: &str = "/api/farm/update";
const UPLOAD: &str = "/api/upload";

const CSRF_TOKEN: &str = "csrf-demo-token";
const ADMIN_SESSION: &str = "sess-admin-123";
const USER_SESSION: &str = "sess-user-123";

/// The three payload files consumed by upload scenarios
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSet {
    /// Arbitrary executable content
    pub malware: PathBuf,
    /// Disallowed text payload
    pub evil: PathBuf,
    /// Legitimate image used as a control
    pub image: PathBuf,
}

impl PayloadSet {
    pub fn new(dir: &Path) -> Self {
        Self {
            malware: dir.join("malware.exe"),
            evil: dir.join("evil.txt"),
            image: dir.join("image.png"),
        }
    }
}

/// Form body of a valid farm update
fn farm_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("totalChickens", "10"),
        ("healthyChickens", "9"),
        ("eggsToday", "5"),
        ("feedCost", "1000"),
        ("medicineCost", "500"),
        ("maintenanceCost", "500"),
    ]
}

fn login(
    name: &str,
    description: &str,
    severity: Severity,
    email: &str,
    password: &str,
    captcha: &str,
) -> Scenario {
    Scenario::new(name, description, "Authentication", severity, HttpMethod::Post, LOGIN)
        .with_data(&[
            ("email", email),
            ("password", password),
            ("csrf", CSRF_TOKEN),
            ("captcha", captcha),
        ])
        .with_cookies(&[("csrf", CSRF_TOKEN), ("captcha", "captcha-demo-cookie")])
}

fn upload(name: &str, description: &str, session: &str, file: FileAttachment) -> Scenario {
    Scenario::new(name, description, "File Upload", Severity::High, HttpMethod::Post, UPLOAD)
        .with_data(&[("csrf", CSRF_TOKEN)])
        .with_cookies(&[("session", session), ("csrf", CSRF_TOKEN)])
        .with_file(file)
}

/// Build the fixed catalog of security checks
pub fn builtin_catalog(payloads: &PayloadSet) -> Vec<Scenario> {
    vec![
        // Authentication
        login(
            "auth_wrong_password",
            "Login wrong password should be rejected",
            Severity::High,
            "admin@example.com",
            "wrongpass",
            "42",
        )
        .expect(&[400, 401]),
        login(
            "auth_pending_status",
            "Pending user should get PENDING_APPROVAL (403) or 400 with no approval yet",
            Severity::High,
            "pending@example.com",
            "password123",
            "42",
        )
        .expect(&[400, 403])
        .with_check(Check::status_or_contains(400, "PENDING_APPROVAL")),
        login(
            "auth_bad_captcha",
            "Captcha wrong should be 400",
            Severity::Medium,
            "admin@example.com",
            "password123",
            "jawaban_salah",
        )
        .expect(&[400]),
        login(
            "auth_sqli_style",
            "SQLi-style credential stuffing must fail",
            Severity::High,
            "admin@example.com' OR '1'='1",
            "wrongpass",
            "42",
        )
        .expect(&[400, 401]),
        // CSRF
        Scenario::new(
            "csrf_missing_token",
            "CSRF form without token should be rejected",
            "CSRF",
            Severity::High,
            HttpMethod::Post,
            FARM_UPDATE,
        )
        .with_data(&farm_fields())
        .with_cookies(&[("session", ADMIN_SESSION)])
        .expect(&[403]),
        Scenario::new(
            "csrf_expired_token",
            "Expired CSRF token should be rejected",
            "CSRF",
            Severity::High,
            HttpMethod::Post,
            FARM_UPDATE,
        )
        .with_data(&farm_fields())
        .with_data(&[("csrf", "csrf-old-123")])
        .with_cookies(&[("session", ADMIN_SESSION), ("csrf", "csrf-old-123")])
        .expect(&[403]),
        // File upload
        upload(
            "upload_malicious_exe",
            "Upload .exe should be blocked by MIME validation",
            ADMIN_SESSION,
            FileAttachment::new(
                "file",
                payloads.malware.clone(),
                "malware.exe",
                "application/x-msdownload",
            ),
        )
        .expect(&[400, 403, 415]),
        upload(
            "upload_without_role",
            "User role should not upload",
            USER_SESSION,
            FileAttachment::new("file", payloads.image.clone(), "image.png", "image/png"),
        )
        .expect(&[401, 403]),
        upload(
            "upload_path_traversal_name",
            "Filename ../evil.sh must be stored safely",
            ADMIN_SESSION,
            FileAttachment::new("file", payloads.evil.clone(), "../evil.sh", "text/plain"),
        )
        .expect(&[200, 201, 202, 403])
        .with_check(Check::must_not_contain("../")),
        upload(
            "upload_mime_spoof",
            "MIME spoofed exe as png should be blocked",
            ADMIN_SESSION,
            FileAttachment::new("file", payloads.malware.clone(), "fake.png", "image/png"),
        )
        .expect(&[400, 403, 415]),
        // Access control
        Scenario::new(
            "access_idor_download",
            "Staff B cannot access staff A file",
            "Access Control",
            Severity::High,
            HttpMethod::Get,
            "/api/download/demo-file-1",
        )
        .with_cookies(&[("session", "sess-staffB-123")])
        .expect(&[401, 403]),
        Scenario::new(
            "access_user_escalation",
            "User role cannot post farm update",
            "Access Control",
            Severity::High,
            HttpMethod::Post,
            FARM_UPDATE,
        )
        .with_data(&farm_fields())
        .with_data(&[("csrf", CSRF_TOKEN)])
        .with_cookies(&[("session", USER_SESSION), ("csrf", CSRF_TOKEN)])
        .expect(&[302, 401, 403]),
        // Input validation
        Scenario::new(
            "input_numeric_injection",
            "Numeric field injection should be rejected",
            "Input Validation",
            Severity::Medium,
            HttpMethod::Post,
            FARM_UPDATE,
        )
        .with_data(&farm_fields())
        .with_data(&[("totalChickens", "abc"), ("csrf", CSRF_TOKEN)])
        .with_cookies(&[("session", ADMIN_SESSION), ("csrf", CSRF_TOKEN)])
        .expect(&[400, 403, 422]),
        Scenario::new(
            "xss_notes_sanitization",
            "Notes field should sanitize script tags",
            "Input Validation",
            Severity::High,
            HttpMethod::Post,
            FARM_UPDATE,
        )
        .with_data(&farm_fields())
        .with_data(&[("notes", "<script>alert('xss')</script>"), ("csrf", CSRF_TOKEN)])
        .with_cookies(&[("session", ADMIN_SESSION), ("csrf", CSRF_TOKEN)])
        .expect(&[400, 403, 422, 302])
        .with_check(Check::NoScriptTag),
    ]
}

/// Enforce catalog invariants: unique names, non-empty expectations
pub fn validate_catalog(scenarios: &[Scenario]) -> Result<()> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if scenario.name.trim().is_empty() {
            return Err(Error::invalid_scenario(&scenario.name, "name must not be empty"));
        }
        if !seen.insert(scenario.name.as_str()) {
            return Err(Error::DuplicateScenario(scenario.name.clone()));
        }
        if scenario.expected_statuses.is_empty() {
            return Err(Error::invalid_scenario(
                &scenario.name,
                "expected_status must list at least one status code",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Scenario> {
        builtin_catalog(&PayloadSet::new(Path::new("/payloads")))
    }

    fn find<'a>(scenarios: &'a [Scenario], name: &str) -> &'a Scenario {
        scenarios
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("scenario {name} missing"))
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let scenarios = catalog();
        assert_eq!(scenarios.len(), 14);
        validate_catalog(&scenarios).unwrap();
    }

    #[test]
    fn test_catalog_build_does_not_require_payloads() {
        // Paths under a directory that does not exist are fine until request time
        let payloads = PayloadSet::new(Path::new("/definitely/not/here"));
        let scenarios = builtin_catalog(&payloads);
        let upload = find(&scenarios, "upload_malicious_exe");
        assert_eq!(upload.files[0].source_path, payloads.malware);
    }

    #[test]
    fn test_wrong_password_scenario() {
        let scenarios = catalog();
        let s = find(&scenarios, "auth_wrong_password");
        assert_eq!(s.data["email"], "admin@example.com");
        assert_eq!(s.data["password"], "wrongpass");
        assert_eq!(s.expected_statuses, vec![400, 401]);
        assert!(s.check.is_none());
    }

    #[test]
    fn test_csrf_missing_token_has_no_token() {
        let scenarios = catalog();
        let s = find(&scenarios, "csrf_missing_token");
        assert!(!s.data.contains_key("csrf"));
        assert!(!s.cookies.contains_key("csrf"));
        assert_eq!(s.expected_statuses, vec![403]);
    }

    #[test]
    fn test_path_traversal_upload() {
        let scenarios = catalog();
        let s = find(&scenarios, "upload_path_traversal_name");
        assert_eq!(s.files[0].upload_name.as_deref(), Some("../evil.sh"));
        assert_eq!(s.expected_statuses, vec![200, 201, 202, 403]);
        assert_eq!(s.check, Check::must_not_contain("../"));
    }

    #[test]
    fn test_numeric_injection_overrides_field() {
        let scenarios = catalog();
        let s = find(&scenarios, "input_numeric_injection");
        assert_eq!(s.data["totalChickens"], "abc");
        assert_eq!(s.data["healthyChickens"], "9");
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut scenarios = catalog();
        scenarios.push(scenarios[0].clone());
        let err = validate_catalog(&scenarios).unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(name) if name == "auth_wrong_password"));
    }

    #[test]
    fn test_validate_rejects_empty_expectations() {
        let scenarios = vec![Scenario::new("x", "d", "c", Severity::Low, HttpMethod::Get, "/")];
        let err = validate_catalog(&scenarios).unwrap_err();
        assert!(matches!(err, Error::InvalidScenario { .. }));
    }
}
