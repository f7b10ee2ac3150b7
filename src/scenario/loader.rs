//! YAML scenario files
//!
//! Extra scenarios use the same schema as the built-in catalog:
//!
//! ```yaml
//! scenarios:
//!   - name: admin_panel_anonymous
//!     description: Anonymous users cannot open the admin API
//!     category: Access Control
//!     severity: High
//!     method: GET
//!     path: /api/admin/users
//!     expected_status: [401, 403]
//!     check:
//!       kind: must_not_contain
//!       keyword: "@example.com"
//! ```

use serde::Deserialize;
use std::path::Path;

use super::Scenario;
use crate::common::{Error, Result};

#[derive(Deserialize, Debug)]
struct ScenarioFile {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// Load scenarios from a YAML file
///
/// Relative attachment paths are resolved against the file's directory.
pub fn load_scenario_file(path: &Path) -> Result<Vec<Scenario>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    let base_dir = path.parent().unwrap_or(Path::new("."));
    parse_scenarios(&content, base_dir).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

/// Parse a scenario document, resolving attachments against `base_dir`
pub fn parse_scenarios(
    content: &str,
    base_dir: &Path,
) -> std::result::Result<Vec<Scenario>, serde_yaml::Error> {
    let file: ScenarioFile = serde_yaml::from_str(content)?;

    Ok(file
        .scenarios
        .into_iter()
        .map(|mut scenario| {
            for file in &mut scenario.files {
                if file.source_path.is_relative() {
                    file.source_path = base_dir.join(&file.source_path);
                }
            }
            scenario
        })
        .collect())
}
