pub mod leaves;
pub mod select;

use revsel_core::errors::{Result, RevselError};
use revsel_core::model::ResultNode;
use revsel_core::StaticDirectory;
use serde::Deserialize;
use std::path::Path;

/// A captured pull request: directory snapshot plus evaluation result
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub directory: StaticDirectory,
    pub result: ResultNode,
}

/// Load a fixture, choosing the format from the file extension
///
/// `.yaml` and `.yml` are read as YAML, anything else as JSON.
pub fn load_fixture(path: &Path) -> Result<Fixture> {
    let text = std::fs::read_to_string(path).map_err(|e| RevselError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&text).map_err(|e| RevselError::Serialization {
            message: format!("{}: {}", path.display(), e),
        })
    } else {
        serde_json::from_str(&text).map_err(|e| RevselError::Serialization {
            message: format!("{}: {}", path.display(), e),
        })
    }
}
