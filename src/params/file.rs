//! Parameter file reading and rendering.

use crate::constants::sections;
use crate::error::{Error, Result};
use crate::params::{Format, ParameterDocument, load_with_format};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a parameter document from a file, detecting the format from its extension.
pub fn load_file(path: &Path) -> Result<ParameterDocument> {
    load_file_as(path, Format::from_path(path)?)
}

/// Load a parameter document from a file in the given format.
pub fn load_file_as(path: &Path, format: Format) -> Result<ParameterDocument> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ParamsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("loading {} as {format}", path.display());
    load_with_format(&contents, format)
}

/// Render a document as text in the given format.
///
/// The output lists every setting with defaults filled in and loads back
/// into an equal document.
pub fn render(doc: &ParameterDocument, format: Format) -> Result<String> {
    render_value(&doc.to_value(), format)
}

/// Render a generic tree as text in the given format.
pub fn render_value(value: &Value, format: Format) -> Result<String> {
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| e.to_string()),
        Format::Toml => toml_tree(value)
            .and_then(|tree| toml::to_string_pretty(&tree).map_err(|e| e.to_string())),
    };
    rendered.map_err(|reason| Error::Render { format, reason })
}

/// TOML has no null. The loader reads an empty feature list as "all
/// features", so null selections become empty arrays. Any other null has no
/// TOML spelling and is an error.
fn toml_tree(value: &Value) -> std::result::Result<Value, String> {
    let mut tree = value.clone();
    if let Some(Value::Object(classes)) = tree.get_mut(sections::FEATURE_CLASS) {
        for selection in classes.values_mut().filter(|v| v.is_null()) {
            *selection = Value::Array(Vec::new());
        }
    }

    match first_null(&tree, "") {
        Some(path) => Err(format!("'{path}' is null, which TOML cannot represent")),
        None => Ok(tree),
    }
}

fn first_null(value: &Value, path: &str) -> Option<String> {
    match value {
        Value::Null => Some(path.to_string()),
        Value::Object(map) => map.iter().find_map(|(key, item)| {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            first_null(item, &child)
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| first_null(item, &format!("{path}[{i}]"))),
        _ => None,
    }
}
