//! Parameter document loading from text.

use crate::error::{Error, Result};
use crate::params::ParameterDocument;
use crate::params::tree::RawTree;
use crate::params::validate::validate_document;
use serde_json::Value;
use std::path::Path;
use tracing::trace;

/// Outer syntax of a parameter document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// YAML (also accepts JSON, which is a subset).
    #[default]
    Yaml,
    /// JSON.
    Json,
    /// TOML. Has no null, so an empty array selects all features of a class.
    Toml,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        ext.parse().map_err(|_| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }

    /// Parse text into a generic tree.
    ///
    /// Repeated keys fail with `Schema` and non-finite reals with `Type`,
    /// both at their key path.
    fn parse(self, source: &str) -> Result<Value> {
        if source.trim().is_empty() {
            return Ok(Value::Null);
        }

        let parsed: std::result::Result<RawTree, String> = match self {
            Self::Yaml => serde_yaml::from_str(source).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(source).map_err(|e| e.to_string()),
        };
        parsed
            .map_err(|reason| Error::Parse {
                format: self,
                reason,
            })?
            .into_value()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            other => Err(format!("unknown document format: {other}")),
        }
    }
}

/// Load a YAML (or JSON) parameter document.
pub fn load(source: &str) -> Result<ParameterDocument> {
    load_with_format(source, Format::Yaml)
}

/// Load a parameter document written in the given syntax.
///
/// Pure function of its input: no I/O and no state between calls.
pub fn load_with_format(source: &str, format: Format) -> Result<ParameterDocument> {
    trace!("parsing {} byte(s) as {format}", source.len());
    let tree = format.parse(source)?;
    validate_document(&tree)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::params::{FeatureClass, FeatureSelection, ImageType};

    const MINIMAL_YAML: &str = "imageType:\n  Original: {}\nfeatureClass:\n  glcm:\n";

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.yaml")).ok(), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.YML")).ok(), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.json")).ok(), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.toml")).ok(), Some(Format::Toml));
        assert!(matches!(
            Format::from_path(Path::new("params.ini")),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!(Format::from_path(Path::new("params")).is_err());
    }

    #[test]
    fn test_load_minimal_yaml() {
        let doc = load(MINIMAL_YAML).unwrap();
        assert_eq!(doc.settings().bin_width, 25.0);
        assert!(doc.image_types().contains_key(&ImageType::Original));
        assert_eq!(
            doc.selection(FeatureClass::Glcm),
            Some(&FeatureSelection::All)
        );
    }

    #[test]
    fn test_load_json_through_yaml() {
        let doc = load(r#"{"imageType": {"Original": {}}, "featureClass": {"glcm": null}}"#);
        assert_eq!(doc.ok(), load(MINIMAL_YAML).ok());
    }

    #[test]
    fn test_load_toml_empty_array_selects_all() {
        let source = "[setting]\nbinWidth = 5\n\n[imageType.Original]\n\n[featureClass]\nglcm = []\n";
        let doc = load_with_format(source, Format::Toml).unwrap();
        assert_eq!(doc.settings().bin_width, 5.0);
        assert_eq!(
            doc.selection(FeatureClass::Glcm),
            Some(&FeatureSelection::All)
        );
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let err = load("setting: [unclosed").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: Format::Yaml,
                ..
            }
        ));
    }

    #[test]
    fn test_load_empty_text_reports_missing_section() {
        let err = load("").unwrap_err();
        assert!(matches!(err, Error::EmptyCollection { ref path } if path == "imageType"));
    }

    #[test]
    fn test_load_duplicate_setting_fails_in_yaml_and_json() {
        let yaml = "setting: {binWidth: -1, binWidth: 5}\nimageType: {Original: {}}\nfeatureClass: {glcm: null}\n";
        let err = load(yaml).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "setting.binWidth"));

        let json = r#"{"setting": {"binWidth": -1, "binWidth": 5}, "imageType": {"Original": {}}, "featureClass": {"glcm": null}}"#;
        let err = load_with_format(json, Format::Json).unwrap_err();
        assert!(matches!(err, Error::Schema { ref path, .. } if path == "setting.binWidth"));
    }

    #[test]
    fn test_load_non_finite_values_fail() {
        let err = load("imageType: {Original: {}}\nfeatureClass: {glcm: .nan}\n").unwrap_err();
        assert!(matches!(err, Error::Type { ref path, .. } if path == "featureClass.glcm"));

        let err = load("imageType: {Original: .nan}\nfeatureClass: {glcm: null}\n").unwrap_err();
        assert!(matches!(err, Error::Type { ref path, .. } if path == "imageType.Original"));

        let err = load("setting: .inf\nimageType: {Original: {}}\nfeatureClass: {glcm: null}\n")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Type { ref path, ref value, .. } if path == "setting" && value == "inf"
        ));
    }

    #[test]
    fn test_load_toml_non_finite_fails() {
        let source = "[setting]\nbinWidth = nan\n\n[imageType.Original]\n\n[featureClass]\nglcm = []\n";
        let err = load_with_format(source, Format::Toml).unwrap_err();
        assert_eq!(err.key_path(), Some("setting.binWidth"));
    }

    #[test]
    fn test_load_scalar_root() {
        let err = load("42").unwrap_err();
        assert!(matches!(err, Error::Type { .. }));
    }
}
