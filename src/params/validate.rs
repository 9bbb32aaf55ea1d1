//! Schema validation of a parsed document tree.

use crate::constants::{limits, sections, settings as keys};
use crate::error::{Error, Result};
use crate::params::tree::ROOT_PATH;
use crate::params::types::{
    ExtractionSettings, FeatureClass, FeatureClassSpec, FeatureSelection, ImageType,
    ImageTypeOptions, ImageTypeSpec, ParameterDocument,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Validate a generic document tree and build the typed document.
///
/// Sections are checked in the order `setting`, `imageType`, `featureClass`
/// and keys within a section in sorted order. The first violation is returned.
pub fn validate_document(root: &Value) -> Result<ParameterDocument> {
    let empty = Map::new();
    let root = match root {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => return Err(type_error(ROOT_PATH, "mapping", other)),
    };

    for (key, value) in root {
        if !sections::ALL.contains(&key.as_str()) {
            return Err(schema_error(key.clone(), value));
        }
    }

    let settings = validate_settings(root.get(sections::SETTING))?;
    let image_types = validate_image_types(root.get(sections::IMAGE_TYPE))?;
    let feature_classes = validate_feature_classes(root.get(sections::FEATURE_CLASS))?;

    Ok(ParameterDocument::new(settings, image_types, feature_classes))
}

/// Validate the `setting` section, applying defaults for absent keys.
pub fn validate_settings(section: Option<&Value>) -> Result<ExtractionSettings> {
    let mut settings = ExtractionSettings::default();

    let map = match section {
        None | Some(Value::Null) => {
            debug!("no setting section, using defaults");
            return Ok(settings);
        }
        Some(Value::Object(map)) => map,
        Some(other) => return Err(type_error(sections::SETTING, "mapping", other)),
    };

    trace!("validating {} setting(s)", map.len());

    for (key, value) in map {
        let path = format!("{}.{key}", sections::SETTING);
        apply_setting(&mut settings, key, &path, value)?;
    }

    let defaulted = defaulted_keys(map);
    if !defaulted.is_empty() {
        debug!(
            "{} setting(s) not set, using defaults: {}",
            defaulted.len(),
            defaulted.join(", ")
        );
    }

    Ok(settings)
}

/// Recognized setting keys absent from the section.
fn defaulted_keys(map: &Map<String, Value>) -> Vec<&'static str> {
    keys::ALL
        .iter()
        .copied()
        .filter(|key| !map.contains_key(*key))
        .collect()
}

fn apply_setting(
    settings: &mut ExtractionSettings,
    key: &str,
    path: &str,
    value: &Value,
) -> Result<()> {
    match key {
        keys::NORMALIZE => settings.normalize = expect_bool(path, value)?,
        keys::DISTANCES => settings.distances = expect_distances(path, value)?,
        keys::BIN_WIDTH => settings.bin_width = expect_positive_real(path, value)?,
        keys::VOXEL_ARRAY_SHIFT => settings.voxel_array_shift = Some(expect_int(path, value)?),
        keys::LABEL => settings.label = expect_int(path, value)?,
        keys::ADDITIONAL_INFO => settings.additional_info = expect_bool(path, value)?,
        keys::BIN_COUNT => settings.bin_count = Some(expect_positive_int(path, value)?),
        keys::NORMALIZE_SCALE => settings.normalize_scale = expect_positive_real(path, value)?,
        keys::REMOVE_OUTLIERS => {
            settings.remove_outliers = Some(expect_positive_real(path, value)?);
        }
        keys::RESAMPLED_PIXEL_SPACING => {
            settings.resampled_pixel_spacing = Some(expect_spacing(path, value)?);
        }
        keys::INTERPOLATOR => settings.interpolator = expect_named(path, value, "interpolator name")?,
        keys::PAD_DISTANCE => settings.pad_distance = expect_non_negative_int(path, value)?,
        keys::PRE_CROP => settings.pre_crop = expect_bool(path, value)?,
        keys::MINIMUM_ROI_DIMENSIONS => {
            settings.minimum_roi_dimensions = expect_bounded_int(
                path,
                value,
                limits::MIN_ROI_DIMENSIONS,
                limits::MAX_ROI_DIMENSIONS,
            )?;
        }
        keys::MINIMUM_ROI_SIZE => settings.minimum_roi_size = Some(expect_positive_int(path, value)?),
        keys::GEOMETRY_TOLERANCE => {
            settings.geometry_tolerance = Some(expect_positive_real(path, value)?);
        }
        keys::CORRECT_MASK => settings.correct_mask = expect_bool(path, value)?,
        keys::LABEL_CHANNEL => settings.label_channel = expect_non_negative_int(path, value)?,
        keys::RESEGMENT_RANGE => settings.resegment_range = Some(expect_resegment_range(path, value)?),
        keys::RESEGMENT_MODE => {
            settings.resegment_mode = expect_named(path, value, "one of absolute, relative, sigma")?;
        }
        keys::RESEGMENT_SHAPE => settings.resegment_shape = expect_bool(path, value)?,
        keys::FORCE_2D => settings.force_2d = expect_bool(path, value)?,
        keys::FORCE_2D_DIMENSION => {
            settings.force_2d_dimension =
                expect_bounded_int(path, value, 0, limits::MAX_FORCE_2D_DIMENSION)?;
        }
        keys::SYMMETRICAL_GLCM => settings.symmetrical_glcm = expect_bool(path, value)?,
        keys::WEIGHTING_NORM => {
            settings.weighting_norm = Some(expect_named(
                path,
                value,
                "one of manhattan, euclidean, infinity, no_weighting",
            )?);
        }
        keys::GLDM_A => settings.gldm_a = expect_non_negative_int(path, value)?,
        _ => return Err(schema_error(path.to_string(), value)),
    }
    Ok(())
}

/// Validate the `imageType` section.
pub fn validate_image_types(section: Option<&Value>) -> Result<ImageTypeSpec> {
    let map = require_mapping(sections::IMAGE_TYPE, section)?;
    trace!("validating {} image type(s)", map.len());

    let mut spec = ImageTypeSpec::new();
    for (name, value) in map {
        let path = format!("{}.{name}", sections::IMAGE_TYPE);
        let kind: ImageType = name.parse().map_err(|_| schema_error(path.clone(), value))?;
        let options: ImageTypeOptions = match value {
            Value::Null => Map::new(),
            Value::Object(options) => options.clone(),
            other => return Err(type_error(&path, "mapping of sub-options", other)),
        };
        spec.insert(kind, options);
    }
    Ok(spec)
}

/// Validate the `featureClass` section.
pub fn validate_feature_classes(section: Option<&Value>) -> Result<FeatureClassSpec> {
    let map = require_mapping(sections::FEATURE_CLASS, section)?;
    trace!("validating {} feature class(es)", map.len());

    let mut spec = FeatureClassSpec::new();
    for (name, value) in map {
        let path = format!("{}.{name}", sections::FEATURE_CLASS);
        let class: FeatureClass = name.parse().map_err(|_| schema_error(path.clone(), value))?;
        spec.insert(class, expect_selection(&path, value)?);
    }
    Ok(spec)
}

/// Require a present, non-empty mapping section.
fn require_mapping<'a>(name: &str, section: Option<&'a Value>) -> Result<&'a Map<String, Value>> {
    match section {
        None | Some(Value::Null) => Err(Error::EmptyCollection {
            path: name.to_string(),
        }),
        Some(Value::Object(map)) if map.is_empty() => Err(Error::EmptyCollection {
            path: name.to_string(),
        }),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(type_error(name, "mapping", other)),
    }
}

fn expect_selection(path: &str, value: &Value) -> Result<FeatureSelection> {
    let items = match value {
        Value::Null => return Ok(FeatureSelection::All),
        Value::Array(items) if items.is_empty() => return Ok(FeatureSelection::All),
        Value::Array(items) => items,
        other => return Err(type_error(path, "null or sequence of feature names", other)),
    };

    let mut names = BTreeSet::new();
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(name) if !name.trim().is_empty() => {
                names.insert(name.clone());
            }
            other => {
                return Err(type_error(&format!("{path}[{i}]"), "feature name", other));
            }
        }
    }
    Ok(FeatureSelection::Named(names))
}

fn expect_bool(path: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| type_error(path, "boolean", value))
}

/// Integer, also accepting reals with no fractional part.
fn expect_int(path: &str, value: &Value) -> Result<i64> {
    as_whole_number(value).ok_or_else(|| type_error(path, "integer", value))
}

fn expect_positive_int(path: &str, value: &Value) -> Result<u32> {
    as_whole_number(value)
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| type_error(path, "positive integer", value))
}

fn expect_non_negative_int(path: &str, value: &Value) -> Result<u32> {
    as_whole_number(value)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| type_error(path, "non-negative integer", value))
}

fn expect_bounded_int(path: &str, value: &Value, min: i64, max: i64) -> Result<u8> {
    as_whole_number(value)
        .filter(|n| (min..=max).contains(n))
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| type_error(path, &format!("integer between {min} and {max}"), value))
}

fn expect_positive_real(path: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .filter(|n| n.is_finite() && *n > 0.0)
        .ok_or_else(|| type_error(path, "positive real number", value))
}

fn expect_named<T: std::str::FromStr>(path: &str, value: &Value, expected: &str) -> Result<T> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| type_error(path, expected, value))
}

fn expect_distances(path: &str, value: &Value) -> Result<Vec<u32>> {
    const EXPECTED: &str = "non-empty sequence of positive integers";

    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        other => return Err(type_error(path, EXPECTED, other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_positive_int(&format!("{path}[{i}]"), item))
        .collect()
}

fn expect_spacing(path: &str, value: &Value) -> Result<Vec<f64>> {
    let expected = format!(
        "sequence of 1 to {} non-negative reals",
        limits::MAX_SPACING_AXES
    );

    let items = match value {
        Value::Array(items) if (1..=limits::MAX_SPACING_AXES).contains(&items.len()) => items,
        other => return Err(type_error(path, &expected, other)),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .ok_or_else(|| type_error(&format!("{path}[{i}]"), "non-negative real", item))
        })
        .collect()
}

fn expect_resegment_range(path: &str, value: &Value) -> Result<Vec<f64>> {
    let expected = format!(
        "sequence of 1 to {} reals in ascending order",
        limits::MAX_RESEGMENT_BOUNDS
    );

    let items = match value {
        Value::Array(items) if (1..=limits::MAX_RESEGMENT_BOUNDS).contains(&items.len()) => items,
        other => return Err(type_error(path, &expected, other)),
    };

    let bounds = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(|| type_error(&format!("{path}[{i}]"), "real number", item))
        })
        .collect::<Result<Vec<_>>>()?;

    if let [lower, upper] = bounds.as_slice()
        && lower > upper
    {
        return Err(type_error(path, &expected, value));
    }

    Ok(bounds)
}

/// 2^63, the first real past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::cast_possible_truncation)]
fn as_whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let real = value.as_f64()?;
    if real.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&real) {
        Some(real as i64)
    } else {
        None
    }
}

fn schema_error(path: String, value: &Value) -> Error {
    Error::Schema {
        reason: "unrecognized key".to_string(),
        path,
        value: value.to_string(),
    }
}

fn type_error(path: &str, expected: &str, value: &Value) -> Error {
    Error::Type {
        path: path.to_string(),
        expected: expected.to_string(),
        value: value.to_string(),
    }
}
