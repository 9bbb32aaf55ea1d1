//! Syntax-neutral document tree.
//!
//! Every outer syntax is deserialized into [`RawTree`] first. Unlike
//! `serde_json::Value` it keeps repeated mapping keys and non-finite reals,
//! so both can be reported at their key path instead of being collapsed.

use crate::error::{Error, Result};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Path reported for errors at the document root.
pub(crate) const ROOT_PATH: &str = "(document)";

/// A parsed node, entries in document order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawTree {
    Null,
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Real(f64),
    Text(String),
    Seq(Vec<Self>),
    Map(Vec<(String, Self)>),
}

impl RawTree {
    /// Convert into a `serde_json::Value`, rejecting repeated keys and
    /// non-finite reals.
    pub(crate) fn into_value(self) -> Result<Value> {
        self.convert("")
    }

    fn convert(self, path: &str) -> Result<Value> {
        let value = match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Signed(n) => Value::from(n),
            Self::Unsigned(n) => Value::from(n),
            Self::Real(x) => match Number::from_f64(x) {
                Some(n) => Value::Number(n),
                None => {
                    return Err(Error::Type {
                        path: if path.is_empty() { ROOT_PATH } else { path }.to_string(),
                        expected: "finite number".to_string(),
                        value: x.to_string(),
                    });
                }
            },
            Self::Text(s) => Value::String(s),
            Self::Seq(items) => Value::Array(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| item.convert(&format!("{path}[{i}]")))
                    .collect::<Result<_>>()?,
            ),
            Self::Map(entries) => {
                let mut map = Map::new();
                for (key, item) in entries {
                    let child = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    let value = item.convert(&child)?;
                    if map.contains_key(&key) {
                        return Err(Error::Schema {
                            reason: "duplicate key".to_string(),
                            path: child,
                            value: value.to_string(),
                        });
                    }
                    map.insert(key, value);
                }
                Value::Object(map)
            }
        };
        Ok(value)
    }
}

impl<'de> Deserialize<'de> for RawTree {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawTreeVisitor)
    }
}

struct RawTreeVisitor;

impl<'de> Visitor<'de> for RawTreeVisitor {
    type Value = RawTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a parameter document value")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Signed(v))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Unsigned(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i128<E>(self, v: i128) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(i64::try_from(v).map_or(RawTree::Real(v as f64), RawTree::Signed))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u128<E>(self, v: u128) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(u64::try_from(v).map_or(RawTree::Real(v as f64), RawTree::Unsigned))
    }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Real(v))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Text(v))
    }

    fn visit_unit<E>(self) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<RawTree, E>
    where
        E: de::Error,
    {
        Ok(RawTree::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<RawTree, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawTree::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<RawTree, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element()? {
            items.push(item);
        }
        Ok(RawTree::Seq(items))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<RawTree, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, RawTree>()? {
            entries.push(entry);
        }
        Ok(RawTree::Map(entries))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(source: &str) -> Result<Value> {
        serde_yaml::from_str::<RawTree>(source).unwrap().into_value()
    }

    #[test]
    fn test_plain_tree_converts_unchanged() {
        let value = yaml("setting: {binWidth: 0.5, label: 2, normalize: true}\nfeatureClass: {glcm: null, gldm: [A]}\n")
            .unwrap();
        assert_eq!(
            value,
            json!({
                "setting": {"binWidth": 0.5, "label": 2, "normalize": true},
                "featureClass": {"glcm": null, "gldm": ["A"]}
            })
        );
    }

    #[test]
    fn test_duplicate_key_reports_nested_path() {
        let err = yaml("setting: {binWidth: -1, binWidth: 5}\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema { ref path, ref value, .. } if path == "setting.binWidth" && value == "5"
        ));
    }

    #[test]
    fn test_duplicate_key_in_json() {
        let tree: RawTree =
            serde_json::from_str(r#"{"imageType": {"Original": {}, "Original": {"a": 1}}}"#).unwrap();
        let err = tree.into_value().unwrap_err();
        assert_eq!(err.key_path(), Some("imageType.Original"));
        assert!(err.to_string().starts_with("duplicate key 'imageType.Original'"));
    }

    #[test]
    fn test_same_key_in_sibling_mappings_is_allowed() {
        let value = yaml("imageType: {LoG: {sigma: [1.0]}, Wavelet: {sigma: [2.0]}}\n").unwrap();
        assert_eq!(value["imageType"]["Wavelet"]["sigma"], json!([2.0]));
    }

    #[test]
    fn test_non_finite_reals_keep_their_spelling() {
        let err = yaml("featureClass: {glcm: .nan}\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Type { ref path, ref value, .. } if path == "featureClass.glcm" && value == "NaN"
        ));

        let err = yaml("setting: -.inf\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Type { ref path, ref value, .. } if path == "setting" && value == "-inf"
        ));
    }

    #[test]
    fn test_non_finite_in_sequence_reports_index() {
        let err = yaml("setting: {distances: [1, .inf]}\n").unwrap_err();
        assert_eq!(err.key_path(), Some("setting.distances[1]"));
    }

    #[test]
    fn test_non_finite_root() {
        let err = yaml(".nan").unwrap_err();
        assert_eq!(err.key_path(), Some(ROOT_PATH));
    }
}
