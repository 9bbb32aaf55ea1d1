//! Interface to the external feature extraction engine.

use crate::error::Result;
use crate::params::ParameterDocument;
use std::collections::BTreeMap;

/// Feature values keyed by feature name, e.g. `original_glcm_Contrast`.
pub type FeatureValues = BTreeMap<String, f64>;

/// Engine that computes texture features from an image and a mask.
///
/// The parameter document is already validated, so implementations read its
/// settings without further checks.
pub trait ExtractionEngine {
    /// Image representation consumed by the engine.
    type Image;
    /// Mask representation consumed by the engine.
    type Mask;

    /// Compute the features enabled by `params` within the ROI of `mask`.
    fn extract(
        &self,
        image: &Self::Image,
        mask: &Self::Mask,
        params: &ParameterDocument,
    ) -> Result<FeatureValues>;
}

/// Name of a feature as reported by the engine: `<imageType>_<class>_<feature>`.
pub fn feature_key(
    image_type: crate::params::ImageType,
    class: crate::params::FeatureClass,
    feature: &str,
) -> String {
    format!(
        "{}_{}_{feature}",
        image_type.as_str().to_ascii_lowercase(),
        class.as_str()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::params::{FeatureClass, ImageType, load};

    /// Reports the ROI voxel count once per enabled image type and class.
    struct VoxelCountEngine;

    impl ExtractionEngine for VoxelCountEngine {
        type Image = Vec<f64>;
        type Mask = Vec<i64>;

        fn extract(
            &self,
            image: &Self::Image,
            mask: &Self::Mask,
            params: &ParameterDocument,
        ) -> Result<FeatureValues> {
            if image.len() != mask.len() {
                return Err(Error::Extraction {
                    reason: "image and mask sizes differ".to_string(),
                });
            }

            let label = params.settings().label;
            #[allow(clippy::cast_precision_loss)]
            let voxels = mask.iter().filter(|&&m| m == label).count() as f64;

            let mut values = FeatureValues::new();
            for image_type in params.image_types().keys() {
                for class in params.enabled_classes() {
                    values.insert(feature_key(*image_type, class, "VoxelCount"), voxels);
                }
            }
            Ok(values)
        }
    }

    #[test]
    fn test_engine_receives_validated_document() {
        let params = load(
            "setting: {label: 2}\nimageType: {Original: {}}\nfeatureClass: {glcm: null, ngtdm: null}\n",
        )
        .unwrap();

        let values = VoxelCountEngine
            .extract(&vec![1.0, 2.0, 3.0], &vec![0, 2, 2], &params)
            .unwrap();

        assert_eq!(values.len(), 2);
        assert_eq!(values["original_glcm_VoxelCount"], 2.0);
        assert_eq!(values["original_ngtdm_VoxelCount"], 2.0);
    }

    #[test]
    fn test_engine_error_propagates() {
        let params = load("imageType: {Original: {}}\nfeatureClass: {glcm: null}\n").unwrap();
        let result = VoxelCountEngine.extract(&vec![1.0], &vec![], &params);
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[test]
    fn test_feature_key() {
        assert_eq!(
            feature_key(ImageType::LoG, FeatureClass::FirstOrder, "Mean"),
            "log_firstorder_Mean"
        );
    }
}
