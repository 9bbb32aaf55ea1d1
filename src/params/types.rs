//! Parameter document type definitions.

use crate::constants::{defaults, sections};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Opaque sub-options of one image type, passed through to the engine.
pub type ImageTypeOptions = Map<String, Value>;

/// Enabled image types and their sub-options.
pub type ImageTypeSpec = BTreeMap<ImageType, ImageTypeOptions>;

/// Enabled feature classes and the features selected in each.
pub type FeatureClassSpec = BTreeMap<FeatureClass, FeatureSelection>;

/// Validated parameter document.
///
/// Construction goes through the loader only, so every field satisfies its
/// schema constraint. The document is read-only after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDocument {
    settings: ExtractionSettings,
    image_types: ImageTypeSpec,
    feature_classes: FeatureClassSpec,
}

impl ParameterDocument {
    pub(crate) fn new(
        settings: ExtractionSettings,
        image_types: ImageTypeSpec,
        feature_classes: FeatureClassSpec,
    ) -> Self {
        Self {
            settings,
            image_types,
            feature_classes,
        }
    }

    /// Extraction settings with defaults applied.
    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    /// Enabled image types. Never empty.
    pub fn image_types(&self) -> &ImageTypeSpec {
        &self.image_types
    }

    /// Enabled feature classes. Never empty.
    pub fn feature_classes(&self) -> &FeatureClassSpec {
        &self.feature_classes
    }

    /// Enabled feature classes in schema order.
    pub fn enabled_classes(&self) -> impl Iterator<Item = FeatureClass> + '_ {
        self.feature_classes.keys().copied()
    }

    /// Feature selection for a class, or `None` if the class is disabled.
    pub fn selection(&self, class: FeatureClass) -> Option<&FeatureSelection> {
        self.feature_classes.get(&class)
    }

    /// Render the document as a generic tree using the engine's key names.
    ///
    /// All settings are emitted, including defaults. Unset optional settings
    /// are omitted and `All` selections become null.
    pub fn to_value(&self) -> Value {
        let settings = serde_json::to_value(&self.settings).unwrap_or(Value::Null);

        let image_types = self
            .image_types
            .iter()
            .map(|(kind, options)| (kind.to_string(), Value::Object(options.clone())))
            .collect::<Map<_, _>>();

        let feature_classes = self
            .feature_classes
            .iter()
            .map(|(class, selection)| (class.to_string(), selection.to_value()))
            .collect::<Map<_, _>>();

        let mut root = Map::new();
        root.insert(sections::SETTING.to_string(), settings);
        root.insert(
            sections::IMAGE_TYPE.to_string(),
            Value::Object(image_types),
        );
        root.insert(
            sections::FEATURE_CLASS.to_string(),
            Value::Object(feature_classes),
        );
        Value::Object(root)
    }
}

/// Scalar extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractionSettings {
    /// Normalize intensities before discretization.
    pub normalize: bool,

    /// Neighbor distances for texture matrices. Never empty, all positive.
    pub distances: Vec<u32>,

    /// Gray-level bin width. Always positive.
    pub bin_width: f64,

    /// Constant added to intensities before computation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voxel_array_shift: Option<i64>,

    /// Foreground value in the mask.
    pub label: i64,

    /// Emit diagnostic values alongside features.
    pub additional_info: bool,

    /// Fixed number of bins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_count: Option<u32>,

    /// Scale applied after normalization.
    pub normalize_scale: f64,

    /// Outlier cutoff in standard deviations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_outliers: Option<f64>,

    /// Target voxel spacing for resampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resampled_pixel_spacing: Option<Vec<f64>>,

    /// Resampling interpolator.
    pub interpolator: Interpolator,

    /// Voxels of padding kept around the ROI when cropping.
    pub pad_distance: u32,

    /// Crop to the ROI before filtering.
    pub pre_crop: bool,

    /// Minimum number of ROI dimensions with more than one voxel (1-3).
    #[serde(rename = "minimumROIDimensions")]
    pub minimum_roi_dimensions: u8,

    /// Minimum number of voxels in the ROI.
    #[serde(rename = "minimumROISize", skip_serializing_if = "Option::is_none")]
    pub minimum_roi_size: Option<u32>,

    /// Tolerance for image/mask geometry mismatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_tolerance: Option<f64>,

    /// Resample the mask onto the image grid on mismatch.
    pub correct_mask: bool,

    /// Vector index used for multi-channel label maps.
    #[serde(rename = "label_channel")]
    pub label_channel: u32,

    /// Intensity range used to resegment the ROI (one or two bounds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resegment_range: Option<Vec<f64>>,

    /// Interpretation of `resegment_range`.
    pub resegment_mode: ResegmentMode,

    /// Compute shape features on the resegmented mask.
    pub resegment_shape: bool,

    /// Extract texture features per slice.
    #[serde(rename = "force2D")]
    pub force_2d: bool,

    /// Axis of the slices when `force_2d` is set (0-2).
    #[serde(rename = "force2Ddimension")]
    pub force_2d_dimension: u8,

    /// Symmetrical co-occurrence matrix.
    #[serde(rename = "symmetricalGLCM")]
    pub symmetrical_glcm: bool,

    /// Norm used to weight angles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighting_norm: Option<WeightingNorm>,

    /// Coarseness cutoff of the dependence matrix.
    #[serde(rename = "gldm_a")]
    pub gldm_a: u32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            normalize: false,
            distances: defaults::DISTANCES.to_vec(),
            bin_width: defaults::BIN_WIDTH,
            voxel_array_shift: None,
            label: defaults::LABEL,
            additional_info: false,
            bin_count: None,
            normalize_scale: defaults::NORMALIZE_SCALE,
            remove_outliers: None,
            resampled_pixel_spacing: None,
            interpolator: Interpolator::default(),
            pad_distance: defaults::PAD_DISTANCE,
            pre_crop: false,
            minimum_roi_dimensions: defaults::MINIMUM_ROI_DIMENSIONS,
            minimum_roi_size: None,
            geometry_tolerance: None,
            correct_mask: false,
            label_channel: 0,
            resegment_range: None,
            resegment_mode: ResegmentMode::default(),
            resegment_shape: false,
            force_2d: false,
            force_2d_dimension: defaults::FORCE_2D_DIMENSION,
            symmetrical_glcm: true,
            weighting_norm: None,
            gldm_a: defaults::GLDM_A,
        }
    }
}

/// Features enabled within one feature class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSelection {
    /// Every feature the class defines.
    All,
    /// Only the named features.
    Named(BTreeSet<String>),
}

impl FeatureSelection {
    /// Whether a feature of the class is enabled by this selection.
    pub fn includes(&self, feature: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.contains(feature),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::All => Value::Null,
            Self::Named(names) => Value::Array(names.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// Declares a string-named enum with `ALL`, `as_str`, `Display`, and `FromStr`.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// All variants in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Name as written in parameter documents.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(format!(concat!("unknown ", $what, ": {}"), other)),
                }
            }
        }
    };
}

named_enum! {
    /// Image transform applied before feature computation.
    ImageType, "image type" {
        /// Unmodified image.
        Original => "Original",
        /// Laplacian of Gaussian.
        LoG => "LoG",
        /// Wavelet decomposition.
        Wavelet => "Wavelet",
        /// Squared intensities.
        Square => "Square",
        /// Square root of absolute intensities.
        SquareRoot => "SquareRoot",
        /// Logarithm of absolute intensities.
        Logarithm => "Logarithm",
        /// Exponential of intensities.
        Exponential => "Exponential",
        /// Gradient magnitude.
        Gradient => "Gradient",
        /// Local binary pattern, in-plane.
        Lbp2D => "LBP2D",
        /// Local binary pattern, spherical harmonics.
        Lbp3D => "LBP3D",
    }
}

named_enum! {
    /// Family of related feature descriptors.
    FeatureClass, "feature class" {
        /// First-order intensity statistics.
        FirstOrder => "firstorder",
        /// 3D shape descriptors.
        Shape => "shape",
        /// 2D shape descriptors.
        Shape2D => "shape2D",
        /// Gray level co-occurrence matrix.
        Glcm => "glcm",
        /// Gray level run length matrix.
        Glrlm => "glrlm",
        /// Gray level size zone matrix.
        Glszm => "glszm",
        /// Gray level dependence matrix.
        Gldm => "gldm",
        /// Neighbouring gray tone difference matrix.
        Ngtdm => "ngtdm",
    }
}

named_enum! {
    /// Interpolator used when resampling.
    #[derive(Default)]
    Interpolator, "interpolator" {
        /// Nearest neighbor.
        NearestNeighbor => "sitkNearestNeighbor",
        /// Linear.
        Linear => "sitkLinear",
        /// B-spline.
        #[default]
        BSpline => "sitkBSpline",
        /// Gaussian.
        Gaussian => "sitkGaussian",
        /// Label-preserving Gaussian.
        LabelGaussian => "sitkLabelGaussian",
        /// Hamming windowed sinc.
        HammingWindowedSinc => "sitkHammingWindowedSinc",
        /// Cosine windowed sinc.
        CosineWindowedSinc => "sitkCosineWindowedSinc",
        /// Welch windowed sinc.
        WelchWindowedSinc => "sitkWelchWindowedSinc",
        /// Lanczos windowed sinc.
        LanczosWindowedSinc => "sitkLanczosWindowedSinc",
        /// Blackman windowed sinc.
        BlackmanWindowedSinc => "sitkBlackmanWindowedSinc",
    }
}

named_enum! {
    /// Interpretation of the resegmentation range.
    #[derive(Default)]
    ResegmentMode, "resegment mode" {
        /// Bounds are intensity values.
        #[default]
        Absolute => "absolute",
        /// Bounds are fractions of the ROI maximum.
        Relative => "relative",
        /// Bounds are standard deviations from the ROI mean.
        Sigma => "sigma",
    }
}

named_enum! {
    /// Norm used to weight matrix angles by distance.
    WeightingNorm, "weighting norm" {
        /// Sum of absolute offsets.
        Manhattan => "manhattan",
        /// Euclidean distance.
        Euclidean => "euclidean",
        /// Largest absolute offset.
        Infinity => "infinity",
        /// Unit weights.
        NoWeighting => "no_weighting",
    }
}
