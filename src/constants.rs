//! Application-wide constants.
//!
//! Schema key names and setting defaults live here so the loader, the
//! renderer, and the CLI agree on them.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "radparams";

/// File name of the parameter document in the platform config directory.
pub const DEFAULT_PARAMS_FILE: &str = "params.yaml";

/// Top-level section names.
pub mod sections {
    /// Extraction settings section.
    pub const SETTING: &str = "setting";
    /// Image type selector section.
    pub const IMAGE_TYPE: &str = "imageType";
    /// Enabled feature classes section.
    pub const FEATURE_CLASS: &str = "featureClass";

    /// All recognized top-level keys.
    pub const ALL: [&str; 3] = [SETTING, IMAGE_TYPE, FEATURE_CLASS];
}

/// Recognized keys of the `setting` section.
pub mod settings {
    /// Normalize intensities before discretization.
    pub const NORMALIZE: &str = "normalize";
    /// Neighbor distances used by texture matrices.
    pub const DISTANCES: &str = "distances";
    /// Gray-level discretization bin width.
    pub const BIN_WIDTH: &str = "binWidth";
    /// Constant added to intensities before computation.
    pub const VOXEL_ARRAY_SHIFT: &str = "voxelArrayShift";
    /// Foreground value in the mask.
    pub const LABEL: &str = "label";
    /// Emit diagnostic values alongside features.
    pub const ADDITIONAL_INFO: &str = "additionalInfo";
    /// Fixed number of bins (overrides bin width in the engine).
    pub const BIN_COUNT: &str = "binCount";
    /// Scale applied after normalization.
    pub const NORMALIZE_SCALE: &str = "normalizeScale";
    /// Outlier cutoff in standard deviations.
    pub const REMOVE_OUTLIERS: &str = "removeOutliers";
    /// Target voxel spacing for resampling.
    pub const RESAMPLED_PIXEL_SPACING: &str = "resampledPixelSpacing";
    /// Resampling interpolator.
    pub const INTERPOLATOR: &str = "interpolator";
    /// Voxels of padding kept around the ROI when cropping.
    pub const PAD_DISTANCE: &str = "padDistance";
    /// Crop to the ROI before filtering.
    pub const PRE_CROP: &str = "preCrop";
    /// Minimum number of ROI dimensions with more than one voxel.
    pub const MINIMUM_ROI_DIMENSIONS: &str = "minimumROIDimensions";
    /// Minimum number of voxels in the ROI.
    pub const MINIMUM_ROI_SIZE: &str = "minimumROISize";
    /// Tolerance for image/mask geometry mismatch.
    pub const GEOMETRY_TOLERANCE: &str = "geometryTolerance";
    /// Resample the mask onto the image grid on mismatch.
    pub const CORRECT_MASK: &str = "correctMask";
    /// Vector index used for multi-channel label maps.
    pub const LABEL_CHANNEL: &str = "label_channel";
    /// Intensity range used to resegment the ROI.
    pub const RESEGMENT_RANGE: &str = "resegmentRange";
    /// Interpretation of `resegmentRange`.
    pub const RESEGMENT_MODE: &str = "resegmentMode";
    /// Compute shape features on the resegmented mask.
    pub const RESEGMENT_SHAPE: &str = "resegmentShape";
    /// Extract texture features per slice.
    pub const FORCE_2D: &str = "force2D";
    /// Axis of the slices when `force2D` is set.
    pub const FORCE_2D_DIMENSION: &str = "force2Ddimension";
    /// Symmetrical co-occurrence matrix.
    pub const SYMMETRICAL_GLCM: &str = "symmetricalGLCM";
    /// Norm used to weight angles.
    pub const WEIGHTING_NORM: &str = "weightingNorm";
    /// Coarseness cutoff of the dependence matrix.
    pub const GLDM_A: &str = "gldm_a";

    /// All recognized setting keys.
    pub const ALL: &[&str] = &[
        NORMALIZE,
        DISTANCES,
        BIN_WIDTH,
        VOXEL_ARRAY_SHIFT,
        LABEL,
        ADDITIONAL_INFO,
        BIN_COUNT,
        NORMALIZE_SCALE,
        REMOVE_OUTLIERS,
        RESAMPLED_PIXEL_SPACING,
        INTERPOLATOR,
        PAD_DISTANCE,
        PRE_CROP,
        MINIMUM_ROI_DIMENSIONS,
        MINIMUM_ROI_SIZE,
        GEOMETRY_TOLERANCE,
        CORRECT_MASK,
        LABEL_CHANNEL,
        RESEGMENT_RANGE,
        RESEGMENT_MODE,
        RESEGMENT_SHAPE,
        FORCE_2D,
        FORCE_2D_DIMENSION,
        SYMMETRICAL_GLCM,
        WEIGHTING_NORM,
        GLDM_A,
    ];
}

/// Default values applied to absent settings.
pub mod defaults {
    /// Default neighbor distances.
    pub const DISTANCES: [u32; 1] = [1];

    /// Default bin width, as defined by the extraction engine.
    pub const BIN_WIDTH: f64 = 25.0;

    /// Default ROI label.
    pub const LABEL: i64 = 1;

    /// Default normalization scale.
    pub const NORMALIZE_SCALE: f64 = 1.0;

    /// Default crop padding in voxels.
    pub const PAD_DISTANCE: u32 = 5;

    /// Default minimum ROI dimensionality.
    pub const MINIMUM_ROI_DIMENSIONS: u8 = 2;

    /// Default slice axis for 2D extraction.
    pub const FORCE_2D_DIMENSION: u8 = 0;

    /// Default dependence coarseness.
    pub const GLDM_A: u32 = 0;
}

/// Bounds for bounded integer settings.
pub mod limits {
    /// Smallest accepted `minimumROIDimensions`.
    pub const MIN_ROI_DIMENSIONS: i64 = 1;
    /// Largest accepted `minimumROIDimensions`.
    pub const MAX_ROI_DIMENSIONS: i64 = 3;
    /// Largest accepted `force2Ddimension`.
    pub const MAX_FORCE_2D_DIMENSION: i64 = 2;
    /// Maximum number of entries in `resampledPixelSpacing`.
    pub const MAX_SPACING_AXES: usize = 3;
    /// Maximum number of entries in `resegmentRange`.
    pub const MAX_RESEGMENT_BOUNDS: usize = 2;
}
