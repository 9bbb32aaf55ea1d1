//! Parameter document loading, validation and rendering.

mod file;
mod load;
mod paths;
mod tree;
mod types;
mod validate;

pub use file::{load_file, load_file_as, render, render_value};
pub use load::{Format, load, load_with_format};
pub use paths::{config_dir, default_params_path};
pub use types::{
    ExtractionSettings, FeatureClass, FeatureClassSpec, FeatureSelection, ImageType,
    ImageTypeOptions, ImageTypeSpec, Interpolator, ParameterDocument, ResegmentMode,
    WeightingNorm,
};
pub use validate::{
    validate_document, validate_feature_classes, validate_image_types, validate_settings,
};
