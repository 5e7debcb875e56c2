//! Detection features understood by the `images:annotate` endpoint.

use serde::{Deserialize, Serialize};

/// Detection type requested for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    TypeUnspecified,
    FaceDetection,
    LandmarkDetection,
    LogoDetection,
    LabelDetection,
    TextDetection,
    SafeSearchDetection,
    ImageProperties,
    CropHints,
}

impl FeatureType {
    /// Every real detection type, in the order the API documents them.
    pub const DETECTIONS: [FeatureType; 8] = [
        FeatureType::FaceDetection,
        FeatureType::LandmarkDetection,
        FeatureType::LogoDetection,
        FeatureType::LabelDetection,
        FeatureType::TextDetection,
        FeatureType::SafeSearchDetection,
        FeatureType::ImageProperties,
        FeatureType::CropHints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeUnspecified => "TYPE_UNSPECIFIED",
            Self::FaceDetection => "FACE_DETECTION",
            Self::LandmarkDetection => "LANDMARK_DETECTION",
            Self::LogoDetection => "LOGO_DETECTION",
            Self::LabelDetection => "LABEL_DETECTION",
            Self::TextDetection => "TEXT_DETECTION",
            Self::SafeSearchDetection => "SAFE_SEARCH_DETECTION",
            Self::ImageProperties => "IMAGE_PROPERTIES",
            Self::CropHints => "CROP_HINTS",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TYPE_UNSPECIFIED" => Some(Self::TypeUnspecified),
            "FACE_DETECTION" => Some(Self::FaceDetection),
            "LANDMARK_DETECTION" => Some(Self::LandmarkDetection),
            "LOGO_DETECTION" => Some(Self::LogoDetection),
            "LABEL_DETECTION" => Some(Self::LabelDetection),
            "TEXT_DETECTION" => Some(Self::TextDetection),
            "SAFE_SEARCH_DETECTION" => Some(Self::SafeSearchDetection),
            "IMAGE_PROPERTIES" => Some(Self::ImageProperties),
            "CROP_HINTS" => Some(Self::CropHints),
            _ => None,
        }
    }
}

/// One requested detection plus its result cap; serializes to
/// `{"type": ..., "maxResults": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    pub max_results: u32,
}

impl Feature {
    pub const DEFAULT_MAX_RESULTS: u32 = 10;

    pub fn new(feature_type: FeatureType) -> Self {
        Self::with_max_results(feature_type, Self::DEFAULT_MAX_RESULTS)
    }

    pub fn with_max_results(feature_type: FeatureType, max_results: u32) -> Self {
        Self {
            feature_type,
            max_results,
        }
    }
}
