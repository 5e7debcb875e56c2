//! Typed annotation model for `images:annotate` results.
//!
//! Field names mirror the wire's camelCase keys; every field defaults to its
//! empty/zero value because the API omits annotation categories it did not
//! compute.

use crate::vision::geometry::{BoundingPoly, Color, LatLng, Vertex};
use crate::vision::likelihood::Likelihood;
use serde::{Deserialize, Deserializer};

/// Free-form name/value pair attached to an entity. Duplicate names are
/// allowed, so these stay an ordered list rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Location attached to an entity; usually present for landmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationInfo {
    pub lat_lng: LatLng,
}

/// Detected entity, shared by label, logo, landmark, and text annotations.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityAnnotation {
    /// Knowledge Graph entity ID, e.g. "/m/045c7b" for Google.
    pub mid: String,
    /// Language code of the locale `description` is expressed in.
    pub locale: String,
    pub description: String,
    /// Overall score of the result, in [0, 1].
    pub score: f32,
    /// Detection accuracy, in [0, 1].
    pub confidence: f32,
    /// Relevancy of the label to the image, in [0, 1].
    pub topicality: f32,
    /// Image region the entity belongs to; empty for label detection.
    pub bounding_poly: BoundingPoly,
    pub locations: Vec<LocationInfo>,
    pub properties: Vec<Property>,
}

/// Face landmark (feature) type.
///
/// Left and right are defined from the viewer's vantage, so `LeftEye` is
/// typically the subject's right eye.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LandmarkType {
    #[default]
    UnknownLandmark,
    LeftEye,
    RightEye,
    LeftOfLeftEyebrow,
    RightOfLeftEyebrow,
    LeftOfRightEyebrow,
    RightOfRightEyebrow,
    MidpointBetweenEyes,
    NoseTip,
    UpperLip,
    LowerLip,
    MouthLeft,
    MouthRight,
    MouthCenter,
    NoseBottomRight,
    NoseBottomLeft,
    NoseBottomCenter,
    LeftEyeTopBoundary,
    LeftEyeRightCorner,
    LeftEyeBottomBoundary,
    LeftEyeLeftCorner,
    RightEyeTopBoundary,
    RightEyeRightCorner,
    RightEyeBottomBoundary,
    RightEyeLeftCorner,
    LeftEyebrowUpperMidpoint,
    RightEyebrowUpperMidpoint,
    LeftEarTragion,
    RightEarTragion,
    LeftEyePupil,
    RightEyePupil,
    ForeheadGlabella,
    ChinGnathion,
    ChinLeftGonion,
    ChinRightGonion,
}

impl LandmarkType {
    /// Map a wire string to a landmark type. Unknown strings fall back to
    /// [`LandmarkType::UnknownLandmark`] with a warning.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UNKNOWN_LANDMARK" => Self::UnknownLandmark,
            "LEFT_EYE" => Self::LeftEye,
            "RIGHT_EYE" => Self::RightEye,
            "LEFT_OF_LEFT_EYEBROW" => Self::LeftOfLeftEyebrow,
            "RIGHT_OF_LEFT_EYEBROW" => Self::RightOfLeftEyebrow,
            "LEFT_OF_RIGHT_EYEBROW" => Self::LeftOfRightEyebrow,
            "RIGHT_OF_RIGHT_EYEBROW" => Self::RightOfRightEyebrow,
            "MIDPOINT_BETWEEN_EYES" => Self::MidpointBetweenEyes,
            "NOSE_TIP" => Self::NoseTip,
            "UPPER_LIP" => Self::UpperLip,
            "LOWER_LIP" => Self::LowerLip,
            "MOUTH_LEFT" => Self::MouthLeft,
            "MOUTH_RIGHT" => Self::MouthRight,
            "MOUTH_CENTER" => Self::MouthCenter,
            "NOSE_BOTTOM_RIGHT" => Self::NoseBottomRight,
            "NOSE_BOTTOM_LEFT" => Self::NoseBottomLeft,
            "NOSE_BOTTOM_CENTER" => Self::NoseBottomCenter,
            "LEFT_EYE_TOP_BOUNDARY" => Self::LeftEyeTopBoundary,
            "LEFT_EYE_RIGHT_CORNER" => Self::LeftEyeRightCorner,
            "LEFT_EYE_BOTTOM_BOUNDARY" => Self::LeftEyeBottomBoundary,
            "LEFT_EYE_LEFT_CORNER" => Self::LeftEyeLeftCorner,
            "RIGHT_EYE_TOP_BOUNDARY" => Self::RightEyeTopBoundary,
            "RIGHT_EYE_RIGHT_CORNER" => Self::RightEyeRightCorner,
            "RIGHT_EYE_BOTTOM_BOUNDARY" => Self::RightEyeBottomBoundary,
            "RIGHT_EYE_LEFT_CORNER" => Self::RightEyeLeftCorner,
            "LEFT_EYEBROW_UPPER_MIDPOINT" => Self::LeftEyebrowUpperMidpoint,
            "RIGHT_EYEBROW_UPPER_MIDPOINT" => Self::RightEyebrowUpperMidpoint,
            "LEFT_EAR_TRAGION" => Self::LeftEarTragion,
            "RIGHT_EAR_TRAGION" => Self::RightEarTragion,
            "LEFT_EYE_PUPIL" => Self::LeftEyePupil,
            "RIGHT_EYE_PUPIL" => Self::RightEyePupil,
            "FOREHEAD_GLABELLA" => Self::ForeheadGlabella,
            "CHIN_GNATHION" => Self::ChinGnathion,
            "CHIN_LEFT_GONION" => Self::ChinLeftGonion,
            "CHIN_RIGHT_GONION" => Self::ChinRightGonion,
            other => {
                tracing::warn!("Unknown face landmark type: {}", other);
                Self::UnknownLandmark
            }
        }
    }

    /// The wire name of this landmark type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnknownLandmark => "UNKNOWN_LANDMARK",
            Self::LeftEye => "LEFT_EYE",
            Self::RightEye => "RIGHT_EYE",
            Self::LeftOfLeftEyebrow => "LEFT_OF_LEFT_EYEBROW",
            Self::RightOfLeftEyebrow => "RIGHT_OF_LEFT_EYEBROW",
            Self::LeftOfRightEyebrow => "LEFT_OF_RIGHT_EYEBROW",
            Self::RightOfRightEyebrow => "RIGHT_OF_RIGHT_EYEBROW",
            Self::MidpointBetweenEyes => "MIDPOINT_BETWEEN_EYES",
            Self::NoseTip => "NOSE_TIP",
            Self::UpperLip => "UPPER_LIP",
            Self::LowerLip => "LOWER_LIP",
            Self::MouthLeft => "MOUTH_LEFT",
            Self::MouthRight => "MOUTH_RIGHT",
            Self::MouthCenter => "MOUTH_CENTER",
            Self::NoseBottomRight => "NOSE_BOTTOM_RIGHT",
            Self::NoseBottomLeft => "NOSE_BOTTOM_LEFT",
            Self::NoseBottomCenter => "NOSE_BOTTOM_CENTER",
            Self::LeftEyeTopBoundary => "LEFT_EYE_TOP_BOUNDARY",
            Self::LeftEyeRightCorner => "LEFT_EYE_RIGHT_CORNER",
            Self::LeftEyeBottomBoundary => "LEFT_EYE_BOTTOM_BOUNDARY",
            Self::LeftEyeLeftCorner => "LEFT_EYE_LEFT_CORNER",
            Self::RightEyeTopBoundary => "RIGHT_EYE_TOP_BOUNDARY",
            Self::RightEyeRightCorner => "RIGHT_EYE_RIGHT_CORNER",
            Self::RightEyeBottomBoundary => "RIGHT_EYE_BOTTOM_BOUNDARY",
            Self::RightEyeLeftCorner => "RIGHT_EYE_LEFT_CORNER",
            Self::LeftEyebrowUpperMidpoint => "LEFT_EYEBROW_UPPER_MIDPOINT",
            Self::RightEyebrowUpperMidpoint => "RIGHT_EYEBROW_UPPER_MIDPOINT",
            Self::LeftEarTragion => "LEFT_EAR_TRAGION",
            Self::RightEarTragion => "RIGHT_EAR_TRAGION",
            Self::LeftEyePupil => "LEFT_EYE_PUPIL",
            Self::RightEyePupil => "RIGHT_EYE_PUPIL",
            Self::ForeheadGlabella => "FOREHEAD_GLABELLA",
            Self::ChinGnathion => "CHIN_GNATHION",
            Self::ChinLeftGonion => "CHIN_LEFT_GONION",
            Self::ChinRightGonion => "CHIN_RIGHT_GONION",
        }
    }
}

impl<'de> Deserialize<'de> for LandmarkType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(LandmarkType::from_name(&name))
    }
}

/// Named 3-D point on a detected face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Landmark {
    #[serde(rename = "type")]
    pub landmark_type: LandmarkType,
    pub position: Vertex,
}

/// Result of face detection for one face.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaceAnnotation {
    /// Polygon framing the face per human expectations, derived from the
    /// landmarker results. May be unbounded for a partial face.
    pub bounding_poly: BoundingPoly,
    /// Tighter polygon from initial face detection ("fd"), enclosing only
    /// the skin part of the face.
    pub fd_bounding_poly: BoundingPoly,
    pub landmarks: Vec<Landmark>,
    /// Clockwise rotation about the axis perpendicular to the face, degrees
    /// in [-180, 180].
    pub roll_angle: f32,
    /// Leftward/rightward (yaw) angle, degrees in [-180, 180].
    pub pan_angle: f32,
    /// Upward/downward (pitch) angle, degrees in [-180, 180].
    pub tilt_angle: f32,
    /// Detection confidence, in [0, 1].
    pub detection_confidence: f32,
    /// Landmarking confidence, in [0, 1].
    pub landmarking_confidence: f32,
    pub joy_likelihood: Likelihood,
    pub sorrow_likelihood: Likelihood,
    pub anger_likelihood: Likelihood,
    pub surprise_likelihood: Likelihood,
    pub under_exposed_likelihood: Likelihood,
    pub blurred_likelihood: Likelihood,
    pub headwear_likelihood: Likelihood,
}

/// Safe-search verticals computed over the whole image.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SafeSearchAnnotation {
    pub adult: Likelihood,
    /// Likelihood the image was modified to appear funny or offensive.
    pub spoof: Likelihood,
    pub medical: Likelihood,
    pub violence: Likelihood,
    pub racy: Likelihood,
}

/// One dominant color with its score and coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorInfo {
    pub color: Color,
    /// Image-specific score, in [0, 1].
    pub score: f32,
    /// Fraction of image pixels the color occupies, in [0, 1].
    pub pixel_fraction: f32,
}

/// Dominant-colors container as nested on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DominantColors {
    pub colors: Vec<ColorInfo>,
}

/// Image-wide properties (currently dominant colors).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePropertiesAnnotation {
    pub dominant_colors: DominantColors,
}

/// Single suggested crop region.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropHint {
    pub bounding_poly: BoundingPoly,
    /// Confidence this region makes an appealing crop, in [0, 1].
    pub confidence: f32,
    /// Fraction of the image's salient content inside the region.
    pub importance_fraction: f32,
}

/// Ordered set of crop hints for an image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropHintsAnnotation {
    pub crop_hints: Vec<CropHint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_entity_annotation_decodes_shared_shape() {
        let entity: EntityAnnotation = serde_json::from_value(json!({
            "mid": "/m/01yrx",
            "locale": "en",
            "description": "cat",
            "score": 0.98,
            "confidence": 0.9,
            "topicality": 0.95,
            "boundingPoly": {"vertices": [{"x": 1, "y": 2}, {"x": 3, "y": 4}]},
            "locations": [{"latLng": {"latitude": 48.85, "longitude": 2.29}}],
            "properties": [
                {"name": "color", "value": "black"},
                {"name": "color", "value": "white"}
            ]
        }))
        .unwrap();

        assert_eq!(entity.mid, "/m/01yrx");
        assert_eq!(entity.description, "cat");
        assert_eq!(entity.bounding_poly.vertices.len(), 2);
        assert_eq!(entity.locations[0].lat_lng.latitude, 48.85);
        // Duplicate property names survive as separate entries.
        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[0].name, "color");
        assert_eq!(entity.properties[1].value, "white");
    }

    #[test]
    fn test_entity_annotation_defaults_absent_fields() {
        let entity: EntityAnnotation =
            serde_json::from_value(json!({"description": "dog"})).unwrap();
        assert_eq!(entity.score, 0.0);
        assert!(entity.locations.is_empty());
        assert!(entity.bounding_poly.vertices.is_empty());
    }

    #[test]
    fn test_face_annotation_decodes_landmarks_and_likelihoods() {
        let face: FaceAnnotation = serde_json::from_value(json!({
            "boundingPoly": {"vertices": [{"x": 0, "y": 0}]},
            "fdBoundingPoly": {"vertices": [{"x": 1, "y": 1}]},
            "landmarks": [
                {"type": "LEFT_EYE", "position": {"x": 10.5, "y": 20.5, "z": 0.1}},
                {"type": "NOSE_TIP", "position": {"x": 15.0, "y": 30.0, "z": -0.2}}
            ],
            "rollAngle": -3.5,
            "panAngle": 12.0,
            "tiltAngle": 0.5,
            "detectionConfidence": 0.99,
            "landmarkingConfidence": 0.8,
            "joyLikelihood": "VERY_LIKELY",
            "sorrowLikelihood": "VERY_UNLIKELY",
            "angerLikelihood": "UNLIKELY",
            "surpriseLikelihood": "POSSIBLE",
            "underExposedLikelihood": "VERY_UNLIKELY",
            "blurredLikelihood": "VERY_UNLIKELY",
            "headwearLikelihood": "LIKELY"
        }))
        .unwrap();

        assert_eq!(face.landmarks.len(), 2);
        assert_eq!(face.landmarks[0].landmark_type, LandmarkType::LeftEye);
        assert_eq!(face.landmarks[1].position.x, 15.0);
        assert_eq!(face.roll_angle, -3.5);
        assert_eq!(face.joy_likelihood, Likelihood::VeryLikely);
        assert_eq!(face.headwear_likelihood.value(), 0.75);
    }

    #[test]
    fn test_unknown_landmark_string_falls_back() {
        let landmark: Landmark = serde_json::from_value(json!({
            "type": "THIRD_EYE",
            "position": {"x": 1, "y": 2}
        }))
        .unwrap();
        assert_eq!(landmark.landmark_type, LandmarkType::UnknownLandmark);
    }

    #[test]
    fn test_landmark_type_name_round_trip() {
        for name in ["LEFT_EYE", "CHIN_RIGHT_GONION", "FOREHEAD_GLABELLA"] {
            assert_eq!(LandmarkType::from_name(name).name(), name);
        }
    }

    #[test]
    fn test_safe_search_decodes_all_verticals() {
        let safe_search: SafeSearchAnnotation = serde_json::from_value(json!({
            "adult": "VERY_UNLIKELY",
            "spoof": "UNLIKELY",
            "medical": "POSSIBLE",
            "violence": "LIKELY",
            "racy": "VERY_LIKELY"
        }))
        .unwrap();

        assert_eq!(safe_search.adult, Likelihood::VeryUnlikely);
        assert_eq!(safe_search.violence, Likelihood::Likely);
        assert_eq!(safe_search.racy, Likelihood::VeryLikely);
    }

    #[test]
    fn test_safe_search_without_racy_defaults_unknown() {
        let safe_search: SafeSearchAnnotation = serde_json::from_value(json!({
            "adult": "VERY_UNLIKELY",
            "spoof": "VERY_UNLIKELY",
            "medical": "VERY_UNLIKELY",
            "violence": "VERY_UNLIKELY"
        }))
        .unwrap();
        assert_eq!(safe_search.racy, Likelihood::Unknown);
    }

    #[test]
    fn test_image_properties_preserve_color_order() {
        let properties: ImagePropertiesAnnotation = serde_json::from_value(json!({
            "dominantColors": {
                "colors": [
                    {"color": {"red": 10, "green": 20, "blue": 30}, "score": 0.5, "pixelFraction": 0.3},
                    {"color": {"red": 200, "green": 100, "blue": 50}, "score": 0.2, "pixelFraction": 0.1}
                ]
            }
        }))
        .unwrap();

        let colors = &properties.dominant_colors.colors;
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].color.red, 10.0);
        assert_eq!(colors[1].pixel_fraction, 0.1);
    }

    #[test]
    fn test_crop_hints_decode() {
        let hints: CropHintsAnnotation = serde_json::from_value(json!({
            "cropHints": [{
                "boundingPoly": {"vertices": [{"x": 0, "y": 0}, {"x": 100, "y": 100}]},
                "confidence": 0.7,
                "importanceFraction": 1.2
            }]
        }))
        .unwrap();

        assert_eq!(hints.crop_hints.len(), 1);
        assert_eq!(hints.crop_hints[0].confidence, 0.7);
        assert_eq!(hints.crop_hints[0].bounding_poly.vertices.len(), 2);
    }
}
