//! Parsing of `images:annotate` replies.
//!
//! Decoding dispatches on top-level key names so that fields added by newer
//! API versions are skipped with a warning instead of breaking old clients.

use crate::vision::annotations::{
    CropHintsAnnotation, EntityAnnotation, FaceAnnotation, ImagePropertiesAnnotation,
    SafeSearchAnnotation,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Annotation bundle for one request item. Categories the API did not
/// compute stay at their empty/zero values.
#[derive(Debug, Clone, Default)]
pub struct AnnotateImageResponse {
    pub face_annotations: Vec<FaceAnnotation>,
    pub landmark_annotations: Vec<EntityAnnotation>,
    pub logo_annotations: Vec<EntityAnnotation>,
    pub label_annotations: Vec<EntityAnnotation>,
    pub text_annotations: Vec<EntityAnnotation>,
    pub safe_search_annotation: SafeSearchAnnotation,
    pub image_properties_annotation: ImagePropertiesAnnotation,
    pub crop_hints_annotation: CropHintsAnnotation,
}

/// Decode one annotation category; a failed decode is absorbed with a
/// warning and the category keeps its default.
fn decode<T: DeserializeOwned + Default>(key: &str, value: &Value) -> T {
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Failed to decode {}: {}", key, e);
            T::default()
        }
    }
}

impl AnnotateImageResponse {
    /// Build one response bundle from its JSON object, dispatching on key
    /// names. Unrecognized keys are skipped with a warning.
    pub fn from_value(json: &Value) -> Self {
        let mut response = Self::default();

        let Some(object) = json.as_object() else {
            tracing::warn!("Annotate response item is not an object: {}", json);
            return response;
        };

        for (key, value) in object {
            match key.as_str() {
                "faceAnnotations" => response.face_annotations = decode(key, value),
                "landmarkAnnotations" => response.landmark_annotations = decode(key, value),
                "logoAnnotations" => response.logo_annotations = decode(key, value),
                "labelAnnotations" => response.label_annotations = decode(key, value),
                "textAnnotations" => response.text_annotations = decode(key, value),
                "safeSearchAnnotation" => response.safe_search_annotation = decode(key, value),
                "imagePropertiesAnnotation" => {
                    response.image_properties_annotation = decode(key, value)
                }
                "cropHintsAnnotation" => response.crop_hints_annotation = decode(key, value),
                other => tracing::warn!("Skipping unrecognized annotation key: {}", other),
            }
        }

        response
    }

    /// Whether every annotation category is at its empty/zero value.
    pub fn is_empty(&self) -> bool {
        self.face_annotations.is_empty()
            && self.landmark_annotations.is_empty()
            && self.logo_annotations.is_empty()
            && self.label_annotations.is_empty()
            && self.text_annotations.is_empty()
            && self.image_properties_annotation.dominant_colors.colors.is_empty()
            && self.crop_hints_annotation.crop_hints.is_empty()
    }
}

/// Split a full reply body into per-item bundles, index-aligned with the
/// request items. A body that is not valid JSON at all logs an error and
/// yields an empty list rather than propagating the parse failure.
pub fn parse_annotate_response(body: &str) -> Vec<AnnotateImageResponse> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Annotate response is not valid JSON: {}", e);
            return Vec::new();
        }
    };

    from_json(&json)
}

/// Dispatch over the reply envelope; only `responses` is recognized.
pub fn from_json(json: &Value) -> Vec<AnnotateImageResponse> {
    let mut responses = Vec::new();

    let Some(object) = json.as_object() else {
        tracing::warn!("Annotate response envelope is not an object");
        return responses;
    };

    for (key, value) in object {
        match key.as_str() {
            "responses" => {
                for item in value.as_array().map(Vec::as_slice).unwrap_or_default() {
                    responses.push(AnnotateImageResponse::from_value(item));
                }
            }
            other => tracing::warn!("Skipping unrecognized response key: {}", other),
        }
    }

    responses
}
