//! Builders for the `images:annotate` request body.

use crate::vision::feature::{Feature, FeatureType};
use crate::vision::geometry::LatLng;
use base64::Engine as _;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Image payload: either inline bytes or a Cloud Storage reference.
///
/// The two modes are mutually exclusive; setting one replaces the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw encoded image bytes, base64'd into `image.content` on the wire.
    Content(Vec<u8>),
    /// `gs://bucket/object` reference, sent as `image.source.gcs_image_uri`.
    GcsUri(String),
}

/// Latitude/longitude rectangle biasing landmark detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLongRect {
    pub min_lat_lng: LatLng,
    pub max_lat_lng: LatLng,
}

/// One image plus the detections requested for it.
///
/// The feature list starts empty; callers add features individually or call
/// [`request_all_features`](Self::request_all_features).
#[derive(Debug, Clone, Default)]
pub struct VisionRequestItem {
    image: Option<ImageSource>,
    features: Vec<Feature>,
    language_hints: Vec<String>,
    lat_long_rect: Option<LatLongRect>,
}

impl VisionRequestItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// An item carrying raw encoded image bytes.
    pub fn from_bytes(bytes: Vec<u8>, features: Vec<Feature>) -> Self {
        let mut item = Self::new();
        item.set_image_bytes(bytes);
        item.set_features(features);
        item
    }

    /// An item referencing a `gs://` image.
    pub fn from_uri(uri: &str, features: Vec<Feature>) -> Self {
        let mut item = Self::new();
        item.set_image_uri(uri);
        item.set_features(features);
        item
    }

    /// Use raw encoded image bytes, replacing any previously set source.
    pub fn set_image_bytes(&mut self, bytes: Vec<u8>) {
        self.image = Some(ImageSource::Content(bytes));
    }

    /// Reference a Cloud Storage image by `gs://` URI, replacing any
    /// previously set source.
    pub fn set_image_uri(&mut self, uri: &str) {
        if !uri.starts_with("gs://") {
            tracing::warn!("Image URI does not look like a gs:// reference: {}", uri);
        }
        self.image = Some(ImageSource::GcsUri(uri.to_string()));
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    /// Append one requested feature; output order equals insertion order.
    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Replace the feature list wholesale.
    pub fn set_features(&mut self, features: Vec<Feature>) {
        self.features = features;
    }

    /// Request every real detection type with the default result cap.
    pub fn request_all_features(&mut self) {
        self.set_features(
            FeatureType::DETECTIONS
                .into_iter()
                .map(Feature::new)
                .collect(),
        );
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn add_language_hint(&mut self, language: &str) {
        self.language_hints.push(language.to_string());
    }

    pub fn set_language_hints(&mut self, languages: Vec<String>) {
        self.language_hints = languages;
    }

    /// Bias landmark results toward a latitude/longitude rectangle.
    pub fn set_lat_long_bounds(
        &mut self,
        min_latitude: f64,
        min_longitude: f64,
        max_latitude: f64,
        max_longitude: f64,
    ) {
        self.lat_long_rect = Some(LatLongRect {
            min_lat_lng: LatLng {
                latitude: min_latitude,
                longitude: min_longitude,
            },
            max_lat_lng: LatLng {
                latitude: max_latitude,
                longitude: max_longitude,
            },
        });
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<SourcePayload<'a>>,
}

#[derive(Serialize)]
struct SourcePayload<'a> {
    #[serde(rename = "gcs_image_uri")]
    gcs_image_uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContextPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    language_hints: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lat_long_rect: Option<&'a LatLongRect>,
}

impl Serialize for VisionRequestItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let image = self.image.as_ref().map(|source| match source {
            ImageSource::Content(bytes) => ImagePayload {
                content: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
                source: None,
            },
            ImageSource::GcsUri(uri) => ImagePayload {
                content: None,
                source: Some(SourcePayload { gcs_image_uri: uri }),
            },
        });

        let context = (!self.language_hints.is_empty() || self.lat_long_rect.is_some()).then(
            || ImageContextPayload {
                language_hints: (!self.language_hints.is_empty())
                    .then_some(self.language_hints.as_slice()),
                lat_long_rect: self.lat_long_rect.as_ref(),
            },
        );

        let mut fields = 0;
        fields += usize::from(image.is_some());
        fields += usize::from(!self.features.is_empty());
        fields += usize::from(context.is_some());

        let mut state = serializer.serialize_struct("VisionRequestItem", fields)?;
        if let Some(image) = &image {
            state.serialize_field("image", image)?;
        }
        if !self.features.is_empty() {
            state.serialize_field("features", &self.features)?;
        }
        if let Some(context) = &context {
            state.serialize_field("imageContext", context)?;
        }
        state.end()
    }
}

/// Ordered batch of request items; serializes to `{"requests": [...]}`.
/// Response order is index-aligned with the items.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnnotateImagesRequest {
    requests: Vec<VisionRequestItem>,
}

impl AnnotateImagesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<VisionRequestItem>) -> Self {
        Self { requests: items }
    }

    pub fn add_item(&mut self, item: VisionRequestItem) {
        self.requests.push(item);
    }

    pub fn items(&self) -> &[VisionRequestItem] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
