//! Google Cloud Vision image annotation
//!
//! Request builders, the typed annotation model, and the client that ties
//! them to the authenticated platform transport.

pub mod annotations;
pub mod feature;
pub mod geometry;
pub mod likelihood;
pub mod request;
pub mod response;

pub use annotations::{
    ColorInfo, CropHint, CropHintsAnnotation, DominantColors, EntityAnnotation, FaceAnnotation,
    ImagePropertiesAnnotation, Landmark, LandmarkType, LocationInfo, Property,
    SafeSearchAnnotation,
};
pub use feature::{Feature, FeatureType};
pub use geometry::{BoundingPoly, Color, LatLng, Vertex};
pub use likelihood::Likelihood;
pub use request::{AnnotateImagesRequest, ImageSource, VisionRequestItem};
pub use response::AnnotateImageResponse;

use crate::auth::ServiceAccountCredentials;
use crate::platform::PlatformClient;
use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;

const DEFAULT_ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Client for the Vision `images:annotate` endpoint.
///
/// Cheap to share behind an `Arc`; concurrent callers reuse one cached
/// bearer token. Every call is one network round trip; results are never
/// cached here.
pub struct VisionClient {
    platform: PlatformClient,
    annotate_url: String,
}

impl VisionClient {
    pub fn new(credentials: ServiceAccountCredentials) -> Self {
        Self::from_platform(PlatformClient::new(credentials))
    }

    /// Build on an existing platform client (custom filters, shared pool).
    pub fn from_platform(platform: PlatformClient) -> Self {
        Self {
            platform,
            annotate_url: DEFAULT_ANNOTATE_URL.to_string(),
        }
    }

    /// Override the annotate endpoint, e.g. for a regional endpoint such as
    /// `eu-vision.googleapis.com` or a test server.
    pub fn with_annotate_url(mut self, url: &str) -> Self {
        self.annotate_url = url.to_string();
        self
    }

    pub fn platform(&self) -> &PlatformClient {
        &self.platform
    }

    /// Annotate a single image.
    pub async fn annotate(&self, item: VisionRequestItem) -> Result<Vec<AnnotateImageResponse>> {
        self.annotate_batch(vec![item]).await
    }

    /// Annotate a batch of images. The returned list is index-aligned with
    /// `items`; items whose categories came back empty still occupy their
    /// position.
    pub async fn annotate_batch(
        &self,
        items: Vec<VisionRequestItem>,
    ) -> Result<Vec<AnnotateImageResponse>> {
        tracing::debug!("Annotating {} image(s)", items.len());
        let batch = AnnotateImagesRequest::with_items(items);

        let request = self
            .platform
            .http_client()
            .post(&self.annotate_url)
            .json(&batch)
            .build()?;

        let response = self.platform.execute(request).await?;
        let status = response.status();

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Err(Error::Transport {
                status,
                reason: "expected a JSON response body".to_string(),
            });
        }

        let body = response.text().await?;
        Ok(response::parse_annotate_response(&body))
    }
}
