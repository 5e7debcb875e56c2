//! Shared geometric and color wire shapes.

use serde::{Deserialize, Serialize};

/// Vertex in image pixel coordinates. `z` is only populated for 3-D points
/// (face landmarks); polygon vertices leave it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Polygon around a detected region.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundingPoly {
    pub vertices: Vec<Vertex>,
}

/// Latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// RGBA color; channels range 0-255. An absent alpha means fully opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vertex_defaults_missing_axes() {
        let vertex: Vertex = serde_json::from_str(r#"{"x": 10, "y": 20}"#).unwrap();
        assert_eq!(vertex.x, 10.0);
        assert_eq!(vertex.y, 20.0);
        assert_eq!(vertex.z, 0.0);
    }

    #[test]
    fn test_bounding_poly_preserves_vertex_order() {
        let poly: BoundingPoly = serde_json::from_str(
            r#"{"vertices": [{"x": 0, "y": 0}, {"x": 5, "y": 0}, {"x": 5, "y": 5}]}"#,
        )
        .unwrap();
        assert_eq!(poly.vertices.len(), 3);
        assert_eq!(poly.vertices[1].x, 5.0);
        assert_eq!(poly.vertices[2].y, 5.0);
    }

    #[test]
    fn test_color_without_alpha() {
        let color: Color =
            serde_json::from_str(r#"{"red": 69, "green": 81, "blue": 95}"#).unwrap();
        assert_eq!(color.red, 69.0);
        assert_eq!(color.alpha, None);
    }
}
