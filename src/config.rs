// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rendering configuration.
//!
//! This module defines the [`RenderConfig`] struct, which holds the colours,
//! stroke width, point radii and thresholds the drawing routines use.

use crate::color::Color;

/// Configuration for pose rendering.
///
/// Uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use posenet_overlay::{Color, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_min_confidence(0.3)
///     .with_scale(0.5)
///     .with_color(Color::YELLOW)
///     .with_bounding_box(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Colour of keypoints, skeleton segments, heatmap points and offset vectors.
    pub color: Color,
    /// Colour of pose bounding boxes.
    pub bounding_box_color: Color,
    /// Stroke width of skeleton segments and offset vectors, in pixels.
    pub line_width: f32,
    /// Radius of keypoint dots.
    pub keypoint_radius: f32,
    /// Radius of heatmap dots.
    pub heatmap_radius: f32,
    /// Keypoints scoring below this are not drawn (0.0 to 1.0).
    pub min_confidence: f32,
    /// Factor applied to keypoint positions before drawing.
    pub scale: f32,
    /// Whether [`draw_pose`](crate::draw::draw_pose) also strokes the bounding box.
    pub draw_bounding_box: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: Color::AQUA,
            bounding_box_color: Color::RED,
            line_width: 2.0,
            keypoint_radius: 3.0,
            heatmap_radius: 5.0,
            min_confidence: 0.1,
            scale: 1.0,
            draw_bounding_box: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stroke and fill colour.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the bounding box colour.
    #[must_use]
    pub const fn with_bounding_box_color(mut self, color: Color) -> Self {
        self.bounding_box_color = color;
        self
    }

    /// Set the segment stroke width.
    #[must_use]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Set the keypoint dot radius.
    #[must_use]
    pub const fn with_keypoint_radius(mut self, radius: f32) -> Self {
        self.keypoint_radius = radius;
        self
    }

    /// Set the heatmap dot radius.
    #[must_use]
    pub const fn with_heatmap_radius(mut self, radius: f32) -> Self {
        self.heatmap_radius = radius;
        self
    }

    /// Set the minimum keypoint confidence.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum score (0.0 to 1.0). A score equal to the
    ///   threshold is drawn.
    #[must_use]
    pub const fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold;
        self
    }

    /// Set the position scale factor.
    ///
    /// Use this when poses were estimated on a resized copy of the image.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable bounding boxes in [`draw_pose`](crate::draw::draw_pose).
    #[must_use]
    pub const fn with_bounding_box(mut self, enabled: bool) -> Self {
        self.draw_bounding_box = enabled;
        self
    }
}
