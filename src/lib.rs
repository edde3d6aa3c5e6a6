// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! # PoseNet Overlay
//!
//! Draws the output of a PoseNet pose-estimation model onto images:
//! keypoints, skeleton segments, bounding boxes, heatmap cells and offset
//! vectors, plus the joint angles at the shoulders and elbows.
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use posenet_overlay::{ImageSurface, Pose, RenderConfig, draw_pose};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let image = image::open("frame.jpg")?;
//!     let mut poses = Pose::load_all("poses.json")?;
//!
//!     let config = RenderConfig::new().with_min_confidence(0.3).with_bounding_box(true);
//!     let mut surface = ImageSurface::from_image(&image);
//!     for pose in &mut poses {
//!         draw_pose(pose, &config, &mut surface);
//!     }
//!     surface.into_image().save("frame_pose.png")?;
//!     Ok(())
//! }
//! ```
//!
//! Drawing targets the [`Surface`] trait. [`ImageSurface`] rasterizes into an
//! RGBA buffer; [`Recorder`] keeps the issued primitives as a display list
//! that can be inspected or replayed onto another surface.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Draw poses onto an image
//! posenet-overlay render --image frame.jpg --poses poses.json
//!
//! # With bounding boxes and a stricter threshold
//! posenet-overlay render -i frame.jpg -p poses.json --bbox --min-confidence 0.3
//!
//! # Heatmap cells and offset vectors
//! posenet-overlay render -i frame.jpg -p poses.json --heatmap heatmap.json --output-stride 16
//!
//! # Shoulder and elbow angles
//! posenet-overlay angles --poses poses.json
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`keypoints`] | [`Pose`], [`Keypoint`], [`BodyPart`], [`BoundingBox`] |
//! | [`geometry`] | [`compute_angle`], [`bounding_box`] |
//! | [`skeleton`] | Connected parts, adjacent pairs, joint angles |
//! | [`heatmap`] | Heatmap arg-max and offset points |
//! | [`draw`] | Keypoint, skeleton, box, heatmap and offset drawing |
//! | [`canvas`] | Whole-image blits, including async [`render_to_canvas`] |
//! | [`surface`] | [`Surface`] trait, [`ImageSurface`], [`Recorder`] |
//! | [`ui`] | Demo page helpers ([`is_mobile`], loading toggle) |
//! | [`error`] | Error types ([`OverlayError`], [`Result`]) |

// Modules
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod heatmap;
pub mod keypoints;
pub mod skeleton;
pub mod surface;
pub mod ui;

// Re-export main types for convenience
pub use canvas::{PixelSource, render_image_to_canvas, render_to_canvas};
pub use color::Color;
pub use config::RenderConfig;
pub use draw::{
    draw_bounding_box, draw_heatmap_values, draw_keypoints, draw_offset_vectors, draw_point,
    draw_pose, draw_segment, draw_skeleton,
};
pub use error::{OverlayError, Result};
pub use geometry::{bounding_box, compute_angle};
pub use heatmap::{argmax_2d, keypoint_confidences, offset_points};
pub use keypoints::{BodyPart, BoundingBox, Keypoint, PartIndex, Pose, Vector2D};
pub use skeleton::{adjacent_keypoints, joint_angles};
pub use surface::{DrawCommand, ImageSurface, Recorder, Surface};
pub use ui::{is_mobile, toggle_loading_ui};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
