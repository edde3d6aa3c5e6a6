// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose drawing routines.
//!
//! Every function here only issues primitives against a [`Surface`]; nothing
//! is returned and nothing fails. Keypoints below threshold, missing body parts
//! and non-finite geometry are skipped rather than reported.

use ndarray::{ArrayView2, ArrayView3};

use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::geometry::bounding_box;
use crate::heatmap::offset_points;
use crate::keypoints::{Keypoint, Pose, Vector2D};
use crate::skeleton::{adjacent_keypoints, attach_joint_angles};
use crate::surface::Surface;

/// Default keypoint, skeleton and heatmap colour.
pub const COLOR: Color = Color::AQUA;
/// Default bounding box colour.
pub const BOUNDING_BOX_COLOR: Color = Color::RED;
/// Stroke width of segments.
pub const LINE_WIDTH: f32 = 2.0;
/// Radius of keypoint dots.
pub const KEYPOINT_RADIUS: f32 = 3.0;
/// Radius of heatmap dots.
pub const HEATMAP_RADIUS: f32 = 5.0;

/// Draw a filled dot at `(x, y)`.
///
/// Coordinates are taken `y` first, matching the model's `(row, column)` output.
pub fn draw_point<S: Surface + ?Sized>(surface: &mut S, y: f32, x: f32, radius: f32, color: Color) {
    surface.fill_circle(Vector2D::new(x, y), radius, color);
}

/// Draw a line between two points, each multiplied by `scale`.
pub fn draw_segment<S: Surface + ?Sized>(
    a: Vector2D,
    b: Vector2D,
    color: Color,
    scale: f32,
    surface: &mut S,
) {
    draw_segment_with_width(a, b, color, scale, LINE_WIDTH, surface);
}

fn draw_segment_with_width<S: Surface + ?Sized>(
    a: Vector2D,
    b: Vector2D,
    color: Color,
    scale: f32,
    width: f32,
    surface: &mut S,
) {
    surface.stroke_line(a.scale(scale), b.scale(scale), width, color);
}

/// Draw a pose skeleton by looking up all adjacent keypoints.
///
/// Before drawing, shoulder and elbow angles are measured and stored on the
/// vertex keypoints' `angle` field (see [`crate::skeleton::JOINTS`]). Joints
/// with a missing part are left alone.
pub fn draw_skeleton<S: Surface + ?Sized>(
    keypoints: &mut [Keypoint],
    min_confidence: f32,
    surface: &mut S,
    scale: f32,
) {
    skeleton_with(keypoints, min_confidence, COLOR, LINE_WIDTH, surface, scale);
}

fn skeleton_with<S: Surface + ?Sized>(
    keypoints: &mut [Keypoint],
    min_confidence: f32,
    color: Color,
    width: f32,
    surface: &mut S,
    scale: f32,
) {
    attach_joint_angles(keypoints, min_confidence);

    for (a, b) in adjacent_keypoints(keypoints, min_confidence) {
        draw_segment_with_width(a.position, b.position, color, scale, width, surface);
    }
}

/// Draw a dot for every keypoint scoring at least `min_confidence`.
pub fn draw_keypoints<S: Surface + ?Sized>(
    keypoints: &[Keypoint],
    min_confidence: f32,
    surface: &mut S,
    scale: f32,
) {
    keypoints_with(keypoints, min_confidence, COLOR, KEYPOINT_RADIUS, surface, scale);
}

fn keypoints_with<S: Surface + ?Sized>(
    keypoints: &[Keypoint],
    min_confidence: f32,
    color: Color,
    radius: f32,
    surface: &mut S,
    scale: f32,
) {
    for keypoint in keypoints {
        if keypoint.score < min_confidence {
            continue;
        }

        let Vector2D { x, y } = keypoint.position;
        draw_point(surface, y * scale, x * scale, radius, color);
    }
}

/// Stroke the bounding box of a pose.
///
/// For a whole person standing in an image the box runs from the nose to one
/// of the ankles. An empty keypoint list draws nothing.
pub fn draw_bounding_box<S: Surface + ?Sized>(keypoints: &[Keypoint], surface: &mut S) {
    bounding_box_with(keypoints, BOUNDING_BOX_COLOR, surface);
}

fn bounding_box_with<S: Surface + ?Sized>(keypoints: &[Keypoint], color: Color, surface: &mut S) {
    if let Some(bbox) = bounding_box(keypoints) {
        surface.stroke_rect(bbox, color);
    }
}

/// Draw keypoints, skeleton and optionally the bounding box of one pose.
///
/// Joint angles are attached to `pose` as in [`draw_skeleton`].
pub fn draw_pose<S: Surface + ?Sized>(pose: &mut Pose, config: &RenderConfig, surface: &mut S) {
    keypoints_with(
        &pose.keypoints,
        config.min_confidence,
        config.color,
        config.keypoint_radius,
        surface,
        config.scale,
    );
    skeleton_with(
        &mut pose.keypoints,
        config.min_confidence,
        config.color,
        config.line_width,
        surface,
        config.scale,
    );
    if config.draw_bounding_box {
        bounding_box_with(&pose.keypoints, config.bounding_box_color, surface);
    }
}

/// Draw heatmap coordinates, one of the model outputs.
///
/// Each `(y, x)` row of `heatmap_values` is multiplied by `output_stride` and
/// drawn as a dot. Rows with a zero coordinate mark "no detection" and are
/// skipped.
pub fn draw_heatmap_values<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    output_stride: u32,
    surface: &mut S,
) {
    heatmap_with(heatmap_values, output_stride, COLOR, HEATMAP_RADIUS, surface);
}

/// [`draw_heatmap_values`] with the colour and dot radius taken from `config`.
pub(crate) fn heatmap_values_with<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    output_stride: u32,
    config: &RenderConfig,
    surface: &mut S,
) {
    let (color, radius) = (config.color, config.heatmap_radius);
    heatmap_with(heatmap_values, output_stride, color, radius, surface);
}

#[allow(clippy::cast_precision_loss)]
fn heatmap_with<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    output_stride: u32,
    color: Color,
    radius: f32,
    surface: &mut S,
) {
    let stride = output_stride as f32;
    for row in heatmap_values.rows() {
        let (Some(&y), Some(&x)) = (row.get(0), row.get(1)) else {
            continue;
        };
        let (point_y, point_x) = (y as f32 * stride, x as f32 * stride);
        if point_x != 0.0 && point_y != 0.0 {
            draw_point(surface, point_y, point_x, radius, color);
        }
    }
}

/// Draw offset vectors, one of the model outputs.
///
/// For each heatmap coordinate a segment runs from the coordinate scaled by
/// `output_stride` to its refined offset point; both ends are then multiplied
/// by `scale`. Zero coordinates are drawn too.
///
/// # Errors
///
/// Returns an error if `offsets` does not match `heatmap_values` (see
/// [`offset_points`]); nothing is drawn in that case.
pub fn draw_offset_vectors<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    offsets: ArrayView3<f32>,
    output_stride: u32,
    scale: f32,
    surface: &mut S,
) -> Result<()> {
    let stroke = (COLOR, LINE_WIDTH);
    offsets_with(heatmap_values, offsets, output_stride, scale, stroke, surface)
}

/// [`draw_offset_vectors`] with colour, stroke width and scale taken from `config`.
pub(crate) fn offset_vectors_with<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    offsets: ArrayView3<f32>,
    output_stride: u32,
    config: &RenderConfig,
    surface: &mut S,
) -> Result<()> {
    let stroke = (config.color, config.line_width);
    offsets_with(heatmap_values, offsets, output_stride, config.scale, stroke, surface)
}

#[allow(clippy::cast_precision_loss)]
fn offsets_with<S: Surface + ?Sized>(
    heatmap_values: ArrayView2<i32>,
    offsets: ArrayView3<f32>,
    output_stride: u32,
    scale: f32,
    (color, width): (Color, f32),
    surface: &mut S,
) -> Result<()> {
    let points = offset_points(heatmap_values, output_stride, offsets)?;
    let stride = output_stride as f32;

    for (coord, point) in heatmap_values.rows().into_iter().zip(points.rows()) {
        let heatmap = Vector2D::new(coord[1] as f32 * stride, coord[0] as f32 * stride);
        let offset = Vector2D::new(point[1], point[0]);
        draw_segment_with_width(heatmap, offset, color, scale, width, surface);
    }
    Ok(())
}
