// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Heatmap and offset-vector decoding.
//!
//! A PoseNet model emits, per output cell, a score for each of the `K`
//! keypoints (`[H, W, K]`) and a 2D offset for each keypoint (`[H, W, 2K]`,
//! y-offsets in channels `0..K`, x-offsets in `K..2K`). Heatmap coordinates
//! are `[K, 2]` arrays of `(y, x)` cells; multiplying by the output stride and
//! adding the offset gives a pixel position.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use serde::Deserialize;

use crate::error::{OverlayError, Result};

/// Per-keypoint `(y, x)` cell of the highest heatmap score.
///
/// Ties resolve to the first cell in row-major order.
///
/// # Errors
///
/// Returns [`OverlayError::Shape`] if the heatmap has no cells.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn argmax_2d(scores: ArrayView3<f32>) -> Result<Array2<i32>> {
    let (height, width, num_keypoints) = scores.dim();
    if height == 0 || width == 0 {
        return Err(OverlayError::Shape(format!(
            "heatmap must have at least one cell, got [{height}, {width}, {num_keypoints}]"
        )));
    }

    let mut coords = Array2::<i32>::zeros((num_keypoints, 2));
    for k in 0..num_keypoints {
        let mut best = (0, 0);
        let mut best_score = f32::NEG_INFINITY;
        for ((y, x), &score) in scores.index_axis(ndarray::Axis(2), k).indexed_iter() {
            if score > best_score {
                best_score = score;
                best = (y, x);
            }
        }
        coords[[k, 0]] = best.0 as i32;
        coords[[k, 1]] = best.1 as i32;
    }
    Ok(coords)
}

/// Heatmap score at each keypoint's coordinate.
///
/// # Errors
///
/// Returns [`OverlayError::Shape`] if the arrays disagree on `K` or a
/// coordinate falls outside the heatmap.
pub fn keypoint_confidences(scores: ArrayView3<f32>, coords: ArrayView2<i32>) -> Result<Vec<f32>> {
    let (height, width, num_keypoints) = scores.dim();
    check_coords(coords, num_keypoints)?;

    (0..num_keypoints)
        .map(|k| {
            let (y, x) = cell(coords, k, height, width)?;
            Ok(scores[[y, x, k]])
        })
        .collect()
}

/// Refine heatmap coordinates into pixel positions.
///
/// Each row becomes `coord * output_stride + offset`, read from `offsets` at
/// that coordinate. The result is `[K, 2]` rows of `(y, x)` pixels.
///
/// # Errors
///
/// Returns [`OverlayError::Shape`] if `offsets` does not have `2K` channels or
/// a coordinate falls outside it.
#[allow(clippy::cast_precision_loss)]
pub fn offset_points(
    coords: ArrayView2<i32>,
    output_stride: u32,
    offsets: ArrayView3<f32>,
) -> Result<Array2<f32>> {
    let (height, width, channels) = offsets.dim();
    let num_keypoints = coords.nrows();
    check_coords(coords, channels / 2)?;
    if channels != num_keypoints * 2 {
        return Err(OverlayError::Shape(format!(
            "offsets need {} channels for {num_keypoints} keypoints, got {channels}",
            num_keypoints * 2
        )));
    }

    let stride = output_stride as f32;
    let mut points = Array2::<f32>::zeros((num_keypoints, 2));
    for k in 0..num_keypoints {
        let (y, x) = cell(coords, k, height, width)?;
        points[[k, 0]] = y as f32 * stride + offsets[[y, x, k]];
        points[[k, 1]] = x as f32 * stride + offsets[[y, x, k + num_keypoints]];
    }
    Ok(points)
}

fn check_coords(coords: ArrayView2<i32>, num_keypoints: usize) -> Result<()> {
    if coords.dim() != (num_keypoints, 2) {
        let (rows, cols) = coords.dim();
        return Err(OverlayError::Shape(format!(
            "expected heatmap coordinates of shape [{num_keypoints}, 2], got [{rows}, {cols}]"
        )));
    }
    Ok(())
}

fn cell(coords: ArrayView2<i32>, k: usize, height: usize, width: usize) -> Result<(usize, usize)> {
    let (y, x) = (coords[[k, 0]], coords[[k, 1]]);
    match (usize::try_from(y), usize::try_from(x)) {
        (Ok(yu), Ok(xu)) if yu < height && xu < width => Ok((yu, xu)),
        _ => Err(OverlayError::Shape(format!(
            "keypoint {k} at cell ({y}, {x}) is outside the {height}x{width} grid"
        ))),
    }
}

/// A dense tensor as stored in JSON: `{"shape": [H, W, C], "data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl RawTensor {
    /// Reshape into a row-major `[H, W, C]` array.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Shape`] if the shape is not rank 3 or does not
    /// match the data length.
    pub fn into_array3(self) -> Result<Array3<f32>> {
        let [h, w, c] = self.shape[..] else {
            return Err(OverlayError::Shape(format!(
                "expected a rank-3 tensor, got shape {:?}",
                self.shape
            )));
        };
        Ok(Array3::from_shape_vec((h, w, c), self.data)?)
    }
}
