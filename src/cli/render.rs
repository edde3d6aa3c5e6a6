// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use serde::Deserialize;

use crate::canvas::render_to_canvas;
use crate::cli::args::{AnglesArgs, RenderArgs};
use crate::cli::logging::set_verbose;
use crate::draw::{draw_pose, heatmap_values_with, offset_vectors_with};
use crate::error::Result;
use crate::heatmap::{RawTensor, argmax_2d};
use crate::keypoints::{BodyPart, Pose};
use crate::skeleton::joint_angles;
use crate::surface::ImageSurface;
use crate::{Color, RenderConfig, VERSION};
use crate::{info, section, success, verbose, warn};

/// Heatmap file: a `[H, W, K]` score tensor with optional `[H, W, 2K]` offsets.
///
/// `{"shape": [H, W, K], "data": [...], "offsets": {"shape": [...], "data": [...]}}`
#[derive(Debug, Deserialize)]
struct HeatmapFile {
    #[serde(flatten)]
    scores: RawTensor,
    #[serde(default)]
    offsets: Option<RawTensor>,
}

/// Run the `render` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or the output
/// cannot be written.
pub async fn run_render(args: &RenderArgs) -> Result<()> {
    set_verbose(args.verbose);
    section!("posenet-overlay v{VERSION}");

    let color: Color = args.color.parse()?;
    let config = RenderConfig::new()
        .with_color(color)
        .with_min_confidence(args.min_confidence)
        .with_scale(args.scale)
        .with_bounding_box(args.bbox);

    let image = image::open(&args.image)?;
    let (width, height) = (image.width(), image.height());
    verbose!("image: {} ({width}x{height})", args.image);

    let mut surface = ImageSurface::new(width, height);
    render_to_canvas(&image.to_rgb8(), &mut surface).await?;

    let mut poses = Pose::load_all(&args.poses)?;
    if poses.is_empty() {
        warn!("'{}' contains no poses", args.poses);
    }
    for (i, pose) in poses.iter_mut().enumerate() {
        draw_pose(pose, &config, &mut surface);
        let drawn = pose
            .keypoints
            .iter()
            .filter(|kp| kp.score >= config.min_confidence)
            .count();
        verbose!(
            "pose {i}: score {:.2}, {drawn}/{} keypoints drawn",
            pose.score,
            pose.keypoints.len()
        );
    }

    if let Some(path) = &args.heatmap {
        let text = fs::read_to_string(path)?;
        let heatmap: HeatmapFile = serde_json::from_str(&text)?;
        let scores = heatmap.scores.into_array3()?;
        let coords = argmax_2d(scores.view())?;
        heatmap_values_with(coords.view(), args.output_stride, &config, &mut surface);

        if let Some(offsets) = heatmap.offsets {
            let offsets = offsets.into_array3()?;
            offset_vectors_with(
                coords.view(),
                offsets.view(),
                args.output_stride,
                &config,
                &mut surface,
            )?;
        }
        verbose!("heatmap: {} keypoint channels from {path}", coords.nrows());
    }

    let output = args
        .output
        .as_ref()
        .map_or_else(|| default_output_path(&args.image), PathBuf::from);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    DynamicImage::ImageRgba8(surface.into_image())
        .to_rgb8()
        .save(&output)?;

    success!(
        "Rendered {} to {}",
        pluralize_pose(poses.len()),
        output.display()
    );
    Ok(())
}

/// Run the `angles` command.
///
/// # Errors
///
/// Returns an error if the pose file cannot be read or parsed.
pub fn run_angles(args: &AnglesArgs) -> Result<()> {
    let poses = Pose::load_all(&args.poses)?;
    for (i, pose) in poses.iter().enumerate() {
        let angles = joint_angles(&pose.keypoints, args.min_confidence);
        info!("pose {i}: {}", format_angle_summary(&angles));
    }
    Ok(())
}

/// Human-readable list of joint angles in degrees.
fn format_angle_summary(angles: &[(BodyPart, f32)]) -> String {
    if angles.is_empty() {
        return "no confident joints".to_string();
    }
    angles
        .iter()
        .map(|(part, radians)| format!("{part} {:.1}°", radians.to_degrees()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn pluralize_pose(count: usize) -> String {
    if count == 1 {
        "1 pose".to_string()
    } else {
        format!("{count} poses")
    }
}

/// `runs/overlay/render<N>/<image file name>`, with a `.png` fallback name.
fn default_output_path(image: &str) -> PathBuf {
    let dir = find_next_run_dir("runs/overlay", "render");
    let name = Path::new(image)
        .file_name()
        .map_or_else(|| PathBuf::from("render.png"), PathBuf::from);
    dir.join(name)
}

/// Find the next available run directory (render, render2, render3, etc.)
fn find_next_run_dir(base: &str, prefix: &str) -> PathBuf {
    let base_path = Path::new(base);

    let first = base_path.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base_path.join(format!("{prefix}{i}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}
