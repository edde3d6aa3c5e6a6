// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Examples:
    posenet-overlay render --image frame.jpg --poses poses.json
    posenet-overlay render -i frame.jpg -p poses.json -o out.png --bbox --min-confidence 0.3
    posenet-overlay render -i frame.jpg -p poses.json --heatmap heatmap.json --output-stride 16
    posenet-overlay render -i small.jpg -p poses.json --scale 2 --color '#e61d5f'
    posenet-overlay angles --poses poses.json"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw poses (and optionally heatmaps) onto an image
    Render(RenderArgs),
    /// Print shoulder and elbow angles of each pose
    Angles(AnglesArgs),
}

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Image to draw on
    #[arg(short, long)]
    pub image: String,

    /// JSON file with PoseNet poses
    #[arg(short, long)]
    pub poses: String,

    /// Output image path [default: runs/overlay/render<N>/<image name>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Minimum keypoint confidence to draw
    #[arg(long, default_value_t = 0.1)]
    pub min_confidence: f32,

    /// Scale applied to keypoint positions
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Also draw each pose's bounding box
    #[arg(long, default_value_t = false)]
    pub bbox: bool,

    /// Colour of keypoints, skeleton, heatmap dots and offset vectors (name, #rgb or #rrggbb)
    #[arg(long, default_value = "aqua")]
    pub color: String,

    /// Heatmap JSON: {"shape": [H, W, K], "data": [...], "offsets"?: {"shape", "data"}}
    #[arg(long)]
    pub heatmap: Option<String>,

    /// Model output stride used to scale heatmap cells to pixels
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    pub output_stride: u32,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the angles command.
#[derive(Args, Debug)]
pub struct AnglesArgs {
    /// JSON file with PoseNet poses
    #[arg(short, long)]
    pub poses: String,

    /// Joint parts must score above this for the angle to be measured
    #[arg(long, default_value_t = 0.1)]
    pub min_confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args_defaults() {
        let args = Cli::parse_from(["app", "render", "--image", "a.jpg", "--poses", "p.json"]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.image, "a.jpg");
                assert_eq!(render_args.poses, "p.json");
                assert!(render_args.output.is_none());
                assert!((render_args.min_confidence - 0.1).abs() < f32::EPSILON);
                assert!((render_args.scale - 1.0).abs() < f32::EPSILON);
                assert_eq!(render_args.color, "aqua");
                assert_eq!(render_args.output_stride, 16);
                assert!(!render_args.bbox);
                assert!(render_args.verbose);
            }
            Commands::Angles(_) => panic!("expected render"),
        }
    }

    #[test]
    fn test_render_args_custom() {
        let args = Cli::parse_from([
            "app",
            "render",
            "-i",
            "frame.png",
            "-p",
            "poses.json",
            "-o",
            "out.png",
            "--bbox",
            "--scale",
            "0.5",
            "--heatmap",
            "heat.json",
            "--output-stride",
            "8",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Render(render_args) => {
                assert_eq!(render_args.output, Some("out.png".to_string()));
                assert!(render_args.bbox);
                assert!((render_args.scale - 0.5).abs() < f32::EPSILON);
                assert_eq!(render_args.heatmap, Some("heat.json".to_string()));
                assert_eq!(render_args.output_stride, 8);
                assert!(!render_args.verbose);
            }
            Commands::Angles(_) => panic!("expected render"),
        }
    }

    #[test]
    fn test_zero_output_stride_rejected() {
        let parsed = Cli::try_parse_from([
            "app",
            "render",
            "-i",
            "a.jpg",
            "-p",
            "p.json",
            "--output-stride",
            "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_angles_args() {
        let args = Cli::parse_from(["app", "angles", "--poses", "p.json", "--min-confidence", "0.4"]);
        match args.command {
            Commands::Angles(angles_args) => {
                assert_eq!(angles_args.poses, "p.json");
                assert!((angles_args.min_confidence - 0.4).abs() < f32::EPSILON);
            }
            Commands::Render(_) => panic!("expected angles"),
        }
    }
}
