// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use clap::Parser;

use posenet_overlay::cli::args::{Cli, Commands};
use posenet_overlay::cli::render::{run_angles, run_render};
use posenet_overlay::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Render(args) => run_render(&args).await,
        Commands::Angles(args) => run_angles(&args),
    };

    if let Err(e) = outcome {
        error!("{e}");
        process::exit(1);
    }
}
