use clap::Parser;
use std::path::PathBuf;

use posetrack::pipeline::{self, RunOptions};
use posetrack::shared::constants;
use posetrack::utils;

#[derive(Parser)]
#[command(author, version, about = "Extract per-frame pose landmarks from a video", long_about = None)]
struct Cli {
    /// Source video file
    #[arg(short = 'i', long)]
    video: PathBuf,
    /// Destination for the serialized pose track
    #[arg(short, long, default_value = constants::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,
    /// Suppress console progress messages
    #[arg(short, long, default_value_t = false)]
    silent: bool,
    /// Working directory for the intermediate resampled video
    #[arg(short, long, default_value = ".")]
    tmp_dir: PathBuf,
    /// ONNX pose-landmark model weights
    #[arg(short, long, default_value = constants::DEFAULT_MODEL_FILE)]
    model: PathBuf,
}

fn main() {
    utils::logger::init();

    let cli = Cli::parse();
    let options = RunOptions {
        video: cli.video,
        output: Some(cli.output),
        tmp_dir: cli.tmp_dir,
        model: cli.model,
        silent: cli.silent,
    };

    if let Err(e) = pipeline::run(&options) {
        utils::logger::error(&format!("{:#}", e));
        if !options.silent {
            eprintln!("🛑 {:#}", e);
        }
        std::process::exit(1);
    }
}
