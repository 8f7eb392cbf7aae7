pub mod validate;

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Instant;

use crate::decoder::VideoDecoder;
use crate::pose::{EstimatorConfig, PoseEstimator, PoseTrack};
use crate::resampler;
use crate::utils::logger;
use crate::utils::temp::TempVideo;

pub struct RunOptions {
    pub video: PathBuf,
    /// Destination for the serialized track; `None` means in-memory only.
    pub output: Option<PathBuf>,
    /// Working directory for the intermediate resampled video.
    pub tmp_dir: PathBuf,
    /// ONNX pose-landmark model weights.
    pub model: PathBuf,
    /// Suppress console progress messages.
    pub silent: bool,
}

lazy_static! {
    static ref INTERRUPTED: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
}

static INTERRUPT_HOOK: Once = Once::new();

fn interrupt_flag() -> Arc<AtomicBool> {
    INTERRUPT_HOOK.call_once(|| {
        let flag = Arc::clone(&INTERRUPTED);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            logger::error(&format!("Failed to install Ctrl-C handler: {}", e));
        }
    });
    Arc::clone(&INTERRUPTED)
}

/// Runs the whole pipeline: validate, resample to 10 fps, extract one
/// landmark set per decoded frame, serialize.
///
/// Returns the serialized track whether or not an output path was given.
/// The temp video is removed on every exit path, including errors, via the
/// `TempVideo` guard.
pub fn run(options: &RunOptions) -> Result<String> {
    validate::check_input_exists(&options.video)?;
    if let Some(output) = &options.output {
        validate::check_output_absent(output)?;
    }

    if !options.silent {
        println!("📽️ Processing video {}...", options.video.display());
    }

    let temp = TempVideo::reserve(&options.tmp_dir);
    resampler::resample_to_target_fps(&options.video, temp.path())?;

    let mut decoder = VideoDecoder::open(temp.path())?;
    let mut estimator = PoseEstimator::new(&options.model, EstimatorConfig::default())?;
    let interrupted = interrupt_flag();

    let started = Instant::now();
    let mut track = PoseTrack::new();
    while let Some(frame) = decoder.read_frame()? {
        if interrupted.load(Ordering::SeqCst) {
            logger::info("Interrupted, stopping after current frame");
            break;
        }
        match estimator.process(&frame)? {
            Some(pose) => track.push(pose),
            None => track.push_missed(),
        }
    }

    logger::info(&format!(
        "Extracted {} frames in {:.2}s (temp video {:.2} fps)",
        track.frame_count(),
        started.elapsed().as_secs_f64(),
        decoder.fps()
    ));
    if track.frame_count() as u64 != decoder.reported_frame_count() {
        logger::debug(&format!(
            "Container reported {} frames, decoded {}",
            decoder.reported_frame_count(),
            track.frame_count()
        ));
    }

    let json = track.to_json().context("Failed to serialize pose track")?;

    if let Some(output) = &options.output {
        std::fs::write(output, &json)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if !options.silent {
            println!("🎉 Pose data successfully saved to {}!", output.display());
        }
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, File};

    #[test]
    fn test_run_rejects_missing_video_without_writes() {
        let dir = std::env::temp_dir().join("posetrack_test_pipeline_missing");
        create_dir_all(&dir).unwrap();

        let options = RunOptions {
            video: dir.join("missing.mp4"),
            output: Some(dir.join("out.json")),
            tmp_dir: dir.clone(),
            model: dir.join("model.onnx"),
            silent: true,
        };

        let err = run(&options).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(!dir.join("out.json").exists());
        assert!(!dir.join("temp.mp4").exists());
    }

    #[test]
    fn test_run_rejects_existing_output_unmodified() {
        let dir = std::env::temp_dir().join("posetrack_test_pipeline_output");
        create_dir_all(&dir).unwrap();
        let video = dir.join("clip.mp4");
        File::create(&video).unwrap();
        let output = dir.join("out.json");
        std::fs::write(&output, "[[]]").unwrap();

        let options = RunOptions {
            video,
            output: Some(output.clone()),
            tmp_dir: dir.clone(),
            model: dir.join("model.onnx"),
            silent: true,
        };

        let err = run(&options).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "[[]]");
        assert!(!dir.join("temp.mp4").exists());
    }
}
