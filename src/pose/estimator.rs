use anyhow::{bail, Context, Result};
use ndarray::Array4;
use opencv::core::Mat;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::landmark::{FramePose, Landmark, LandmarkIndex};
use super::preprocess::frame_to_tensor;
use crate::shared::constants::{
    MIN_DETECTION_CONFIDENCE, MIN_TRACKING_CONFIDENCE, MODEL_INPUT_SIZE, VALUES_PER_LANDMARK,
};
use crate::utils::logger;

/// Confidence thresholds applied to the model's pose-presence score.
#[derive(Debug, Clone, Copy)]
pub struct EstimatorConfig {
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: MIN_DETECTION_CONFIDENCE,
            min_tracking_confidence: MIN_TRACKING_CONFIDENCE,
        }
    }
}

/// ONNX pose-landmark model run frame-by-frame over a video.
pub struct PoseEstimator {
    session: Session,
    config: EstimatorConfig,
    // Whether the previous frame carried a subject; selects which threshold
    // the next presence score is compared against.
    tracking: bool,
}

impl PoseEstimator {
    pub fn new<P: AsRef<Path>>(model_path: P, config: EstimatorConfig) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .with_context(|| {
                format!(
                    "Failed to load pose model from {}",
                    model_path.as_ref().display()
                )
            })?;

        Ok(Self {
            session,
            config,
            tracking: false,
        })
    }

    /// Runs one frame through the model.
    ///
    /// Returns `None` when the presence score falls below the active
    /// threshold, which the caller records as a missed-detection frame.
    pub fn process(&mut self, frame: &Mat) -> Result<Option<FramePose>> {
        let tensor = frame_to_tensor(frame)?;
        let (raw, presence) = self.infer(tensor)?;

        let threshold = active_threshold(self.tracking, &self.config);
        if presence < threshold {
            logger::debug(&format!(
                "No subject (presence {:.3} < threshold {:.2})",
                presence, threshold
            ));
            self.tracking = false;
            return Ok(None);
        }

        self.tracking = true;
        Ok(Some(decode_landmarks(&raw)?))
    }

    fn infer(&mut self, input: Array4<f32>) -> Result<(Vec<f32>, f32)> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input" => input_tensor])
            .context("Pose inference failed")?;

        // [1, 33 * 5] landmark block: x, y, z, visibility, presence per point
        let raw: ndarray::ArrayViewD<f32> = outputs
            .get("landmarks")
            .context("Model has no 'landmarks' output, wrong weights file?")?
            .try_extract_array()
            .context("Failed to extract landmark tensor")?;
        // [1, 1] pose-presence score, already sigmoid-activated
        let flag: ndarray::ArrayViewD<f32> = outputs
            .get("pose_flag")
            .context("Model has no 'pose_flag' output, wrong weights file?")?
            .try_extract_array()
            .context("Failed to extract pose flag")?;
        let presence = flag
            .iter()
            .next()
            .copied()
            .context("Pose flag output is empty")?;

        Ok((raw.iter().copied().collect(), presence))
    }
}

fn active_threshold(tracking: bool, config: &EstimatorConfig) -> f32 {
    if tracking {
        config.min_tracking_confidence
    } else {
        config.min_detection_confidence
    }
}

/// Maps the raw landmark block to per-keypoint records: x/y/z come out in
/// input-grid pixels and are normalized to 0.0-1.0, visibility is a logit
/// and gets sigmoid-squashed.
///
/// A tensor shorter than the skeleton requires is an error, not a panic; a
/// wrong-but-loadable weights file must not abort a run mid-track.
pub fn decode_landmarks(raw: &[f32]) -> Result<FramePose> {
    let expected = LandmarkIndex::COUNT * VALUES_PER_LANDMARK;
    if raw.len() < expected {
        bail!(
            "Landmark tensor has {} values, expected {}, wrong weights file?",
            raw.len(),
            expected
        );
    }

    let scale = MODEL_INPUT_SIZE as f32;
    let mut pose = Vec::with_capacity(LandmarkIndex::COUNT);

    for i in 0..LandmarkIndex::COUNT {
        let base = i * VALUES_PER_LANDMARK;
        pose.push(Landmark::new(
            raw[base] / scale,
            raw[base + 1] / scale,
            raw[base + 2] / scale,
            sigmoid(raw[base + 3]),
        ));
    }

    Ok(pose)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);
    }

    #[test]
    fn test_active_threshold_switches_with_tracking_state() {
        let config = EstimatorConfig {
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.3,
        };
        assert_eq!(active_threshold(false, &config), 0.5);
        assert_eq!(active_threshold(true, &config), 0.3);
    }

    #[test]
    fn test_decode_landmarks_cardinality_and_scaling() {
        let mut raw = vec![0.0f32; LandmarkIndex::COUNT * VALUES_PER_LANDMARK];
        // First keypoint at the input-grid center with a strong visibility logit
        raw[0] = 128.0;
        raw[1] = 64.0;
        raw[2] = -32.0;
        raw[3] = 10.0;

        let pose = decode_landmarks(&raw).unwrap();
        assert_eq!(pose.len(), LandmarkIndex::COUNT);

        let first = pose[0];
        assert!((first.x - 0.5).abs() < 1e-6);
        assert!((first.y - 0.25).abs() < 1e-6);
        assert!((first.z + 0.125).abs() < 1e-6);
        assert!(first.visibility > 0.999);

        // Untouched keypoints decode to the origin with ~0.5 visibility
        let last = pose[LandmarkIndex::COUNT - 1];
        assert_eq!(last.x, 0.0);
        assert!((last.visibility - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_decode_landmarks_rejects_short_tensor() {
        let err = decode_landmarks(&[0.0f32; 10]).unwrap_err();
        assert!(err.to_string().contains("expected 165"));

        let err = decode_landmarks(&[]).unwrap_err();
        assert!(err.to_string().contains("0 values"));
    }
}
