pub mod estimator;
pub mod landmark;
pub mod preprocess;

pub use estimator::{EstimatorConfig, PoseEstimator};
pub use landmark::{FramePose, Landmark, LandmarkIndex, PoseTrack};
