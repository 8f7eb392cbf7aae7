pub const APP_NAME: &str = "posetrack";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Constant frame rate the source video is resampled to before inference.
pub const TARGET_FPS: u32 = 10;

/// Name of the intermediate resampled video inside the working directory.
pub const TEMP_VIDEO_FILE: &str = "temp.mp4";

pub const DEFAULT_OUTPUT_FILE: &str = "output.json";
pub const DEFAULT_MODEL_FILE: &str = "models/pose_landmark.onnx";

/// Minimum presence score to accept a pose in a frame with no prior subject.
pub const MIN_DETECTION_CONFIDENCE: f32 = 0.5;
/// Minimum presence score to keep a pose once the previous frame had one.
pub const MIN_TRACKING_CONFIDENCE: f32 = 0.5;

/// Side length of the square input tensor the landmark model expects.
pub const MODEL_INPUT_SIZE: i32 = 256;
/// Keypoints per frame, fixed by the model's skeleton definition.
pub const LANDMARK_COUNT: usize = 33;
/// Raw floats per landmark in the model output (x, y, z, visibility, presence).
pub const VALUES_PER_LANDMARK: usize = 5;
