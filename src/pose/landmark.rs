use crate::shared::constants::LANDMARK_COUNT;
use serde::Serialize;

/// Index of each keypoint in a frame's landmark sequence, fixed by the
/// model's 33-point skeleton definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = LANDMARK_COUNT;
}

/// One tracked body keypoint: normalized image coordinates, depth relative to
/// the hip midpoint, and a visibility confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }
}

/// Landmarks of a single frame. Empty when the model reported no subject.
pub type FramePose = Vec<Landmark>;

/// Ordered per-frame landmark sets for one video, indexed by frame number in
/// capture order. Append-only; serialized once at the end of a run.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PoseTrack {
    frames: Vec<FramePose>,
}

impl PoseTrack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, frame: FramePose) {
        self.frames.push(frame);
    }

    /// Records a frame in which no subject was detected, preserving the
    /// one-entry-per-decoded-frame invariant.
    pub fn push_missed(&mut self) {
        self.frames.push(Vec::new());
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_count() {
        assert_eq!(LandmarkIndex::COUNT, 33);
        assert_eq!(LandmarkIndex::RightFootIndex as usize, 32);
    }

    #[test]
    fn test_track_serializes_as_array_of_arrays() {
        let mut track = PoseTrack::new();
        track.push(vec![Landmark::new(0.25, 0.5, 0.0, 1.0)]);
        track.push_missed();

        let json = track.to_json().unwrap();
        assert_eq!(
            json,
            r#"[[{"x":0.25,"y":0.5,"z":0.0,"visibility":1.0}],[]]"#
        );
    }

    #[test]
    fn test_track_length_matches_pushes() {
        let mut track = PoseTrack::new();
        for _ in 0..5 {
            track.push_missed();
        }
        assert_eq!(track.frame_count(), 5);
    }
}
