use anyhow::{anyhow, Result};
use opencv::{prelude::*, videoio};
use std::path::Path;

use crate::utils::logger;

/// Sequential frame source over a video file, backed by OpenCV.
///
/// CAP_ANY lets OpenCV pick the platform backend (AVFoundation on macOS,
/// Media Foundation on Windows, V4L2/GStreamer on Linux).
pub struct VideoDecoder {
    capture: videoio::VideoCapture,
    fps: f64,
    frame_count: u64,
}

impl VideoDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Video path is not valid UTF-8: {:?}", path))?;

        let capture = videoio::VideoCapture::from_file(path_str, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            let err_msg = format!("Failed to open video file: {}", path_str);
            logger::error(&err_msg);
            return Err(anyhow!(err_msg));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as u64;
        logger::debug(&format!(
            "Opened {} ({} frames reported, {:.2} fps)",
            path_str, frame_count, fps
        ));

        Ok(Self {
            capture,
            fps,
            frame_count,
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Frame count as reported by the container; advisory only, the loop
    /// relies on `read_frame` returning `None` at exhaustion.
    pub fn reported_frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Reads the next frame in BGR channel order. `None` signals exhaustion.
    pub fn read_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? {
            return Ok(None);
        }
        if frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}
