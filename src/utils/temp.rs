use crate::shared::constants;
use crate::utils::logger;
use std::path::{Path, PathBuf};

/// Owns the intermediate resampled video and removes it when dropped, so the
/// file does not outlive the run even when the extraction loop faults.
pub struct TempVideo {
    path: PathBuf,
}

impl TempVideo {
    /// Reserves `<tmp_dir>/temp.mp4`. The file itself is created later by the
    /// resampler; Drop tolerates it never having been written.
    pub fn reserve(tmp_dir: &Path) -> Self {
        Self {
            path: tmp_dir.join(constants::TEMP_VIDEO_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempVideo {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => logger::debug(&format!("Removed temp video {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => logger::error(&format!(
                "Failed to remove temp video {}: {}",
                self.path.display(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, File};

    #[test]
    fn test_temp_video_removed_on_drop() {
        let tmp_dir = std::env::temp_dir().join("posetrack_test_temp_guard");
        create_dir_all(&tmp_dir).unwrap();

        let guard = TempVideo::reserve(&tmp_dir);
        File::create(guard.path()).unwrap();
        let path = guard.path().to_path_buf();
        assert!(path.exists());

        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_tolerates_missing_file() {
        let tmp_dir = std::env::temp_dir().join("posetrack_test_temp_guard_missing");
        create_dir_all(&tmp_dir).unwrap();

        let guard = TempVideo::reserve(&tmp_dir);
        assert!(!guard.path().exists());
        drop(guard); // must not panic
    }
}
