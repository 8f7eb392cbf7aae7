use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::shared::constants::TARGET_FPS;
use crate::utils::logger;

/// Builds the quiet, non-interactive ffmpeg invocation that rewrites `input`
/// into a constant 10 fps video at `output`.
fn ffmpeg_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-loglevel"),
        OsString::from("error"),
        OsString::from("-hide_banner"),
        OsString::from("-nostdin"),
        OsString::from("-y"),
        OsString::from("-i"),
        input.into(),
        OsString::from("-vf"),
        OsString::from(format!("fps={}", TARGET_FPS)),
        output.into(),
    ]
}

/// Resamples `input` to the fixed target frame rate, writing `output`.
/// Blocks until ffmpeg exits; a missing binary or non-zero exit is surfaced
/// as an error naming the real cause.
pub fn resample_to_target_fps(input: &Path, output: &Path) -> Result<()> {
    logger::debug(&format!(
        "Resampling {} -> {} at {} fps",
        input.display(),
        output.display(),
        TARGET_FPS
    ));

    let status = Command::new("ffmpeg")
        .args(ffmpeg_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .context("Failed to spawn ffmpeg (is it installed and on PATH?)")?;

    if !status.success() {
        bail!(
            "ffmpeg exited with {} while resampling {}",
            status,
            input.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ffmpeg_args_shape() {
        let input = PathBuf::from("clip.mp4");
        let output = PathBuf::from("/tmp/work/temp.mp4");
        let args = ffmpeg_args(&input, &output);

        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "-loglevel",
                "error",
                "-hide_banner",
                "-nostdin",
                "-y",
                "-i",
                "clip.mp4",
                "-vf",
                "fps=10",
                "/tmp/work/temp.mp4",
            ]
        );
    }

    #[test]
    fn test_ffmpeg_args_quiet_and_noninteractive() {
        let args = ffmpeg_args(&PathBuf::from("a.mp4"), &PathBuf::from("b.mp4"));
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert!(rendered.contains(&"-nostdin".to_string()));
        assert!(rendered.contains(&"-hide_banner".to_string()));
        // -y must come before -i so ffmpeg never prompts about overwriting
        let y = rendered.iter().position(|a| a == "-y").unwrap();
        let i = rendered.iter().position(|a| a == "-i").unwrap();
        assert!(y < i);
    }
}
