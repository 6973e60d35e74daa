use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Keep only the tail of ffmpeg's stderr in errors; the banner is noise.
const STDERR_TAIL_BYTES: usize = 512;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("could not run transcoder: {0}")]
    Io(#[from] std::io::Error),

    #[error("transcoder timed out after {0:?}")]
    Timeout(Duration),

    #[error("transcoder exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}

/// Re-encodes an audio file into the format the speech-to-text provider accepts.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}

/// Runs the local `ffmpeg` binary to produce an MP3.
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> Self {
        Self {
            ffmpeg_path,
            timeout,
        }
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        let child = Command::new(&self.ffmpeg_path)
            .arg("-hide_banner")
            .arg("-nostdin")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-vn", "-codec:a", "libmp3lame", "-f", "mp3"])
            .arg(output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Dropping the future on timeout drops the child, which kills it.
        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TranscodeError::Timeout(self.timeout))??;

        if result.status.success() {
            Ok(())
        } else {
            Err(TranscodeError::Failed {
                code: result.status.code(),
                stderr: stderr_tail(&result.stderr),
            })
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= STDERR_TAIL_BYTES {
        return text.to_string();
    }
    let mut start = text.len() - STDERR_TAIL_BYTES;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text[start..].to_string()
}
