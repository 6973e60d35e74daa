//! Scratch-file lifecycle for one transcription.
//!
//! Input and output files live in a per-request directory that is removed
//! before returning, whether transcoding and speech-to-text succeeded or not.

use std::path::Path;

use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{LanguageModel, LlmError};
use crate::transcription::transcode::{AudioTranscoder, TranscodeError};

const INPUT_FILE: &str = "input";
const OUTPUT_FILE: &str = "output.mp3";

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),

    #[error("transcode failed: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("speech-to-text failed: {0}")]
    SpeechToText(#[from] LlmError),
}

/// Transcodes `audio` and sends it to the speech-to-text provider.
pub async fn transcribe_audio(
    audio: &[u8],
    scratch_root: &Path,
    transcoder: &dyn AudioTranscoder,
    stt: &dyn LanguageModel,
) -> Result<String, TranscriptionError> {
    let scratch = tempfile::Builder::new()
        .prefix("transcribe-")
        .tempdir_in(scratch_root)?;
    debug!("Transcription scratch dir: {}", scratch.path().display());

    let result = run_in(&scratch, audio, transcoder, stt).await;

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!(
            "Failed to remove transcription scratch dir {}: {e}",
            scratch_path.display()
        );
    }

    result
}

async fn run_in(
    scratch: &TempDir,
    audio: &[u8],
    transcoder: &dyn AudioTranscoder,
    stt: &dyn LanguageModel,
) -> Result<String, TranscriptionError> {
    let input = scratch.path().join(INPUT_FILE);
    let output = scratch.path().join(OUTPUT_FILE);

    tokio::fs::write(&input, audio).await?;
    transcoder.transcode(&input, &output).await?;
    Ok(stt.transcribe(&output).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BrokenTranscoder, CopyTranscoder, FakeModel};

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_success_returns_text_and_removes_scratch_files() {
        let root = tempfile::tempdir().unwrap();
        let model = FakeModel::echo().with_transcript("میں کام ڈھونڈ رہا ہوں");

        let text = transcribe_audio(b"RIFF....WAVE", root.path(), &CopyTranscoder, &model)
            .await
            .unwrap();

        assert_eq!(text, "میں کام ڈھونڈ رہا ہوں");
        let sent = model.transcribed_paths();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].ends_with(OUTPUT_FILE));
        assert!(!sent[0].exists());
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_speech_to_text_failure_still_removes_scratch_files() {
        let root = tempfile::tempdir().unwrap();
        let model = FakeModel::echo().with_failing_transcription();

        let result = transcribe_audio(b"audio", root.path(), &CopyTranscoder, &model).await;

        assert!(matches!(result, Err(TranscriptionError::SpeechToText(_))));
        assert!(!model.transcribed_paths()[0].exists());
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_transcode_failure_skips_upload_and_removes_scratch_files() {
        let root = tempfile::tempdir().unwrap();
        let model = FakeModel::echo();

        let result = transcribe_audio(b"audio", root.path(), &BrokenTranscoder, &model).await;

        assert!(matches!(result, Err(TranscriptionError::Transcode(_))));
        assert!(model.transcribed_paths().is_empty());
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_concurrent_requests_use_separate_scratch_dirs() {
        let root = tempfile::tempdir().unwrap();
        let model = FakeModel::echo().with_transcript("ok");

        let (a, b) = tokio::join!(
            transcribe_audio(b"first", root.path(), &CopyTranscoder, &model),
            transcribe_audio(b"second", root.path(), &CopyTranscoder, &model),
        );

        assert!(a.is_ok() && b.is_ok());
        let sent = model.transcribed_paths();
        assert_eq!(sent.len(), 2);
        assert_ne!(sent[0].parent(), sent[1].parent());
        assert_eq!(entries(root.path()), 0);
    }

    #[tokio::test]
    async fn test_missing_scratch_root_is_scratch_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");

        let result =
            transcribe_audio(b"audio", &missing, &CopyTranscoder, &FakeModel::echo()).await;

        assert!(matches!(result, Err(TranscriptionError::Scratch(_))));
    }
}
