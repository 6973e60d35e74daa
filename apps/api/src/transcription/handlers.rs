//! Axum route handlers for audio transcription.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{audio_object_key, upload_object};
use crate::transcription::pipeline::transcribe_audio;

const FILE_FIELD: &str = "file";
const NO_FILE_MESSAGE: &str = "کوئی فائل اپلوڈ نہیں ہوئی";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub text: String,
    /// Public URL of the stored original recording.
    pub cloudinary_url: String,
}

struct UploadedAudio {
    file_name: Option<String>,
    content_type: String,
    bytes: Bytes,
}

/// Pulls the `file` field out of the form. Other fields are ignored.
async fn read_audio_field(multipart: &mut Multipart) -> Result<Option<UploadedAudio>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(UploadedAudio {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

/// POST /api/transcribe
///
/// Stores the original recording, re-encodes it to MP3 and returns the transcript.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, AppError> {
    let audio = read_audio_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation(NO_FILE_MESSAGE.to_string()))?;

    info!(
        "Transcription upload: {} bytes ({})",
        audio.bytes.len(),
        audio.content_type
    );

    let key = audio_object_key(audio.file_name.as_deref());
    let cloudinary_url = upload_object(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_public_url,
        &key,
        audio.bytes.clone(),
        &audio.content_type,
    )
    .await
    .map_err(|e| AppError::Transcription(format!("{e:#}")))?;

    let text = transcribe_audio(
        &audio.bytes,
        &state.config.temp_dir,
        state.transcoder.as_ref(),
        state.llm.as_ref(),
    )
    .await
    .map_err(|e| AppError::Transcription(e.to_string()))?;

    Ok(Json(TranscribeResponse {
        text,
        cloudinary_url,
    }))
}
