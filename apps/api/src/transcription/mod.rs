// Audio transcription: store the upload, re-encode with ffmpeg, send to speech-to-text.

pub mod handlers;
pub mod pipeline;
pub mod transcode;
