use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

const AUDIO_PREFIX: &str = "audio_uploads";

/// Builds a unique object key for an uploaded recording, keeping a short
/// alphanumeric extension from the client's file name when there is one.
pub fn audio_object_key(file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{AUDIO_PREFIX}/{}.{ext}", Uuid::new_v4()),
        None => format!("{AUDIO_PREFIX}/{}", Uuid::new_v4()),
    }
}

pub fn public_url(public_base: &str, key: &str) -> String {
    format!("{}/{}", public_base.trim_end_matches('/'), key)
}

/// Uploads `bytes` to `s3://{bucket}/{key}` and returns its public URL.
pub async fn upload_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    public_base: &str,
    key: &str,
    bytes: Bytes,
    content_type: &str,
) -> Result<String> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .with_context(|| format!("S3 upload of {key} failed"))?;

    info!("Uploaded s3://{}/{}", bucket, key);
    Ok(public_url(public_base, key))
}
