use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` that reports malformed bodies as `AppError::Validation` (400)
/// instead of Axum's default 415/422 rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
