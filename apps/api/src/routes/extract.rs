use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` with rejections converted into `AppError::Validation`, so a
/// malformed body gets the same 400 `{error, code}` shape as any other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
