use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Rejections render as a 400 `{ "error": ... }`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Typed path parameters. Rejections render as a 400 `{ "error": ... }`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
