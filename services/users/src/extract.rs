//! Extractor wrappers whose rejections surface as [`UsersServiceError`],
//! so malformed ids and bodies answer `400` with the service's error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::UsersServiceError;

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(UsersServiceError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(UsersServiceError))]
pub struct AppJson<T>(pub T);
