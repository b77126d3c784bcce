//! Extractors whose rejections render as failure envelopes.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Form` rejecting with [`AppError::InvalidRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

/// `axum::extract::Path` rejecting with [`AppError::InvalidRequest`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
