//! Extractors whose rejections surface as [`AppError::Validation`], so a bad
//! body, path or query string gets the same 422 JSON shape as a failed field
//! check.

use axum::extract::{Path, Query};
use axum::Json;
use axum_extra::extract::WithRejection;

use crate::error::AppError;

pub type JsonBody<T> = WithRejection<Json<T>, AppError>;

pub type PathId = WithRejection<Path<i64>, AppError>;

pub type QueryParams<T> = WithRejection<Query<T>, AppError>;
