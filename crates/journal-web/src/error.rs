//! Web-layer error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("unsupported model type: {0:?}")]
  UnsupportedType(String),
  #[error("{0}")]
  NotFound(String),
  #[error("render error: {0}")]
  Render(#[from] std::io::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<journal_core::Error> for Error {
  fn from(e: journal_core::Error) -> Self {
    match e {
      journal_core::Error::UnsupportedType(name) => Self::UnsupportedType(name),
      e @ journal_core::Error::NotFound { .. } => Self::NotFound(e.to_string()),
      other => Self::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"journal\""),
        );
        res
      }
      Error::UnsupportedType(name) => {
        tracing::debug!(model_type = %name, "rejected detail request");
        (
          StatusCode::BAD_REQUEST,
          format!("Model type {name} does not support timeline display"),
        )
          .into_response()
      }
      Error::NotFound(msg) => {
        tracing::debug!(%msg, "detail record not found");
        (StatusCode::NOT_FOUND, msg).into_response()
      }
      Error::Render(e) => {
        tracing::error!(error = %e, "failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
