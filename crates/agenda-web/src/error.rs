//! Web error type and its [`IntoResponse`] mapping.
//!
//! Routing failures keep the original plain-text contract. Unknown
//! controller/action carry a 404 status, a bad arity declaration and
//! store failures a 500.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Controlador '{0}' não encontrado.")]
  ControllerNotFound(String),

  #[error("Método '{action}' não encontrado em {controller}.")]
  ActionNotFound { controller: String, action: String },

  #[error("Método '{action}' com número de parâmetros inesperado.")]
  UnexpectedArity { action: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::ControllerNotFound(_) | Error::ActionNotFound { .. } => {
        StatusCode::NOT_FOUND
      }
      Error::UnexpectedArity { .. } | Error::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, self.to_string()).into_response()
  }
}
