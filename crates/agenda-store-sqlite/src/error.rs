//! Error type for `agenda-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Saving a contato whose pessoa was never persisted. Validation at the
  /// controller layer catches this before the store is reached.
  #[error("contato sem pessoa associada")]
  ContatoSemPessoa,

  /// Saving a contato with no tipo set.
  #[error("contato sem tipo definido")]
  ContatoSemTipo,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
