//! The `AgendaStore` trait — lookup/search/persist operations per entity.
//!
//! The trait is implemented by storage backends (e.g.
//! `agenda-store-sqlite`). The web layer depends on this abstraction, not
//! on any concrete backend. A single create/update/delete call is atomic
//! at the backend's discretion; there are no multi-entity transactions.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{Contato, Pessoa};

pub trait AgendaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Pessoas ───────────────────────────────────────────────────────────

  /// Retrieve a pessoa by id. Returns `None` if not found.
  fn get_pessoa(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Pessoa>, Self::Error>> + Send + '_;

  /// List all pessoas, ordered by nome.
  fn list_pessoas(
    &self,
  ) -> impl Future<Output = Result<Vec<Pessoa>, Self::Error>> + Send + '_;

  /// Case-insensitive substring search over nome, ordered by nome.
  fn search_pessoas<'a>(
    &'a self,
    nome: &'a str,
  ) -> impl Future<Output = Result<Vec<Pessoa>, Self::Error>> + Send + 'a;

  /// Insert when `id` is `None`, update otherwise. Returns the persisted
  /// row with its id set.
  fn save_pessoa(
    &self,
    pessoa: Pessoa,
  ) -> impl Future<Output = Result<Pessoa, Self::Error>> + Send + '_;

  /// Remove a pessoa and, by composition, every contato that references
  /// it.
  fn delete_pessoa(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Contatos ──────────────────────────────────────────────────────────

  /// Retrieve a contato by id with its pessoa joined. Returns `None` if
  /// not found.
  fn get_contato(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Contato>, Self::Error>> + Send + '_;

  /// `None` lists everything. A filter matches the descricao or the
  /// owning pessoa's nome, case-insensitively. Ordered by id, newest
  /// first.
  fn search_contatos<'a>(
    &'a self,
    filtro: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Contato>, Self::Error>> + Send + 'a;

  /// Insert when `id` is `None`, update otherwise. The contato's pessoa
  /// must already be persisted.
  fn save_contato(
    &self,
    contato: Contato,
  ) -> impl Future<Output = Result<Contato, Self::Error>> + Send + '_;

  fn delete_contato(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
