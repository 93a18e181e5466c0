//! Core types and trait definitions for the agenda record store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contato;
pub mod cpf;
pub mod pessoa;
pub mod store;
pub mod validate;

pub use contato::{Contato, TipoContato};
pub use pessoa::Pessoa;
pub use validate::ValidationError;
