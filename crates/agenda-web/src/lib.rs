//! HTTP front end for the agenda.
//!
//! A single catch-all route feeds every request through
//! [`request::RequestContext`] and the static [`dispatch::Registry`];
//! there is one axum route, the application's own table decides the
//! rest. Mutations answer JSON envelopes, navigations answer HTML.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  body::Body,
  extract::{Request, State},
  response::Response,
  routing::any,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use agenda_core::store::AgendaStore;

pub mod controllers;
pub mod dispatch;
pub mod error;
pub mod lifecycle;
pub mod request;
pub mod views;

use crate::{dispatch::Registry, error::Error, request::RequestContext};

// ─── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file.
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}

// ─── State ───────────────────────────────────────────────────────────────────

pub struct AppState<S: AgendaStore> {
  pub store:    Arc<S>,
  pub registry: Arc<Registry<S>>,
}

impl<S: AgendaStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      registry: Arc::clone(&self.registry),
    }
  }
}

impl<S> AppState<S>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  /// Build the state and its route table; fails if the table is
  /// incomplete.
  pub fn new(store: S) -> Result<Self, Error> {
    let registry = controllers::registry::<S>();
    registry.verify()?;

    Ok(Self {
      store:    Arc::new(store),
      registry: Arc::new(registry),
    })
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

pub fn router<S>(state: AppState<S>) -> Router
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/", any(handler::<S>))
    .route("/{*path}", any(handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn handler<S>(
  State(state): State<AppState<S>>,
  req: Request<Body>,
) -> Response
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  let ctx = RequestContext::from_request(req).await;
  tracing::debug!(method = %ctx.method, path = %ctx.path, "dispatching");
  dispatch::dispatch(state, ctx).await
}

// ─── Tests ───────────────────────────────────────────────────────────────────
