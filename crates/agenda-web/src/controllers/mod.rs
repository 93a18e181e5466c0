//! Concrete controllers and the route table they populate.
//!
//! Each CRUD controller is a thin registration of the shared lifecycle
//! over one [`CrudResource`]; nothing else is routable.

use std::collections::HashMap;

use axum::response::IntoResponse as _;

use agenda_core::store::AgendaStore;

use crate::{
  dispatch::{Action, ControllerEntry, Registry},
  lifecycle::{self, CrudResource},
};

pub mod contato;
pub mod home;
pub mod pessoa;

pub use contato::ContatoResource;
pub use pessoa::PessoaResource;

/// Build the full route table. [`Registry::verify`] is the caller's job,
/// done once at startup.
pub fn registry<S>() -> Registry<S>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  let mut registry = Registry::new();
  registry.register("HomeController", home_controller());
  registry
    .register("PessoaController", crud_controller::<S, PessoaResource>());
  registry
    .register("ContatoController", crud_controller::<S, ContatoResource>());
  registry
}

fn home_controller<S>() -> ControllerEntry<S>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  let mut actions = HashMap::new();
  actions.insert("index", Action {
    arity: 0,
    run:   |state, ctx, _| Box::pin(home::index(state, ctx)),
  });
  ControllerEntry { actions }
}

fn crud_controller<S, R>() -> ControllerEntry<S>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let mut actions = HashMap::new();

  actions.insert("add", Action {
    arity: 0,
    run:   |state, ctx, _| {
      Box::pin(async move {
        lifecycle::add::<S, R>(state, ctx)
          .await
          .unwrap_or_else(|e| e.into_response())
      })
    },
  });
  actions.insert("edit", Action {
    arity: 1,
    run:   |state, ctx, id| {
      Box::pin(async move {
        lifecycle::edit::<S, R>(state, ctx, id)
          .await
          .unwrap_or_else(|e| e.into_response())
      })
    },
  });
  actions.insert("delete", Action {
    arity: 1,
    run:   |state, ctx, id| {
      Box::pin(async move {
        lifecycle::delete::<S, R>(state, ctx, id)
          .await
          .unwrap_or_else(|e| e.into_response())
      })
    },
  });
  actions.insert("index", Action {
    arity: 0,
    run:   |state, ctx, _| {
      Box::pin(async move {
        lifecycle::index::<S, R>(state, ctx)
          .await
          .unwrap_or_else(|e| e.into_response())
      })
    },
  });
  actions.insert("view", Action {
    arity: 1,
    run:   |state, ctx, id| {
      Box::pin(async move {
        lifecycle::view::<S, R>(state, ctx, id)
          .await
          .unwrap_or_else(|e| e.into_response())
      })
    },
  });

  ControllerEntry { actions }
}
