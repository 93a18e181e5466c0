//! Path-to-action resolution and the static controller registry.
//!
//! Routes follow `/{entity}/{action}/{id?}`. The registry maps derived
//! controller names to action tables with a declared parameter count; it
//! replaces the original name-based reflection with a table built (and
//! verified for completeness) at startup. Only concrete controllers are
//! registered, so the shared lifecycle can never be routed to directly.

use std::{collections::HashMap, future::Future, pin::Pin};

use axum::response::{IntoResponse, Response};

use agenda_core::store::AgendaStore;

use crate::{AppState, error::Error, request::RequestContext};

// ─── Route target ────────────────────────────────────────────────────────────

/// The controller/action/id triple derived from a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
  pub controller: String,
  pub action:     String,
  pub id:         Option<String>,
}

impl RouteTarget {
  /// Split a path into `[controller, action, id]` segments with the
  /// original defaults: an empty first segment routes to
  /// `HomeController`, a missing second segment to `index`. Segments
  /// beyond the third are ignored.
  pub fn from_path(path: &str) -> Self {
    let mut segments = path.trim_matches('/').split('/');

    let first = segments.next().unwrap_or_default();
    let controller = if first.is_empty() {
      "HomeController".to_string()
    } else {
      format!("{}Controller", ucfirst(first))
    };

    let action = segments
      .next()
      .map(str::to_owned)
      .unwrap_or_else(|| "index".to_string());
    let id = segments.next().map(str::to_owned);

    Self { controller, action, id }
  }
}

fn ucfirst(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

// ─── Registry ────────────────────────────────────────────────────────────────

pub type ActionFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A registered action: its declared parameter count and the handler.
/// Arity 0 actions are invoked without the path identifier; arity 1
/// actions receive it (possibly absent).
pub struct Action<S: AgendaStore> {
  pub arity: u8,
  pub run:   fn(AppState<S>, RequestContext, Option<String>) -> ActionFuture,
}

pub struct ControllerEntry<S: AgendaStore> {
  pub actions: HashMap<&'static str, Action<S>>,
}

/// The route table: controller name → action table. Built once at
/// startup; never mutated afterwards.
pub struct Registry<S: AgendaStore> {
  controllers: HashMap<&'static str, ControllerEntry<S>>,
}

/// Actions every CRUD controller must expose.
const CRUD_ACTIONS: [&str; 5] = ["add", "edit", "delete", "index", "view"];

impl<S: AgendaStore> Registry<S> {
  pub fn new() -> Self {
    Self { controllers: HashMap::new() }
  }

  pub fn register(&mut self, name: &'static str, entry: ControllerEntry<S>) {
    self.controllers.insert(name, entry);
  }

  pub fn get(&self, name: &str) -> Option<&ControllerEntry<S>> {
    self.controllers.get(name)
  }

  /// Startup completeness check: every controller answers `index`, every
  /// CRUD controller the full action set, and no action declares an
  /// unsupported arity.
  pub fn verify(&self) -> Result<(), Error> {
    for (name, entry) in &self.controllers {
      for (action, a) in &entry.actions {
        if a.arity > 1 {
          return Err(Error::UnexpectedArity {
            action: (*action).to_string(),
          });
        }
      }

      let required: &[&str] = if *name == "HomeController" {
        &["index"]
      } else {
        &CRUD_ACTIONS
      };
      for action in required {
        if !entry.actions.contains_key(action) {
          return Err(Error::ActionNotFound {
            controller: (*name).to_string(),
            action:     (*action).to_string(),
          });
        }
      }
    }
    Ok(())
  }
}

impl<S: AgendaStore> Default for Registry<S> {
  fn default() -> Self {
    Self::new()
  }
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

/// Resolve `ctx.path` against the registry and invoke the action with its
/// declared number of arguments. Routing failures surface as the plain
/// texts of the original application; nothing propagates uncaught.
pub async fn dispatch<S>(state: AppState<S>, ctx: RequestContext) -> Response
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  let target = RouteTarget::from_path(&ctx.path);

  let Some(controller) = state.registry.get(&target.controller) else {
    return Error::ControllerNotFound(target.controller).into_response();
  };

  let Some(action) = controller.actions.get(target.action.as_str()) else {
    return Error::ActionNotFound {
      controller: target.controller,
      action:     target.action,
    }
    .into_response();
  };

  let arity = action.arity;
  let run = action.run;

  match arity {
    0 => run(state.clone(), ctx, None).await,
    1 => run(state.clone(), ctx, target.id).await,
    _ => Error::UnexpectedArity { action: target.action }.into_response(),
  }
}

#[cfg(test)]
mod tests {
  use super::RouteTarget;

  fn target(controller: &str, action: &str, id: Option<&str>) -> RouteTarget {
    RouteTarget {
      controller: controller.to_string(),
      action:     action.to_string(),
      id:         id.map(str::to_owned),
    }
  }

  #[test]
  fn root_path_routes_home_index() {
    assert_eq!(
      RouteTarget::from_path("/"),
      target("HomeController", "index", None)
    );
  }

  #[test]
  fn entity_only_defaults_to_index() {
    assert_eq!(
      RouteTarget::from_path("/pessoa"),
      target("PessoaController", "index", None)
    );
  }

  #[test]
  fn trailing_slash_is_stripped() {
    assert_eq!(
      RouteTarget::from_path("/pessoa/"),
      target("PessoaController", "index", None)
    );
  }

  #[test]
  fn action_without_id() {
    assert_eq!(
      RouteTarget::from_path("/pessoa/add"),
      target("PessoaController", "add", None)
    );
  }

  #[test]
  fn action_with_id() {
    assert_eq!(
      RouteTarget::from_path("/pessoa/edit/42"),
      target("PessoaController", "edit", Some("42"))
    );
  }

  #[test]
  fn first_segment_is_titlecased() {
    assert_eq!(
      RouteTarget::from_path("/contato/delete/7"),
      target("ContatoController", "delete", Some("7"))
    );
  }

  #[test]
  fn extra_segments_are_ignored() {
    assert_eq!(
      RouteTarget::from_path("/pessoa/edit/42/extra/junk"),
      target("PessoaController", "edit", Some("42"))
    );
  }
}
