//! Shared CRUD lifecycle.
//!
//! Each entity contributes a [`CrudResource`] describing its texts,
//! persistence calls and form layout; the generic `add`/`edit`/`delete`/
//! `index`/`view` functions here supply the flow. The resource types are
//! never routable on their own, only the concrete controllers built on
//! top of them are registered.

use std::future::Future;

use axum::{
  Json,
  response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use agenda_core::{ValidationError, store::AgendaStore};

use crate::{
  AppState,
  error::Error,
  request::RequestContext,
  views::{self, Field, Page, PageBody},
};

// ─── Envelope ────────────────────────────────────────────────────────────────

/// The uniform JSON reply for mutations and AJAX listings.
#[derive(Debug, Serialize)]
pub struct Envelope {
  pub status:  &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<Value>,
}

impl Envelope {
  pub fn success(message: &str, data: Option<Value>) -> Self {
    Self {
      status: "success",
      message: Some(message.to_string()),
      data,
    }
  }

  pub fn error(message: &str) -> Self {
    Self {
      status:  "error",
      message: Some(message.to_string()),
      data:    None,
    }
  }

  pub fn listing(rows: Vec<Value>) -> Self {
    Self {
      status:  "success",
      message: None,
      data:    Some(Value::Array(rows)),
    }
  }
}

impl IntoResponse for Envelope {
  fn into_response(self) -> Response {
    Json(self).into_response()
  }
}

// ─── Resource contract ───────────────────────────────────────────────────────

/// Everything an entity must provide to ride the shared lifecycle.
pub trait CrudResource<S>: Send + Sync + 'static
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  type Entity: Send + Sync + 'static;

  /// URL segment (`/{SEGMENT}/...`).
  const SEGMENT: &'static str;

  const NOT_FOUND: &'static str;
  const CREATED: &'static str;
  const UPDATED: &'static str;
  const REMOVED: &'static str;

  const ADD_TITLE: &'static str;
  const EDIT_TITLE: &'static str;
  const VIEW_TITLE: &'static str;
  const INDEX_TITLE: &'static str;

  fn blank() -> Self::Entity;
  fn id_of(entity: &Self::Entity) -> Option<i64>;
  fn validate(entity: &Self::Entity) -> Result<(), ValidationError>;
  fn projection(entity: &Self::Entity) -> Value;

  /// `(field key, column label)` pairs for the listing table.
  fn columns() -> Vec<(&'static str, &'static str)>;

  fn load(
    store: &S,
    id: i64,
  ) -> impl Future<Output = Result<Option<Self::Entity>, S::Error>> + Send + '_;

  /// Copy submitted fields onto the entity. Only fields present in the
  /// body are applied, so a partial submit leaves the rest untouched.
  fn apply<'a>(
    store: &'a S,
    entity: &'a mut Self::Entity,
    ctx: &'a RequestContext,
  ) -> impl Future<Output = Result<(), S::Error>> + Send + 'a;

  fn save(
    store: &S,
    entity: Self::Entity,
  ) -> impl Future<Output = Result<Self::Entity, S::Error>> + Send + '_;

  fn remove(
    store: &S,
    id: i64,
  ) -> impl Future<Output = Result<(), S::Error>> + Send + '_;

  fn search<'a>(
    store: &'a S,
    filtro: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Self::Entity>, S::Error>> + Send + 'a;

  /// Form inputs for the entity's current state, in display order.
  fn form_fields<'a>(
    store: &'a S,
    entity: &'a Self::Entity,
  ) -> impl Future<Output = Result<Vec<Field>, S::Error>> + Send + 'a;
}

// ─── Lifecycle actions ───────────────────────────────────────────────────────

/// GET renders a blank form; POST applies the body and submits.
pub async fn add<S, R>(
  state: AppState<S>,
  ctx: RequestContext,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let mut entity = R::blank();

  if ctx.is_post() {
    R::apply(&*state.store, &mut entity, &ctx)
      .await
      .map_err(store_err)?;
    return submit::<S, R>(&state, entity, R::CREATED).await;
  }

  form_page::<S, R>(&state, &entity, R::ADD_TITLE, None, false).await
}

/// GET renders the record's form; POST applies the body over the loaded
/// record and submits. An unknown id yields an error envelope on POST and
/// an error-flagged page on GET.
pub async fn edit<S, R>(
  state: AppState<S>,
  ctx: RequestContext,
  id: Option<String>,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let loaded = lookup::<S, R>(&state, id.as_deref()).await?;

  if ctx.is_post() {
    let Some(mut entity) = loaded else {
      return Ok(Envelope::error(R::NOT_FOUND).into_response());
    };
    R::apply(&*state.store, &mut entity, &ctx)
      .await
      .map_err(store_err)?;
    return submit::<S, R>(&state, entity, R::UPDATED).await;
  }

  match loaded {
    Some(entity) => {
      form_page::<S, R>(&state, &entity, R::EDIT_TITLE, None, false).await
    }
    None => {
      form_page::<S, R>(
        &state,
        &R::blank(),
        R::EDIT_TITLE,
        Some(R::NOT_FOUND),
        false,
      )
      .await
    }
  }
}

pub async fn delete<S, R>(
  state: AppState<S>,
  _ctx: RequestContext,
  id: Option<String>,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let Some(entity) = lookup::<S, R>(&state, id.as_deref()).await? else {
    return Ok(Envelope::error(R::NOT_FOUND).into_response());
  };

  if let Some(id) = R::id_of(&entity) {
    R::remove(&*state.store, id).await.map_err(store_err)?;
  }
  Ok(Envelope::success(R::REMOVED, None).into_response())
}

/// Listing: an AJAX request gets the projected rows as JSON, a plain one
/// the rendered table. `q` filters either way.
pub async fn index<S, R>(
  state: AppState<S>,
  ctx: RequestContext,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let busca = ctx.query_param("q").map(str::to_owned);
  let filtro = busca.as_deref().map(str::trim).filter(|s| !s.is_empty());

  let entities =
    R::search(&*state.store, filtro).await.map_err(store_err)?;
  let linhas: Vec<Value> = entities.iter().map(R::projection).collect();

  if ctx.is_ajax() {
    return Ok(Envelope::listing(linhas).into_response());
  }

  let page = Page {
    titulo:   R::INDEX_TITLE.to_string(),
    mensagem: None,
    alert:    None,
    body:     PageBody::Listing { colunas: R::columns(), linhas, busca },
  };
  Ok(Html(views::render(&page)).into_response())
}

/// Read-only form for a single record.
pub async fn view<S, R>(
  state: AppState<S>,
  _ctx: RequestContext,
  id: Option<String>,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  match lookup::<S, R>(&state, id.as_deref()).await? {
    Some(entity) => {
      form_page::<S, R>(&state, &entity, R::VIEW_TITLE, None, true).await
    }
    None => {
      form_page::<S, R>(
        &state,
        &R::blank(),
        R::VIEW_TITLE,
        Some(R::NOT_FOUND),
        true,
      )
      .await
    }
  }
}

// ─── Shared steps ────────────────────────────────────────────────────────────

/// Validate, persist and report. A validation failure never reaches the
/// store; its message comes back verbatim in an error envelope.
async fn submit<S, R>(
  state: &AppState<S>,
  entity: R::Entity,
  success: &str,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  if let Err(failure) = R::validate(&entity) {
    return Ok(Envelope::error(failure.0).into_response());
  }

  let saved = R::save(&*state.store, entity).await.map_err(store_err)?;
  Ok(
    Envelope::success(success, Some(R::projection(&saved)))
      .into_response(),
  )
}

/// Resolve a raw path id to a record. A missing, non-numeric or unknown
/// id is uniformly "not found".
async fn lookup<S, R>(
  state: &AppState<S>,
  id: Option<&str>,
) -> Result<Option<R::Entity>, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  match id.and_then(parse_id) {
    Some(id) => R::load(&*state.store, id).await.map_err(store_err),
    None => Ok(None),
  }
}

async fn form_page<S, R>(
  state: &AppState<S>,
  entity: &R::Entity,
  titulo: &str,
  mensagem: Option<&str>,
  readonly: bool,
) -> Result<Response, Error>
where
  S: AgendaStore + Clone + Send + Sync + 'static,
  R: CrudResource<S>,
{
  let fields =
    R::form_fields(&*state.store, entity).await.map_err(store_err)?;

  let action = match R::id_of(entity) {
    Some(id) => format!("/{}/edit/{id}", R::SEGMENT),
    None => format!("/{}/add", R::SEGMENT),
  };

  let page = Page {
    titulo:   titulo.to_string(),
    mensagem: mensagem.map(str::to_owned),
    alert:    mensagem.map(|_| "error"),
    body:     PageBody::Form { action, readonly, fields },
  };
  Ok(Html(views::render(&page)).into_response())
}

fn parse_id(raw: &str) -> Option<i64> {
  raw.trim().parse().ok()
}

fn store_err<E>(err: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(err))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn envelope_success_carries_data() {
    let envelope = Envelope::success(
      "Pessoa cadastrada com sucesso!",
      Some(serde_json::json!({"id": 1})),
    );
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Pessoa cadastrada com sucesso!");
    assert_eq!(json["data"]["id"], 1);
  }

  #[test]
  fn envelope_error_omits_data() {
    let envelope = Envelope::error("Pessoa não encontrada");
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["status"], "error");
    assert!(json.get("data").is_none());
  }

  #[test]
  fn listing_has_no_message() {
    let envelope = Envelope::listing(vec![serde_json::json!({"id": 1})]);
    let json = serde_json::to_value(&envelope).unwrap();
    assert!(json.get("message").is_none());
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
  }

  #[test]
  fn id_parsing_tolerates_whitespace_only() {
    assert_eq!(parse_id(" 42 "), Some(42));
    assert_eq!(parse_id("abc"), None);
    assert_eq!(parse_id(""), None);
  }
}
