//! Landing page.

use axum::response::{Html, IntoResponse, Response};

use agenda_core::store::AgendaStore;

use crate::{
  AppState,
  request::RequestContext,
  views::{self, Page, PageBody},
};

pub async fn index<S>(_state: AppState<S>, _ctx: RequestContext) -> Response
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  let page = Page {
    titulo:   "Início".to_string(),
    mensagem: None,
    alert:    None,
    body:     PageBody::Home,
  };
  Html(views::render(&page)).into_response()
}
