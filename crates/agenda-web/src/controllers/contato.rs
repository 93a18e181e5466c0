//! Contato CRUD: texts, field mapping (including pessoa resolution) and
//! form layout.

use serde_json::Value;

use agenda_core::{Contato, TipoContato, ValidationError, store::AgendaStore};

use crate::{lifecycle::CrudResource, request::RequestContext, views::Field};

pub struct ContatoResource;

impl<S> CrudResource<S> for ContatoResource
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  type Entity = Contato;

  const SEGMENT: &'static str = "contato";

  const NOT_FOUND: &'static str = "Contato não encontrado";
  const CREATED: &'static str = "Contato cadastrado com sucesso!";
  const UPDATED: &'static str = "Contato atualizado com sucesso!";
  const REMOVED: &'static str = "Contato removido com sucesso!";

  const ADD_TITLE: &'static str = "Cadastro de Contato";
  const EDIT_TITLE: &'static str = "Editar Contato";
  const VIEW_TITLE: &'static str = "Visualizar Contato";
  const INDEX_TITLE: &'static str = "Lista de Contatos";

  fn blank() -> Contato {
    Contato::default()
  }

  fn id_of(contato: &Contato) -> Option<i64> {
    contato.id
  }

  fn validate(contato: &Contato) -> Result<(), ValidationError> {
    contato.validate()
  }

  fn projection(contato: &Contato) -> Value {
    contato.projection()
  }

  fn columns() -> Vec<(&'static str, &'static str)> {
    vec![
      ("id", "ID"),
      ("pessoa", "Pessoa"),
      ("descricao", "Descrição"),
      ("tipo", "Tipo"),
    ]
  }

  async fn load(store: &S, id: i64) -> Result<Option<Contato>, S::Error> {
    store.get_contato(id).await
  }

  async fn apply<'a>(
    store: &'a S,
    contato: &'a mut Contato,
    ctx: &'a RequestContext,
  ) -> Result<(), S::Error> {
    if ctx.has_field("pessoa") {
      contato.pessoa = match ctx.field_id("pessoa") {
        Some(id) => store.get_pessoa(id).await?,
        None => None,
      };
    }
    if let Some(descricao) = ctx.field_str("descricao") {
      contato.descricao = descricao;
    }
    if ctx.has_field("tipo") {
      contato.tipo = tipo_field(ctx);
    }
    Ok(())
  }

  async fn save(store: &S, contato: Contato) -> Result<Contato, S::Error> {
    store.save_contato(contato).await
  }

  async fn remove(store: &S, id: i64) -> Result<(), S::Error> {
    store.delete_contato(id).await
  }

  async fn search<'a>(
    store: &'a S,
    filtro: Option<&'a str>,
  ) -> Result<Vec<Contato>, S::Error> {
    store.search_contatos(filtro).await
  }

  async fn form_fields<'a>(
    store: &'a S,
    contato: &'a Contato,
  ) -> Result<Vec<Field>, S::Error> {
    let pessoas = store
      .list_pessoas()
      .await?
      .into_iter()
      .filter_map(|p| p.id.map(|id| (id.to_string(), p.nome)))
      .collect();

    Ok(vec![
      Field {
        name:    "pessoa",
        label:   "Pessoa",
        value:   contato
          .pessoa
          .as_ref()
          .and_then(|p| p.id)
          .map(|id| id.to_string())
          .unwrap_or_default(),
        options: Some(pessoas),
      },
      Field {
        name:    "descricao",
        label:   "Descrição",
        value:   contato.descricao.clone(),
        options: None,
      },
      Field {
        name:    "tipo",
        label:   "Tipo",
        value:   contato
          .tipo
          .map(|t| if t.as_bool() { "1" } else { "0" })
          .unwrap_or_default()
          .to_string(),
        options: Some(vec![
          ("0".to_string(), "Telefone".to_string()),
          ("1".to_string(), "Email".to_string()),
        ]),
      },
    ])
  }
}

/// An empty select submission or JSON null leaves the tipo unset so the
/// "obrigatório" rule can fire; any other value is coerced.
fn tipo_field(ctx: &RequestContext) -> Option<TipoContato> {
  match ctx.body.get("tipo")? {
    Value::Null => None,
    Value::String(s) if s.trim().is_empty() => None,
    _ => ctx.field_bool("tipo").map(TipoContato::from_bool),
  }
}
