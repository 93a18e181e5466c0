//! Pessoa CRUD: texts, field mapping and form layout.

use serde_json::Value;

use agenda_core::{Pessoa, ValidationError, store::AgendaStore};

use crate::{lifecycle::CrudResource, request::RequestContext, views::Field};

pub struct PessoaResource;

impl<S> CrudResource<S> for PessoaResource
where
  S: AgendaStore + Clone + Send + Sync + 'static,
{
  type Entity = Pessoa;

  const SEGMENT: &'static str = "pessoa";

  const NOT_FOUND: &'static str = "Pessoa não encontrada";
  const CREATED: &'static str = "Pessoa cadastrada com sucesso!";
  const UPDATED: &'static str = "Pessoa atualizada com sucesso!";
  const REMOVED: &'static str = "Pessoa removida com sucesso!";

  const ADD_TITLE: &'static str = "Cadastro de Pessoa";
  const EDIT_TITLE: &'static str = "Editar Pessoa";
  const VIEW_TITLE: &'static str = "Visualizar Pessoa";
  const INDEX_TITLE: &'static str = "Lista de Pessoas";

  fn blank() -> Pessoa {
    Pessoa::default()
  }

  fn id_of(pessoa: &Pessoa) -> Option<i64> {
    pessoa.id
  }

  fn validate(pessoa: &Pessoa) -> Result<(), ValidationError> {
    pessoa.validate()
  }

  fn projection(pessoa: &Pessoa) -> Value {
    pessoa.projection()
  }

  fn columns() -> Vec<(&'static str, &'static str)> {
    vec![("id", "ID"), ("nome", "Nome"), ("cpf", "CPF")]
  }

  async fn load(store: &S, id: i64) -> Result<Option<Pessoa>, S::Error> {
    store.get_pessoa(id).await
  }

  async fn apply<'a>(
    _store: &'a S,
    pessoa: &'a mut Pessoa,
    ctx: &'a RequestContext,
  ) -> Result<(), S::Error> {
    if let Some(nome) = ctx.field_str("nome") {
      pessoa.nome = nome;
    }
    if let Some(cpf) = ctx.field_str("cpf") {
      pessoa.cpf = cpf;
    }
    Ok(())
  }

  async fn save(store: &S, pessoa: Pessoa) -> Result<Pessoa, S::Error> {
    store.save_pessoa(pessoa).await
  }

  async fn remove(store: &S, id: i64) -> Result<(), S::Error> {
    store.delete_pessoa(id).await
  }

  async fn search<'a>(
    store: &'a S,
    filtro: Option<&'a str>,
  ) -> Result<Vec<Pessoa>, S::Error> {
    match filtro {
      Some(nome) => store.search_pessoas(nome).await,
      None => store.list_pessoas().await,
    }
  }

  async fn form_fields<'a>(
    _store: &'a S,
    pessoa: &'a Pessoa,
  ) -> Result<Vec<Field>, S::Error> {
    Ok(vec![
      Field {
        name:    "nome",
        label:   "Nome",
        value:   pessoa.nome.clone(),
        options: None,
      },
      Field {
        name:    "cpf",
        label:   "CPF",
        value:   pessoa.cpf.clone(),
        options: None,
      },
    ])
  }
}
