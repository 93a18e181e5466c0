//! Integration tests for `SqliteStore` against an in-memory database.

use agenda_core::{Contato, Pessoa, TipoContato, store::AgendaStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn pessoa(nome: &str, cpf: &str) -> Pessoa {
  Pessoa {
    id:   None,
    nome: nome.to_string(),
    cpf:  cpf.to_string(),
  }
}

fn contato(pessoa: Pessoa, descricao: &str, tipo: TipoContato) -> Contato {
  Contato {
    id:        None,
    tipo:      Some(tipo),
    descricao: descricao.to_string(),
    pessoa:    Some(pessoa),
  }
}

// ─── Pessoas ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_pessoa() {
  let s = store().await;

  let saved = s
    .save_pessoa(pessoa("Ana Silva", "52998224725"))
    .await
    .unwrap();
  assert!(saved.id.is_some());

  let fetched = s.get_pessoa(saved.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.nome, "Ana Silva");
  assert_eq!(fetched.cpf, "52998224725");
}

#[tokio::test]
async fn get_pessoa_missing_returns_none() {
  let s = store().await;
  assert!(s.get_pessoa(999).await.unwrap().is_none());
}

#[tokio::test]
async fn save_with_id_updates_in_place() {
  let s = store().await;

  let mut saved = s
    .save_pessoa(pessoa("Ana Silva", "52998224725"))
    .await
    .unwrap();
  let id = saved.id.unwrap();

  saved.nome = "Ana Souza".to_string();
  let updated = s.save_pessoa(saved).await.unwrap();
  assert_eq!(updated.id, Some(id));

  let all = s.list_pessoas().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].nome, "Ana Souza");
}

#[tokio::test]
async fn list_pessoas_ordered_by_nome() {
  let s = store().await;
  s.save_pessoa(pessoa("Carla", "11144477735")).await.unwrap();
  s.save_pessoa(pessoa("Ana", "52998224725")).await.unwrap();
  s.save_pessoa(pessoa("Bruno", "10000000108")).await.unwrap();

  let nomes: Vec<String> = s
    .list_pessoas()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.nome)
    .collect();
  assert_eq!(nomes, ["Ana", "Bruno", "Carla"]);
}

#[tokio::test]
async fn search_pessoas_is_case_insensitive_substring() {
  let s = store().await;
  s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();
  s.save_pessoa(pessoa("Bruno Costa", "11144477735")).await.unwrap();

  let hits = s.search_pessoas("ana").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].nome, "Ana Silva");

  let none = s.search_pessoas("zzz").await.unwrap();
  assert!(none.is_empty());
}

// ─── Contatos ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_contato_with_pessoa_joined() {
  let s = store().await;
  let ana = s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();

  let saved = s
    .save_contato(contato(ana, "ana@example.com", TipoContato::Email))
    .await
    .unwrap();

  let fetched = s.get_contato(saved.id.unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.descricao, "ana@example.com");
  assert_eq!(fetched.tipo, Some(TipoContato::Email));
  assert_eq!(fetched.pessoa.unwrap().nome, "Ana Silva");
}

#[tokio::test]
async fn save_contato_without_pessoa_is_rejected() {
  let s = store().await;
  let orphan = Contato {
    id:        None,
    tipo:      Some(TipoContato::Telefone),
    descricao: "47999990000".to_string(),
    pessoa:    None,
  };
  assert!(s.save_contato(orphan).await.is_err());
}

#[tokio::test]
async fn search_contatos_without_filter_lists_newest_first() {
  let s = store().await;
  let ana = s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();

  s.save_contato(contato(ana.clone(), "47999990000", TipoContato::Telefone))
    .await
    .unwrap();
  s.save_contato(contato(ana, "ana@example.com", TipoContato::Email))
    .await
    .unwrap();

  let all = s.search_contatos(None).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].descricao, "ana@example.com");
  assert_eq!(all[1].descricao, "47999990000");
}

#[tokio::test]
async fn search_contatos_matches_descricao_or_pessoa_nome() {
  let s = store().await;
  let ana = s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();
  let bruno = s.save_pessoa(pessoa("Bruno Costa", "11144477735")).await.unwrap();

  s.save_contato(contato(ana, "ana@example.com", TipoContato::Email))
    .await
    .unwrap();
  s.save_contato(contato(bruno, "47999990000", TipoContato::Telefone))
    .await
    .unwrap();

  let by_nome = s.search_contatos(Some("SILVA")).await.unwrap();
  assert_eq!(by_nome.len(), 1);
  assert_eq!(by_nome[0].descricao, "ana@example.com");

  let by_descricao = s.search_contatos(Some("9999")).await.unwrap();
  assert_eq!(by_descricao.len(), 1);
  assert_eq!(by_descricao[0].descricao, "47999990000");

  // Blank filters behave like no filter at all.
  let blank = s.search_contatos(Some("  ")).await.unwrap();
  assert_eq!(blank.len(), 2);
}

#[tokio::test]
async fn delete_contato_leaves_pessoa_alone() {
  let s = store().await;
  let ana = s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();
  let saved = s
    .save_contato(contato(ana.clone(), "ana@example.com", TipoContato::Email))
    .await
    .unwrap();

  s.delete_contato(saved.id.unwrap()).await.unwrap();

  assert!(s.search_contatos(None).await.unwrap().is_empty());
  assert!(s.get_pessoa(ana.id.unwrap()).await.unwrap().is_some());
}

#[tokio::test]
async fn delete_pessoa_cascades_to_contatos() {
  let s = store().await;
  let ana = s.save_pessoa(pessoa("Ana Silva", "52998224725")).await.unwrap();
  let bruno = s.save_pessoa(pessoa("Bruno Costa", "11144477735")).await.unwrap();

  s.save_contato(contato(ana.clone(), "ana@example.com", TipoContato::Email))
    .await
    .unwrap();
  s.save_contato(contato(ana.clone(), "47999990000", TipoContato::Telefone))
    .await
    .unwrap();
  s.save_contato(contato(bruno, "bruno@example.com", TipoContato::Email))
    .await
    .unwrap();

  s.delete_pessoa(ana.id.unwrap()).await.unwrap();

  let remaining = s.search_contatos(None).await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].descricao, "bruno@example.com");
}
