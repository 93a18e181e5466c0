//! [`SqliteStore`] — the SQLite implementation of [`AgendaStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use agenda_core::{
  Contato, Pessoa, TipoContato,
  store::AgendaStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An agenda store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

const CONTATO_SELECT: &str = "
  SELECT c.con_id, c.con_tipo, c.con_descricao,
         p.pes_id, p.pes_nome, p.pes_cpf
    FROM contatos c
    LEFT JOIN pessoas p ON p.pes_id = c.pessoa_id";

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

fn pessoa_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pessoa> {
  Ok(Pessoa {
    id:   Some(row.get(0)?),
    nome: row.get(1)?,
    cpf:  row.get(2)?,
  })
}

fn contato_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contato> {
  let pessoa = match row.get::<_, Option<i64>>(3)? {
    Some(pes_id) => Some(Pessoa {
      id:   Some(pes_id),
      nome: row.get(4)?,
      cpf:  row.get(5)?,
    }),
    None => None,
  };

  Ok(Contato {
    id:        Some(row.get(0)?),
    tipo:      Some(TipoContato::from_bool(row.get(1)?)),
    descricao: row.get(2)?,
    pessoa,
  })
}

fn like_pattern(text: &str) -> String {
  format!("%{}%", text.trim().to_lowercase())
}

// ─── AgendaStore impl ────────────────────────────────────────────────────────

impl AgendaStore for SqliteStore {
  type Error = Error;

  // ── Pessoas ───────────────────────────────────────────────────────────

  async fn get_pessoa(&self, id: i64) -> Result<Option<Pessoa>> {
    let pessoa = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT pes_id, pes_nome, pes_cpf FROM pessoas WHERE pes_id = ?1",
              rusqlite::params![id],
              pessoa_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(pessoa)
  }

  async fn list_pessoas(&self) -> Result<Vec<Pessoa>> {
    let pessoas = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT pes_id, pes_nome, pes_cpf FROM pessoas ORDER BY pes_nome ASC",
        )?;
        let rows = stmt
          .query_map([], pessoa_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(pessoas)
  }

  async fn search_pessoas(&self, nome: &str) -> Result<Vec<Pessoa>> {
    let pattern = like_pattern(nome);

    let pessoas = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT pes_id, pes_nome, pes_cpf FROM pessoas
            WHERE LOWER(pes_nome) LIKE ?1
            ORDER BY pes_nome ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], pessoa_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(pessoas)
  }

  async fn save_pessoa(&self, pessoa: Pessoa) -> Result<Pessoa> {
    let mut pessoa = pessoa;
    let nome = pessoa.nome.clone();
    let cpf = pessoa.cpf.clone();

    match pessoa.id {
      Some(id) => {
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "UPDATE pessoas SET pes_nome = ?1, pes_cpf = ?2 WHERE pes_id = ?3",
              rusqlite::params![nome, cpf, id],
            )?;
            Ok(())
          })
          .await?;
      }
      None => {
        let id = self
          .conn
          .call(move |conn| {
            conn.execute(
              "INSERT INTO pessoas (pes_nome, pes_cpf) VALUES (?1, ?2)",
              rusqlite::params![nome, cpf],
            )?;
            Ok(conn.last_insert_rowid())
          })
          .await?;
        pessoa.id = Some(id);
      }
    }

    Ok(pessoa)
  }

  async fn delete_pessoa(&self, id: i64) -> Result<()> {
    // Contatos go with the pessoa via ON DELETE CASCADE.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM pessoas WHERE pes_id = ?1",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Contatos ──────────────────────────────────────────────────────────

  async fn get_contato(&self, id: i64) -> Result<Option<Contato>> {
    let contato = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{CONTATO_SELECT} WHERE c.con_id = ?1"),
              rusqlite::params![id],
              contato_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(contato)
  }

  async fn search_contatos(&self, filtro: Option<&str>) -> Result<Vec<Contato>> {
    let pattern = filtro
      .map(str::trim)
      .filter(|q| !q.is_empty())
      .map(like_pattern);

    let contatos = self
      .conn
      .call(move |conn| {
        let rows = if let Some(pattern) = pattern {
          let mut stmt = conn.prepare(&format!(
            "{CONTATO_SELECT}
              WHERE LOWER(c.con_descricao) LIKE ?1 OR LOWER(p.pes_nome) LIKE ?1
              ORDER BY c.con_id DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![pattern], contato_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt =
            conn.prepare(&format!("{CONTATO_SELECT} ORDER BY c.con_id DESC"))?;
          stmt
            .query_map([], contato_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;
    Ok(contatos)
  }

  async fn save_contato(&self, contato: Contato) -> Result<Contato> {
    let mut contato = contato;

    let pessoa_id = contato
      .pessoa
      .as_ref()
      .and_then(|p| p.id)
      .ok_or(Error::ContatoSemPessoa)?;
    let tipo = contato.tipo.ok_or(Error::ContatoSemTipo)?.as_bool();
    let descricao = contato.descricao.clone();

    match contato.id {
      Some(id) => {
        self
          .conn
          .call(move |conn| {
            conn.execute(
              "UPDATE contatos
                  SET con_tipo = ?1, con_descricao = ?2, pessoa_id = ?3
                WHERE con_id = ?4",
              rusqlite::params![tipo, descricao, pessoa_id, id],
            )?;
            Ok(())
          })
          .await?;
      }
      None => {
        let id = self
          .conn
          .call(move |conn| {
            conn.execute(
              "INSERT INTO contatos (con_tipo, con_descricao, pessoa_id)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![tipo, descricao, pessoa_id],
            )?;
            Ok(conn.last_insert_rowid())
          })
          .await?;
        contato.id = Some(id);
      }
    }

    Ok(contato)
  }

  async fn delete_contato(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM contatos WHERE con_id = ?1",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
