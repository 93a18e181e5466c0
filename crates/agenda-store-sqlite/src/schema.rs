//! SQL schema for the agenda SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS pessoas (
    pes_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    pes_nome TEXT NOT NULL,
    pes_cpf  TEXT NOT NULL
);

-- Contatos are owned by their pessoa: removing the pessoa removes them.
CREATE TABLE IF NOT EXISTS contatos (
    con_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    con_tipo      INTEGER NOT NULL,   -- 0 = telefone, 1 = email
    con_descricao TEXT NOT NULL,
    pessoa_id     INTEGER NOT NULL
                  REFERENCES pessoas(pes_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS contatos_pessoa_idx ON contatos(pessoa_id);

PRAGMA user_version = 1;
";
