//! Contato — a contact method (phone or email) owned by a pessoa.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
  pessoa::Pessoa,
  validate::{Rule, ValidationError, first_failure},
};

/// The kind of a contato, stored as a boolean column
/// (`false` = telefone, `true` = email).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoContato {
  Telefone,
  Email,
}

impl TipoContato {
  pub fn from_bool(value: bool) -> Self {
    if value { Self::Email } else { Self::Telefone }
  }

  pub fn as_bool(self) -> bool {
    matches!(self, Self::Email)
  }

  /// Display label used in projections and listing rows.
  pub fn label(self) -> &'static str {
    match self {
      Self::Telefone => "Telefone",
      Self::Email => "Email",
    }
  }
}

/// A contact method. Cannot exist without an associated pessoa, and the
/// tipo has no default — it must be set explicitly before persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contato {
  pub id:        Option<i64>,
  pub tipo:      Option<TipoContato>,
  pub descricao: String,
  pub pessoa:    Option<Pessoa>,
}

const RULES: &[Rule<Contato>] = &[
  Rule {
    check:   |c| c.pessoa.is_some(),
    message: "Pessoa é obrigatória!",
  },
  Rule {
    check:   |c| !c.descricao.is_empty(),
    message: "Descrição é obrigatória!",
  },
  Rule {
    check:   |c| c.tipo.is_some(),
    message: "Tipo de contato é obrigatório!",
  },
];

impl Contato {
  /// Run the field rules in declaration order; the first failure wins.
  pub fn validate(&self) -> Result<(), ValidationError> {
    first_failure(self, RULES)
  }

  /// Flat field projection: the pessoa is reduced to its nome (or null).
  pub fn projection(&self) -> serde_json::Value {
    json!({
      "id":        self.id,
      "pessoa":    self.pessoa.as_ref().map(|p| p.nome.clone()),
      "descricao": self.descricao,
      "tipo":      self.tipo.map(TipoContato::label),
    })
  }
}
