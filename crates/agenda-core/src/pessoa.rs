//! Pessoa — a person record with a name and a CPF.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
  cpf,
  validate::{Rule, ValidationError, first_failure},
};

/// A person. `id` is assigned by the store on first save; a pessoa owns
/// its contatos, so deleting one cascades to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pessoa {
  pub id:   Option<i64>,
  pub nome: String,
  pub cpf:  String,
}

const RULES: &[Rule<Pessoa>] = &[
  Rule {
    check:   |p| !p.nome.is_empty(),
    message: "Nome é obrigatório!",
  },
  Rule {
    check:   |p| !p.cpf.is_empty(),
    message: "CPF é obrigatório!",
  },
  Rule {
    check:   |p| cpf::validar(&p.cpf),
    message: "O CPF informado é invalido!",
  },
];

impl Pessoa {
  /// Run the field rules in declaration order; the first failure wins.
  pub fn validate(&self) -> Result<(), ValidationError> {
    first_failure(self, RULES)
  }

  /// Flat field projection returned by the JSON API and listing rows.
  pub fn projection(&self) -> serde_json::Value {
    json!({
      "id":   self.id,
      "nome": self.nome,
      "cpf":  self.cpf,
    })
  }
}
