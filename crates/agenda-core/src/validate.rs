//! Field-level validation rules.
//!
//! Each entity declares an ordered list of rules. Validation is
//! short-circuit: only the first failing rule's message is reported,
//! and nothing is persisted when any rule fails.

use thiserror::Error;

/// The message of the first failing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// A single field-level predicate. `check` returns `true` when the field
/// set is acceptable.
pub struct Rule<E> {
  pub check:   fn(&E) -> bool,
  pub message: &'static str,
}

/// Run `rules` in declaration order, stopping at the first failure.
pub fn first_failure<E>(
  entity: &E,
  rules: &[Rule<E>],
) -> Result<(), ValidationError> {
  for rule in rules {
    if !(rule.check)(entity) {
      return Err(ValidationError(rule.message));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Dummy {
    a: bool,
    b: bool,
  }

  const RULES: &[Rule<Dummy>] = &[
    Rule { check: |d| d.a, message: "a failed" },
    Rule { check: |d| d.b, message: "b failed" },
  ];

  #[test]
  fn stops_at_first_failing_rule() {
    let result = first_failure(&Dummy { a: false, b: false }, RULES);
    assert_eq!(result, Err(ValidationError("a failed")));
  }

  #[test]
  fn later_rule_reported_when_earlier_passes() {
    let result = first_failure(&Dummy { a: true, b: false }, RULES);
    assert_eq!(result, Err(ValidationError("b failed")));
  }

  #[test]
  fn all_passing_is_ok() {
    assert!(first_failure(&Dummy { a: true, b: true }, RULES).is_ok());
  }
}
