//! CPF check-digit validation.
//!
//! A CPF is an 11-digit identifier whose last two digits are check digits
//! computed with a weighted modulo-11 sum over the preceding digits. Pure
//! function: same input, same verdict, no I/O.

/// Validate a CPF. Punctuated input is accepted; all non-digit characters
/// are stripped before checking.
pub fn validar(cpf: &str) -> bool {
  let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

  if digits.len() != 11 {
    return false;
  }

  // Sequences like 111.111.111-11 satisfy the checksum but are reserved
  // as invalid.
  if digits.iter().all(|&d| d == digits[0]) {
    return false;
  }

  // Positions 9 and 10 hold the first and second check digits.
  for t in [9usize, 10] {
    let soma: u32 = (0..t)
      .map(|i| digits[i] * (t as u32 + 1 - i as u32))
      .sum();

    let mut digito = (soma * 10) % 11;
    if digito == 10 {
      digito = 0;
    }

    if digits[t] != digito {
      return false;
    }
  }

  true
}
