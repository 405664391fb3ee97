//! Identity number checksum validation and redundant-field derivation.
//!
//! The national identity number is 13 digits: birth date (YYMMDD), a
//! sex digit, three sequence digits, a citizenship digit, a race-era
//! filler digit and a Luhn-style check digit. Because the number is
//! checksummed it is treated as more authoritative than free-text
//! matches for the fields it encodes.

use tracing::debug;

use crate::error::IdNumberError;

/// Number of digits in a national identity number.
pub const ID_NUMBER_LENGTH: usize = 13;

/// Fields derivable from an identity number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNumberInfo {
    /// Date of birth in `YY-MM-DD` form.
    pub date_of_birth: String,
    /// `"F"` or `"M"`.
    pub sex: String,
    /// `"Citizen"` or `"Non Citizen"`.
    pub status: String,
}

/// Validate an identity number with the Luhn-style checksum.
///
/// Non-digit input is a format error, surfaced rather than coerced to
/// `false`; a wrong digit count is merely invalid.
pub fn validate(id_number: &str) -> Result<bool, IdNumberError> {
    let digits = digits_of(id_number)?;
    if digits.len() != ID_NUMBER_LENGTH {
        debug!(
            "identity number has {} digits, expected {}",
            digits.len(),
            ID_NUMBER_LENGTH
        );
        return Ok(false);
    }
    Ok(checksum(&digits) % 10 == 0)
}

/// Derive date of birth, sex and citizenship status from an identity
/// number.
pub fn derive(id_number: &str) -> Result<IdNumberInfo, IdNumberError> {
    let digits = digits_of(id_number)?;
    if digits.len() != ID_NUMBER_LENGTH {
        return Err(IdNumberError::WrongLength {
            expected: ID_NUMBER_LENGTH,
            actual: digits.len(),
        });
    }
    let date_of_birth = format!(
        "{}{}-{}{}-{}{}",
        digits[0], digits[1], digits[2], digits[3], digits[4], digits[5]
    );
    let sex = if digits[6] < 5 { "F" } else { "M" }.to_string();
    let status = if digits[10] == 0 { "Citizen" } else { "Non Citizen" }.to_string();
    Ok(IdNumberInfo {
        date_of_birth,
        sex,
        status,
    })
}

/// Format an identity number with display grouping (`YYMMDD SSSS CAZ`).
///
/// Anything that is not exactly 13 digits is returned unchanged.
pub fn format_id_number(id_number: &str) -> String {
    let digits: String = id_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != ID_NUMBER_LENGTH {
        return id_number.to_string();
    }
    format!("{} {} {}", &digits[0..6], &digits[6..10], &digits[10..13])
}

fn digits_of(id_number: &str) -> Result<Vec<u32>, IdNumberError> {
    id_number
        .chars()
        .map(|c| {
            c.to_digit(10)
                .ok_or_else(|| IdNumberError::NonNumeric(id_number.to_string()))
        })
        .collect()
}

/// Luhn-style digit weighting: walking from the last digit leftwards,
/// every second digit is doubled and reduced to its decimal digit sum,
/// the rest are added unmodified. A valid number sums to 0 mod 10.
fn checksum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = 2 * d;
                doubled / 10 + doubled % 10
            } else {
                d
            }
        })
        .sum()
}
