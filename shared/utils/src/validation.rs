use crate::error::{PrestacaoError, PrestacaoResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> PrestacaoResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(PrestacaoError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.code {
                std::borrow::Cow::Borrowed("length") => {
                    format!("Length validation failed for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("range") => {
                    format!("Value out of range for field '{}'", field)
                }
                std::borrow::Cow::Borrowed("required") => {
                    format!("Field '{}' is required", field)
                }
                _ => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.join(", ")
}

/// Validates a CNPJ against the official mod-11 double check digit.
/// Accepts masked ("11.222.333/0001-81") or bare-digit input.
pub fn validate_cnpj(cnpj: &str) -> PrestacaoResult<()> {
    let digits: Vec<u32> = cnpj.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 {
        return Err(PrestacaoError::validation(
            "cnpj",
            "CNPJ must contain 14 digits",
        ));
    }

    // Sequences of a single repeated digit satisfy the checksum but are not
    // assignable registrations.
    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err(PrestacaoError::validation("cnpj", "Invalid CNPJ sequence"));
    }

    if cnpj_check_digit(&digits[..12]) != digits[12] || cnpj_check_digit(&digits[..13]) != digits[13]
    {
        return Err(PrestacaoError::validation(
            "cnpj",
            "Invalid CNPJ check digits",
        ));
    }

    Ok(())
}

fn cnpj_check_digit(digits: &[u32]) -> u32 {
    // Weights cycle 2..=9 from the rightmost digit leftward.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| d * (2 + (i as u32 % 8)))
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

pub fn validate_file_type(file_name: &str, allowed_types: &[&str]) -> PrestacaoResult<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !allowed_types.contains(&extension.to_lowercase().as_str()) {
        return Err(PrestacaoError::validation(
            "file_type",
            format!(
                "File type '{}' not allowed. Allowed types: {}",
                extension,
                allowed_types.join(", ")
            ),
        ));
    }

    Ok(())
}
