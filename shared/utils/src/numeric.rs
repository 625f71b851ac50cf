//! Tolerant numeric parsing and pt-BR money/document formatting.
//!
//! Imported spreadsheets and fiscal documents mix comma-decimal Brazilian
//! notation ("R$ 1.234,56") with plain dot-decimal values; the parser
//! accepts both. Unparsable input resolves to 0 — callers reject zero where
//! zero is invalid.

/// Parses a locale-tolerant monetary string into a number.
///
/// Strips a currency prefix and whitespace; when a comma is present, dots
/// are treated as thousand separators and the comma as the decimal point.
/// Empty or unparsable input returns 0.0.
pub fn parse_locale_number(text: &str) -> f64 {
    let mut clean: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'R' && *c != '$')
        .collect();

    if clean.is_empty() {
        return 0.0;
    }

    if clean.contains(',') {
        clean = clean.replace('.', "").replace(',', ".");
    }

    clean.parse::<f64>().unwrap_or(0.0)
}

/// Formats a value as pt-BR currency, e.g. `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let integer = total_cents / 100;
    let cents = total_cents % 100;
    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };

    format!("{}R$ {},{:02}", sign, group_thousands(integer), cents)
}

fn group_thousands(n: u64) -> String {
    let digits: Vec<char> = n.to_string().chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*c);
    }
    out
}

/// Applies the CNPJ mask (14 digits) or the CPF mask (11 digits) to a
/// document number. Empty input renders as "---"; other lengths pass
/// through as bare digits.
pub fn format_cnpj(cnpj: &str) -> String {
    let cleaned: String = cnpj.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.is_empty() {
        return "---".to_string();
    }
    match cleaned.len() {
        11 => format!(
            "{}.{}.{}-{}",
            &cleaned[0..3],
            &cleaned[3..6],
            &cleaned[6..9],
            &cleaned[9..11]
        ),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &cleaned[0..2],
            &cleaned[2..5],
            &cleaned[5..8],
            &cleaned[8..12],
            &cleaned[12..14]
        ),
        _ => cleaned,
    }
}

/// Rounds to two decimal places, the resolution of every monetary figure in
/// the suite.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
