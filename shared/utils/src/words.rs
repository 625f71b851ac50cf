//! Monetary amounts written out in Brazilian Portuguese.
//!
//! The wording printed on minutes and receipts is a conformance contract:
//! the documents are only legally acceptable with the exact expansion, so
//! the tables and connector rules below must not be "improved".

const UNIDADES: [&str; 10] = [
    "", "um", "dois", "três", "quatro", "cinco", "seis", "sete", "oito", "nove",
];
const DEZENA_10: [&str; 10] = [
    "dez",
    "onze",
    "doze",
    "treze",
    "quatorze",
    "quinze",
    "dezesseis",
    "dezessete",
    "dezoito",
    "dezenove",
];
const DEZENAS: [&str; 10] = [
    "", "", "vinte", "trinta", "quarenta", "cinquenta", "sessenta", "setenta", "oitenta",
    "noventa",
];
const CENTENAS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// Expands a non-negative amount into lower-case pt-BR currency words.
pub fn amount_in_words(amount: f64) -> String {
    let mut integer_part = amount.trunc() as u64;
    let mut cents = ((amount - amount.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        integer_part += 1;
        cents = 0;
    }

    if integer_part == 0 && cents == 0 {
        return "zero reais".to_string();
    }

    let mut result = String::new();

    if integer_part > 0 {
        result.push_str(&integer_words(integer_part));
        result.push_str(if integer_part == 1 { " real" } else { " reais" });
    }

    if cents > 0 {
        if !result.is_empty() {
            result.push_str(" e ");
        }
        result.push_str(&format_part(cents));
        result.push_str(if cents == 1 { " centavo" } else { " centavos" });
    }

    result
}

fn integer_words(n: u64) -> String {
    let millions = n / 1_000_000;
    let rest = n % 1_000_000;

    if millions == 0 {
        return thousands_words(rest);
    }

    let mut out = if millions == 1 {
        "um milhão".to_string()
    } else {
        format!("{} milhões", thousands_words(millions))
    };
    if rest > 0 {
        out.push_str(group_connector(rest));
        out.push_str(&thousands_words(rest));
    }
    out
}

fn thousands_words(v: u64) -> String {
    if v < 1000 {
        return format_part(v);
    }

    let mil = v / 1000;
    let rest = v % 1000;

    let mut out = if mil == 1 {
        "mil".to_string()
    } else {
        format!("{} mil", format_part(mil))
    };
    if rest > 0 {
        out.push_str(group_connector(rest));
        out.push_str(&format_part(rest));
    }
    out
}

/// "e" joins a group to a remainder below 100 or a round hundred; anything
/// else takes the plain separator.
fn group_connector(rest: u64) -> &'static str {
    if rest < 100 || rest % 100 == 0 {
        " e "
    } else {
        ", "
    }
}

fn format_part(n: u64) -> String {
    if n == 0 {
        return String::new();
    }
    if n == 100 {
        return "cem".to_string();
    }

    let c = (n / 100) as usize;
    let d = ((n % 100) / 10) as usize;
    let u = (n % 10) as usize;

    let mut res = String::new();
    if c > 0 {
        res.push_str(CENTENAS[c]);
    }

    if d == 1 {
        if !res.is_empty() {
            res.push_str(" e ");
        }
        res.push_str(DEZENA_10[u]);
        return res;
    }

    if d > 1 {
        if !res.is_empty() {
            res.push_str(" e ");
        }
        res.push_str(DEZENAS[d]);
    }

    if u > 0 {
        if !res.is_empty() {
            res.push_str(" e ");
        }
        res.push_str(UNIDADES[u]);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(amount_in_words(0.0), "zero reais");
    }

    #[test]
    fn test_singular_forms() {
        assert_eq!(amount_in_words(1.0), "um real");
        assert_eq!(amount_in_words(1.01), "um real e um centavo");
        assert_eq!(amount_in_words(0.01), "um centavo");
    }

    #[test]
    fn test_irregular_hundred() {
        assert_eq!(amount_in_words(100.0), "cem reais");
        assert_eq!(amount_in_words(117.0), "cento e dezessete reais");
        assert_eq!(amount_in_words(250.0), "duzentos e cinquenta reais");
    }

    #[test]
    fn test_teens_are_irregular() {
        assert_eq!(amount_in_words(19.0), "dezenove reais");
        assert_eq!(amount_in_words(15.0), "quinze reais");
    }

    #[test]
    fn test_thousands_connectors() {
        assert_eq!(amount_in_words(1000.0), "mil reais");
        assert_eq!(amount_in_words(1100.0), "mil e cem reais");
        assert_eq!(amount_in_words(1015.0), "mil e quinze reais");
        assert_eq!(
            amount_in_words(1234.56),
            "mil, duzentos e trinta e quatro reais e cinquenta e seis centavos"
        );
        assert_eq!(amount_in_words(42500.0), "quarenta e dois mil e quinhentos reais");
    }

    #[test]
    fn test_millions() {
        assert!(amount_in_words(1_000_000.0).starts_with("um milhão"));
        assert_eq!(
            amount_in_words(2_500_000.0),
            "dois milhões e quinhentos mil reais"
        );
    }

    #[test]
    fn test_cents_only() {
        assert_eq!(amount_in_words(0.5), "cinquenta centavos");
    }

    #[test]
    fn test_rounded_cents_carry() {
        assert_eq!(amount_in_words(1.999), "dois reais");
    }
}
