//! Template context building.
//!
//! Templates stay logic-free: every figure arrives pre-formatted (pt-BR
//! currency, CNPJ masks, long dates, uppercased display names) and every
//! derived fact comes from the engine's dossier.

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use prestacao_procurement_engine::ProcessDossier;
use prestacao_utils::{format_cnpj, format_currency, DocumentConfig, PrestacaoError, PrestacaoResult};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const PROPONENT_LETTERS: [&str; 3] = ["A", "B", "C"];

/// "9 de junho de 2025".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// "09/06/2025".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Assembly meetings are scheduled by day-of-month parity: even days meet
/// in the afternoon, odd days in the morning.
pub fn meeting_time(document_date: NaiveDate) -> &'static str {
    if document_date.day() % 2 == 0 {
        "15:30"
    } else {
        "09:00"
    }
}

fn masked_cnpj(cnpj: &Option<String>) -> String {
    format_cnpj(cnpj.as_deref().unwrap_or(""))
}

/// Whole quantities print without the decimal tail.
fn quantity_label(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

fn school_block(dossier: &ProcessDossier, config: &DocumentConfig) -> Value {
    let school = dossier.process.school.as_ref();
    json!({
        "name": school.map(|s| s.name.to_uppercase()).unwrap_or_else(|| "UNIDADE EXECUTORA".to_string()),
        "cnpj": masked_cnpj(&school.and_then(|s| s.cnpj.clone())),
        "seec": school.and_then(|s| s.seec.clone()).unwrap_or_else(|| "---".to_string()),
        "address": school.and_then(|s| s.address.clone()).unwrap_or_else(|| "---".to_string()).to_uppercase(),
        "city": school.and_then(|s| s.city.clone()).unwrap_or_else(|| config.default_city.clone()).to_uppercase(),
        "director": school.and_then(|s| s.director.clone()).unwrap_or_else(|| "PRESIDENTE".to_string()).to_uppercase(),
        "secretary": school.and_then(|s| s.secretary.clone()).unwrap_or_else(|| "____________________".to_string()).to_uppercase(),
    })
}

fn program_label(dossier: &ProcessDossier, config: &DocumentConfig) -> String {
    dossier
        .process
        .transaction
        .program
        .clone()
        .unwrap_or_else(|| config.default_program.clone())
}

fn proponents(dossier: &ProcessDossier) -> Vec<Value> {
    dossier
        .consolidation
        .proposals
        .iter()
        .take(PROPONENT_LETTERS.len())
        .enumerate()
        .map(|(i, summary)| {
            json!({
                "position": i + 1,
                "letter": PROPONENT_LETTERS[i],
                "name": summary.supplier_name.to_uppercase(),
                "cnpj": format_cnpj(summary.supplier_cnpj.as_deref().unwrap_or("")),
                "total": format_currency(summary.total),
                "total_words": prestacao_utils::amount_in_words(summary.total),
                "is_winner": summary.is_winner,
            })
        })
        .collect()
}

/// Context for the assembly meeting minutes.
pub fn minutes_context(dossier: &ProcessDossier, config: &DocumentConfig) -> Value {
    let winner = dossier
        .consolidation
        .proposals
        .iter()
        .find(|p| p.is_winner)
        .map(|p| p.supplier_name.to_uppercase())
        .unwrap_or_default();

    json!({
        "school": school_block(dossier, config),
        "program": program_label(dossier, config),
        "meeting_time": meeting_time(dossier.document_date),
        "document_date": long_date(dossier.document_date).to_uppercase(),
        "entry_description": dossier.process.transaction.description.to_uppercase(),
        "proponents": proponents(dossier),
        "winner_name": winner,
        "process_ref": short_ref(dossier),
    })
}

/// Context for the price-consolidation sheet.
pub fn consolidation_context(dossier: &ProcessDossier, config: &DocumentConfig) -> Value {
    let price_cell = |price: f64| {
        if price > 0.0 {
            format_currency(price)
        } else {
            String::new()
        }
    };

    let items: Vec<Value> = dossier
        .consolidation
        .items
        .iter()
        .map(|item| {
            let prices: Vec<Value> = item
                .unit_prices
                .iter()
                .take(PROPONENT_LETTERS.len())
                .enumerate()
                .map(|(k, price)| {
                    json!({
                        "value": price_cell(*price),
                        "is_best": k == item.best_proposal,
                        "row_total": if *price > 0.0 { format_currency(price * item.quantity) } else { String::new() },
                    })
                })
                .collect();

            json!({
                "number": format!("{:02}", item.index + 1),
                "description": item.description.to_uppercase(),
                "unit": item.unit.to_uppercase(),
                "quantity": quantity_label(item.quantity),
                "prices": prices,
                "best_price": format_currency(item.best_price),
                "best_letter": PROPONENT_LETTERS.get(item.best_proposal).copied().unwrap_or("A"),
            })
        })
        .collect();

    json!({
        "school": school_block(dossier, config),
        "program": program_label(dossier, config),
        "exercise": dossier.process.transaction.date.year(),
        "proponents": proponents(dossier),
        "items": items,
        "net_total": format_currency(dossier.consolidation.net_total),
        "discount": format_currency(dossier.process.discount),
        "invoice_date": short_date(dossier.process.transaction.date),
    })
}

/// Context for the purchase order.
pub fn purchase_order_context(dossier: &ProcessDossier, config: &DocumentConfig) -> Value {
    let winner = dossier.process.winning_proposal();
    let items: Vec<Value> = dossier
        .process
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            json!({
                "number": format!("{:02}", i + 1),
                "description": item.description.to_uppercase(),
                "unit": item.unit.to_uppercase(),
                "quantity": quantity_label(item.quantity),
                "unit_price": format_currency(item.winner_unit_price),
                "total": format_currency(item.total()),
            })
        })
        .collect();

    json!({
        "school": school_block(dossier, config),
        "program": program_label(dossier, config),
        "winner_name": winner.map(|p| p.supplier.name.to_uppercase()).unwrap_or_default(),
        "winner_cnpj": masked_cnpj(&winner.map(|p| p.supplier.cnpj.clone()).unwrap_or(None)),
        "items": items,
        "net_total": format_currency(dossier.net_amount),
        "order_date": short_date(dossier.process.transaction.date),
    })
}

/// Context for the supplier receipt.
pub fn receipt_context(dossier: &ProcessDossier, config: &DocumentConfig) -> Value {
    let winner = dossier.process.winning_proposal();
    let supplier = winner.map(|p| &p.supplier);

    json!({
        "school": school_block(dossier, config),
        "supplier": {
            "name": supplier.map(|s| s.name.to_uppercase()).unwrap_or_else(|| "FORNECEDOR".to_string()),
            "cnpj": masked_cnpj(&supplier.and_then(|s| s.cnpj.clone())),
            "address": supplier.and_then(|s| s.address.clone()).unwrap_or_else(|| "ENDEREÇO".to_string()).to_uppercase(),
            "city": supplier.and_then(|s| s.city.clone()).unwrap_or_else(|| config.default_city.clone()).to_uppercase(),
        },
        "program": program_label(dossier, config).to_uppercase(),
        "net_total": format_currency(dossier.net_amount),
        "net_total_words": dossier.net_amount_words.to_uppercase(),
        "invoice_number": dossier.process.transaction.invoice_number.clone().unwrap_or_else(|| "_______".to_string()),
        "invoice_date": short_date(dossier.process.transaction.date),
        "receipt_date": long_date(dossier.process.transaction.date),
        "auth_number": short_ref(dossier),
    })
}

/// Context for one proponent's price research sheet.
pub fn quote_context(
    dossier: &ProcessDossier,
    proposal_index: usize,
    config: &DocumentConfig,
) -> PrestacaoResult<Value> {
    let summary = dossier
        .consolidation
        .proposals
        .get(proposal_index)
        .ok_or_else(|| PrestacaoError::not_found(format!("proposal at index {}", proposal_index)))?;

    let items: Vec<Value> = dossier
        .consolidation
        .items
        .iter()
        .map(|item| {
            let price = item.unit_prices.get(proposal_index).copied().unwrap_or(0.0);
            json!({
                "number": format!("{:02}", item.index + 1),
                "description": item.description.to_uppercase(),
                "unit": item.unit.to_uppercase(),
                "quantity": quantity_label(item.quantity),
                "unit_price": if price > 0.0 { format_currency(price) } else { String::new() },
                "total": if price > 0.0 { format_currency(price * item.quantity) } else { String::new() },
            })
        })
        .collect();

    Ok(json!({
        "school": school_block(dossier, config),
        "supplier_name": summary.supplier_name.to_uppercase(),
        "supplier_cnpj": format_cnpj(summary.supplier_cnpj.as_deref().unwrap_or("")),
        "items": items,
        "total": format_currency(summary.total),
        "research_date": short_date(dossier.price_research_date),
    }))
}

fn short_ref(dossier: &ProcessDossier) -> String {
    dossier
        .process
        .id
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_uppercase()
}
