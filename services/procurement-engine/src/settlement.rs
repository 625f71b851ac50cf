//! Settlement validation.
//!
//! The gates a process must pass before it may be saved or completed: the
//! item arithmetic must settle against the recorded transaction within the
//! cent tolerance, and the competing proposals must identify real, distinct
//! suppliers. Failures carry the exact figures involved so the host can
//! render an actionable message.

use serde::Serialize;

use prestacao_models::ProcurementProcess;
use prestacao_utils::{validate_cnpj, validate_model, PrestacaoError, PrestacaoResult};

use crate::reconcile::ensure_aligned;

/// Absolute tolerance, in currency units, between the net item total and
/// the recorded transaction value.
pub const VALUE_TOLERANCE: f64 = 0.01;

/// The figures of a passed settlement check, for display.
#[derive(Debug, Clone, Serialize)]
pub struct ValueCheck {
    pub subtotal: f64,
    pub discount: f64,
    pub net: f64,
    pub target: f64,
}

/// Checks that `sum(quantity × winning price) − discount` matches the
/// transaction's absolute value within [`VALUE_TOLERANCE`].
pub fn validate_value(process: &ProcurementProcess) -> PrestacaoResult<ValueCheck> {
    let subtotal = process.subtotal();
    let net = subtotal - process.discount;
    let target = process.transaction.target_value();

    if (net - target).abs() > VALUE_TOLERANCE {
        return Err(PrestacaoError::value_mismatch(target, net));
    }

    Ok(ValueCheck {
        subtotal,
        discount: process.discount,
        net,
        target,
    })
}

/// Full save/completion gate: structural alignment, field validation,
/// proponent identity rules, then the value check.
pub fn validate_for_save(process: &ProcurementProcess) -> PrestacaoResult<ValueCheck> {
    ensure_aligned(process)?;
    validate_model(process)?;

    if process.items.is_empty() {
        return Err(PrestacaoError::validation(
            "items",
            "A process needs at least one item",
        ));
    }

    let winners = process.proposals.iter().filter(|p| p.is_winner).count();
    if winners > 1 {
        return Err(PrestacaoError::validation(
            "proposals",
            format!("Exactly one proposal may be flagged winner, found {}", winners),
        ));
    }

    let competitors = process.competitor_proposals();
    let resolved: Vec<_> = competitors
        .iter()
        .filter(|p| p.supplier.is_resolved())
        .collect();
    if resolved.len() < 2 {
        return Err(PrestacaoError::validation(
            "proposals",
            format!(
                "At least 2 competing proposals must carry a resolved supplier, found {}",
                resolved.len()
            ),
        ));
    }

    for (i, proposal) in resolved.iter().enumerate() {
        if let Some(transaction_supplier) = &process.transaction.supplier {
            if proposal.supplier.same_identity(transaction_supplier) {
                return Err(PrestacaoError::validation(
                    "supplier",
                    format!(
                        "Supplier '{}' is already the winner of this process",
                        proposal.supplier.name
                    ),
                ));
            }
        }
        for other in resolved.iter().skip(i + 1) {
            if proposal.supplier.same_identity(&other.supplier) {
                return Err(PrestacaoError::validation(
                    "supplier",
                    format!(
                        "Supplier '{}' appears in more than one proposal",
                        proposal.supplier.name
                    ),
                ));
            }
        }
    }

    for proposal in &process.proposals {
        if let Some(cnpj) = &proposal.supplier.cnpj {
            if !cnpj.trim().is_empty() {
                validate_cnpj(cnpj)?;
            }
        }
    }

    validate_value(process)
}
