//! The finalized data hand-off to document assembly.
//!
//! A dossier is the engine's complete output for one process: the validated
//! snapshot plus every derived fact the printable records need. No core
//! logic runs after this hand-off.

use chrono::NaiveDate;
use serde::Serialize;

use prestacao_models::ProcurementProcess;
use prestacao_utils::{amount_in_words, calendar, PrestacaoResult};

use crate::consolidate::{consolidate, Consolidation};
use crate::persist::refreshed_snapshot;
use crate::settlement::{validate_for_save, ValueCheck};

#[derive(Debug, Clone, Serialize)]
pub struct ProcessDossier {
    pub process: ProcurementProcess,
    pub consolidation: Consolidation,
    pub value: ValueCheck,
    /// Date printed on the meeting minutes: two business days before the
    /// invoice.
    pub document_date: NaiveDate,
    /// Date printed on the price research sheets: fifteen business days
    /// before the invoice.
    pub price_research_date: NaiveDate,
    pub net_amount: f64,
    pub net_amount_words: String,
}

/// Validates the process and derives the full document data set. A process
/// that fails the settlement gate never reaches assembly.
pub fn assemble_dossier(process: &ProcurementProcess) -> PrestacaoResult<ProcessDossier> {
    let value = validate_for_save(process)?;
    let snapshot = refreshed_snapshot(process);
    let consolidation = consolidate(&snapshot)?;

    let invoice_date = snapshot.transaction.date;
    let net_amount = value.net;

    Ok(ProcessDossier {
        document_date: calendar::document_date(invoice_date),
        price_research_date: calendar::price_research_date(invoice_date),
        net_amount,
        net_amount_words: amount_in_words(net_amount),
        process: snapshot,
        consolidation,
        value,
    })
}
