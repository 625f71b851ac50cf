//! Persistence staging.
//!
//! A save replaces a process's item and proposal children wholesale. The
//! engine does not talk to the store; it emits one [`ChildReplacement`]
//! value carrying the complete new child set plus an audit entry, for the
//! external collaborator to commit in a single transaction. There is no
//! observable delete-then-insert window: either the whole replacement
//! applies or none of it does. A store that still reports partial
//! application maps to the dedicated inconsistent-process error so the host
//! can warn the user to re-save.

use uuid::Uuid;

use prestacao_models::{
    AuditAction, AuditEntry, LineItem, ProcessStatus, ProcurementProcess, Proposal, Supplier,
};
use prestacao_utils::{PrestacaoError, PrestacaoResult};

use crate::settlement::validate_for_save;

/// The atomic child-replacement value handed to the store.
#[derive(Debug, Clone)]
pub struct ChildReplacement {
    pub process_id: Uuid,
    pub status: ProcessStatus,
    pub discount: f64,
    pub items: Vec<LineItem>,
    pub proposals: Vec<Proposal>,
    pub audit: AuditEntry,
}

/// A cloned snapshot with the winner proposal ensured (synthesized from the
/// transaction's supplier when the editing state carries competitors only)
/// and every derived total refreshed. Both persistence staging and document
/// assembly consume this form.
pub fn refreshed_snapshot(process: &ProcurementProcess) -> ProcurementProcess {
    let mut snapshot = process.clone();

    if snapshot.proposals.iter().any(|p| p.is_winner) {
        let items = snapshot.items.clone();
        for proposal in &mut snapshot.proposals {
            if proposal.is_winner {
                let refreshed = Proposal::winner(proposal.supplier.clone(), &items);
                proposal.lines = refreshed.lines;
                proposal.total_value = refreshed.total_value;
            }
        }
    } else {
        let supplier = snapshot
            .transaction
            .supplier
            .clone()
            .unwrap_or_else(|| Supplier::named("Vencedor"));
        let winner = Proposal::winner(supplier, &snapshot.items);
        snapshot.proposals.insert(0, winner);
    }

    for proposal in &mut snapshot.proposals {
        if !proposal.is_winner {
            proposal.total_value = proposal.line_total();
        }
    }

    snapshot
}

/// Validates the process and stages the full child replacement.
pub fn stage_replacement(
    process: &ProcurementProcess,
    user_id: Option<Uuid>,
) -> PrestacaoResult<ChildReplacement> {
    validate_for_save(process)?;
    let snapshot = refreshed_snapshot(process);

    let action = match snapshot.status {
        ProcessStatus::Completed => AuditAction::ProcessCompleted,
        ProcessStatus::InProgress => AuditAction::ProcessSaved,
    };
    let audit = AuditEntry::new(action, "procurement_process", snapshot.id, user_id)
        .with_metadata("items", snapshot.items.len().to_string())
        .with_metadata("proposals", snapshot.proposals.len().to_string())
        .with_metadata("net_total", format!("{:.2}", snapshot.net_total()));

    tracing::info!(
        process_id = %snapshot.id,
        items = snapshot.items.len(),
        proposals = snapshot.proposals.len(),
        "Child replacement staged"
    );

    Ok(ChildReplacement {
        process_id: snapshot.id,
        status: snapshot.status,
        discount: snapshot.discount,
        items: snapshot.items,
        proposals: snapshot.proposals,
        audit,
    })
}

/// Maps a store-reported partial application of a replacement into the
/// error class the host must surface as "process data may be inconsistent".
pub fn partial_application_error(process_id: Uuid, detail: &str) -> PrestacaoError {
    tracing::error!(%process_id, detail, "child replacement partially applied");
    PrestacaoError::inconsistent_process(format!(
        "replacement for process {} was partially applied ({}); re-save the process",
        process_id, detail
    ))
}
