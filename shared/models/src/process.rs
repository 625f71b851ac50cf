//! The procurement accountability process: one record tying a financial
//! transaction to an item list, a set of competing proposals, a document
//! checklist, and the attachments backing the paper trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::proposal::Proposal;
use crate::school::SchoolProfile;
use crate::transaction::FinancialTransaction;

/// Lifecycle status of a process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProcessStatus {
    InProgress,
    Completed,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessStatus::InProgress => write!(f, "Em Andamento"),
            ProcessStatus::Completed => write!(f, "Concluído"),
        }
    }
}

/// One entry of the named boolean checklist attached to every process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub checked: bool,
}

impl ChecklistItem {
    fn unchecked(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            checked: false,
        }
    }
}

/// The ordered checklist every new process starts from.
pub fn default_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::unchecked("quotations", "3 Orçamentos anexados"),
        ChecklistItem::unchecked("winner_price", "Vencedor validado com menor preço"),
        ChecklistItem::unchecked("invoice", "Nota Fiscal anexa"),
        ChecklistItem::unchecked("certificates", "Certidões negativas válidas"),
        ChecklistItem::unchecked("minutes", "Ata de Assembleia assinada"),
    ]
}

/// Classification of a stored attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentCategory {
    #[serde(rename = "Nota Fiscal")]
    FiscalInvoice,
    #[serde(rename = "Comprovante")]
    PaymentProof,
    #[serde(rename = "Certidão Municipal")]
    MunicipalClearance,
    #[serde(rename = "Certidão Estadual")]
    StateClearance,
    #[serde(rename = "Certidão Federal")]
    FederalClearance,
    #[serde(rename = "FGTS")]
    Fgts,
    #[serde(rename = "Trabalhista")]
    Labor,
    #[serde(rename = "Outros")]
    Other,
}

/// A stored attachment backing the process (invoice, certificates, receipts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachmentRecord {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub category: DocumentCategory,
}

/// One purchased item. The description is the reconciliation key shared by
/// every proposal's line at the same position.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct LineItem {
    #[validate(length(min = 1, message = "Item description is required"))]
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    #[validate(range(min = 0.0, message = "Winning unit price must not be negative"))]
    pub winner_unit_price: f64,
}

impl LineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        winner_unit_price: f64,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit: unit.into(),
            winner_unit_price,
        }
    }

    /// Quantity times the winning unit price.
    pub fn total(&self) -> f64 {
        self.quantity * self.winner_unit_price
    }
}

/// One procurement accountability record tied to exactly one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ProcurementProcess {
    pub id: Uuid,
    #[validate]
    pub transaction: FinancialTransaction,
    pub school: Option<SchoolProfile>,
    pub status: ProcessStatus,
    #[validate(range(min = 0.0, message = "Discount must not be negative"))]
    pub discount: f64,
    pub checklist: Vec<ChecklistItem>,
    pub attachments: Vec<AttachmentRecord>,
    #[validate]
    pub items: Vec<LineItem>,
    pub proposals: Vec<Proposal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProcurementProcess {
    /// A fresh process over the given transaction, with the default
    /// checklist and no items or proposals yet.
    pub fn new(transaction: FinancialTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transaction,
            school: None,
            status: ProcessStatus::InProgress,
            discount: 0.0,
            checklist: default_checklist(),
            attachments: Vec::new(),
            items: Vec::new(),
            proposals: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of quantity × winning unit price over all items.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::total).sum()
    }

    /// Subtotal net of the recorded discount.
    pub fn net_total(&self) -> f64 {
        self.subtotal() - self.discount
    }

    pub fn winning_proposal(&self) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.is_winner)
    }

    pub fn competitor_proposals(&self) -> Vec<&Proposal> {
        self.proposals.iter().filter(|p| !p.is_winner).collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_process() -> ProcurementProcess {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let transaction = FinancialTransaction::new("Gêneros alimentícios", -435.0, date);
        let mut process = ProcurementProcess::new(transaction);
        process.items = vec![
            LineItem::new("Arroz parboilizado tipo 1", 50.0, "kg", 5.5),
            LineItem::new("Feijão carioca", 20.0, "kg", 8.0),
        ];
        process
    }

    #[test]
    fn test_default_checklist_shape() {
        let checklist = default_checklist();
        assert_eq!(checklist.len(), 5);
        assert_eq!(checklist[0].id, "quotations");
        assert!(checklist.iter().all(|c| !c.checked));
    }

    #[test]
    fn test_subtotal_and_net() {
        let mut process = sample_process();
        assert_eq!(process.subtotal(), 435.0);

        process.discount = 35.0;
        assert_eq!(process.net_total(), 400.0);
    }

    #[test]
    fn test_attachment_categories_keep_their_display_names() {
        let attachment = AttachmentRecord {
            id: Uuid::new_v4(),
            name: "nf-4711.pdf".to_string(),
            url: "https://storage/nf-4711.pdf".to_string(),
            category: DocumentCategory::FiscalInvoice,
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["category"], "Nota Fiscal");

        let municipal = serde_json::to_value(DocumentCategory::MunicipalClearance).unwrap();
        assert_eq!(municipal, "Certidão Municipal");
    }

    #[test]
    fn test_new_process_is_in_progress_and_empty() {
        let process = sample_process();
        assert_eq!(process.status, ProcessStatus::InProgress);
        assert!(process.proposals.is_empty());
        assert!(process.winning_proposal().is_none());
    }
}
