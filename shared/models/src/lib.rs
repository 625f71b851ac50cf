//! # Procurement Accountability Domain Models
//!
//! Core domain models for the school procurement accountability suite.
//! All models implement serialization/deserialization with serde and field
//! validation with the validator crate.
//!
//! ## Key Models
//!
//! - **ProcurementProcess**: one accountability record tied to exactly one
//!   financial transaction, holding the item list, proposals, checklist and
//!   attachments
//! - **LineItem**: one purchased item; its description is the reconciliation
//!   key shared by every proposal
//! - **Proposal**: one supplier's priced response, exactly one of which is
//!   flagged winner
//! - **FinancialTransaction**: the immutable ledger fact the process settles
//!   against
//! - **AuditEntry**: hash-chained record of state-changing operations

pub mod audit;
pub mod process;
pub mod proposal;
pub mod school;
pub mod supplier;
pub mod transaction;

#[cfg(test)]
pub mod property_tests;

pub use audit::*;
pub use process::*;
pub use proposal::*;
pub use school::*;
pub use supplier::*;
pub use transaction::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_process_creation() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let transaction = FinancialTransaction::new("Material de limpeza", -250.0, date);
        let process = ProcurementProcess::new(transaction);

        assert!(!process.id.to_string().is_empty());
        assert_eq!(process.status, ProcessStatus::InProgress);
        assert_eq!(process.checklist.len(), 5);
    }

    #[test]
    fn test_winner_and_competitor_views() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let transaction = FinancialTransaction::new("Material de limpeza", -50.0, date);
        let mut process = ProcurementProcess::new(transaction);
        process.items = vec![LineItem::new("Detergente neutro 500ml", 10.0, "un", 5.0)];
        process.proposals = vec![
            Proposal::winner(Supplier::named("Distribuidora Alfa"), &process.items),
            Proposal::competitor(Supplier::named("Mercado Beta"), &process.items),
            Proposal::competitor(Supplier::named("Atacadão Gama"), &process.items),
        ];

        assert_eq!(
            process.winning_proposal().map(|p| p.supplier.name.as_str()),
            Some("Distribuidora Alfa")
        );
        assert_eq!(process.competitor_proposals().len(), 2);
    }
}
