//! The financial transaction a procurement process accounts for.
//!
//! The transaction is an external fact owned by the financial ledger: the
//! engine never mutates it, only reads its absolute value, date, and paid
//! supplier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::supplier::Supplier;

/// Ledger status of the underlying entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Paid,
    /// The entry has a completed accountability process attached.
    Consolidated,
}

/// The recorded expense a process reconciles against.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct FinancialTransaction {
    pub id: Uuid,
    #[validate(length(min = 1, max = 500, message = "Transaction description is required"))]
    pub description: String,
    /// Signed ledger value; expenses are negative. Documents and the
    /// settlement check always use the absolute value.
    pub value: f64,
    pub date: NaiveDate,
    pub invoice_number: Option<String>,
    /// Funding program label, e.g. "PNAE/FNDE".
    pub program: Option<String>,
    /// The supplier actually paid — the designated winner of the process.
    pub supplier: Option<Supplier>,
    pub status: TransactionStatus,
}

impl FinancialTransaction {
    pub fn new(description: impl Into<String>, value: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            value,
            date,
            invoice_number: None,
            program: None,
            supplier: None,
            status: TransactionStatus::Paid,
        }
    }

    /// The amount the process must settle against, sign-insensitive.
    pub fn target_value(&self) -> f64 {
        self.value.abs()
    }
}
