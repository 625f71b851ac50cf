//! Price proposals attached to a procurement process.
//!
//! Every proposal carries one line per process item, in the same order and
//! under the same description key. The winning proposal's effective prices
//! live on the process items themselves (`LineItem::winner_unit_price`);
//! competitor proposals price their own lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::process::LineItem;
use crate::supplier::Supplier;

/// One priced row of a proposal, mirroring a process item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ProposalLine {
    #[validate(length(min = 1, message = "Proposal line description is required"))]
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    #[validate(range(min = 0.0, message = "Unit price must not be negative"))]
    pub unit_price: f64,
}

impl ProposalLine {
    /// A zero-priced mirror of a process item, awaiting the proponent's quote.
    pub fn mirroring(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_price: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// One supplier's priced response to the process item list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Proposal {
    pub id: Uuid,
    #[validate]
    pub supplier: Supplier,
    pub is_winner: bool,
    /// Derived aggregate, refreshed when the process is staged for
    /// persistence. Never authoritative.
    pub total_value: f64,
    #[validate]
    pub lines: Vec<ProposalLine>,
}

impl Proposal {
    /// A fresh competitor proposal mirroring the given item list at price 0.
    pub fn competitor(supplier: Supplier, items: &[LineItem]) -> Self {
        Self {
            id: Uuid::new_v4(),
            supplier,
            is_winner: false,
            total_value: 0.0,
            lines: items.iter().map(ProposalLine::mirroring).collect(),
        }
    }

    /// The winner proposal; its lines mirror the items and its effective
    /// prices are the items' winning unit prices.
    pub fn winner(supplier: Supplier, items: &[LineItem]) -> Self {
        let lines: Vec<ProposalLine> = items
            .iter()
            .map(|it| ProposalLine {
                description: it.description.clone(),
                quantity: it.quantity,
                unit: it.unit.clone(),
                unit_price: it.winner_unit_price,
            })
            .collect();
        let total_value = lines.iter().map(ProposalLine::total).sum();
        Self {
            id: Uuid::new_v4(),
            supplier,
            is_winner: true,
            total_value,
            lines,
        }
    }

    /// Sum of this proposal's own line prices. For the winner the effective
    /// total is the process subtotal instead.
    pub fn line_total(&self) -> f64 {
        self.lines.iter().map(ProposalLine::total).sum()
    }
}
