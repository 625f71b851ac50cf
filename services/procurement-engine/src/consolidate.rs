//! Consolidation calculator.
//!
//! Computes the pricing facts the consolidation sheet prints: per item, the
//! unit price quoted by every proposal and the cheapest quote; per
//! proposal, the aggregate total and how it compares to what was actually
//! paid. The business-designated winner is reported independently of the
//! per-item cheapest computation, so documents can show "best price per
//! item" alongside "who was actually paid".

use serde::Serialize;

use prestacao_models::{LineItem, ProcurementProcess, Proposal};
use prestacao_utils::{PrestacaoError, PrestacaoResult};

use crate::reconcile::ensure_aligned;

/// Pricing facts for one item across all proposals.
#[derive(Debug, Clone, Serialize)]
pub struct ItemConsolidation {
    pub index: usize,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    /// Unit price quoted by each proposal, in proposal input order.
    pub unit_prices: Vec<f64>,
    /// Index into the proposal list of the strictly lowest quote, zeros
    /// included. Ties go to the first listed proposal.
    pub best_proposal: usize,
    pub best_price: f64,
}

/// Aggregate facts for one proposal.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub supplier_name: String,
    pub supplier_cnpj: Option<String>,
    pub is_winner: bool,
    pub total: f64,
    /// Designated-winner total over this proposal's total, as a percentage.
    /// Defined 0 when the proposal total is 0.
    pub efficiency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Consolidation {
    pub items: Vec<ItemConsolidation>,
    pub proposals: Vec<ProposalSummary>,
    pub winner_total: f64,
    pub net_total: f64,
}

fn quoted_price(proposal: &Proposal, index: usize, item: &LineItem) -> f64 {
    if proposal.is_winner {
        item.winner_unit_price
    } else {
        proposal.lines[index].unit_price
    }
}

pub fn consolidate(process: &ProcurementProcess) -> PrestacaoResult<Consolidation> {
    ensure_aligned(process)?;
    let winner_index = process
        .proposals
        .iter()
        .position(|p| p.is_winner)
        .ok_or_else(|| PrestacaoError::validation("proposals", "No proposal is flagged winner"))?;

    let items: Vec<ItemConsolidation> = process
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let unit_prices: Vec<f64> = process
                .proposals
                .iter()
                .map(|p| quoted_price(p, index, item))
                .collect();

            let mut best_proposal = 0usize;
            let mut best_price = unit_prices[0];
            for (k, price) in unit_prices.iter().enumerate().skip(1) {
                if *price < best_price {
                    best_proposal = k;
                    best_price = *price;
                }
            }

            ItemConsolidation {
                index,
                description: item.description.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                unit_prices,
                best_proposal,
                best_price,
            }
        })
        .collect();

    let totals: Vec<f64> = process
        .proposals
        .iter()
        .map(|p| {
            process
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| item.quantity * quoted_price(p, i, item))
                .sum()
        })
        .collect();
    let winner_total = totals[winner_index];

    let proposals: Vec<ProposalSummary> = process
        .proposals
        .iter()
        .zip(&totals)
        .map(|(p, total)| ProposalSummary {
            supplier_name: p.supplier.name.clone(),
            supplier_cnpj: p.supplier.cnpj.clone(),
            is_winner: p.is_winner,
            total: *total,
            efficiency: if *total > 0.0 {
                winner_total / total * 100.0
            } else {
                0.0
            },
        })
        .collect();

    Ok(Consolidation {
        items,
        proposals,
        winner_total,
        net_total: winner_total - process.discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prestacao_models::{FinancialTransaction, Supplier};
    use proptest::prelude::*;

    fn process_with_prices(winner: Vec<f64>, comp1: Vec<f64>, comp2: Vec<f64>) -> ProcurementProcess {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let transaction = FinancialTransaction::new("Gêneros alimentícios", -100.0, date);
        let mut process = ProcurementProcess::new(transaction);
        let items: Vec<LineItem> = winner
            .iter()
            .enumerate()
            .map(|(i, price)| LineItem::new(format!("Item {}", i + 1), 1.0, "un", *price))
            .collect();

        let mut p1 = Proposal::competitor(Supplier::named("Mercado Beta"), &items);
        for (line, price) in p1.lines.iter_mut().zip(comp1) {
            line.unit_price = price;
        }
        let mut p2 = Proposal::competitor(Supplier::named("Atacadão Gama"), &items);
        for (line, price) in p2.lines.iter_mut().zip(comp2) {
            line.unit_price = price;
        }

        process.proposals = vec![
            Proposal::winner(Supplier::named("Distribuidora Alfa"), &items),
            p1,
            p2,
        ];
        process.items = items;
        process
    }

    #[test]
    fn test_item_winner_is_cheapest_quote() {
        let process = process_with_prices(vec![5.5, 8.0], vec![5.9, 7.5], vec![6.15, 8.2]);
        let consolidation = consolidate(&process).unwrap();

        assert_eq!(consolidation.items[0].best_proposal, 0);
        assert_eq!(consolidation.items[0].best_price, 5.5);
        assert_eq!(consolidation.items[1].best_proposal, 1);
        assert_eq!(consolidation.items[1].best_price, 7.5);
    }

    #[test]
    fn test_ties_go_to_first_listed_proposal() {
        let process = process_with_prices(vec![10.0], vec![10.0], vec![10.0]);
        let consolidation = consolidate(&process).unwrap();
        assert_eq!(consolidation.items[0].best_proposal, 0);
    }

    #[test]
    fn test_zero_quote_wins_its_row() {
        // An unfilled quote is still the raw minimum until it is corrected.
        let process = process_with_prices(vec![10.0], vec![0.0], vec![9.0]);
        let consolidation = consolidate(&process).unwrap();
        assert_eq!(consolidation.items[0].best_proposal, 1);
        assert_eq!(consolidation.items[0].best_price, 0.0);
    }

    #[test]
    fn test_all_zero_row_ties_to_first_proposal() {
        let process = process_with_prices(vec![0.0], vec![0.0], vec![0.0]);
        let consolidation = consolidate(&process).unwrap();
        assert_eq!(consolidation.items[0].best_proposal, 0);
        assert_eq!(consolidation.items[0].best_price, 0.0);
        // No division by zero: empty proposals report 0% efficiency.
        assert!(consolidation.proposals.iter().all(|p| p.efficiency == 0.0));
    }

    #[test]
    fn test_totals_and_efficiency() {
        let process = process_with_prices(vec![5.0, 5.0], vec![10.0, 10.0], vec![0.0, 0.0]);
        let consolidation = consolidate(&process).unwrap();

        assert_eq!(consolidation.winner_total, 10.0);
        assert_eq!(consolidation.proposals[0].total, 10.0);
        assert_eq!(consolidation.proposals[0].efficiency, 100.0);
        assert_eq!(consolidation.proposals[1].total, 20.0);
        assert_eq!(consolidation.proposals[1].efficiency, 50.0);
        assert_eq!(consolidation.proposals[2].efficiency, 0.0);
    }

    proptest! {
        /// No row ever reports an item winner quoting more than any other
        /// proposal at the same index.
        #[test]
        fn prop_item_winner_is_never_undercut(
            rows in prop::collection::vec((1u32..10_000, 0u32..10_000, 0u32..10_000), 1..8)
        ) {
            let winner: Vec<f64> = rows.iter().map(|(w, _, _)| *w as f64 / 100.0).collect();
            let comp1: Vec<f64> = rows.iter().map(|(_, a, _)| *a as f64 / 100.0).collect();
            let comp2: Vec<f64> = rows.iter().map(|(_, _, b)| *b as f64 / 100.0).collect();

            let process = process_with_prices(winner, comp1, comp2);
            let consolidation = consolidate(&process).unwrap();

            for item in &consolidation.items {
                for price in &item.unit_prices {
                    prop_assert!(item.best_price <= *price);
                }
                prop_assert_eq!(item.best_price, item.unit_prices[item.best_proposal]);
            }
        }
    }
}
