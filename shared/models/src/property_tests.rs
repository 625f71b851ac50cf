//! Property-based tests for the procurement domain models.
//!
//! Validates serialization round-trip consistency and the structural
//! invariants every aligned process must satisfy. The generators here are
//! also the reference for building well-formed fixtures by hand.

use chrono::NaiveDate;
use proptest::option;
use proptest::prelude::*;
use uuid::Uuid;

use crate::{
    FinancialTransaction, LineItem, ProcurementProcess, Proposal, Supplier, TransactionStatus,
};

prop_compose! {
    pub fn arb_uuid()(bytes in prop::array::uniform16(0u8..)) -> Uuid {
        Uuid::from_bytes(bytes)
    }
}

prop_compose! {
    pub fn arb_date()(days in 0i64..18000) -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(days)
    }
}

prop_compose! {
    pub fn arb_price()(cents in 0u64..10_000_00) -> f64 {
        cents as f64 / 100.0
    }
}

prop_compose! {
    pub fn arb_line_item()(
        description in "[A-Za-z][A-Za-z0-9 ]{2,40}",
        quantity in 1u32..500,
        unit in prop_oneof![Just("un"), Just("kg"), Just("cx"), Just("l")],
        winner_unit_price in arb_price()
    ) -> LineItem {
        LineItem::new(description, quantity as f64, unit, winner_unit_price)
    }
}

prop_compose! {
    pub fn arb_supplier()(
        id in option::of(arb_uuid()),
        name in "[A-Za-z][A-Za-z ]{2,40}",
        cnpj in option::of("[0-9]{14}")
    ) -> Supplier {
        Supplier { id, name, cnpj, ..Supplier::default() }
    }
}

prop_compose! {
    pub fn arb_transaction()(
        description in "[A-Za-z][A-Za-z0-9 ]{2,60}",
        value in -100_000i64..0,
        date in arb_date(),
        supplier in option::of(arb_supplier())
    ) -> FinancialTransaction {
        FinancialTransaction {
            value: value as f64 / 100.0,
            date,
            supplier,
            status: TransactionStatus::Paid,
            ..FinancialTransaction::new(description, 0.0, date)
        }
    }
}

/// A structurally aligned process: every proposal mirrors the item list.
pub fn arb_aligned_process() -> impl Strategy<Value = ProcurementProcess> {
    (
        arb_transaction(),
        prop::collection::vec(arb_line_item(), 1..6),
        prop::collection::vec(arb_supplier(), 2..4),
    )
        .prop_map(|(transaction, items, competitors)| {
            let mut process = ProcurementProcess::new(transaction);
            process.proposals = std::iter::once(Proposal::winner(
                Supplier::named("Fornecedor Vencedor"),
                &items,
            ))
            .chain(
                competitors
                    .into_iter()
                    .map(|s| Proposal::competitor(s, &items)),
            )
            .collect();
            process.items = items;
            process
        })
}

proptest! {
    #[test]
    fn prop_process_serde_round_trip(process in arb_aligned_process()) {
        let json = serde_json::to_string(&process).expect("serialize");
        let back: ProcurementProcess = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(process, back);
    }

    #[test]
    fn prop_aligned_process_mirrors_descriptions(process in arb_aligned_process()) {
        for proposal in &process.proposals {
            prop_assert_eq!(proposal.lines.len(), process.items.len());
            for (line, item) in proposal.lines.iter().zip(&process.items) {
                prop_assert_eq!(&line.description, &item.description);
            }
        }
    }

    #[test]
    fn prop_subtotal_is_item_sum(process in arb_aligned_process()) {
        let expected: f64 = process.items.iter().map(|it| it.quantity * it.winner_unit_price).sum();
        prop_assert!((process.subtotal() - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_line_item_serde_round_trip(item in arb_line_item()) {
        let json = serde_json::to_string(&item).expect("serialize");
        let back: LineItem = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(item, back);
    }
}
