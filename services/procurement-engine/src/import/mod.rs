//! External proposal importers.
//!
//! Both importers produce the same [`ImportBatch`] shape, consumed by the
//! reconciliation engine's bulk merge: candidate line items plus one price
//! per competitor slot. Bad rows are skipped and reported per attempt;
//! only a wholly unusable payload is an error.

pub mod delimited;
pub mod fiscal;

pub use delimited::DelimitedImporter;
pub use fiscal::FiscalDocumentImporter;

use prestacao_models::LineItem;
use prestacao_utils::{round_cents, ImportConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    DelimitedText,
    FiscalXml,
}

/// One candidate item plus the competitor prices destined for each
/// competitor slot, in proposal order.
#[derive(Debug, Clone)]
pub struct ImportedLine {
    pub item: LineItem,
    pub competitor_prices: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub source: ImportSource,
    pub lines: Vec<ImportedLine>,
    pub warnings: Vec<String>,
}

/// Synthesizes two competitor quotes from the winner's price by applying
/// the configured markup factors, rounded to cents.
///
/// This is a business approximation used as an editable starting point,
/// never a real quote. It is kept behind this single function so it can be
/// swapped or disabled without touching the reconciliation logic.
pub fn synthetic_competitor_prices(price: f64, config: &ImportConfig) -> Vec<f64> {
    if price <= 0.0 {
        return vec![0.0, 0.0];
    }
    vec![
        round_cents(price * config.competitor_markup_low),
        round_cents(price * config.competitor_markup_high),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_prices_apply_default_markups() {
        let config = ImportConfig::default();
        assert_eq!(synthetic_competitor_prices(10.0, &config), vec![10.16, 10.19]);
        assert_eq!(synthetic_competitor_prices(100.0, &config), vec![101.60, 101.85]);
    }

    #[test]
    fn test_zero_price_yields_zero_quotes() {
        let config = ImportConfig::default();
        assert_eq!(synthetic_competitor_prices(0.0, &config), vec![0.0, 0.0]);
    }
}
