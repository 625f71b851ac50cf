//! Reconciliation engine.
//!
//! Keeps every proposal's line list isomorphic to the process item list:
//! indexed by position, keyed by description. All structural edits go
//! through [`Reconciler`], and every edit ends with an alignment check that
//! rebuilds the description-keyed view and rejects silent drift instead of
//! trusting index positions.

use prestacao_models::{LineItem, ProcurementProcess, ProposalLine};
use prestacao_utils::{PrestacaoError, PrestacaoResult};

use crate::import::ImportBatch;

/// Patch applied to one line item. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct LineItemPatch {
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub winner_unit_price: Option<f64>,
}

/// Outcome of a bulk merge: what landed and what was dropped.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub appended: usize,
    pub skipped: Vec<String>,
}

/// The only mutation path for the item/proposal structure of a process.
pub struct Reconciler<'a> {
    process: &'a mut ProcurementProcess,
}

impl<'a> Reconciler<'a> {
    pub fn new(process: &'a mut ProcurementProcess) -> Self {
        Self { process }
    }

    /// Appends an item and mirrors a line onto every proposal. Competitor
    /// lines start at price 0; the winner's line carries the item's winning
    /// price.
    pub fn append_item(&mut self, item: LineItem) -> PrestacaoResult<()> {
        self.validate_new_key(&item.description, None)?;

        for proposal in &mut self.process.proposals {
            let mut line = ProposalLine::mirroring(&item);
            if proposal.is_winner {
                line.unit_price = item.winner_unit_price;
            }
            proposal.lines.push(line);
        }
        self.process.items.push(item);
        self.process.touch();
        ensure_aligned(self.process)
    }

    /// Removes the item and the line at the same index from every proposal.
    /// Rejected while it would leave the process without items.
    pub fn remove_item(&mut self, index: usize) -> PrestacaoResult<LineItem> {
        if index >= self.process.items.len() {
            return Err(PrestacaoError::not_found(format!("line item at index {}", index)));
        }
        if self.process.items.len() <= 1 {
            return Err(PrestacaoError::validation(
                "items",
                "A process must keep at least one item",
            ));
        }
        ensure_aligned(self.process)?;

        for proposal in &mut self.process.proposals {
            proposal.lines.remove(index);
        }
        let removed = self.process.items.remove(index);
        self.process.touch();
        ensure_aligned(self.process)?;
        Ok(removed)
    }

    /// Applies a patch to one item. Description, quantity, and unit are
    /// mirrored into every proposal's line at that index so the match key
    /// never desynchronizes; the winning unit price is NOT mirrored — each
    /// proposal keeps its own price.
    pub fn edit_item(&mut self, index: usize, patch: LineItemPatch) -> PrestacaoResult<()> {
        if index >= self.process.items.len() {
            return Err(PrestacaoError::not_found(format!("line item at index {}", index)));
        }
        if let Some(description) = &patch.description {
            self.validate_new_key(description, Some(index))?;
        }

        let old_key = self.process.items[index].description.clone();
        {
            let item = &mut self.process.items[index];
            if let Some(description) = patch.description {
                item.description = description;
            }
            if let Some(quantity) = patch.quantity {
                item.quantity = quantity;
            }
            if let Some(unit) = patch.unit {
                item.unit = unit;
            }
            if let Some(price) = patch.winner_unit_price {
                item.winner_unit_price = price;
            }
        }

        let (description, quantity, unit) = {
            let item = &self.process.items[index];
            (item.description.clone(), item.quantity, item.unit.clone())
        };
        for proposal in &mut self.process.proposals {
            let line = proposal.lines.get_mut(index).ok_or_else(|| {
                PrestacaoError::inconsistent_process(format!(
                    "proposal '{}' has no line at index {}",
                    proposal.supplier.name, index
                ))
            })?;
            if line.description != old_key {
                return Err(PrestacaoError::inconsistent_process(format!(
                    "proposal '{}' line {} carries key '{}' instead of '{}'",
                    proposal.supplier.name, index, line.description, old_key
                )));
            }
            line.description = description.clone();
            line.quantity = quantity;
            line.unit = unit.clone();
        }

        self.process.touch();
        ensure_aligned(self.process)
    }

    /// Sets one competitor's unit price for one item.
    pub fn set_competitor_price(
        &mut self,
        proposal_index: usize,
        item_index: usize,
        price: f64,
    ) -> PrestacaoResult<()> {
        if price < 0.0 {
            return Err(PrestacaoError::validation(
                "unit_price",
                "Unit price must not be negative",
            ));
        }
        let proposal = self
            .process
            .proposals
            .get_mut(proposal_index)
            .ok_or_else(|| PrestacaoError::not_found(format!("proposal at index {}", proposal_index)))?;
        if proposal.is_winner {
            return Err(PrestacaoError::validation(
                "proposal",
                "Winning prices are edited on the line items, not on the proposal",
            ));
        }
        let line = proposal
            .lines
            .get_mut(item_index)
            .ok_or_else(|| PrestacaoError::not_found(format!("proposal line at index {}", item_index)))?;
        line.unit_price = price;
        self.process.touch();
        Ok(())
    }

    /// Merges an import batch: appends every new item and, for each
    /// competitor proposal slot, consumes the batch's price for that slot or
    /// defaults to 0. Items whose key already exists are skipped, not fatal.
    pub fn bulk_merge(&mut self, batch: ImportBatch) -> PrestacaoResult<MergeOutcome> {
        let mut outcome = MergeOutcome {
            appended: 0,
            skipped: Vec::new(),
        };

        for line in batch.lines {
            let key = line.item.description.trim();
            if key.is_empty() {
                outcome.skipped.push("(empty description)".to_string());
                continue;
            }
            if self.key_exists(key, None) {
                tracing::warn!(description = key, "Import row duplicates an existing item, skipped");
                outcome.skipped.push(key.to_string());
                continue;
            }

            let mut competitor_slot = 0usize;
            for proposal in &mut self.process.proposals {
                let mut mirrored = ProposalLine::mirroring(&line.item);
                if proposal.is_winner {
                    mirrored.unit_price = line.item.winner_unit_price;
                } else {
                    mirrored.unit_price = line
                        .competitor_prices
                        .get(competitor_slot)
                        .copied()
                        .unwrap_or(0.0);
                    competitor_slot += 1;
                }
                proposal.lines.push(mirrored);
            }
            self.process.items.push(line.item);
            outcome.appended += 1;
        }

        self.process.touch();
        ensure_aligned(self.process)?;
        tracing::info!(
            appended = outcome.appended,
            skipped = outcome.skipped.len(),
            "Import batch merged"
        );
        Ok(outcome)
    }

    fn validate_new_key(&self, description: &str, ignore_index: Option<usize>) -> PrestacaoResult<()> {
        if description.trim().is_empty() {
            return Err(PrestacaoError::validation(
                "description",
                "Item description is required",
            ));
        }
        if self.key_exists(description, ignore_index) {
            return Err(PrestacaoError::validation(
                "description",
                format!("An item named '{}' already exists", description),
            ));
        }
        Ok(())
    }

    fn key_exists(&self, description: &str, ignore_index: Option<usize>) -> bool {
        self.process
            .items
            .iter()
            .enumerate()
            .any(|(i, it)| Some(i) != ignore_index && it.description == description)
    }
}

/// Rebuilds the description-keyed view and verifies that every proposal
/// mirrors the item list in count, order, and key.
pub fn ensure_aligned(process: &ProcurementProcess) -> PrestacaoResult<()> {
    for proposal in &process.proposals {
        if proposal.lines.len() != process.items.len() {
            return Err(PrestacaoError::inconsistent_process(format!(
                "proposal '{}' carries {} lines for {} items",
                proposal.supplier.name,
                proposal.lines.len(),
                process.items.len()
            )));
        }
        for (index, (line, item)) in proposal.lines.iter().zip(&process.items).enumerate() {
            if line.description != item.description {
                return Err(PrestacaoError::inconsistent_process(format!(
                    "proposal '{}' line {} is keyed '{}' but the item is '{}'",
                    proposal.supplier.name, index, line.description, item.description
                )));
            }
        }
    }
    Ok(())
}
