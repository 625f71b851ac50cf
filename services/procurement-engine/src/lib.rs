//! # Procurement Consolidation Engine
//!
//! The algorithmic core of the accountability suite: reconciles a winning
//! purchase against competing price proposals, validates the arithmetic
//! tying item-level pricing to the recorded transaction, imports proposal
//! data from external documents, and derives the facts the formal
//! procurement records are assembled from.
//!
//! All computation is synchronous and side-effect free. The engine holds
//! process state as a single in-memory snapshot; persistence belongs to the
//! external collaborator, which receives one atomic [`ChildReplacement`]
//! value per save.
//!
//! ## Flow
//!
//! 1. import ([`DelimitedImporter`] / [`FiscalDocumentImporter`]) or manual
//!    edits through [`Reconciler`]
//! 2. [`consolidate`] for the per-item cheapest-price table and totals
//! 3. [`validate_for_save`] for the settlement gate
//! 4. [`stage_replacement`] for the store, [`assemble_dossier`] for the
//!    document-assembly consumer

pub mod consolidate;
pub mod dossier;
pub mod import;
pub mod persist;
pub mod reconcile;
pub mod settlement;

pub use consolidate::{consolidate, Consolidation, ItemConsolidation, ProposalSummary};
pub use dossier::{assemble_dossier, ProcessDossier};
pub use import::{
    synthetic_competitor_prices, DelimitedImporter, FiscalDocumentImporter, ImportBatch,
    ImportSource, ImportedLine,
};
pub use persist::{
    partial_application_error, refreshed_snapshot, stage_replacement, ChildReplacement,
};
pub use reconcile::{ensure_aligned, LineItemPatch, MergeOutcome, Reconciler};
pub use settlement::{validate_for_save, validate_value, ValueCheck, VALUE_TOLERANCE};
