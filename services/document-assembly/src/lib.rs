//! # Document Assembly
//!
//! Formats a validated, consolidated process snapshot into the printable
//! procurement records: meeting minutes, price-consolidation sheet,
//! purchase order, receipt, and per-proponent quote sheets.
//!
//! This crate is a pure consumer of the procurement engine's
//! [`ProcessDossier`](prestacao_procurement_engine::ProcessDossier): it
//! never recomputes totals, dates, or wording — it only lays them out.

pub mod context;
pub mod engine;

pub use engine::{DocumentAssembler, DocumentKind, DocumentTemplate, RenderedDocument};
