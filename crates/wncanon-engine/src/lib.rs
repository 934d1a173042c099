//! wncanon reconciliation and canonicalization engine
//!
//! One batch pass over the in-memory model:
//!
//! ```text
//! SourceLexicon ──► identity ──► closure ──► partition ──► reconcile ──► Lexicon per lex name
//!   (provisional)   (final ids)  (inverses)  (by lex name)  (snapshot order)
//!                       ▲                                       ▲
//!                       └──────── legacy::LegacySenseIndex      └── legacy::SnapshotStore
//! ```
//!
//! The stages must run in this order; [`pipeline::run_pipeline`] wires them
//! together. The engine never touches files: parsing and serialization live in
//! `wncanon-ingest-yaml` and `wncanon-lmf`.

pub mod closure;
pub mod error;
pub mod identity;
pub mod legacy;
pub mod partition;
pub mod pipeline;
pub mod reconcile;

pub use error::{CanonError, Result};
pub use pipeline::{run_pipeline, PipelineOutput, PipelineReport};
