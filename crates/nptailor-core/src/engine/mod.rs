//! # Engine Module
//!
//! The combinatorial tailoring engine: everything between a linear backbone and the
//! set of tailored scaffolds it can give rise to.
//!
//! ## Overview
//!
//! For each backbone, the engine asks every tailoring domain of the cluster where it
//! could act, expands those answers into plan combinations, and applies each
//! combination to a private copy of the backbone's scaffold. Combinations whose
//! chemistry turns out to be impossible are discarded with a typed reason rather than
//! aborting the run.
//!
//! ## Architecture
//!
//! - **Annotators** ([`annotators`]) - Candidate site enumeration per domain type
//! - **Plans** ([`plan`]) - Substrate sets, reaction plans and priority-ordered combinations
//! - **Combinator** ([`combinator`]) - Bounded, deterministic Cartesian product with overlap filtering
//! - **Reactions** ([`reactions`]) - Scaffold mutators and their priorities
//! - **Branch State** ([`state`]) - Per-combination execution and tailored results
//! - **Configuration** ([`config`]) - Search ceilings and annotator windows
//! - **Progress Monitoring** ([`progress`]) - Callback-based phase and task reporting
//! - **Error Handling** ([`error`]) - Reaction failures, discards and workflow errors

pub mod annotators;
pub mod combinator;
pub mod config;
pub(crate) mod context;
pub mod error;
pub(crate) mod overlap;
pub mod plan;
pub mod progress;
pub mod reactions;
pub(crate) mod sampling;
pub mod state;
