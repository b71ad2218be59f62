//! # NPTailor Core Library
//!
//! A combinatorial engine for predicting the tailored structures of natural products
//! encoded by biosynthetic gene clusters.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that the chemistry, the
//! combinatorics and the orchestration stay separately testable.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Scaffold`,
//!   `Backbone`), scaffold construction from residue templates, graph-edit primitives
//!   and line-notation I/O.
//!
//! - **[`engine`]: The Logic Core.** Site enumeration (annotators), scaffold mutation
//!   (reactions), plan combination with overlap rules, configuration and error plumbing.
//!
//! - **[`workflows`]: The Public API.** The branch driver that ties annotators, the
//!   combinator and reactions together into one deterministic, bounded search that
//!   yields the surviving tailored scaffolds.

pub mod core;
pub mod engine;
pub mod workflows;
