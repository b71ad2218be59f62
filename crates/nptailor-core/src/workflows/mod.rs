//! # Workflows Module
//!
//! High-level entry points that run the complete tailoring search.
//!
//! ## Overview
//!
//! A workflow takes the linear backbones predicted for a cluster together with the
//! cluster's tailoring domains, and returns every tailored scaffold that survives
//! execution along with a record of each discarded combination. Configuration is
//! validated up front; everything after that is bounded by the configured ceilings
//! and deterministic for a given input.
//!
//! ## Architecture
//!
//! - **Tailoring Workflow** ([`tailor`]) - Scaffold construction, site annotation,
//!   plan combination, branch execution and result collection.

pub mod tailor;
