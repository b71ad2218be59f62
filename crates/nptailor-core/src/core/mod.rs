//! # Core Module
//!
//! The foundation layer: molecular graphs, biosynthetic cluster descriptions, scaffold
//! chemistry and line-notation I/O.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, residues and scaffolds
//! - **Cluster Description** ([`cluster`]) - Backbones, modules, domains and the
//!   read-only cluster context consulted by gating logic
//! - **Scaffold Chemistry** ([`chemistry`]) - Residue templates, scaffold construction,
//!   structural queries and primitive graph edits
//! - **File I/O** ([`io`]) - Reading and writing the SMILES line notation

pub mod chemistry;
pub mod cluster;
pub mod io;
pub mod models;
