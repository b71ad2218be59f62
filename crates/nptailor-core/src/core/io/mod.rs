//! Provides input/output for the SMILES line notation.
//!
//! Scaffolds are abstract graphs; this module turns them into strings for downstream
//! consumers and parses the residue templates and fragments that the chemistry layer
//! splices into scaffolds. A trait-based interface mirrors file-oriented I/O so the
//! same format can be read from and written to paths.

pub mod smiles;
pub mod traits;
