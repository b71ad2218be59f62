//! Scaffold chemistry: residue templates, linear scaffold assembly, structural
//! perception, and the primitive graph edits every tailoring reaction is built from.

pub mod builder;
pub mod edits;
pub mod perception;
pub mod templates;
