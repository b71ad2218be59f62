//! # Core Models Module
//!
//! Data structures representing the molecular graphs that tailoring reactions mutate.
//!
//! ## Overview
//!
//! A [`molecule::Molecule`] is an arena of atoms addressed by opaque ids plus a bond
//! table keyed by normalized id pairs. A [`scaffold::Scaffold`] wraps a molecule with
//! the per-position residue index that reactions use to locate their targets.
//! Cloning either is a plain arena clone, so every combinatorial branch owns an
//! independent copy.
//!
//! ## Key Components
//!
//! - [`atom`] - Elements, hybridization and the atom record
//! - [`topology`] - Bond orders and bonds
//! - [`molecule`] - The atom/bond graph and its primitive edits
//! - [`residue`] - Named atom handles for one backbone position
//! - [`scaffold`] - A molecule plus its backbone-position index
//! - [`ids`] - Unique identifier types for atoms and residues
//!
//! ## Usage
//!
//! ```ignore
//! use nptailor::core::models::{atom::{Atom, Element}, molecule::Molecule, topology::BondOrder};
//!
//! let mut molecule = Molecule::new();
//! let c = molecule.add_atom(Atom::new(Element::Carbon));
//! let o = molecule.add_atom(Atom::new(Element::Oxygen));
//! molecule.add_bond(c, o, BondOrder::Double)?;
//! ```

pub mod atom;
pub mod ids;
pub mod molecule;
pub mod residue;
pub mod scaffold;
pub mod topology;
