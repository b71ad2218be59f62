//! Primitive graph edits shared by every tailoring reaction.

use super::perception::{alcohol_oxygen, ketone_oxygen};
use crate::core::io::smiles;
use crate::core::models::atom::{Atom, Element};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::GraphError;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Atom {atom:?} ({element}) cannot carry a substituent")]
    UnsupportedTarget { atom: AtomId, element: Element },
    #[error("Atom {atom:?} has no free valence ({bonds} bonds, bond-order sum {order_sum})")]
    NoFreeValence {
        atom: AtomId,
        bonds: usize,
        order_sum: f64,
    },
    #[error("Fragment '{fragment}' is malformed: {reason}")]
    Fragment { fragment: String, reason: String },
    #[error("Carbon {carbon:?} has no {kind} oxygen")]
    MissingOxygen { carbon: AtomId, kind: &'static str },
}

/// Splices a fragment onto `target`.
///
/// The fragment is written in line notation with a single iodine marking the
/// attachment point; the atom bonded to the iodine is bonded to `target` and the
/// iodine is discarded. The new atoms join the residue that owns `target`.
///
/// # Arguments
///
/// * `scaffold` - The scaffold to modify.
/// * `fragment` - Marked fragment, e.g. `"IC"` for a methyl group.
/// * `target` - The atom receiving the fragment; must be C, N, O or S.
///
/// # Return
///
/// The scaffold id of the fragment's attachment atom.
///
/// # Errors
///
/// Returns [`EditError::NoFreeValence`] when the target's bond count or bond-order
/// sum has already reached its element's valence.
pub fn functionalize(
    scaffold: &mut Scaffold,
    fragment: &str,
    target: AtomId,
) -> Result<AtomId, EditError> {
    let element = scaffold
        .atom(target)
        .ok_or(GraphError::AtomNotFound(target))?
        .element;
    let valence = element.max_valence().ok_or(EditError::UnsupportedTarget {
        atom: target,
        element,
    })?;
    let bonds = scaffold.bond_count(target);
    let order_sum = scaffold.bond_order_sum(target);
    if bonds >= valence as usize || order_sum >= valence as f64 {
        return Err(EditError::NoFreeValence {
            atom: target,
            bonds,
            order_sum,
        });
    }

    let malformed = |reason: String| EditError::Fragment {
        fragment: fragment.to_string(),
        reason,
    };
    let mut molecule = smiles::parse(fragment).map_err(|e| malformed(e.to_string()))?;
    let marker = molecule
        .atoms_iter()
        .find(|(_, a)| a.is(Element::Iodine))
        .map(|(id, _)| id)
        .ok_or_else(|| malformed("no iodine attachment marker".to_string()))?;
    let attachment = match molecule.neighbors(marker) {
        [single] => *single,
        _ => return Err(malformed("marker must have exactly one neighbor".to_string())),
    };
    molecule.remove_atom(marker);

    let owner = scaffold.atom(target).and_then(|a| a.residue_id);
    let mapping = scaffold.merge_fragment(&molecule, owner);
    let attachment = mapping[&attachment];
    scaffold.add_bond(target, attachment, BondOrder::Single)?;
    if let Some(atom) = scaffold.atom_mut(target) {
        atom.hydrogens = atom.hydrogens.saturating_sub(1);
    }
    trace!(fragment, "Functionalized atom.");
    Ok(attachment)
}

/// Adds a single atom of `element` bonded to `target` with `order`, in the residue
/// that owns `target`.
pub fn add_substituent(
    scaffold: &mut Scaffold,
    target: AtomId,
    element: Element,
    order: BondOrder,
) -> Result<AtomId, EditError> {
    let owner = scaffold
        .atom(target)
        .ok_or(GraphError::AtomNotFound(target))?
        .residue_id;
    let atom_id = scaffold.add_atom(Atom::new(element), owner);
    scaffold.add_bond(target, atom_id, order)?;
    Ok(atom_id)
}

/// Converts the carbonyl on `carbon` into a hydroxyl (C=O to C-O).
pub fn reduce_ketone(scaffold: &mut Scaffold, carbon: AtomId) -> Result<AtomId, EditError> {
    let oxygen = ketone_oxygen(scaffold, carbon).ok_or(EditError::MissingOxygen {
        carbon,
        kind: "ketone",
    })?;
    scaffold.set_bond_order(carbon, oxygen, BondOrder::Single)?;
    Ok(oxygen)
}

/// Removes the double-bonded oxygen from `carbon`.
pub fn remove_ketone(scaffold: &mut Scaffold, carbon: AtomId) -> Result<(), EditError> {
    let oxygen = ketone_oxygen(scaffold, carbon).ok_or(EditError::MissingOxygen {
        carbon,
        kind: "ketone",
    })?;
    scaffold.remove_atom(oxygen);
    Ok(())
}

/// Removes the terminal hydroxyl oxygen from `carbon`.
pub fn remove_alcohol(scaffold: &mut Scaffold, carbon: AtomId) -> Result<(), EditError> {
    let oxygen = alcohol_oxygen(scaffold, carbon).ok_or(EditError::MissingOxygen {
        carbon,
        kind: "alcohol",
    })?;
    scaffold.remove_atom(oxygen);
    Ok(())
}

/// Cleaves `carbon` from `anchor` and deletes `carbon` together with every atom
/// still attached to it.
pub fn decarboxylate(
    scaffold: &mut Scaffold,
    carbon: AtomId,
    anchor: AtomId,
) -> Result<(), EditError> {
    scaffold.remove_bond(carbon, anchor)?;
    let substituents = scaffold.neighbors(carbon).to_vec();
    for atom_id in substituents {
        scaffold.remove_atom(atom_id);
    }
    scaffold.remove_atom(carbon);
    Ok(())
}
