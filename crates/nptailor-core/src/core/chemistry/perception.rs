//! Structural queries over residues in a scaffold.
//!
//! Every function re-reads the current graph; nothing here is cached, since earlier
//! reactions in a branch may have removed or rebonded the atoms being looked for.

use crate::core::models::atom::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;

fn is_element(scaffold: &Scaffold, atom_id: AtomId, element: Element) -> bool {
    scaffold.atom(atom_id).is_some_and(|a| a.is(element))
}

fn is_aromatic(scaffold: &Scaffold, atom_id: AtomId) -> bool {
    scaffold.atom(atom_id).is_some_and(|a| a.aromatic)
}

/// The first neighbor of `atom_id` of the given element, bonded with the given order.
pub fn neighbor_with(
    scaffold: &Scaffold,
    atom_id: AtomId,
    element: Element,
    order: Option<BondOrder>,
) -> Option<AtomId> {
    scaffold.neighbors(atom_id).iter().copied().find(|&nb| {
        is_element(scaffold, nb, element)
            && order.is_none_or(|o| scaffold.bond(atom_id, nb) == Some(o))
    })
}

/// The oxygen double-bonded to `carbon`.
pub fn ketone_oxygen(scaffold: &Scaffold, carbon: AtomId) -> Option<AtomId> {
    neighbor_with(scaffold, carbon, Element::Oxygen, Some(BondOrder::Double))
}

/// A terminal hydroxyl oxygen single-bonded to `carbon`.
pub fn alcohol_oxygen(scaffold: &Scaffold, carbon: AtomId) -> Option<AtomId> {
    scaffold.neighbors(carbon).iter().copied().find(|&nb| {
        is_element(scaffold, nb, Element::Oxygen)
            && scaffold.bond(carbon, nb) == Some(BondOrder::Single)
            && scaffold.bond_count(nb) == 1
    })
}

/// The carboxylic-acid hydroxyl on a carbonyl carbon: the carbon must also carry a
/// double-bonded oxygen.
pub fn carboxyl_alcohol(scaffold: &Scaffold, carbon: AtomId) -> Option<AtomId> {
    ketone_oxygen(scaffold, carbon)?;
    alcohol_oxygen(scaffold, carbon)
}

/// The side-chain carbon bonded to the alpha carbon.
pub fn beta_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    let alpha = residue.alpha_carbon()?;
    scaffold.neighbors(alpha).iter().copied().find(|&nb| {
        Some(nb) != residue.ketone()
            && residue.contains(nb)
            && is_element(scaffold, nb, Element::Carbon)
    })
}

/// The oxygen or sulfur on the beta carbon (Ser/Thr hydroxyl, Cys thiol), whatever
/// its current bonding.
pub fn beta_heteroatom(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    let beta = beta_carbon(scaffold, residue)?;
    scaffold.neighbors(beta).iter().copied().find(|&nb| {
        residue.contains(nb)
            && (is_element(scaffold, nb, Element::Oxygen) || is_element(scaffold, nb, Element::Sulfur))
    })
}

/// The side-chain sulfur of a residue.
pub fn sulfur(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    residue
        .atoms()
        .iter()
        .copied()
        .find(|&id| is_element(scaffold, id, Element::Sulfur))
}

/// A free side-chain hydroxyl: a singly bonded oxygen on a carbon that is neither the
/// backbone carbonyl nor part of a carboxylic acid.
pub fn hydroxyl(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    residue.atoms().iter().copied().find(|&id| {
        if !is_element(scaffold, id, Element::Oxygen) || scaffold.bond_count(id) != 1 {
            return false;
        }
        let carbon = scaffold.neighbors(id)[0];
        is_element(scaffold, carbon, Element::Carbon)
            && Some(carbon) != residue.ketone()
            && scaffold.bond(id, carbon) == Some(BondOrder::Single)
            && ketone_oxygen(scaffold, carbon).is_none()
    })
}

/// A free hydroxyl on an aromatic ring carbon.
pub fn phenol_oxygen(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    residue.atoms().iter().copied().find(|&id| {
        is_element(scaffold, id, Element::Oxygen)
            && scaffold.bond_count(id) == 1
            && is_aromatic(scaffold, scaffold.neighbors(id)[0])
    })
}

/// Whether the alpha and beta carbons are double bonded.
pub fn is_dehydrated(scaffold: &Scaffold, residue: &Residue) -> bool {
    match (residue.alpha_carbon(), beta_carbon(scaffold, residue)) {
        (Some(alpha), Some(beta)) => scaffold.bond(alpha, beta) == Some(BondOrder::Double),
        _ => false,
    }
}

/// A side-chain carboxylic acid carbon (Asp/Glu) with its hydroxyl oxygen.
pub fn side_chain_carboxyl(scaffold: &Scaffold, residue: &Residue) -> Option<(AtomId, AtomId)> {
    residue.atoms().iter().copied().find_map(|id| {
        if Some(id) == residue.ketone()
            || !is_element(scaffold, id, Element::Carbon)
            || scaffold.bond_count(id) != 3
        {
            return None;
        }
        carboxyl_alcohol(scaffold, id).map(|oxygen| (id, oxygen))
    })
}

/// The side-chain nitrogen of a residue, distinct from its backbone nitrogen.
pub fn side_chain_nitrogen(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    residue.atoms().iter().copied().find(|&id| {
        Some(id) != residue.nitrogen() && is_element(scaffold, id, Element::Nitrogen)
    })
}

/// A terminal methyl carbon in the side chain.
pub fn methyl_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    residue.atoms().iter().copied().find(|&id| {
        Some(id) != residue.alpha_carbon()
            && Some(id) != residue.ketone()
            && is_element(scaffold, id, Element::Carbon)
            && scaffold.bond_count(id) == 1
            && is_element(scaffold, scaffold.neighbors(id)[0], Element::Carbon)
    })
}

/// An aromatic C-H carbon, optionally constrained by a predicate on its neighbors.
fn aromatic_ch(
    scaffold: &Scaffold,
    residue: &Residue,
    accept: impl Fn(&[AtomId]) -> bool,
) -> Option<AtomId> {
    residue.atoms().iter().copied().find(|&id| {
        is_element(scaffold, id, Element::Carbon)
            && is_aromatic(scaffold, id)
            && scaffold.bond_count(id) == 2
            && accept(scaffold.neighbors(id))
    })
}

/// Any aromatic C-H carbon in the residue.
pub fn aromatic_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    aromatic_ch(scaffold, residue, |_| true)
}

/// An aromatic C-H carbon ortho to a phenolic hydroxyl (meta to the side-chain bond).
pub fn meta_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    aromatic_ch(scaffold, residue, |neighbors| {
        neighbors.iter().any(|&nb| {
            is_aromatic(scaffold, nb)
                && neighbor_with(scaffold, nb, Element::Oxygen, Some(BondOrder::Single)).is_some()
        })
    })
}

/// An aromatic C-H carbon next to the ring carbon that carries the side chain.
pub fn ortho_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    aromatic_ch(scaffold, residue, |neighbors| {
        neighbors.iter().any(|&nb| {
            is_aromatic(scaffold, nb)
                && scaffold.neighbors(nb).iter().any(|&outer| {
                    is_element(scaffold, outer, Element::Carbon) && !is_aromatic(scaffold, outer)
                })
        })
    })
}

/// The imidazole C-H carbon between the two ring nitrogens of histidine.
pub fn imidazole_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    aromatic_ch(scaffold, residue, |neighbors| {
        neighbors
            .iter()
            .all(|&nb| is_element(scaffold, nb, Element::Nitrogen))
    })
}

/// The indole C7 carbon of tryptophan: the benzo C-H next to the ring-fusion carbon
/// that bears the indole nitrogen.
pub fn indole_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    aromatic_ch(scaffold, residue, |neighbors| {
        neighbors.iter().any(|&nb| {
            is_element(scaffold, nb, Element::Carbon)
                && scaffold.bond_count(nb) == 3
                && neighbor_with(scaffold, nb, Element::Nitrogen, None).is_some()
        })
    })
}

/// The proline ring carbon two bonds away from the alpha carbon.
pub fn pyrrolidine_carbon(scaffold: &Scaffold, residue: &Residue) -> Option<AtomId> {
    let alpha = residue.alpha_carbon()?;
    residue.atoms().iter().copied().find(|&id| {
        id != alpha
            && is_element(scaffold, id, Element::Carbon)
            && scaffold.bond_count(id) == 2
            && scaffold
                .neighbors(id)
                .iter()
                .all(|&nb| nb != alpha && is_element(scaffold, nb, Element::Carbon))
    })
}
