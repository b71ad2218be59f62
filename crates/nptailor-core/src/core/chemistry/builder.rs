use super::templates::{EXTENDER_MARKER, KETONE_MARKER, residue_template};
use crate::core::cluster::backbone::Backbone;
use crate::core::cluster::monomer::Monomer;
use crate::core::io::smiles::{self, SmilesError};
use crate::core::models::atom::{Atom, Element};
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{GraphError, Molecule};
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("No residue template for monomer {0}")]
    MissingTemplate(Monomer),
    #[error("Residue template for {monomer} is malformed: {source}")]
    Template {
        monomer: Monomer,
        #[source]
        source: SmilesError,
    },
    #[error("Residue template for {monomer} lacks a bonded '{marker}' marker")]
    MissingMarker {
        monomer: Monomer,
        marker: &'static str,
    },
    #[error("Failed to link residue at position {position}: {source}")]
    Link {
        position: usize,
        #[source]
        source: GraphError,
    },
}

/// A parsed residue template with its markers stripped.
struct PlacedTemplate {
    molecule: Molecule,
    extender: AtomId,
    ketone: AtomId,
}

fn strip_marker(
    molecule: &mut Molecule,
    monomer: Monomer,
    marker: &'static str,
) -> Result<AtomId, BuildError> {
    let element: Element = marker
        .parse()
        .map_err(|_| BuildError::MissingMarker { monomer, marker })?;
    let marker_id = molecule
        .atoms_iter()
        .find(|(_, a)| a.is(element))
        .map(|(id, _)| id)
        .ok_or(BuildError::MissingMarker { monomer, marker })?;
    let anchor = molecule
        .neighbors(marker_id)
        .first()
        .copied()
        .ok_or(BuildError::MissingMarker { monomer, marker })?;
    molecule.remove_atom(marker_id);
    Ok(anchor)
}

fn place_template(monomer: Monomer) -> Result<PlacedTemplate, BuildError> {
    let template = residue_template(monomer).ok_or(BuildError::MissingTemplate(monomer))?;
    let mut molecule =
        smiles::parse(template).map_err(|source| BuildError::Template { monomer, source })?;
    let ketone = strip_marker(&mut molecule, monomer, KETONE_MARKER)?;
    let extender = strip_marker(&mut molecule, monomer, EXTENDER_MARKER)?;
    Ok(PlacedTemplate {
        molecule,
        extender,
        ketone,
    })
}

/// Builds the linear scaffold for a backbone.
///
/// Each active module with a top substrate contributes one residue built from its
/// monomer's template. Consecutive residues are joined by bonding the previous
/// carbonyl carbon to the next extender atom, and the final carbonyl receives the
/// terminal hydroxyl. Inactive modules and modules without a predicted substrate get
/// no residue, so reactions that target them later fail to resolve a residue.
///
/// # Arguments
///
/// * `backbone` - The ordered modules to assemble.
///
/// # Return
///
/// A scaffold whose residues are indexed by backbone position.
///
/// # Errors
///
/// Returns [`BuildError`] if a monomer has no usable template or a linking bond
/// cannot be formed.
pub fn build_scaffold(backbone: &Backbone) -> Result<Scaffold, BuildError> {
    let mut scaffold = Scaffold::new();
    let mut previous_ketone: Option<AtomId> = None;

    for (position, module) in backbone.modules().iter().enumerate() {
        let Some(monomer) = module.top_substrate().filter(|_| module.active) else {
            trace!(position, "Skipping module without an active substrate.");
            continue;
        };
        let placed = place_template(monomer)?;

        let residue_id = scaffold.add_residue(position);
        let mapping = scaffold.merge_fragment(&placed.molecule, Some(residue_id));
        let extender = mapping[&placed.extender];
        let ketone = mapping[&placed.ketone];

        let alpha = if monomer.is_extender_unit() {
            Some(extender)
        } else {
            scaffold
                .neighbors(ketone)
                .iter()
                .copied()
                .find(|&nb| scaffold.atom(nb).is_some_and(|a| a.is(Element::Carbon)))
        };
        if let Some(residue) = scaffold.residue_mut(position) {
            if !monomer.is_extender_unit() {
                residue.set_nitrogen(Some(extender));
            }
            residue.set_alpha_carbon(alpha);
            residue.set_ketone(Some(ketone));
        }

        if let Some(previous) = previous_ketone {
            scaffold
                .add_bond(previous, extender, BondOrder::Single)
                .map_err(|source| BuildError::Link { position, source })?;
        }
        previous_ketone = Some(ketone);
    }

    if let Some(last) = previous_ketone {
        let owner = scaffold.atom(last).and_then(|a| a.residue_id);
        let hydroxyl = scaffold.add_atom(Atom::new(Element::Oxygen), owner);
        scaffold
            .add_bond(last, hydroxyl, BondOrder::Single)
            .map_err(|source| BuildError::Link {
                position: backbone.len(),
                source,
            })?;
    }

    debug!(
        backbone = %backbone.label,
        residues = scaffold.residue_count(),
        atoms = scaffold.molecule().atom_count(),
        "Built scaffold."
    );
    Ok(scaffold)
}
