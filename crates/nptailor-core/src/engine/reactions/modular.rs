use super::{crosslink, require, resolve, site};
use crate::core::chemistry::edits::{self, functionalize};
use crate::core::chemistry::perception::{self, alcohol_oxygen, ketone_oxygen};
use crate::core::cluster::backbone::{Backbone, ModuleType};
use crate::core::cluster::monomer::Monomer;
use crate::core::cluster::sugar::Sugar;
use crate::core::models::atom::{Element, Hybridization};
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;
use crate::engine::error::ReactionError;
use crate::engine::plan::SubstrateSet;

pub(super) fn ketoreduction(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let mut reduced = 0;
    for position in sites.modules() {
        let ketone = require(resolve(scaffold, position)?.ketone(), "ketone carbon", position)?;
        if edits::reduce_ketone(scaffold, ketone).is_ok() {
            reduced += 1;
        }
    }
    if reduced == 0 {
        return Err(ReactionError::generation(format!(
            "no carbonyl to reduce in {sites}"
        )));
    }
    Ok(())
}

/// The chain carbon bonded to `ketone` outside its own residue.
fn downstream_carbon(scaffold: &Scaffold, residue: &Residue, ketone: AtomId) -> Option<AtomId> {
    scaffold.neighbors(ketone).iter().copied().find(|&nb| {
        !residue.contains(nb) && scaffold.atom(nb).is_some_and(|a| a.is(Element::Carbon))
    })
}

/// Eliminates the reduced hydroxyl, leaving a double bond to the next unit.
pub(super) fn dehydration(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let residue = resolve(scaffold, position)?;
        let ketone = require(residue.ketone(), "ketone carbon", position)?;
        if ketone_oxygen(scaffold, ketone).is_some() {
            return Err(ReactionError::substrate(format!(
                "carbonyl of residue {position} was not reduced"
            )));
        }
        let hydroxyl = require(alcohol_oxygen(scaffold, ketone), "reduced hydroxyl", position)?;
        let downstream = downstream_carbon(scaffold, residue, ketone).ok_or_else(|| {
            ReactionError::generation(format!("residue {position} has no downstream unit"))
        })?;
        if matches!(
            scaffold.hybridization(downstream),
            Some(Hybridization::Sp2 | Hybridization::Sp)
        ) || scaffold.bond_count(downstream) >= 4
        {
            return Err(ReactionError::generation(format!(
                "downstream carbon of residue {position} cannot take a double bond"
            )));
        }
        scaffold.remove_atom(hydroxyl);
        scaffold.set_bond_order(ketone, downstream, BondOrder::Double)?;
    }
    Ok(())
}

pub(super) fn enoylreduction(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let ketone = require(resolve(scaffold, position)?.ketone(), "ketone carbon", position)?;
        let alkenes: Vec<AtomId> = scaffold
            .neighbors(ketone)
            .iter()
            .copied()
            .filter(|&nb| {
                scaffold.bond(ketone, nb) == Some(BondOrder::Double)
                    && scaffold.atom(nb).is_some_and(|a| a.is(Element::Carbon))
            })
            .collect();
        if alkenes.is_empty() {
            return Err(ReactionError::generation(format!(
                "no double bond to reduce at residue {position}"
            )));
        }
        for partner in alkenes {
            scaffold.set_bond_order(ketone, partner, BondOrder::Single)?;
        }
    }
    Ok(())
}

/// Closes the side-chain O or S of `attacker` onto the carbonyl of `carbonyl`,
/// giving a thiazoline, oxazoline or methyloxazoline.
pub(super) fn cyclodehydrate(
    scaffold: &mut Scaffold,
    attacker: usize,
    carbonyl: usize,
) -> Result<(), ReactionError> {
    let residue = resolve(scaffold, attacker)?;
    let nucleophile = require(
        perception::beta_heteroatom(scaffold, residue),
        "side-chain oxygen or sulfur",
        attacker,
    )?;
    if scaffold.bond_count(nucleophile) != 1 {
        return Err(ReactionError::substrate(format!(
            "side chain of residue {attacker} is already substituted"
        )));
    }
    let nitrogen = require(residue.nitrogen(), "backbone nitrogen", attacker)?;
    let ketone = require(resolve(scaffold, carbonyl)?.ketone(), "ketone carbon", carbonyl)?;
    if scaffold.bond(ketone, nitrogen).is_none() {
        return Err(ReactionError::substrate(format!(
            "residues {carbonyl} and {attacker} are not linked by an amide"
        )));
    }

    edits::remove_ketone(scaffold, ketone)?;
    scaffold.set_bond_order(ketone, nitrogen, BondOrder::Double)?;
    crosslink(scaffold, nucleophile, ketone)
}

pub(super) fn heterocyclization(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let previous = super::site(sites, 0)?;
    let module = super::site(sites, 1)?;
    cyclodehydrate(scaffold, module, previous)
}

pub(super) fn n_methylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let nitrogen = require(resolve(scaffold, position)?.nitrogen(), "backbone nitrogen", position)?;
        functionalize(scaffold, "CI", nitrogen)?;
    }
    Ok(())
}

pub(super) fn c_methylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let alpha = require(resolve(scaffold, position)?.alpha_carbon(), "alpha carbon", position)?;
        functionalize(scaffold, "IC", alpha)?;
    }
    Ok(())
}

pub(super) fn o_methylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let hydroxyl = perception::hydroxyl(scaffold, resolve(scaffold, position)?)
            .ok_or_else(|| {
                ReactionError::generation(format!("no free hydroxyl to methylate in residue {position}"))
            })?;
        functionalize(scaffold, "IC", hydroxyl)?;
    }
    Ok(())
}

/// Formylates the ornithine side-chain amine, or the backbone amine of any other
/// residue.
pub(super) fn formylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
    backbone: &Backbone,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let residue = resolve(scaffold, position)?;
        let target = if backbone.top_substrate(position) == Some(Monomer::Ornithine) {
            perception::side_chain_nitrogen(scaffold, residue)
        } else {
            residue.nitrogen()
        };
        let nitrogen = require(target, "formylation nitrogen", position)?;
        functionalize(scaffold, "IC=O", nitrogen)?;
    }
    Ok(())
}

fn chlorination_site(
    scaffold: &Scaffold,
    residue: &Residue,
    backbone: &Backbone,
) -> Option<AtomId> {
    let position = residue.position();
    let module = backbone.module(position)?;
    if module.kind == ModuleType::Acyltransferase {
        return residue.alpha_carbon();
    }
    match module.top_substrate()? {
        Monomer::Malonyl | Monomer::Methylmalonyl => residue.alpha_carbon(),
        Monomer::Threonine | Monomer::Leucine | Monomer::Valine | Monomer::Isoleucine => {
            perception::methyl_carbon(scaffold, residue)
        }
        Monomer::Histidine => perception::imidazole_carbon(scaffold, residue),
        Monomer::Tyrosine | Monomer::Hydroxyphenylglycine | Monomer::BetaHydroxytyrosine => {
            perception::meta_carbon(scaffold, residue)
        }
        Monomer::Phenylalanine => perception::aromatic_carbon(scaffold, residue),
        Monomer::Tryptophan => perception::indole_carbon(scaffold, residue),
        Monomer::Proline => perception::pyrrolidine_carbon(scaffold, residue),
        _ => None,
    }
}

pub(super) fn chlorination(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
    backbone: &Backbone,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let residue = resolve(scaffold, position)?;
        let carbon = chlorination_site(scaffold, residue, backbone).ok_or_else(|| {
            ReactionError::generation(format!("no chlorination site in residue {position}"))
        })?;
        if scaffold.bond_order_sum(carbon) >= 4.0 {
            return Err(ReactionError::generation(format!(
                "chlorination site in residue {position} is saturated"
            )));
        }
        edits::add_substituent(scaffold, carbon, Element::Chlorine, BondOrder::Single)?;
    }
    Ok(())
}

fn free_hydroxyl(scaffold: &Scaffold, position: usize) -> Result<AtomId, ReactionError> {
    let residue = resolve(scaffold, position)?;
    require(perception::hydroxyl(scaffold, residue), "free hydroxyl", position)
}

pub(super) fn carbamoylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let oxygen = free_hydroxyl(scaffold, position)?;
        functionalize(scaffold, "IC(N)=O", oxygen)?;
    }
    Ok(())
}

pub(super) fn sulfonation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let oxygen = free_hydroxyl(scaffold, position)?;
        functionalize(scaffold, "IS(=O)(=O)O", oxygen)?;
    }
    Ok(())
}

/// Attaches the plan's sugar to the free hydroxyl of each site through its
/// anomeric carbon.
pub(super) fn glycosylation(
    sites: &SubstrateSet,
    sugar: Option<&Sugar>,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let sugar = sugar.ok_or_else(|| {
        ReactionError::substrate(format!("no sugar assigned to glycosylation at {sites}"))
    })?;
    for position in sites.modules() {
        let oxygen = free_hydroxyl(scaffold, position)?;
        functionalize(scaffold, &sugar.smiles, oxygen)?;
    }
    Ok(())
}

/// Oxidative aryl ether: the phenol oxygen of the second residue bonds to a ring
/// carbon ortho to the phenol of the first.
pub(super) fn aryl_ether(sites: &SubstrateSet, scaffold: &mut Scaffold) -> Result<(), ReactionError> {
    let first = site(sites, 0)?;
    let second = site(sites, 1)?;
    let carbon = require(
        perception::meta_carbon(scaffold, resolve(scaffold, first)?),
        "free ring carbon beside a phenol",
        first,
    )?;
    let oxygen = require(
        perception::phenol_oxygen(scaffold, resolve(scaffold, second)?),
        "free phenol",
        second,
    )?;
    crosslink(scaffold, oxygen, carbon)
}

/// Oxidative biaryl bond between a ring carbon ortho to the phenol of the first
/// residue and the ring carbon ortho to the side-chain bond of the second.
pub(super) fn biaryl(sites: &SubstrateSet, scaffold: &mut Scaffold) -> Result<(), ReactionError> {
    let first = site(sites, 0)?;
    let second = site(sites, 1)?;
    let a = require(
        perception::meta_carbon(scaffold, resolve(scaffold, first)?),
        "free ring carbon beside a phenol",
        first,
    )?;
    let b = require(
        perception::ortho_carbon(scaffold, resolve(scaffold, second)?),
        "free ortho ring carbon",
        second,
    )?;
    crosslink(scaffold, a, b)
}
