use super::modular::cyclodehydrate;
use super::{crosslink, pairs, require, resolve, site};
use crate::core::chemistry::edits::{self, functionalize};
use crate::core::chemistry::perception::{self, ketone_oxygen, neighbor_with};
use crate::core::models::atom::Element;
use crate::core::models::ids::AtomId;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;
use crate::engine::error::ReactionError;
use crate::engine::plan::SubstrateSet;
use tracing::trace;

/// Eliminates the Ser/Thr hydroxyl to dehydroalanine or dehydrobutyrine. An
/// N-terminal residue tautomerizes to its 2-oxo acid, losing the amine.
pub(super) fn dehydration(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for position in sites.modules() {
        let residue = resolve(scaffold, position)?;
        require(residue.ketone(), "ketone carbon", position)?;
        let alpha = require(residue.alpha_carbon(), "alpha carbon", position)?;
        let beta = require(perception::beta_carbon(scaffold, residue), "beta carbon", position)?;
        let oxygen = require(
            neighbor_with(scaffold, beta, Element::Oxygen, Some(BondOrder::Single))
                .filter(|&o| residue.contains(o)),
            "side-chain hydroxyl",
            position,
        )?;
        if scaffold.bond_count(oxygen) != 1 {
            return Err(ReactionError::substrate(format!(
                "hydroxyl of residue {position} is substituted"
            )));
        }
        let nitrogen = residue.nitrogen();

        scaffold.remove_atom(oxygen);
        scaffold.set_bond_order(alpha, beta, BondOrder::Double)?;

        if position == 0 {
            if let Some(nitrogen) = nitrogen {
                scaffold.set_bond_order(alpha, beta, BondOrder::Single)?;
                scaffold.remove_atom(nitrogen);
                edits::add_substituent(scaffold, alpha, Element::Oxygen, BondOrder::Double)?;
                trace!("N-terminal dehydroamino acid tautomerized.");
            }
        }
    }
    Ok(())
}

/// Re-forms the enamine of a tautomerized N-terminal residue so it can be
/// crosslinked.
fn restore_dehydroamino_acid(scaffold: &mut Scaffold, position: usize) -> Result<(), ReactionError> {
    let residue = resolve(scaffold, position)?;
    let alpha = require(residue.alpha_carbon(), "alpha carbon", position)?;
    let Some(oxo) = ketone_oxygen(scaffold, alpha) else {
        return Ok(());
    };
    let beta = require(perception::beta_carbon(scaffold, residue), "beta carbon", position)?;
    scaffold.remove_atom(oxo);
    scaffold.set_bond_order(alpha, beta, BondOrder::Double)?;
    let nitrogen = functionalize(scaffold, "NI", alpha)?;
    if let Some(residue) = scaffold.residue_mut(position) {
        residue.set_nitrogen(Some(nitrogen));
    }
    Ok(())
}

/// Adds each cysteine thiol across a dehydrated residue, as `[lan, cys, ...]` pairs.
pub(super) fn lanthionine(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for (lan, cys) in pairs(sites) {
        let sulfur = require(
            perception::sulfur(scaffold, resolve(scaffold, cys)?),
            "cysteine sulfur",
            cys,
        )?;
        if scaffold.bond_count(sulfur) > 1 {
            trace!(cys, "Cysteine already crosslinked, skipping pair.");
            continue;
        }

        restore_dehydroamino_acid(scaffold, lan)?;
        let residue = resolve(scaffold, lan)?;
        let alpha = require(residue.alpha_carbon(), "alpha carbon", lan)?;
        let beta = require(perception::beta_carbon(scaffold, residue), "beta carbon", lan)?;
        if neighbor_with(scaffold, beta, Element::Sulfur, None).is_some() {
            return Err(ReactionError::substrate(format!(
                "beta carbon of residue {lan} already carries a thioether"
            )));
        }
        if !perception::is_dehydrated(scaffold, residue) {
            return Err(ReactionError::substrate(format!(
                "residue {lan} is not dehydrated"
            )));
        }

        scaffold.set_bond_order(alpha, beta, BondOrder::Single)?;
        crosslink(scaffold, beta, sulfur)?;
    }
    Ok(())
}

/// Crosslinks a Ser (or Cys) to the C-terminal cysteine and oxidatively
/// decarboxylates the latter into an enethiol.
pub(super) fn aminovinylcysteine(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let donor = site(sites, 0)?;
    let terminal = site(sites, 1)?;

    let last = resolve(scaffold, terminal)?;
    let sulfur = require(perception::sulfur(scaffold, last), "cysteine sulfur", terminal)?;
    let alpha_c = require(last.alpha_carbon(), "alpha carbon", terminal)?;
    let beta_c = require(perception::beta_carbon(scaffold, last), "beta carbon", terminal)?;
    let ketone_c = require(last.ketone(), "ketone carbon", terminal)?;
    if scaffold.bond_count(sulfur) != 1 {
        return Err(ReactionError::generation(format!(
            "C-terminal cysteine {terminal} thiol is already substituted"
        )));
    }

    let residue = resolve(scaffold, donor)?;
    let beta = require(perception::beta_carbon(scaffold, residue), "beta carbon", donor)?;
    if let Some(donor_sulfur) = perception::sulfur(scaffold, residue) {
        scaffold.remove_atom(donor_sulfur);
    } else {
        let alpha = require(residue.alpha_carbon(), "alpha carbon", donor)?;
        if !perception::is_dehydrated(scaffold, residue) {
            return Err(ReactionError::substrate(format!(
                "residue {donor} is not dehydrated"
            )));
        }
        if neighbor_with(scaffold, beta, Element::Sulfur, None).is_some() {
            return Err(ReactionError::substrate(format!(
                "beta carbon of residue {donor} already carries a thioether"
            )));
        }
        scaffold.set_bond_order(alpha, beta, BondOrder::Single)?;
    }
    crosslink(scaffold, sulfur, beta)?;

    edits::decarboxylate(scaffold, ketone_c, alpha_c)?;
    scaffold.set_bond_order(alpha_c, beta_c, BondOrder::Double)?;
    Ok(())
}

/// Reduces the N-terminal 2-oxo acid left by dehydration to its 2-hydroxy acid.
pub(super) fn pyruvate_reduction(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let position = site(sites, 0)?;
    let residue = resolve(scaffold, position)?;
    if residue.nitrogen().is_some() {
        return Err(ReactionError::substrate(format!(
            "residue {position} still carries its amine"
        )));
    }
    let alpha = require(residue.alpha_carbon(), "alpha carbon", position)?;
    edits::reduce_ketone(scaffold, alpha)?;
    Ok(())
}

/// Cyclodehydrates each `[m, m - 1]` pair into an azoline.
pub(super) fn azoline(sites: &SubstrateSet, scaffold: &mut Scaffold) -> Result<(), ReactionError> {
    for (attacker, carbonyl) in pairs(sites) {
        cyclodehydrate(scaffold, attacker, carbonyl)?;
    }
    Ok(())
}

/// Oxidizes every cyclized azoline of the set to the aromatic-level azole.
pub(super) fn azole(sites: &SubstrateSet, scaffold: &mut Scaffold) -> Result<(), ReactionError> {
    for (position, _) in pairs(sites) {
        let residue = resolve(scaffold, position)?;
        let alpha = require(residue.alpha_carbon(), "alpha carbon", position)?;
        let beta = require(perception::beta_carbon(scaffold, residue), "beta carbon", position)?;
        let heteroatom = require(
            perception::beta_heteroatom(scaffold, residue),
            "side-chain oxygen or sulfur",
            position,
        )?;
        if scaffold.bond_count(heteroatom) == 1 {
            trace!(position, "Residue not cyclized, skipping oxidation.");
            continue;
        }
        scaffold.set_bond_order(alpha, beta, BondOrder::Double)?;
    }
    Ok(())
}

/// Closes the six-membered nitrogen heterocycle of a thiopeptide from two
/// dehydroalanines and the carbonyl preceding the second, given as
/// `[first, second, second - 1]`.
///
/// The two beta carbons are joined and the first alpha carbon bonds the freed
/// carbonyl carbon. An N-terminal first residue, left as its 2-oxo acid by
/// dehydration, loses that oxo group and ends up aromatic-level; otherwise the ring
/// is a dihydropyridine, or a tetrahydropyridine when `reduced` is set.
pub(super) fn pyridine(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
    reduced: bool,
) -> Result<(), ReactionError> {
    let first = site(sites, 0)?;
    let second = site(sites, 1)?;
    let closing = site(sites, 2)?;

    let r1 = resolve(scaffold, first)?;
    let alpha1 = require(r1.alpha_carbon(), "alpha carbon", first)?;
    let beta1 = require(perception::beta_carbon(scaffold, r1), "beta carbon", first)?;
    let oxo = ketone_oxygen(scaffold, alpha1);
    if oxo.is_none() && !perception::is_dehydrated(scaffold, r1) {
        return Err(ReactionError::substrate(format!(
            "residue {first} is not dehydrated"
        )));
    }

    let r2 = resolve(scaffold, second)?;
    let alpha2 = require(r2.alpha_carbon(), "alpha carbon", second)?;
    let beta2 = require(perception::beta_carbon(scaffold, r2), "beta carbon", second)?;
    let nitrogen2 = require(r2.nitrogen(), "backbone nitrogen", second)?;
    if !perception::is_dehydrated(scaffold, r2) {
        return Err(ReactionError::substrate(format!(
            "residue {second} is not dehydrated"
        )));
    }

    let r3 = resolve(scaffold, closing)?;
    let carbonyl = require(r3.ketone(), "ketone carbon", closing)?;
    require(ketone_oxygen(scaffold, carbonyl), "ketone oxygen", closing)?;
    if perception::sulfur(scaffold, r3).is_some_and(|s| scaffold.bond_count(s) != 1) {
        return Err(ReactionError::substrate(format!(
            "residue {closing} is a cyclized cysteine"
        )));
    }

    for (position, beta) in [(first, beta1), (second, beta2)] {
        if scaffold.bond_count(beta) != 1 {
            return Err(ReactionError::substrate(format!(
                "beta carbon of residue {position} is substituted"
            )));
        }
    }

    crosslink(scaffold, beta1, beta2)?;
    match oxo {
        Some(oxygen) => {
            scaffold.remove_atom(oxygen);
            scaffold.set_bond_order(alpha1, beta1, BondOrder::Double)?;
        }
        None => scaffold.set_bond_order(alpha1, beta1, BondOrder::Single)?,
    }
    edits::remove_ketone(scaffold, carbonyl)?;
    crosslink(scaffold, alpha1, carbonyl)?;

    if reduced {
        scaffold.set_bond_order(alpha2, beta2, BondOrder::Single)?;
        scaffold.set_bond_order(alpha2, nitrogen2, BondOrder::Double)?;
    } else {
        scaffold.set_bond_order(carbonyl, nitrogen2, BondOrder::Double)?;
    }
    trace!(first, second, closing, reduced, "Closed pyridine ring.");
    Ok(())
}

/// The sulfur of a cysteine that is not yet bonded to anything but its own side chain.
fn free_thiol(scaffold: &Scaffold, position: usize) -> Result<AtomId, ReactionError> {
    let residue = resolve(scaffold, position)?;
    let sulfur = require(perception::sulfur(scaffold, residue), "cysteine sulfur", position)?;
    if scaffold.bond_count(sulfur) != 1 {
        return Err(ReactionError::generation(format!(
            "thiol of residue {position} is not free"
        )));
    }
    Ok(sulfur)
}

pub(super) fn disulfide(sites: &SubstrateSet, scaffold: &mut Scaffold) -> Result<(), ReactionError> {
    for (first, second) in pairs(sites) {
        let a = free_thiol(scaffold, first)?;
        let b = free_thiol(scaffold, second)?;
        crosslink(scaffold, a, b)?;
    }
    Ok(())
}

/// Links each cysteine sulfur to the alpha carbon of its acceptor.
pub(super) fn sactipeptide(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    for (cys, acceptor) in pairs(sites) {
        let sulfur = free_thiol(scaffold, cys)?;
        let alpha = require(resolve(scaffold, acceptor)?.alpha_carbon(), "alpha carbon", acceptor)?;
        crosslink(scaffold, sulfur, alpha)?;
    }
    Ok(())
}

/// Closes the isopeptide ring between the N-terminal amine and an Asp/Glu side chain.
pub(super) fn lasso_cyclization(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let first = site(sites, 0)?;
    let acceptor = site(sites, 1)?;
    let nitrogen = require(resolve(scaffold, first)?.nitrogen(), "backbone nitrogen", first)?;
    let (carbon, hydroxyl) = perception::side_chain_carboxyl(scaffold, resolve(scaffold, acceptor)?)
        .ok_or_else(|| {
            ReactionError::substrate(format!("no side-chain carboxyl in residue {acceptor}"))
        })?;
    scaffold.remove_atom(hydroxyl);
    crosslink(scaffold, nitrogen, carbon)
}

/// Head-to-tail amide between the N-terminal amine and the C-terminal carboxyl.
pub(super) fn macrocyclization(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let first = site(sites, 0)?;
    let last = site(sites, 1)?;
    let nitrogen = require(resolve(scaffold, first)?.nitrogen(), "backbone nitrogen", first)?;
    if scaffold.bond_count(nitrogen) > 2 {
        return Err(ReactionError::generation(format!(
            "N-terminal amine of residue {first} is substituted"
        )));
    }
    let ketone = require(resolve(scaffold, last)?.ketone(), "ketone carbon", last)?;
    let hydroxyl = perception::carboxyl_alcohol(scaffold, ketone).ok_or_else(|| {
        ReactionError::generation(format!("C-terminal carboxyl of residue {last} is not free"))
    })?;
    scaffold.remove_atom(hydroxyl);
    crosslink(scaffold, ketone, nitrogen)
}

pub(super) fn n_acetylation(
    sites: &SubstrateSet,
    scaffold: &mut Scaffold,
) -> Result<(), ReactionError> {
    let position = site(sites, 0)?;
    let nitrogen = require(resolve(scaffold, position)?.nitrogen(), "backbone nitrogen", position)?;
    if scaffold.bond_count(nitrogen) > 2 {
        return Err(ReactionError::generation(format!(
            "N-terminal amine of residue {position} is substituted"
        )));
    }
    functionalize(scaffold, "IC(C)=O", nitrogen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::builder::build_scaffold;
    use crate::core::cluster::backbone::Backbone;

    fn scaffold(sequence: &str) -> Scaffold {
        build_scaffold(&Backbone::from_peptide("core", sequence).unwrap()).unwrap()
    }

    fn sites(positions: &[usize]) -> SubstrateSet {
        SubstrateSet::of(positions)
    }

    #[test]
    fn n_terminal_dehydration_tautomerizes_and_can_be_reduced() {
        let mut scaffold = scaffold("SA");
        assert!(matches!(
            pyruvate_reduction(&sites(&[0]), &mut scaffold),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));

        dehydration(&sites(&[0]), &mut scaffold).unwrap();
        let residue = scaffold.residue(0).unwrap();
        assert!(residue.nitrogen().is_none());
        let alpha = residue.alpha_carbon().unwrap();
        assert!(ketone_oxygen(&scaffold, alpha).is_some());

        pyruvate_reduction(&sites(&[0]), &mut scaffold).unwrap();
        assert!(ketone_oxygen(&scaffold, alpha).is_none());
    }

    #[test]
    fn internal_dehydration_keeps_the_amine() {
        let mut scaffold = scaffold("AT");
        dehydration(&sites(&[1]), &mut scaffold).unwrap();
        let residue = scaffold.residue(1).unwrap();
        assert!(residue.nitrogen().is_some());
        assert!(perception::is_dehydrated(&scaffold, residue));
    }

    #[test]
    fn dehydration_rejects_residues_without_hydroxyl() {
        let mut scaffold = scaffold("CA");
        assert!(matches!(
            dehydration(&sites(&[0]), &mut scaffold),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    #[test]
    fn lanthionine_requires_prior_dehydration() {
        let mut scaffold = scaffold("ASAC");
        assert!(matches!(
            lanthionine(&sites(&[1, 3]), &mut scaffold),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    #[test]
    fn second_thioether_on_one_beta_carbon_is_an_invalid_substrate() {
        let mut scaffold = scaffold("ASCC");
        dehydration(&sites(&[1]), &mut scaffold).unwrap();
        lanthionine(&sites(&[1, 2]), &mut scaffold).unwrap();
        assert!(matches!(
            lanthionine(&sites(&[1, 3]), &mut scaffold),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    #[test]
    fn aminovinylcysteine_decarboxylates_the_terminal_cysteine() {
        let mut scaffold = scaffold("ASAC");
        dehydration(&sites(&[1]), &mut scaffold).unwrap();
        let atoms = scaffold.molecule().atom_count();
        aminovinylcysteine(&sites(&[1, 3]), &mut scaffold).unwrap();

        assert_eq!(scaffold.molecule().atom_count(), atoms - 3);
        let terminal = scaffold.residue(3).unwrap();
        assert!(terminal.ketone().is_none());
        assert!(perception::is_dehydrated(&scaffold, terminal));
        let sulfur = perception::sulfur(&scaffold, terminal).unwrap();
        assert_eq!(scaffold.bond_count(sulfur), 2);
    }

    #[test]
    fn azoline_then_azole_oxidizes_cyclized_residue() {
        let mut scaffold = scaffold("GCA");
        azoline(&sites(&[1, 0]), &mut scaffold).unwrap();
        let residue = scaffold.residue(1).unwrap();
        assert!(!perception::is_dehydrated(&scaffold, residue));

        azole(&sites(&[1, 0]), &mut scaffold).unwrap();
        assert!(perception::is_dehydrated(&scaffold, scaffold.residue(1).unwrap()));

        assert!(matches!(
            azoline(&sites(&[1, 0]), &mut scaffold),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    #[test]
    fn azole_skips_uncyclized_residues() {
        let mut scaffold = scaffold("GCA");
        azole(&sites(&[1, 0]), &mut scaffold).unwrap();
        assert!(!perception::is_dehydrated(&scaffold, scaffold.residue(1).unwrap()));
    }

    #[test]
    fn disulfide_needs_free_thiols() {
        let mut scaffold = scaffold("CAC");
        disulfide(&sites(&[0, 2]), &mut scaffold).unwrap();
        let s0 = perception::sulfur(&scaffold, scaffold.residue(0).unwrap()).unwrap();
        let s2 = perception::sulfur(&scaffold, scaffold.residue(2).unwrap()).unwrap();
        assert_eq!(scaffold.bond(s0, s2), Some(BondOrder::Single));
        assert!(matches!(
            disulfide(&sites(&[0, 2]), &mut scaffold),
            Err(ReactionError::ScaffoldGeneration(_))
        ));
    }

    #[test]
    fn sactipeptide_links_sulfur_to_acceptor_alpha_carbon() {
        let mut scaffold = scaffold("CAAAAAAG");
        sactipeptide(&sites(&[0, 7]), &mut scaffold).unwrap();
        let sulfur = perception::sulfur(&scaffold, scaffold.residue(0).unwrap()).unwrap();
        let alpha = scaffold.residue(7).unwrap().alpha_carbon().unwrap();
        assert!(scaffold.bond(sulfur, alpha).is_some());
    }

    #[test]
    fn lasso_cyclization_uses_side_chain_carboxyl() {
        let mut scaffold = scaffold("GAAAAAAD");
        let oxygens_before = count_oxygens(&scaffold);
        lasso_cyclization(&sites(&[0, 7]), &mut scaffold).unwrap();
        assert_eq!(count_oxygens(&scaffold), oxygens_before - 1);

        let mut plain = self::scaffold("GAAAAAAA");
        assert!(matches!(
            lasso_cyclization(&sites(&[0, 7]), &mut plain),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    fn count_oxygens(scaffold: &Scaffold) -> usize {
        scaffold
            .molecule()
            .atoms_iter()
            .filter(|(_, a)| a.is(Element::Oxygen))
            .count()
    }

    #[test]
    fn macrocyclization_closes_once() {
        let mut scaffold = scaffold("GAVC");
        macrocyclization(&sites(&[0, 3]), &mut scaffold).unwrap();
        let nitrogen = scaffold.residue(0).unwrap().nitrogen().unwrap();
        let ketone = scaffold.residue(3).unwrap().ketone().unwrap();
        assert!(scaffold.bond(nitrogen, ketone).is_some());
        assert!(matches!(
            macrocyclization(&sites(&[0, 3]), &mut scaffold),
            Err(ReactionError::ScaffoldGeneration(_))
        ));
    }

    #[test]
    fn n_acetylation_adds_acetyl_and_rejects_missing_amine() {
        let mut scaffold = scaffold("GA");
        let atoms = scaffold.molecule().atom_count();
        n_acetylation(&sites(&[0]), &mut scaffold).unwrap();
        assert_eq!(scaffold.molecule().atom_count(), atoms + 3);

        let mut oxo = self::scaffold("SA");
        dehydration(&sites(&[0]), &mut oxo).unwrap();
        assert!(matches!(
            n_acetylation(&sites(&[0]), &mut oxo),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }

    fn ring_atoms(scaffold: &Scaffold, sites: [usize; 3]) -> (AtomId, AtomId, AtomId, AtomId, AtomId) {
        let r1 = scaffold.residue(sites[0]).unwrap();
        let r2 = scaffold.residue(sites[1]).unwrap();
        let r3 = scaffold.residue(sites[2]).unwrap();
        (
            r1.alpha_carbon().unwrap(),
            perception::beta_carbon(scaffold, r1).unwrap(),
            r2.alpha_carbon().unwrap(),
            r2.nitrogen().unwrap(),
            r3.ketone().unwrap(),
        )
    }

    #[test]
    fn pyridine_closes_ring_through_preceding_carbonyl() {
        let mut scaffold = scaffold("ASAAAAAAAASA");
        dehydration(&sites(&[1, 10]), &mut scaffold).unwrap();
        let oxygens = count_oxygens(&scaffold);
        pyridine(&sites(&[1, 10, 9]), &mut scaffold, false).unwrap();

        assert_eq!(count_oxygens(&scaffold), oxygens - 1);
        let (alpha1, beta1, _, nitrogen2, carbonyl) = ring_atoms(&scaffold, [1, 10, 9]);
        let beta2 = perception::beta_carbon(&scaffold, scaffold.residue(10).unwrap()).unwrap();
        assert_eq!(scaffold.bond(beta1, beta2), Some(BondOrder::Single));
        assert_eq!(scaffold.bond(alpha1, carbonyl), Some(BondOrder::Single));
        assert_eq!(scaffold.bond(alpha1, beta1), Some(BondOrder::Single));
        assert_eq!(scaffold.bond(carbonyl, nitrogen2), Some(BondOrder::Double));
    }

    #[test]
    fn reduced_pyridine_keeps_the_imine_on_the_second_residue() {
        let mut scaffold = scaffold("ASAAAAAAAASA");
        dehydration(&sites(&[1, 10]), &mut scaffold).unwrap();
        pyridine(&sites(&[1, 10, 9]), &mut scaffold, true).unwrap();
        let (_, _, alpha2, nitrogen2, carbonyl) = ring_atoms(&scaffold, [1, 10, 9]);
        assert_eq!(scaffold.bond(alpha2, nitrogen2), Some(BondOrder::Double));
        assert_eq!(scaffold.bond(carbonyl, nitrogen2), Some(BondOrder::Single));
    }

    #[test]
    fn n_terminal_pyridine_drops_the_oxo_group() {
        let mut scaffold = scaffold("SAAAAAAAASA");
        dehydration(&sites(&[0, 9]), &mut scaffold).unwrap();
        pyridine(&sites(&[0, 9, 8]), &mut scaffold, false).unwrap();
        let residue = scaffold.residue(0).unwrap();
        let alpha = residue.alpha_carbon().unwrap();
        assert!(ketone_oxygen(&scaffold, alpha).is_none());
        assert!(perception::is_dehydrated(&scaffold, residue));
    }

    #[test]
    fn pyridine_requires_both_serines_dehydrated() {
        let mut scaffold = scaffold("ASAAAAAAAASA");
        dehydration(&sites(&[1]), &mut scaffold).unwrap();
        assert!(matches!(
            pyridine(&sites(&[1, 10, 9]), &mut scaffold, false),
            Err(ReactionError::InvalidSubstrateStructure(_))
        ));
    }
}
