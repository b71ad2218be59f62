//! # Reactions
//!
//! A reaction applies one [`ReactionPlan`] to a branch's scaffold. Reactions resolve
//! their residues from the scaffold at the moment they run and re-check the bonding
//! they depend on, because earlier reactions in the branch may have removed or
//! rebonded those atoms. A failed precondition is reported as a [`ReactionError`]
//! and the branch is abandoned; the scaffold is left in whatever state the failure
//! reached and must not be reused.
//!
//! Composite reactions are expressed as an ordered list of [`Step`]s over the
//! spacer-delimited groups of their substrate set.

mod modular;
mod ribosomal;

use super::error::ReactionError;
use super::plan::{ReactionPlan, SubstrateSet};
use crate::core::cluster::backbone::Backbone;
use crate::core::cluster::domain::DomainType;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::topology::BondOrder;
use tracing::{instrument, trace};

/// The edit a domain performs, ordered by [`ReactionKind::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReactionKind {
    Ketoreduction,
    Dehydration,
    Enoylreduction,
    Heterocyclization,
    LanthipeptideDehydration,
    LanthipeptideSynthetase,
    Lanthionine,
    Aminovinylcysteine,
    PyruvateReduction,
    Azoline,
    Azole,
    Pyridine,
    Disulfide,
    Sactipeptide,
    LassoCyclization,
    Macrocyclization,
    GlycopeptideDoeRing,
    GlycopeptideCodRing,
    GlycopeptideAbRing,
    GlycopeptideFogRing,
    NAcetylation,
    NMethylation,
    CMethylation,
    OMethylation,
    Formylation,
    Chlorination,
    Carbamoylation,
    Sulfonation,
    Glycosylation,
}

/// Which part of a composite substrate set one step receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// The spacer-delimited group at this index, passed whole.
    Whole { group: usize },
    /// Every `stride`-th module of the group, each as its own single-module set.
    Split { group: usize, stride: usize },
}

impl Grouping {
    fn select(self, substrates: &SubstrateSet) -> Vec<SubstrateSet> {
        match self {
            Self::Whole { group } => substrates.group(group).into_iter().collect(),
            Self::Split { group, stride } => substrates
                .group(group)
                .map(|g| {
                    g.modules()
                        .step_by(stride.max(1))
                        .map(|position| SubstrateSet::of(&[position]))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// One primitive reaction run by a composite reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub reaction: ReactionKind,
    pub grouping: Grouping,
}

const LANTHIPEPTIDE_SYNTHETASE_STEPS: [Step; 3] = [
    Step {
        reaction: ReactionKind::LanthipeptideDehydration,
        grouping: Grouping::Split { group: 0, stride: 2 },
    },
    Step {
        reaction: ReactionKind::LanthipeptideDehydration,
        grouping: Grouping::Whole { group: 1 },
    },
    Step {
        reaction: ReactionKind::Lanthionine,
        grouping: Grouping::Whole { group: 0 },
    },
];

impl ReactionKind {
    /// The reaction registered for a domain type.
    pub fn for_domain(kind: DomainType) -> Option<Self> {
        use DomainType as D;
        let reaction = match kind {
            D::Ketoreductase => Self::Ketoreduction,
            D::Dehydratase => Self::Dehydration,
            D::Enoylreductase => Self::Enoylreduction,
            D::Heterocyclization => Self::Heterocyclization,
            D::LanB | D::LazB => Self::LanthipeptideDehydration,
            D::LanM | D::ProcA => Self::LanthipeptideSynthetase,
            D::LanC => Self::Lanthionine,
            D::LanD => Self::Aminovinylcysteine,
            D::ElxO => Self::PyruvateReduction,
            D::LazE | D::McbC | D::McbD | D::PatD => Self::Azoline,
            D::LazF | D::McbB => Self::Azole,
            D::LazC | D::LazCb => Self::Pyridine,
            D::SkfH | D::BdbB | D::LassoPrecursor => Self::Disulfide,
            D::AlbA => Self::Sactipeptide,
            D::AsparagineSynthase => Self::LassoCyclization,
            D::PatG | D::YmF | D::AlbE => Self::Macrocyclization,
            D::P450A => Self::GlycopeptideDoeRing,
            D::P450B => Self::GlycopeptideCodRing,
            D::P450C => Self::GlycopeptideAbRing,
            D::P450D => Self::GlycopeptideFogRing,
            D::MdnD | D::PaeN => Self::NAcetylation,
            D::NMethyltransferase => Self::NMethylation,
            D::CMethyltransferase => Self::CMethylation,
            D::OMethyltransferase => Self::OMethylation,
            D::Formyltransferase => Self::Formylation,
            D::Chlorination => Self::Chlorination,
            D::Carbamoyltransferase => Self::Carbamoylation,
            D::Sulfotransferase => Self::Sulfonation,
            D::Glycosyltransferase => Self::Glycosylation,
            D::Adenylation
            | D::Acyltransferase
            | D::Condensation
            | D::Precursor
            | D::LanKC
            | D::AlbF => return None,
        };
        Some(reaction)
    }

    /// Execution order within a branch; lower runs first.
    pub fn priority(self) -> u32 {
        match self {
            Self::Ketoreduction => 1,
            Self::Dehydration => 2,
            Self::Enoylreduction => 3,
            Self::Heterocyclization => 5,
            Self::LanthipeptideDehydration => 10,
            Self::LanthipeptideSynthetase => 12,
            Self::Lanthionine => 14,
            Self::Aminovinylcysteine => 16,
            Self::PyruvateReduction => 18,
            Self::Azoline => 20,
            Self::Azole => 22,
            Self::Pyridine => 24,
            Self::Disulfide => 30,
            Self::Sactipeptide => 32,
            Self::LassoCyclization => 34,
            Self::Macrocyclization => 36,
            Self::GlycopeptideDoeRing
            | Self::GlycopeptideCodRing
            | Self::GlycopeptideAbRing
            | Self::GlycopeptideFogRing => 38,
            Self::NAcetylation => 40,
            Self::NMethylation | Self::CMethylation | Self::OMethylation => 42,
            Self::Formylation => 44,
            Self::Chlorination => 46,
            Self::Carbamoylation => 48,
            Self::Sulfonation => 50,
            Self::Glycosylation => 52,
        }
    }

    /// Reactions that only one domain of a cluster may contribute. Additional
    /// domains with the same reaction are dropped before combination; the candidate
    /// sites of the first such domain are all kept.
    pub fn is_once_only(self) -> bool {
        matches!(
            self,
            Self::Macrocyclization
                | Self::GlycopeptideDoeRing
                | Self::GlycopeptideCodRing
                | Self::GlycopeptideAbRing
                | Self::GlycopeptideFogRing
        )
    }

    /// The primitive steps of a composite reaction; empty for primitive reactions.
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::LanthipeptideSynthetase => &LANTHIPEPTIDE_SYNTHETASE_STEPS,
            _ => &[],
        }
    }
}

/// Applies `plan` to `scaffold`.
///
/// # Errors
///
/// Returns [`ReactionError::MissingResidue`] when a targeted position has no
/// residue, [`ReactionError::InvalidSubstrateStructure`] when the residue lacks the
/// chemistry the reaction needs, and [`ReactionError::ScaffoldGeneration`] when
/// the edit itself cannot be carried out.
#[instrument(level = "trace", skip_all, fields(reaction = ?plan.reaction, sites = %plan.substrates))]
pub fn execute(
    plan: &ReactionPlan,
    scaffold: &mut Scaffold,
    backbone: &Backbone,
) -> Result<(), ReactionError> {
    let sites = &plan.substrates;
    match plan.reaction {
        ReactionKind::Ketoreduction => modular::ketoreduction(sites, scaffold),
        ReactionKind::Dehydration => modular::dehydration(sites, scaffold),
        ReactionKind::Enoylreduction => modular::enoylreduction(sites, scaffold),
        ReactionKind::Heterocyclization => modular::heterocyclization(sites, scaffold),
        ReactionKind::NMethylation => modular::n_methylation(sites, scaffold),
        ReactionKind::CMethylation => modular::c_methylation(sites, scaffold),
        ReactionKind::OMethylation => modular::o_methylation(sites, scaffold),
        ReactionKind::Formylation => modular::formylation(sites, scaffold, backbone),
        ReactionKind::Chlorination => modular::chlorination(sites, scaffold, backbone),
        ReactionKind::Carbamoylation => modular::carbamoylation(sites, scaffold),
        ReactionKind::Sulfonation => modular::sulfonation(sites, scaffold),
        ReactionKind::GlycopeptideDoeRing
        | ReactionKind::GlycopeptideCodRing
        | ReactionKind::GlycopeptideFogRing => modular::aryl_ether(sites, scaffold),
        ReactionKind::GlycopeptideAbRing => modular::biaryl(sites, scaffold),
        ReactionKind::Glycosylation => modular::glycosylation(sites, plan.sugar.as_ref(), scaffold),
        ReactionKind::LanthipeptideDehydration => ribosomal::dehydration(sites, scaffold),
        ReactionKind::LanthipeptideSynthetase => composite(plan, scaffold, backbone),
        ReactionKind::Lanthionine => ribosomal::lanthionine(sites, scaffold),
        ReactionKind::Aminovinylcysteine => ribosomal::aminovinylcysteine(sites, scaffold),
        ReactionKind::PyruvateReduction => ribosomal::pyruvate_reduction(sites, scaffold),
        ReactionKind::Azoline => ribosomal::azoline(sites, scaffold),
        ReactionKind::Azole => ribosomal::azole(sites, scaffold),
        ReactionKind::Pyridine => {
            let reduced = plan.domain.kind == DomainType::LazCb;
            ribosomal::pyridine(sites, scaffold, reduced)
        }
        ReactionKind::Disulfide => ribosomal::disulfide(sites, scaffold),
        ReactionKind::Sactipeptide => ribosomal::sactipeptide(sites, scaffold),
        ReactionKind::LassoCyclization => ribosomal::lasso_cyclization(sites, scaffold),
        ReactionKind::Macrocyclization => ribosomal::macrocyclization(sites, scaffold),
        ReactionKind::NAcetylation => ribosomal::n_acetylation(sites, scaffold),
    }
}

/// Runs each step of a composite reaction over its share of the plan's sites.
fn composite(
    plan: &ReactionPlan,
    scaffold: &mut Scaffold,
    backbone: &Backbone,
) -> Result<(), ReactionError> {
    for step in plan.reaction.steps() {
        for substrates in step.grouping.select(&plan.substrates) {
            trace!(step = ?step.reaction, sites = %substrates, "Running composite step.");
            execute(&plan.derive(substrates, step.reaction), scaffold, backbone)?;
        }
    }
    Ok(())
}

/// Looks up the residue built for `position`.
pub(crate) fn resolve(scaffold: &Scaffold, position: usize) -> Result<&Residue, ReactionError> {
    scaffold
        .residue(position)
        .ok_or(ReactionError::MissingResidue { position })
}

/// The n-th backbone position of a substrate set.
fn site(sites: &SubstrateSet, n: usize) -> Result<usize, ReactionError> {
    sites
        .get(n)
        .ok_or_else(|| ReactionError::substrate(format!("substrate set {sites} has no entry {n}")))
}

/// Consecutive `(first, second)` positions; a trailing unpaired position is ignored.
fn pairs(sites: &SubstrateSet) -> Vec<(usize, usize)> {
    let positions: Vec<usize> = sites.modules().collect();
    positions.chunks_exact(2).map(|c| (c[0], c[1])).collect()
}

fn require(atom: Option<AtomId>, what: &str, position: usize) -> Result<AtomId, ReactionError> {
    atom.ok_or_else(|| ReactionError::substrate(format!("no {what} in residue {position}")))
}

/// Whether `atom_id` can take one more single bond.
fn has_free_valence(scaffold: &Scaffold, atom_id: AtomId) -> bool {
    let Some(valence) = scaffold.atom(atom_id).and_then(|a| a.element.max_valence()) else {
        return false;
    };
    scaffold.bond_order_sum(atom_id) + 1.0 <= f64::from(valence)
}

/// Closes a single bond between two existing atoms after checking both have room
/// for it.
fn crosslink(scaffold: &mut Scaffold, a: AtomId, b: AtomId) -> Result<(), ReactionError> {
    for atom_id in [a, b] {
        if !has_free_valence(scaffold, atom_id) {
            return Err(ReactionError::generation(format!(
                "atom {atom_id:?} has no free valence for a new bond"
            )));
        }
    }
    scaffold.add_bond(a, b, BondOrder::Single)?;
    Ok(())
}
