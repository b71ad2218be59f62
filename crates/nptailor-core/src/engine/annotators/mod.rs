//! # Annotators
//!
//! An annotator turns one tailoring domain into the list of sites on a backbone where
//! that domain could act. Each site is a [`SubstrateSet`]; an empty list means the
//! domain has nothing to do on this backbone, which is never an error.
//!
//! Annotators only read the backbone and the cluster. They never look at the
//! scaffold, so the same list is valid for every branch built from the backbone.

mod modular;
mod ribosomal;

use super::config::TailoringConfig;
use super::plan::SubstrateSet;
use crate::core::cluster::backbone::Backbone;
use crate::core::cluster::context::ClusterContext;
use crate::core::cluster::domain::{Domain, DomainType};
use tracing::{debug, instrument};

/// Site enumeration strategy, selected by domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotatorKind {
    ModularSite,
    ReductiveLoop,
    Heterocyclization,
    Formyltransferase,
    Hydroxyl,
    Chlorinase,
    GlycopeptideRing,
    Dehydratase,
    Lanthionine,
    LanthipeptideSynthetase,
    Aminovinylcysteine,
    NTerminus,
    Macrocyclization,
    LassoPeptide,
    LassoDisulfide,
    CysteinePairs,
    Sactipeptide,
    Azole,
    Pyridine,
}

impl AnnotatorKind {
    /// The annotator registered for a domain type, or `None` for domains that do
    /// not tailor the scaffold.
    pub fn for_domain(kind: DomainType) -> Option<Self> {
        use DomainType as D;
        let annotator = match kind {
            D::NMethyltransferase | D::CMethyltransferase | D::OMethyltransferase => {
                Self::ModularSite
            }
            D::Ketoreductase | D::Dehydratase | D::Enoylreductase => Self::ReductiveLoop,
            D::Heterocyclization => Self::Heterocyclization,
            D::Formyltransferase => Self::Formyltransferase,
            D::Sulfotransferase | D::Carbamoyltransferase | D::Glycosyltransferase => {
                Self::Hydroxyl
            }
            D::Chlorination => Self::Chlorinase,
            D::P450A | D::P450B | D::P450C | D::P450D => Self::GlycopeptideRing,
            D::LanB | D::LazB => Self::Dehydratase,
            D::LanC => Self::Lanthionine,
            D::LanM | D::ProcA => Self::LanthipeptideSynthetase,
            D::LanD => Self::Aminovinylcysteine,
            D::ElxO | D::MdnD | D::PaeN => Self::NTerminus,
            D::PatG | D::YmF | D::AlbE => Self::Macrocyclization,
            D::AsparagineSynthase => Self::LassoPeptide,
            D::LassoPrecursor => Self::LassoDisulfide,
            D::SkfH | D::BdbB => Self::CysteinePairs,
            D::AlbA => Self::Sactipeptide,
            D::LazE | D::LazF | D::McbB | D::McbC | D::McbD | D::PatD => Self::Azole,
            D::LazC | D::LazCb => Self::Pyridine,
            D::Adenylation
            | D::Acyltransferase
            | D::Condensation
            | D::Precursor
            | D::LanKC
            | D::AlbF => return None,
        };
        Some(annotator)
    }

    /// Lists the candidate sites for `domain` on `backbone`.
    ///
    /// The result holds at most `plans_per_reaction` sets and never contains an
    /// empty set.
    #[instrument(level = "debug", skip_all, fields(domain = %domain.kind, backbone = %backbone.label))]
    pub fn enumerate<C: ClusterContext + ?Sized>(
        self,
        domain: &Domain,
        backbone: &Backbone,
        cluster: &C,
        config: &TailoringConfig,
    ) -> Vec<SubstrateSet> {
        let limits = &config.limits;
        let windows = &config.windows;
        let mut sets = match self {
            Self::ModularSite => modular::modular_site(domain, backbone),
            Self::ReductiveLoop => modular::reductive_loop(domain, backbone),
            Self::Heterocyclization => modular::heterocyclization(domain, backbone),
            Self::Formyltransferase => modular::formyltransferase(backbone),
            Self::Hydroxyl => modular::hydroxyl(backbone, cluster),
            Self::Chlorinase => modular::chlorinase(domain, backbone),
            Self::GlycopeptideRing => modular::glycopeptide_ring(domain.kind, backbone),
            Self::Dehydratase => ribosomal::dehydratase(backbone, cluster, limits, windows),
            Self::Lanthionine => ribosomal::lanthionine(backbone, cluster, limits),
            Self::LanthipeptideSynthetase => {
                ribosomal::lanthipeptide_synthetase(backbone, cluster, limits)
            }
            Self::Aminovinylcysteine => ribosomal::aminovinylcysteine(backbone, cluster),
            Self::NTerminus => ribosomal::n_terminus(backbone),
            Self::Macrocyclization => ribosomal::macrocyclization(domain.kind, backbone, cluster),
            Self::LassoPeptide => ribosomal::lasso_peptide(backbone, windows),
            Self::LassoDisulfide => ribosomal::lasso_disulfide(backbone, limits),
            Self::CysteinePairs => ribosomal::cysteine_pairs(backbone, limits),
            Self::Sactipeptide => ribosomal::sactipeptide(backbone, cluster, limits, windows),
            Self::Azole => ribosomal::azole(domain.kind, backbone, cluster, limits, windows),
            Self::Pyridine => ribosomal::pyridine(domain.kind, backbone, cluster, windows),
        };
        sets.retain(|set| !set.is_empty());
        sets.truncate(limits.plans_per_reaction);
        debug!(annotator = ?self, sites = sets.len(), "Enumerated candidate sites.");
        sets
    }
}
