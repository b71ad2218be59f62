use crate::core::cluster::backbone::{Backbone, ModuleType};
use crate::core::cluster::context::{ClusterContext, ClusterFamily};
use crate::core::cluster::domain::{Domain, DomainType};
use crate::core::cluster::monomer::Monomer;
use crate::engine::plan::SubstrateSet;
use tracing::trace;

const HETEROCYCLIZABLE: [Monomer; 3] = [Monomer::Cysteine, Monomer::Threonine, Monomer::Serine];
const SIX_MEMBERED_AROMATICS: [Monomer; 3] = [
    Monomer::Tyrosine,
    Monomer::Phenylalanine,
    Monomer::Hydroxyphenylglycine,
];
const BRANCHED_CHAIN: [Monomer; 3] = [Monomer::Leucine, Monomer::Isoleucine, Monomer::Valine];
const RING_PHENOLS: [Monomer; 3] = [
    Monomer::Tyrosine,
    Monomer::BetaHydroxytyrosine,
    Monomer::Hydroxyphenylglycine,
];

fn singletons(positions: impl IntoIterator<Item = usize>) -> Vec<SubstrateSet> {
    positions
        .into_iter()
        .map(|position| SubstrateSet::of(&[position]))
        .collect()
}

/// The module that embeds the domain.
pub(super) fn modular_site(domain: &Domain, backbone: &Backbone) -> Vec<SubstrateSet> {
    singletons(backbone.position_of_domain(domain))
}

/// The residue whose carbonyl the ketoreductase, dehydratase or enoylreductase acts on.
///
/// In a polyketide module the beta-keto group belongs to the previous unit.
pub(super) fn reductive_loop(domain: &Domain, backbone: &Backbone) -> Vec<SubstrateSet> {
    let Some(position) = backbone.position_of_domain(domain) else {
        return Vec::new();
    };
    let Some(module) = backbone.module(position) else {
        return Vec::new();
    };

    let complete = match domain.kind {
        DomainType::Dehydratase => module.contains(DomainType::Ketoreductase),
        DomainType::Enoylreductase => {
            module.contains(DomainType::Ketoreductase) && module.contains(DomainType::Dehydratase)
        }
        _ => true,
    };
    if !complete {
        trace!(domain = %domain.kind, position, "Reductive loop incomplete.");
        return Vec::new();
    }

    if module.kind != ModuleType::Acyltransferase {
        return singletons([position]);
    }

    let Some(previous) = position.checked_sub(1) else {
        return Vec::new();
    };
    let Some(upstream) = backbone.module(previous).filter(|m| m.active) else {
        return Vec::new();
    };
    let branched_extender = upstream.kind == ModuleType::Acyltransferase
        && upstream.top_substrate() != Some(Monomer::Malonyl);
    if branched_extender
        && module.contains(DomainType::CMethyltransferase)
        && !module.contains(DomainType::Enoylreductase)
    {
        return Vec::new();
    }
    singletons([previous])
}

/// The residue preceding a Cys/Thr/Ser module, paired with that module.
pub(super) fn heterocyclization(domain: &Domain, backbone: &Backbone) -> Vec<SubstrateSet> {
    match backbone.position_of_domain(domain) {
        Some(position)
            if position > 0
                && backbone
                    .module(position)
                    .is_some_and(|m| m.is_one_of(&HETEROCYCLIZABLE)) =>
        {
            vec![SubstrateSet::of(&[position - 1, position])]
        }
        _ => Vec::new(),
    }
}

pub(super) fn formyltransferase(backbone: &Backbone) -> Vec<SubstrateSet> {
    let starter = backbone
        .module(0)
        .filter(|m| m.kind == ModuleType::Adenylation)
        .map(|_| 0);
    let ornithines = backbone
        .positions_of(&[Monomer::Ornithine])
        .into_iter()
        .filter(|&p| p > 0);
    singletons(starter.into_iter().chain(ornithines))
}

/// Every position carrying a free side-chain hydroxyl.
///
/// Ribosomal residues count only in ribosomal clusters, and only Ser/Thr.
pub(super) fn hydroxyl<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
) -> Vec<SubstrateSet> {
    let ribosomal = cluster.is_family(ClusterFamily::Ribosomal);
    let positions = backbone
        .modules()
        .iter()
        .enumerate()
        .filter(|(_, module)| match (module.kind, module.top_substrate()) {
            (_, None) => false,
            (ModuleType::Ribosomal, Some(m)) => ribosomal && m.is_serine_or_threonine(),
            (_, Some(m)) => m.bears_hydroxyl(),
        })
        .map(|(i, _)| i);
    singletons(positions)
}

/// Chlorination sites chosen by the first homolog name that names a target class
/// present in the backbone.
pub(super) fn chlorinase(domain: &Domain, backbone: &Backbone) -> Vec<SubstrateSet> {
    for homolog in &domain.homologs {
        let name = homolog.to_lowercase();
        let positions: Vec<usize> = if name.contains("tyrosine") || name.contains("phenylglycine")
        {
            backbone.positions_of(&SIX_MEMBERED_AROMATICS)
        } else if name.contains("tryptophan") {
            backbone.positions_of(&[Monomer::Tryptophan])
        } else if name.contains("leucine") {
            backbone.positions_of(&BRANCHED_CHAIN)
        } else if name.contains("threonine") {
            backbone.positions_of(&[Monomer::Threonine])
        } else if name.contains("histidine") {
            backbone.positions_of(&[Monomer::Histidine])
        } else if name.contains("c12") || name.contains("c14") {
            backbone
                .modules()
                .iter()
                .enumerate()
                .filter(|(_, m)| m.kind == ModuleType::Acyltransferase)
                .map(|(i, _)| i)
                .collect()
        } else if name.contains("starter") {
            (0..backbone.len().min(1)).collect()
        } else if name.contains("proline") {
            let mut positions = backbone.positions_of(&[Monomer::Proline]);
            if !backbone.is_empty() && !positions.contains(&0) {
                positions.push(0);
            }
            positions
        } else {
            continue;
        };
        if !positions.is_empty() {
            trace!(homolog = %homolog, count = positions.len(), "Chlorination hint matched.");
            return singletons(positions);
        }
    }
    Vec::new()
}

/// The residue pair a glycopeptide P450 crosslinks, addressed by ordinal among
/// the adenylation modules of the backbone.
pub(super) fn glycopeptide_ring(kind: DomainType, backbone: &Backbone) -> Vec<SubstrateSet> {
    let (first, second, partners): (usize, usize, &[Monomer]) = match kind {
        DomainType::P450A => (3, 5, &RING_PHENOLS),
        DomainType::P450B => (1, 3, &RING_PHENOLS),
        DomainType::P450C => (4, 6, &[Monomer::Dihydroxyphenylglycine]),
        DomainType::P450D => (0, 2, &[Monomer::Dihydroxyphenylglycine]),
        _ => return Vec::new(),
    };
    let adenylated: Vec<usize> = backbone
        .modules()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.kind == ModuleType::Adenylation)
        .map(|(i, _)| i)
        .collect();
    let (Some(&a), Some(&b)) = (adenylated.get(first), adenylated.get(second)) else {
        return Vec::new();
    };
    let fits = |position: usize, allowed: &[Monomer]| {
        backbone.module(position).is_some_and(|m| m.is_one_of(allowed))
    };
    if !fits(a, &RING_PHENOLS) || !fits(b, partners) {
        trace!(domain = %kind, a, b, "Ring residues are not phenolic.");
        return Vec::new();
    }
    vec![SubstrateSet::of(&[a, b])]
}
