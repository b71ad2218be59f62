use crate::core::cluster::backbone::{Backbone, ModuleType};
use crate::core::cluster::context::{ClusterContext, ClusterType};
use crate::core::cluster::domain::DomainType;
use crate::core::cluster::monomer::Monomer;
use crate::engine::config::{AnnotatorWindows, SearchLimits};
use crate::engine::plan::SubstrateSet;
use crate::engine::sampling::{permutations, subsets};
use itertools::Itertools;
use tracing::trace;

const SERINE_THREONINE: [Monomer; 2] = [Monomer::Serine, Monomer::Threonine];
const AZOLE_PRECURSORS: [Monomer; 3] = [Monomer::Serine, Monomer::Threonine, Monomer::Cysteine];

fn cysteines(backbone: &Backbone) -> Vec<usize> {
    backbone.positions_of(&[Monomer::Cysteine])
}

fn is_ribosomal_residue(backbone: &Backbone, position: usize) -> bool {
    backbone
        .module(position)
        .is_some_and(|m| m.kind == ModuleType::Ribosomal && m.top_substrate().is_some())
}

/// Pairs dehydrated residues with cysteines as `[lan, cys, lan, cys, ...]`.
///
/// The larger side is permuted and its first members are assigned, in order, to the
/// members of the smaller side. Returns each assignment together with the dehydrated
/// residues it left unused.
fn assign_lanthionines(
    dehydrated: &[usize],
    cys: &[usize],
    limits: &SearchLimits,
) -> Vec<(Vec<usize>, Vec<usize>)> {
    if dehydrated.is_empty() || cys.is_empty() {
        return Vec::new();
    }
    let interleave = |lan: &[usize], cys: &[usize]| -> Vec<usize> {
        lan.iter()
            .zip(cys)
            .flat_map(|(&l, &c)| [l, c])
            .collect()
    };
    if dehydrated.len() >= cys.len() {
        permutations(dehydrated, cys.len(), limits)
            .into_iter()
            .map(|lan| {
                let unused = dehydrated
                    .iter()
                    .copied()
                    .filter(|p| !lan.contains(p))
                    .collect();
                (interleave(&lan, cys), unused)
            })
            .collect()
    } else {
        permutations(cys, dehydrated.len(), limits)
            .into_iter()
            .map(|cys| (interleave(dehydrated, &cys), Vec::new()))
            .collect()
    }
}

/// Ser/Thr sets for a standalone dehydratase. Clusters with a bifunctional
/// synthetase leave dehydration to it.
pub(super) fn dehydratase<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
    limits: &SearchLimits,
    windows: &AnnotatorWindows,
) -> Vec<SubstrateSet> {
    if cluster.contains(DomainType::LanKC) || cluster.contains(DomainType::LanM) {
        trace!("Dehydratase superseded by a bifunctional synthetase.");
        return Vec::new();
    }
    let candidates = backbone.positions_of(&SERINE_THREONINE);
    let min_size = if candidates.len() > windows.min_dehydration_subset {
        windows.min_dehydration_subset
    } else {
        1
    };
    subsets(&candidates, min_size, candidates.len(), limits)
        .iter()
        .map(|subset| SubstrateSet::of(subset))
        .collect()
}

pub(super) fn lanthionine<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
    limits: &SearchLimits,
) -> Vec<SubstrateSet> {
    let mut dehydrated = backbone.positions_of(&SERINE_THREONINE);
    if cluster.contains(DomainType::ElxO) {
        dehydrated.retain(|&p| p != 0);
    }
    let mut cys = cysteines(backbone);
    if cluster.contains(DomainType::LanD) {
        cys.pop();
    }
    assign_lanthionines(&dehydrated, &cys, limits)
        .into_iter()
        .map(|(pairs, _)| SubstrateSet::of(&pairs))
        .collect()
}

/// Lanthionine assignments followed by a spacer-delimited group of the Ser/Thr
/// residues that are only dehydrated.
pub(super) fn lanthipeptide_synthetase<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
    limits: &SearchLimits,
) -> Vec<SubstrateSet> {
    let mut dehydrated = backbone.positions_of(&SERINE_THREONINE);
    if cluster.contains(DomainType::ElxO) {
        dehydrated.retain(|&p| p != 0);
    }
    let mut cys = cysteines(backbone);
    let reserved = backbone.len().checked_sub(1);
    if cluster.contains(DomainType::LanD) && cys.last().copied() == reserved {
        cys.pop();
    }

    let mut sets = Vec::new();
    for (pairs, unused) in assign_lanthionines(&dehydrated, &cys, limits) {
        let base = SubstrateSet::of(&pairs);
        if unused.is_empty() {
            sets.push(base);
            continue;
        }
        for extra in subsets(&unused, 1, unused.len(), limits) {
            sets.push(base.clone().with_group(&extra));
        }
        if sets.len() >= limits.plans_per_reaction {
            break;
        }
    }
    sets
}

/// Each Ser (or, in linaridins, Cys) paired with the C-terminal cysteine.
pub(super) fn aminovinylcysteine<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
) -> Vec<SubstrateSet> {
    let Some(last) = backbone.len().checked_sub(1) else {
        return Vec::new();
    };
    if !is_ribosomal_residue(backbone, last)
        || backbone.top_substrate(last) != Some(Monomer::Cysteine)
    {
        return Vec::new();
    }
    let linaridin = cluster.is_type(ClusterType::Linaridin);
    (0..last)
        .filter(|&p| is_ribosomal_residue(backbone, p))
        .filter(|&p| match backbone.top_substrate(p) {
            Some(Monomer::Serine) => true,
            Some(Monomer::Cysteine) => linaridin,
            _ => false,
        })
        .map(|p| SubstrateSet::of(&[p, last]))
        .collect()
}

pub(super) fn n_terminus(backbone: &Backbone) -> Vec<SubstrateSet> {
    if is_ribosomal_residue(backbone, 0) {
        vec![SubstrateSet::of(&[0])]
    } else {
        Vec::new()
    }
}

/// Head-to-tail pair. AlbE acts only alongside AlbF.
pub(super) fn macrocyclization<C: ClusterContext + ?Sized>(
    kind: DomainType,
    backbone: &Backbone,
    cluster: &C,
) -> Vec<SubstrateSet> {
    if kind == DomainType::AlbE && !cluster.contains(DomainType::AlbF) {
        return Vec::new();
    }
    match backbone.len().checked_sub(1) {
        Some(last)
            if last > 0
                && is_ribosomal_residue(backbone, 0)
                && is_ribosomal_residue(backbone, last) =>
        {
            vec![SubstrateSet::of(&[0, last])]
        }
        _ => Vec::new(),
    }
}

/// Asp/Glu acceptors in the isopeptide ring window, paired with the N-terminus.
pub(super) fn lasso_peptide(backbone: &Backbone, windows: &AnnotatorWindows) -> Vec<SubstrateSet> {
    if backbone.len() < windows.lasso_min_length {
        trace!(length = backbone.len(), "Backbone too short for a lasso ring.");
        return Vec::new();
    }
    (windows.lasso_ring_start..=windows.lasso_ring_end)
        .filter(|&p| is_ribosomal_residue(backbone, p))
        .filter(|&p| {
            matches!(
                backbone.top_substrate(p),
                Some(Monomer::AsparticAcid | Monomer::GlutamicAcid)
            )
        })
        .map(|p| SubstrateSet::of(&[0, p]))
        .collect()
}

/// Cysteine pairs, then orderings of four and six cysteines read as consecutive pairs.
pub(super) fn lasso_disulfide(backbone: &Backbone, limits: &SearchLimits) -> Vec<SubstrateSet> {
    let cys = cysteines(backbone);
    let pairs = cys.iter().copied().combinations(2);
    let orderings = [4, 6].into_iter().flat_map(|size| {
        cys.iter()
            .copied()
            .combinations(size)
            .flat_map(move |subset| subset.into_iter().permutations(size))
    });
    pairs
        .chain(orderings)
        .take(limits.plans_per_reaction)
        .map(|positions| SubstrateSet::of(&positions))
        .collect()
}

pub(super) fn cysteine_pairs(backbone: &Backbone, limits: &SearchLimits) -> Vec<SubstrateSet> {
    cysteines(backbone)
        .into_iter()
        .combinations(2)
        .take(limits.plans_per_reaction)
        .map(|pair| SubstrateSet::of(&pair))
        .collect()
}

/// Cysteine-to-alpha-carbon thioether sites as `[cys, acceptor, cys, acceptor, ...]`.
pub(super) fn sactipeptide<C: ClusterContext + ?Sized>(
    backbone: &Backbone,
    cluster: &C,
    limits: &SearchLimits,
    windows: &AnnotatorWindows,
) -> Vec<SubstrateSet> {
    let cys = cysteines(backbone);
    let acceptor = |p: usize| {
        is_ribosomal_residue(backbone, p) && backbone.top_substrate(p) != Some(Monomer::Cysteine)
    };

    if cluster.contains(DomainType::SkfH) {
        return cys
            .iter()
            .flat_map(|&c| {
                (c + windows.sactipeptide_min_separation..backbone.len())
                    .filter(|&p| acceptor(p))
                    .map(move |p| SubstrateSet::of(&[c, p]))
            })
            .take(limits.plans_per_reaction)
            .collect();
    }

    let Some(&last_cys) = cys.last() else {
        return Vec::new();
    };
    let search = AcceptorSearch {
        cys: &cys,
        first: last_cys + windows.sactipeptide_min_separation,
        spacing: windows.sactipeptide_acceptor_spacing,
        end: backbone.len().saturating_sub(windows.sactipeptide_terminal_margin),
        cap: limits.plans_per_reaction,
        budget: limits.max_sampling_attempts,
        acceptor: &acceptor,
    };
    let mut sets = Vec::new();
    let mut visited = 0;
    search.assign(0, search.first, &mut Vec::new(), &mut sets, &mut visited);
    if visited >= search.budget {
        trace!(visited, found = sets.len(), "Acceptor search budget exhausted.");
    }
    sets
}

/// Depth-first assignment of every cysteine, last first, to its own acceptor.
///
/// Each placed acceptor counts against `budget`, so the search stays bounded even
/// when no complete assignment exists.
struct AcceptorSearch<'a> {
    cys: &'a [usize],
    first: usize,
    spacing: usize,
    end: usize,
    cap: usize,
    budget: usize,
    acceptor: &'a dyn Fn(usize) -> bool,
}

impl AcceptorSearch<'_> {
    fn exhausted(&self, out: &[SubstrateSet], visited: usize) -> bool {
        out.len() >= self.cap || visited >= self.budget
    }

    fn assign(
        &self,
        depth: usize,
        start: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<SubstrateSet>,
        visited: &mut usize,
    ) {
        if depth == self.cys.len() {
            out.push(SubstrateSet::of(current));
            return;
        }
        if self.exhausted(out, *visited) {
            return;
        }
        let donor = self.cys[self.cys.len() - 1 - depth];
        // Later cysteines still need room for their own acceptors.
        let remaining = self.cys.len() - depth;
        let last = self
            .end
            .saturating_sub((remaining - 1).saturating_mul(self.spacing));
        for position in start..last {
            if !(self.acceptor)(position) {
                continue;
            }
            *visited += 1;
            current.extend([donor, position]);
            self.assign(depth + 1, position + self.spacing, current, out, visited);
            current.truncate(current.len() - 2);
            if self.exhausted(out, *visited) {
                return;
            }
        }
    }
}

/// Thiopeptide pyridine sites as `[ser, ser, ser - 1]`: two dehydrated serines a
/// ring's width apart, and the residue whose carbonyl closes the ring.
///
/// LazC defers to LazCb when both are present. When the first residue is a Ser,
/// LazC anchors every ring on it, while LazCb keeps it free if other serines exist.
pub(super) fn pyridine<C: ClusterContext + ?Sized>(
    kind: DomainType,
    backbone: &Backbone,
    cluster: &C,
    windows: &AnnotatorWindows,
) -> Vec<SubstrateSet> {
    if kind == DomainType::LazC && cluster.contains(DomainType::LazCb) {
        trace!("Pyridine formation left to LazCb.");
        return Vec::new();
    }
    let serines = backbone.positions_of(&[Monomer::Serine]);
    let n_terminal = serines.first() == Some(&0);
    let span = windows.pyridine_min_span..=windows.pyridine_max_span;
    serines
        .iter()
        .tuple_combinations()
        .filter(|&(&a, &b)| span.contains(&(b - a)))
        .filter(|&(&a, _)| match kind {
            DomainType::LazC => !n_terminal || a == 0,
            _ => !(a == 0 && serines.len() > 2),
        })
        .map(|(&a, &b)| SubstrateSet::of(&[a, b, b - 1]))
        .collect()
}

/// Azoline sites as `[m, m - 1, ...]`: each Ser/Thr/Cys with the residue whose
/// carbonyl it attacks.
pub(super) fn azole<C: ClusterContext + ?Sized>(
    kind: DomainType,
    backbone: &Backbone,
    cluster: &C,
    limits: &SearchLimits,
    windows: &AnnotatorWindows,
) -> Vec<SubstrateSet> {
    let allowed: &[Monomer] = match kind {
        DomainType::McbC => &[Monomer::Cysteine],
        DomainType::McbD => &SERINE_THREONINE,
        _ => &AZOLE_PRECURSORS,
    };
    let candidates: Vec<usize> = backbone
        .positions_of(allowed)
        .into_iter()
        .filter(|&p| p > 0)
        .collect();
    let n = candidates.len();
    let min_size = if kind == DomainType::McbC {
        n
    } else if cluster.is_type(ClusterType::LinearAzolePeptide) {
        n.saturating_sub(windows.azole_lap_slack)
    } else {
        1
    };

    subsets(&candidates, min_size, n, limits)
        .into_iter()
        .filter(|subset| kind != DomainType::PatD || subset.windows(2).all(|w| w[1] - w[0] > 1))
        .map(|subset| {
            let pairs: Vec<usize> = subset.iter().flat_map(|&m| [m, m - 1]).collect();
            SubstrateSet::of(&pairs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cluster::context::Cluster;

    fn peptide(sequence: &str) -> Backbone {
        Backbone::from_peptide("core", sequence).unwrap()
    }

    fn limits() -> SearchLimits {
        SearchLimits::default()
    }

    fn windows() -> AnnotatorWindows {
        AnnotatorWindows::default()
    }

    fn sets(raw: &[&[usize]]) -> Vec<SubstrateSet> {
        raw.iter().map(|p| SubstrateSet::of(p)).collect()
    }

    #[test]
    fn dehydratase_requires_min_subset_above_two_candidates() {
        let cluster = Cluster::new();
        let two = dehydratase(&peptide("SAT"), &cluster, &limits(), &windows());
        assert_eq!(two, sets(&[&[0], &[2], &[0, 2]]));

        let three = dehydratase(&peptide("STAS"), &cluster, &limits(), &windows());
        assert_eq!(three, sets(&[&[0, 1], &[0, 3], &[1, 3], &[0, 1, 3]]));
    }

    #[test]
    fn dehydratase_defers_to_bifunctional_synthetase() {
        let cluster = Cluster::new().with_domains(&[DomainType::LanM]);
        assert!(dehydratase(&peptide("SAT"), &cluster, &limits(), &windows()).is_empty());
    }

    #[test]
    fn lanthionine_assigns_larger_side_in_order() {
        let cluster = Cluster::new();
        let result = lanthionine(&peptide("STAC"), &cluster, &limits());
        assert_eq!(result, sets(&[&[0, 3], &[1, 3]]));

        let more_cys = lanthionine(&peptide("SCAC"), &cluster, &limits());
        assert_eq!(more_cys, sets(&[&[0, 1], &[0, 3]]));
    }

    #[test]
    fn lanthionine_respects_elxo_and_land_reservations() {
        let cluster = Cluster::new().with_domains(&[DomainType::ElxO, DomainType::LanD]);
        let result = lanthionine(&peptide("STCAC"), &cluster, &limits());
        assert_eq!(result, sets(&[&[1, 2]]));
        assert!(lanthionine(&peptide("AAA"), &Cluster::new(), &limits()).is_empty());
    }

    #[test]
    fn synthetase_appends_unused_residues_as_spacer_group() {
        let result = lanthipeptide_synthetase(&peptide("STAC"), &Cluster::new(), &limits());
        assert_eq!(
            result,
            vec![
                SubstrateSet::of(&[0, 3]).with_group(&[1]),
                SubstrateSet::of(&[1, 3]).with_group(&[0]),
            ]
        );
        let balanced = lanthipeptide_synthetase(&peptide("SAC"), &Cluster::new(), &limits());
        assert_eq!(balanced, sets(&[&[0, 2]]));
    }

    #[test]
    fn aminovinylcysteine_needs_c_terminal_cysteine() {
        let cluster = Cluster::new();
        assert_eq!(
            aminovinylcysteine(&peptide("SACSC"), &cluster),
            sets(&[&[0, 4], &[3, 4]])
        );
        let linaridin = Cluster::new().with_type(ClusterType::Linaridin);
        assert_eq!(
            aminovinylcysteine(&peptide("SACSC"), &linaridin),
            sets(&[&[0, 4], &[2, 4], &[3, 4]])
        );
        assert!(aminovinylcysteine(&peptide("SACA"), &cluster).is_empty());
        assert!(aminovinylcysteine(&peptide(""), &cluster).is_empty());
    }

    #[test]
    fn macrocyclization_needs_distinct_termini_and_alb_partner() {
        let cluster = Cluster::new();
        assert_eq!(
            macrocyclization(DomainType::PatG, &peptide("GAVC"), &cluster),
            sets(&[&[0, 3]])
        );
        assert!(macrocyclization(DomainType::PatG, &peptide("G"), &cluster).is_empty());
        assert!(macrocyclization(DomainType::AlbE, &peptide("GAVC"), &cluster).is_empty());
        let paired = Cluster::new().with_domains(&[DomainType::AlbF]);
        assert_eq!(
            macrocyclization(DomainType::AlbE, &peptide("GAVC"), &paired).len(),
            1
        );
    }

    #[test]
    fn lasso_peptide_scans_ring_window() {
        assert_eq!(
            lasso_peptide(&peptide("GAAAAADAEA"), &windows()),
            sets(&[&[0, 6], &[0, 8]])
        );
        assert!(lasso_peptide(&peptide("GAAAAAD"), &windows()).is_empty());
    }

    #[test]
    fn lasso_disulfide_lists_pairs_then_orderings() {
        let result = lasso_disulfide(&peptide("CACACAC"), &limits());
        assert_eq!(result.len(), 6 + 24);
        assert_eq!(result[0], SubstrateSet::of(&[0, 2]));
        assert_eq!(result[6], SubstrateSet::of(&[0, 2, 4, 6]));
        assert_eq!(cysteine_pairs(&peptide("CAC"), &limits()), sets(&[&[0, 2]]));
    }

    #[test]
    fn sactipeptide_with_skfh_pairs_distant_acceptors() {
        let cluster = Cluster::new().with_domains(&[DomainType::SkfH]);
        let result = sactipeptide(&peptide("CAAAAAAGC"), &cluster, &limits(), &windows());
        assert_eq!(result, sets(&[&[0, 6], &[0, 7]]));
    }

    #[test]
    fn sactipeptide_assigns_last_cysteine_first() {
        let cluster = Cluster::new();
        let backbone = peptide("CCAAAAAAAAAAAAA");
        let result = sactipeptide(&backbone, &cluster, &limits(), &windows());
        assert!(!result.is_empty());
        assert_eq!(result[0], SubstrateSet::of(&[1, 7, 0, 10]));
        for set in &result {
            assert_eq!(set.get(0), Some(1));
            assert!(set.get(1).unwrap() >= 7);
            assert!(set.get(3).unwrap() >= set.get(1).unwrap() + 3);
            assert!(set.get(3).unwrap() < backbone.len() - 2);
        }
    }

    #[test]
    fn azole_pairs_with_preceding_residue() {
        let cluster = Cluster::new();
        let result = azole(DomainType::LazE, &peptide("CSAC"), &cluster, &limits(), &windows());
        assert_eq!(result, sets(&[&[1, 0], &[3, 2], &[1, 0, 3, 2]]));

        let mcbc = azole(DomainType::McbC, &peptide("CSACC"), &cluster, &limits(), &windows());
        assert_eq!(mcbc, sets(&[&[3, 2, 4, 3]]));

        let patd = azole(DomainType::PatD, &peptide("ACCAC"), &cluster, &limits(), &windows());
        assert_eq!(patd, sets(&[&[1, 0], &[2, 1], &[4, 3], &[1, 0, 4, 3], &[2, 1, 4, 3]]));
    }

    #[test]
    fn azole_in_linear_azole_peptides_keeps_large_subsets() {
        let cluster = Cluster::new().with_type(ClusterType::LinearAzolePeptide);
        let result = azole(DomainType::LazE, &peptide("ACSCSCSA"), &cluster, &limits(), &windows());
        assert!(result.iter().all(|set| set.len() >= 4));
        assert_eq!(result.len(), 15 + 20 + 15 + 6 + 1);
    }

    #[test]
    fn sactipeptide_search_gives_up_on_unsatisfiable_cysteine_runs() {
        let sequence = format!("{}{}", "C".repeat(30), "A".repeat(70));
        let result = sactipeptide(&peptide(&sequence), &Cluster::new(), &limits(), &windows());
        assert!(result.is_empty());
    }

    #[test]
    fn sactipeptide_search_stops_at_attempt_budget() {
        let mut limits = limits();
        limits.max_sampling_attempts = 2;
        let result = sactipeptide(
            &peptide("CCAAAAAAAAAAAAA"),
            &Cluster::new(),
            &limits,
            &windows(),
        );
        assert_eq!(result, sets(&[&[1, 7, 0, 10]]));
    }

    #[test]
    fn pyridine_pairs_serines_a_ring_apart() {
        let cluster = Cluster::new();
        let result = pyridine(
            DomainType::LazC,
            &peptide("ASAAAAAAAASAAS"),
            &cluster,
            &windows(),
        );
        assert_eq!(result, sets(&[&[1, 10, 9], &[1, 13, 12]]));

        let close = pyridine(DomainType::LazC, &peptide("ASAAAASA"), &cluster, &windows());
        assert!(close.is_empty());
    }

    #[test]
    fn pyridine_n_terminal_serine_anchors_lazc_but_not_lazcb() {
        let backbone = peptide("SSAAAAAAAASA");
        let lazc = pyridine(DomainType::LazC, &backbone, &Cluster::new(), &windows());
        assert_eq!(lazc, sets(&[&[0, 10, 9]]));

        let lazcb = pyridine(DomainType::LazCb, &backbone, &Cluster::new(), &windows());
        assert_eq!(lazcb, sets(&[&[1, 10, 9]]));

        let both = Cluster::new().with_domains(&[DomainType::LazCb]);
        assert!(pyridine(DomainType::LazC, &backbone, &both, &windows()).is_empty());
    }
}
