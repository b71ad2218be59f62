//! Site-overlap rules between tailoring domains.
//!
//! Several ribosomal enzymes compete for, or depend on, the same residues. A plan
//! combination that violates one of these rules can never describe a real product,
//! so the combinator drops it before it reaches execution.

use super::plan::ReactionPlan;
use super::reactions::ReactionKind;
use crate::core::cluster::domain::DomainType;
use std::collections::BTreeSet;

/// A constraint between the sites of two groups of domain types.
#[derive(Debug, Clone, Copy)]
enum OverlapRule {
    /// Both groups share at least one site.
    MustOverlap(&'static [DomainType], &'static [DomainType]),
    /// Both groups share at least two sites.
    MustOverlapTwice(&'static [DomainType], &'static [DomainType]),
    /// The groups share no site.
    CannotOverlap(&'static [DomainType], &'static [DomainType]),
    /// Every site of the first group is also a site of the second.
    Subset(&'static [DomainType], &'static [DomainType]),
}

const DEHYDRATASES: &[DomainType] = &[DomainType::LanB, DomainType::LazB];
const CYCLODEHYDRATASES: &[DomainType] = &[DomainType::LazE, DomainType::LazF];
const PYRIDINE_SYNTHASES: &[DomainType] = &[DomainType::LazC, DomainType::LazCb];
const SERINE_CONSUMERS: &[DomainType] = &[
    DomainType::LanB,
    DomainType::LazB,
    DomainType::LanC,
    DomainType::LanM,
];

const RULES: &[OverlapRule] = &[
    OverlapRule::MustOverlap(&[DomainType::LanB], &[DomainType::LanD]),
    OverlapRule::CannotOverlap(&[DomainType::LanC], &[DomainType::LanD]),
    OverlapRule::CannotOverlap(DEHYDRATASES, CYCLODEHYDRATASES),
    OverlapRule::Subset(&[DomainType::LanC], DEHYDRATASES),
    OverlapRule::Subset(&[DomainType::LazF], &[DomainType::LazE]),
    OverlapRule::MustOverlapTwice(PYRIDINE_SYNTHASES, &[DomainType::LazB]),
    OverlapRule::CannotOverlap(&[DomainType::Glycosyltransferase], SERINE_CONSUMERS),
];

impl OverlapRule {
    fn admits(&self, plans: &[ReactionPlan]) -> bool {
        let (a, b) = match *self {
            Self::MustOverlap(a, b)
            | Self::MustOverlapTwice(a, b)
            | Self::CannotOverlap(a, b)
            | Self::Subset(a, b) => (a, b),
        };
        let (Some(left), Some(right)) = (sites_of(plans, a), sites_of(plans, b)) else {
            return true;
        };
        match self {
            Self::MustOverlap(..) => !left.is_disjoint(&right),
            Self::MustOverlapTwice(..) => left.intersection(&right).nth(1).is_some(),
            Self::CannotOverlap(..) => left.is_disjoint(&right),
            Self::Subset(..) => left.is_subset(&right),
        }
    }
}

/// Positions a plan touches for overlap purposes.
///
/// Paired reactions list the modified residue first in each pair; only those
/// count, not the partner residue. A pyridine site is its two serines followed by
/// the residue whose carbonyl closes the ring, and only the serines count.
fn plan_sites(plan: &ReactionPlan) -> impl Iterator<Item = usize> + '_ {
    let (stride, count) = match plan.reaction {
        ReactionKind::Azoline | ReactionKind::Azole | ReactionKind::Lanthionine => (2, usize::MAX),
        ReactionKind::Pyridine => (1, 2),
        _ => (1, usize::MAX),
    };
    plan.substrates.modules().step_by(stride).take(count)
}

/// Union of sites over all plans whose domain is one of `kinds`, or `None` when
/// no such plan is present.
fn sites_of(plans: &[ReactionPlan], kinds: &[DomainType]) -> Option<BTreeSet<usize>> {
    let mut matched = plans
        .iter()
        .filter(|plan| kinds.contains(&plan.domain.kind))
        .peekable();
    matched.peek()?;
    Some(matched.flat_map(plan_sites).collect())
}

/// Whether a plan combination satisfies every overlap rule.
pub fn admits(plans: &[ReactionPlan]) -> bool {
    RULES.iter().all(|rule| rule.admits(plans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cluster::domain::Domain;
    use crate::engine::plan::SubstrateSet;

    fn plan(kind: DomainType, positions: &[usize]) -> ReactionPlan {
        let reaction = ReactionKind::for_domain(kind).unwrap();
        ReactionPlan::new(Domain::new(kind), SubstrateSet::of(positions), reaction)
    }

    #[test]
    fn dehydratase_and_cyclodehydratase_cannot_share_a_residue() {
        let lan_b = [plan(DomainType::LanB, &[1]), plan(DomainType::LanB, &[3])];
        let laz_e = [
            plan(DomainType::LazE, &[1, 0]),
            plan(DomainType::LazE, &[3, 2]),
        ];
        let admitted = lan_b
            .iter()
            .flat_map(|b| laz_e.iter().map(move |e| vec![b.clone(), e.clone()]))
            .filter(|combination| admits(combination))
            .count();
        assert_eq!(admitted, 2);
    }

    #[test]
    fn azoline_partner_residue_does_not_count_as_a_site() {
        let combination = [plan(DomainType::LanB, &[0]), plan(DomainType::LazE, &[1, 0])];
        assert!(admits(&combination));
    }

    #[test]
    fn lan_d_must_act_at_a_dehydrated_residue() {
        assert!(!admits(&[
            plan(DomainType::LanB, &[1]),
            plan(DomainType::LanD, &[4, 9]),
        ]));
        assert!(admits(&[
            plan(DomainType::LanB, &[1, 4]),
            plan(DomainType::LanD, &[4, 9]),
        ]));
    }

    #[test]
    fn lanthionine_sites_must_be_dehydrated_and_avoid_lan_d() {
        let lan_c = plan(DomainType::LanC, &[1, 5]);
        assert!(admits(&[plan(DomainType::LanB, &[1]), lan_c.clone()]));
        assert!(!admits(&[plan(DomainType::LanB, &[2]), lan_c.clone()]));
        assert!(!admits(&[
            plan(DomainType::LanB, &[1, 4]),
            lan_c,
            plan(DomainType::LanD, &[1, 9]),
        ]));
    }

    #[test]
    fn pyridine_needs_two_dehydrated_serines() {
        let pyridine = plan(DomainType::LazC, &[1, 10, 9]);
        assert!(!admits(&[plan(DomainType::LazB, &[1]), pyridine.clone()]));
        assert!(!admits(&[plan(DomainType::LazB, &[1, 9]), pyridine.clone()]));
        assert!(admits(&[plan(DomainType::LazB, &[1, 10]), pyridine]));
        assert!(admits(&[
            plan(DomainType::LazB, &[1, 9, 10]),
            plan(DomainType::LazCb, &[1, 10, 9]),
        ]));
    }

    #[test]
    fn glycosylated_hydroxyls_are_not_dehydrated() {
        let glycosylation = plan(DomainType::Glycosyltransferase, &[2]);
        assert!(!admits(&[plan(DomainType::LanB, &[2, 4]), glycosylation.clone()]));
        assert!(admits(&[plan(DomainType::LanB, &[4]), glycosylation]));
    }

    #[test]
    fn rules_without_both_sides_present_always_pass() {
        assert!(admits(&[]));
        assert!(admits(&[plan(DomainType::LanD, &[4, 9])]));
        assert!(admits(&[plan(DomainType::LanC, &[1, 5])]));
        assert!(!admits(&[
            plan(DomainType::LazE, &[3, 2]),
            plan(DomainType::LazF, &[5, 4]),
        ]));
    }
}
