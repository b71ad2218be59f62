//! Expansion of per-domain candidate sites into executable plan combinations.
//!
//! Every tailoring domain picks at most one of its candidate sites; a combination
//! is one such pick across all domains of a backbone. The product is walked with
//! an odometer, last domain fastest, so the output order depends only on the input
//! order. Two ceilings bound the walk: accepted combinations, and raw tuples
//! examined regardless of whether the overlap rules admit them.

use super::config::SearchLimits;
use super::overlap;
use super::plan::{PlanCombination, ReactionPlan, SubstrateSet};
use super::reactions::ReactionKind;
use crate::core::cluster::domain::Domain;
use crate::core::cluster::sugar::Sugar;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// The accepted combinations of one backbone.
#[derive(Debug, Clone, Default)]
pub struct CombinationSet {
    pub combinations: Vec<PlanCombination>,
    /// Set when a ceiling stopped the walk before the product was exhausted.
    pub truncated: bool,
    /// Product tuples examined, accepted or rejected.
    pub scanned: usize,
}

/// Builds the plan combinations for one backbone from its annotated domains.
///
/// `candidates` is in annotation order; that order fixes both the product order and
/// the tie-break between plans of equal priority. Domains without a reaction are
/// skipped, and a domain with no remaining candidates contributes no plan. An
/// admitted tuple containing glycosylation plans yields one combination per entry
/// of `sugars`, in order.
#[instrument(level = "debug", skip_all, name = "combination_task")]
pub fn combine(
    candidates: &[(Domain, Vec<SubstrateSet>)],
    sugars: &[Vec<Sugar>],
    limits: &SearchLimits,
) -> CombinationSet {
    let mut lists = plan_lists(candidates);
    drop_repeated_once_only(&mut lists);
    lists.retain(|list| !list.is_empty());

    let mut odometer = vec![0usize; lists.len()];
    let mut result = CombinationSet::default();
    let mut rejected = 0usize;

    'walk: loop {
        if result.scanned == limits.max_combination_scan {
            result.truncated = true;
            break;
        }
        result.scanned += 1;

        let plans: Vec<ReactionPlan> = lists
            .iter()
            .zip(&odometer)
            .map(|(list, &i)| list[i].clone())
            .collect();
        if overlap::admits(&plans) {
            for variant in with_sugars(plans, sugars) {
                if result.combinations.len() == limits.max_combinations {
                    result.truncated = true;
                    break 'walk;
                }
                result.combinations.push(PlanCombination::new(variant));
            }
        } else {
            rejected += 1;
        }

        if !advance(&mut odometer, &lists) {
            break;
        }
    }

    debug!(
        domains = lists.len(),
        scanned = result.scanned,
        rejected,
        accepted = result.combinations.len(),
        truncated = result.truncated,
        "Combined reaction plans."
    );
    result
}

fn plan_lists(candidates: &[(Domain, Vec<SubstrateSet>)]) -> Vec<Vec<ReactionPlan>> {
    candidates
        .iter()
        .enumerate()
        .filter_map(|(order, (domain, sets))| {
            let Some(reaction) = ReactionKind::for_domain(domain.kind) else {
                trace!(domain = %domain.kind, "No reaction registered, skipping domain.");
                return None;
            };
            Some(
                sets.iter()
                    .map(|set| {
                        ReactionPlan::new(domain.clone(), set.clone(), reaction).with_order(order)
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Keeps every candidate of the first domain that runs a once-only reaction and
/// empties later domains running the same reaction.
fn drop_repeated_once_only(lists: &mut [Vec<ReactionPlan>]) {
    let mut seen = HashSet::new();
    for list in lists.iter_mut() {
        let Some(first) = list.first() else {
            continue;
        };
        if first.reaction.is_once_only() && !seen.insert(first.reaction) {
            trace!(domain = %first.domain.kind, reaction = ?first.reaction, "Reaction already claimed by an earlier domain.");
            list.clear();
        }
    }
}

/// One variant of `plans` per sugar combination, the x-th sugar going to the x-th
/// glycosylation plan in domain order. Plans without glycosylation, or a cluster
/// without sugars, give back `plans` unchanged. Glycosylations left over when a
/// sugar combination runs short stay without a sugar and fail at execution.
fn with_sugars(plans: Vec<ReactionPlan>, sugars: &[Vec<Sugar>]) -> Vec<Vec<ReactionPlan>> {
    let glycosylates = plans
        .iter()
        .any(|plan| plan.reaction == ReactionKind::Glycosylation);
    if !glycosylates || sugars.is_empty() {
        return vec![plans];
    }
    sugars
        .iter()
        .map(|combination| {
            let mut next = combination.iter();
            plans
                .iter()
                .map(|plan| match plan.reaction {
                    ReactionKind::Glycosylation => match next.next() {
                        Some(sugar) => plan.clone().with_sugar(sugar.clone()),
                        None => plan.clone(),
                    },
                    _ => plan.clone(),
                })
                .collect()
        })
        .collect()
}

/// Steps the odometer, last slot fastest. Returns `false` once every tuple has
/// been produced.
fn advance(odometer: &mut [usize], lists: &[Vec<ReactionPlan>]) -> bool {
    for slot in (0..odometer.len()).rev() {
        odometer[slot] += 1;
        if odometer[slot] < lists[slot].len() {
            return true;
        }
        odometer[slot] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cluster::domain::DomainType;

    fn candidate(kind: DomainType, sets: &[&[usize]]) -> (Domain, Vec<SubstrateSet>) {
        (
            Domain::new(kind),
            sets.iter().map(|s| SubstrateSet::of(s)).collect(),
        )
    }

    fn sites(combination: &PlanCombination) -> Vec<SubstrateSet> {
        combination
            .plans()
            .iter()
            .map(|plan| plan.substrates.clone())
            .collect()
    }

    #[test]
    fn zero_enzymes_yield_one_empty_combination() {
        let result = combine(&[], &[], &SearchLimits::default());
        assert_eq!(result.combinations.len(), 1);
        assert!(result.combinations[0].is_empty());
        assert!(!result.truncated);

        let unregistered = combine(
            &[candidate(DomainType::Adenylation, &[&[0]])],
            &[],
            &SearchLimits::default(),
        );
        assert_eq!(unregistered.combinations.len(), 1);
        assert!(unregistered.combinations[0].is_empty());
    }

    #[test]
    fn product_varies_last_domain_fastest() {
        let result = combine(
            &[
                candidate(DomainType::NMethyltransferase, &[&[0], &[1]]),
                candidate(DomainType::CMethyltransferase, &[&[2], &[3]]),
            ],
            &[],
            &SearchLimits::default(),
        );
        let all: Vec<Vec<SubstrateSet>> = result.combinations.iter().map(sites).collect();
        let of = SubstrateSet::of;
        assert_eq!(
            all,
            vec![
                vec![of(&[0]), of(&[2])],
                vec![of(&[0]), of(&[3])],
                vec![of(&[1]), of(&[2])],
                vec![of(&[1]), of(&[3])],
            ]
        );
    }

    #[test]
    fn empty_candidate_list_contributes_no_site() {
        let result = combine(
            &[
                candidate(DomainType::NMethyltransferase, &[&[0], &[1]]),
                candidate(DomainType::OMethyltransferase, &[]),
            ],
            &[],
            &SearchLimits::default(),
        );
        assert_eq!(result.combinations.len(), 2);
        assert!(result.combinations.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn combinations_are_sorted_by_priority() {
        let result = combine(
            &[
                candidate(DomainType::MdnD, &[&[0]]),
                candidate(DomainType::LanB, &[&[1]]),
            ],
            &[],
            &SearchLimits::default(),
        );
        let kinds: Vec<ReactionKind> = result.combinations[0]
            .plans()
            .iter()
            .map(|plan| plan.reaction)
            .collect();
        assert_eq!(
            kinds,
            vec![ReactionKind::LanthipeptideDehydration, ReactionKind::NAcetylation]
        );
    }

    #[test]
    fn once_only_reactions_keep_only_their_first_domain() {
        let result = combine(
            &[
                candidate(DomainType::PatG, &[&[0, 5], &[1, 5]]),
                candidate(DomainType::YmF, &[&[0, 5]]),
                candidate(DomainType::NMethyltransferase, &[&[2], &[3]]),
            ],
            &[],
            &SearchLimits::default(),
        );
        assert_eq!(result.combinations.len(), 4);
        let mut macrocycles = Vec::new();
        for combination in &result.combinations {
            let plans: Vec<&ReactionPlan> = combination
                .plans()
                .iter()
                .filter(|plan| plan.reaction == ReactionKind::Macrocyclization)
                .collect();
            assert_eq!(plans.len(), 1);
            assert_eq!(plans[0].domain.kind, DomainType::PatG);
            macrocycles.push(plans[0].substrates.clone());
        }
        let of = SubstrateSet::of;
        assert_eq!(macrocycles, vec![of(&[0, 5]), of(&[0, 5]), of(&[1, 5]), of(&[1, 5])]);
    }

    #[test]
    fn repeatable_cyclizations_keep_every_alternative() {
        let result = combine(
            &[candidate(DomainType::AsparagineSynthase, &[&[0, 6], &[0, 8]])],
            &[],
            &SearchLimits::default(),
        );
        let all: Vec<Vec<SubstrateSet>> = result.combinations.iter().map(sites).collect();
        let of = SubstrateSet::of;
        assert_eq!(all, vec![vec![of(&[0, 6])], vec![of(&[0, 8])]]);

        let terminal = combine(
            &[candidate(DomainType::LanD, &[&[1, 9], &[3, 9]])],
            &[],
            &SearchLimits::default(),
        );
        assert_eq!(terminal.combinations.len(), 2);
    }

    #[test]
    fn overlap_rejections_do_not_count_against_the_ceiling() {
        let limits = SearchLimits {
            max_combinations: 2,
            ..SearchLimits::default()
        };
        let result = combine(
            &[
                candidate(DomainType::LanB, &[&[1], &[3]]),
                candidate(DomainType::LazE, &[&[1, 0], &[3, 2]]),
            ],
            &[],
            &limits,
        );
        assert_eq!(result.scanned, 4);
        assert_eq!(result.combinations.len(), 2);
        assert!(!result.truncated);
        let of = SubstrateSet::of;
        assert_eq!(sites(&result.combinations[0]), vec![of(&[1]), of(&[3, 2])]);
        assert_eq!(sites(&result.combinations[1]), vec![of(&[3]), of(&[1, 0])]);
    }

    #[test]
    fn ceilings_truncate_deterministically() {
        let candidates = [
            candidate(DomainType::NMethyltransferase, &[&[0], &[1], &[2]]),
            candidate(DomainType::CMethyltransferase, &[&[3], &[4]]),
        ];
        let accepted = combine(
            &candidates,
            &[],
            &SearchLimits {
                max_combinations: 4,
                ..SearchLimits::default()
            },
        );
        assert_eq!(accepted.combinations.len(), 4);
        assert!(accepted.truncated);

        let scanned = combine(
            &candidates,
            &[],
            &SearchLimits {
                max_combination_scan: 3,
                ..SearchLimits::default()
            },
        );
        assert_eq!(scanned.scanned, 3);
        assert_eq!(scanned.combinations.len(), 3);
        assert!(scanned.truncated);

        let again = combine(
            &candidates,
            &[],
            &SearchLimits {
                max_combinations: 4,
                ..SearchLimits::default()
            },
        );
        assert_eq!(accepted.combinations, again.combinations);
    }

    #[test]
    fn glycosylations_take_sugars_in_domain_order() {
        let glucose = Sugar::named("glucose").unwrap();
        let olivose = Sugar::named("olivose").unwrap();
        let rhamnose = Sugar::named("rhamnose").unwrap();
        let sugars = vec![
            vec![glucose.clone(), olivose.clone()],
            vec![rhamnose.clone()],
        ];
        let result = combine(
            &[
                candidate(DomainType::Glycosyltransferase, &[&[1]]),
                candidate(DomainType::NMethyltransferase, &[&[0]]),
                candidate(DomainType::Glycosyltransferase, &[&[3]]),
            ],
            &sugars,
            &SearchLimits::default(),
        );
        let assigned: Vec<Vec<Option<&Sugar>>> = result
            .combinations
            .iter()
            .map(|combination| {
                combination
                    .plans()
                    .iter()
                    .filter(|plan| plan.reaction == ReactionKind::Glycosylation)
                    .map(|plan| plan.sugar.as_ref())
                    .collect()
            })
            .collect();
        assert_eq!(
            assigned,
            vec![
                vec![Some(&glucose), Some(&olivose)],
                vec![Some(&rhamnose), None],
            ]
        );
    }

    #[test]
    fn sugars_do_not_multiply_combinations_without_glycosylation() {
        let sugars = vec![
            vec![Sugar::named("glucose").unwrap()],
            vec![Sugar::named("rhamnose").unwrap()],
        ];
        let result = combine(
            &[candidate(DomainType::NMethyltransferase, &[&[0], &[1]])],
            &sugars,
            &SearchLimits::default(),
        );
        assert_eq!(result.combinations.len(), 2);
        assert!(result.combinations.iter().all(|c| c.plans()[0].sugar.is_none()));
    }
}
