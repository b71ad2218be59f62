use super::reactions::ReactionKind;
use crate::core::cluster::domain::Domain;
use crate::core::cluster::sugar::Sugar;
use std::fmt;

/// One entry of a [`SubstrateSet`]: a backbone position or a group separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiteEntry {
    Module(usize),
    Spacer,
}

/// An ordered selection of backbone positions identifying one candidate reaction
/// site. Spacers split the selection into sub-groups that composite reactions
/// treat differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubstrateSet {
    entries: Vec<SiteEntry>,
}

impl SubstrateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spacer-free set over `positions`, in the given order.
    pub fn of(positions: &[usize]) -> Self {
        Self {
            entries: positions.iter().copied().map(SiteEntry::Module).collect(),
        }
    }

    pub fn push(&mut self, position: usize) {
        self.entries.push(SiteEntry::Module(position));
    }

    pub fn push_spacer(&mut self) {
        self.entries.push(SiteEntry::Spacer);
    }

    /// Appends a spacer followed by `positions` as a new sub-group. An empty group
    /// leaves the set unchanged.
    pub fn with_group(mut self, positions: &[usize]) -> Self {
        if !positions.is_empty() {
            self.push_spacer();
            self.entries
                .extend(positions.iter().copied().map(SiteEntry::Module));
        }
        self
    }

    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    /// The n-th backbone position, skipping spacers.
    pub fn get(&self, n: usize) -> Option<usize> {
        self.modules().nth(n)
    }

    /// Backbone positions in order, spacers skipped.
    pub fn modules(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            SiteEntry::Module(position) => Some(*position),
            SiteEntry::Spacer => None,
        })
    }

    /// Splits the set at spacers. Empty sub-groups are dropped.
    pub fn groups(&self) -> Vec<SubstrateSet> {
        self.entries
            .split(|entry| *entry == SiteEntry::Spacer)
            .filter(|group| !group.is_empty())
            .map(|group| Self {
                entries: group.to_vec(),
            })
            .collect()
    }

    pub fn group(&self, index: usize) -> Option<SubstrateSet> {
        self.groups().into_iter().nth(index)
    }

    pub fn contains(&self, position: usize) -> bool {
        self.modules().any(|p| p == position)
    }

    /// Number of backbone positions, spacers excluded.
    pub fn len(&self) -> usize {
        self.modules().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SubstrateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match entry {
                SiteEntry::Module(position) => write!(f, "{position}")?,
                SiteEntry::Spacer => f.write_str("|")?,
            }
        }
        f.write_str("]")
    }
}

/// One concrete, executable edit: a domain acting through a reaction on a site.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionPlan {
    pub domain: Domain,
    pub substrates: SubstrateSet,
    pub reaction: ReactionKind,
    /// Position of the plan's domain in the annotation order; breaks priority ties.
    pub order: usize,
    /// Sugar transferred by a glycosylation plan.
    pub sugar: Option<Sugar>,
}

impl ReactionPlan {
    pub fn new(domain: Domain, substrates: SubstrateSet, reaction: ReactionKind) -> Self {
        Self {
            domain,
            substrates,
            reaction,
            order: 0,
            sugar: None,
        }
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_sugar(mut self, sugar: Sugar) -> Self {
        self.sugar = Some(sugar);
        self
    }

    /// A plan for the same domain and reaction over a different site. Used by
    /// composite reactions to run their steps.
    pub fn derive(&self, substrates: SubstrateSet, reaction: ReactionKind) -> Self {
        Self {
            domain: self.domain.clone(),
            substrates,
            reaction,
            order: self.order,
            sugar: self.sugar.clone(),
        }
    }

    pub fn priority(&self) -> u32 {
        self.reaction.priority()
    }
}

/// The priority-ordered plans executed by one branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanCombination {
    plans: Vec<ReactionPlan>,
}

impl PlanCombination {
    /// Orders `plans` by reaction priority. The sort is stable and ties fall back
    /// to creation order.
    pub fn new(mut plans: Vec<ReactionPlan>) -> Self {
        plans.sort_by_key(|plan| (plan.priority(), plan.order));
        Self { plans }
    }

    pub fn plans(&self) -> &[ReactionPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
